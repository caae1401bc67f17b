//! One-shot usage guard embedded in every protocol state.
//!
//! Transitions consume their receiver, so a moved-from state cannot be used
//! again. State handles can still be cloned, and clones share one guard: the
//! first transition through any alias consumes all of them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{LoopError, Result};

/// Consumed flag shared by every alias of one protocol state.
#[derive(Debug, Clone, Default)]
pub struct UsageGuard {
    used: Arc<AtomicBool>,
}

impl UsageGuard {
    /// Create a fresh, unconsumed guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the guard consumed.
    ///
    /// Fails with [`LoopError::LinearityViolation`] if it was already
    /// consumed, naming `point` as the state that was reused.
    pub fn consume(&self, point: &'static str) -> Result<()> {
        if self.used.swap(true, Ordering::AcqRel) {
            return Err(LoopError::LinearityViolation { point });
        }
        Ok(())
    }

    pub fn is_consumed(&self) -> bool {
        self.used.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_consume_is_violation() {
        let guard = UsageGuard::new();
        assert!(!guard.is_consumed());
        assert_eq!(guard.consume("S0"), Ok(()));
        assert_eq!(
            guard.consume("S0"),
            Err(LoopError::LinearityViolation { point: "S0" })
        );
    }

    #[test]
    fn test_clones_share_consumption() {
        let guard = UsageGuard::new();
        let alias = guard.clone();
        alias.consume("S1").unwrap();
        assert!(guard.is_consumed());
        assert!(guard.consume("S1").is_err());
    }

    #[test]
    fn test_independent_guards() {
        let a = UsageGuard::new();
        let b = UsageGuard::new();
        a.consume("A").unwrap();
        assert!(b.consume("B").is_ok());
    }
}
