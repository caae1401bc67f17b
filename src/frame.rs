//! Loop frames: the bookkeeping record of one active foreach nesting level.

use std::fmt::{self, Display, Formatter};

use crate::params::Bound;

/// Identifies a loop head in a generated protocol.
///
/// Ids are assigned by the generator, one per foreach construct, and are
/// emitted as constants so they cannot change at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoopId(pub u32);

impl Display for LoopId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Iteration progress of one active loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopFrame {
    id: LoopId,
    current: usize,
    last: usize,
}

impl LoopFrame {
    /// Start a frame at iteration 0 whose final iteration is `bound - 1`.
    pub fn new(id: LoopId, bound: Bound) -> Self {
        Self {
            id,
            current: 0,
            last: bound.get() - 1,
        }
    }

    pub fn id(&self) -> LoopId {
        self.id
    }

    /// Zero-based index of the iteration in progress.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Zero-based index of the final permitted iteration.
    pub fn last(&self) -> usize {
        self.last
    }

    pub fn bound(&self) -> usize {
        self.last + 1
    }

    /// True while the current index is within the loop bounds.
    pub fn can_enter(&self) -> bool {
        self.current <= self.last
    }

    /// True if more iterations remain after the current one.
    pub fn has_next(&self) -> bool {
        self.current < self.last
    }

    /// Iterations not yet started, counting the current one.
    pub fn remaining(&self) -> usize {
        self.bound().saturating_sub(self.current)
    }

    pub(crate) fn advance(&mut self) {
        self.current += 1;
    }
}

impl Display for LoopFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}: {}/{}}}", self.id, self.current, self.last)
    }
}
