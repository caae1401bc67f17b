//! Caller-driven iteration.
//!
//! ```ignore
//! let mut head = start;
//! while head.has_more() {
//!     head = head.enter()?.send_foo(1)?; // body ends back at the head
//! }
//! let next = head.exit()?;
//! ```
//!
//! The last state of a body transitions back to its loop head; re-entering
//! the head advances the loop's frame.

use crate::error::{LoopError, Result};
use crate::instance::Instance;
use crate::state::LoopHead;

/// Polling transitions of a loop head.
///
/// The generator provides the successor types and their constructors.
pub trait PollingHead: LoopHead + Sized {
    /// First state of the loop body.
    type Body;
    /// State after the loop.
    type Exit;

    fn body(instance: &Instance) -> Self::Body;

    fn after(instance: &Instance) -> Self::Exit;

    /// Enter the loop body.
    ///
    /// Fails with [`LoopError::BoundsExceeded`] if the loop has already run
    /// all of its iterations.
    fn enter(self) -> Result<Self::Body> {
        let instance = self.core().consume()?;
        let frame = instance.activate(Self::ID, Self::PARAM)?;
        if !frame.can_enter() {
            return Err(instance.abort(LoopError::BoundsExceeded {
                id: Self::ID,
                current: frame.current(),
                last: frame.last(),
            }));
        }
        instance.iteration(&frame);
        Ok(Self::body(instance))
    }

    /// Leave the loop.
    ///
    /// Fails with [`LoopError::MissingLoopFrame`] if the loop is not the
    /// innermost active one, and with [`LoopError::PrematureExit`] if
    /// iterations remain.
    fn exit(self) -> Result<Self::Exit> {
        let instance = self.core().consume()?;
        instance.exit(Self::ID)?;
        Ok(Self::after(instance))
    }

    /// Whether the body must run again before the loop can be exited. Does
    /// not change state.
    fn has_more(&self) -> bool {
        self.core().instance().has_more(Self::ID)
    }
}
