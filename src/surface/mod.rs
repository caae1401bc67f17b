//! Alternative method sets for generated loop heads.
//!
//! All three run the same loop-head, body-completion and loop-exit
//! algorithms on the instance's loop stack. They differ in who drives the
//! iteration:
//!
//! - [`polling`]: the caller asks `has_more`, then calls `enter` or `exit`.
//! - [`iterator`]: `enter` returns a lazily filled sequence of body states
//!   plus the post-loop continuation.
//! - [`callback`]: `foreach` takes the body as a closure and runs the whole
//!   loop itself.
//!
//! A generated API picks one surface per protocol.

pub mod callback;
pub mod iterator;
pub mod polling;

pub use callback::CallbackHead;
pub use iterator::{Foreach, IteratorHead, IteratorTail, Sequencer};
pub use polling::PollingHead;
