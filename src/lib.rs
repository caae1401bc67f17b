//! Nested foreach tracking for generated session-typed endpoints
//!
//! A protocol generator emits one typestate per protocol point. This crate
//! supplies what those states share at runtime: a one-shot usage guard and a
//! per-instance stack of active loop frames that counts iterations of
//! nested `foreach` loops whose bounds are only known at runtime.
//!
//! Loop heads can expose one of three surfaces, all enforcing the same
//! invariants on the same stack:
//!
//! - [`surface::polling`]: `has_more` / `enter` / `exit`, driven by the caller.
//! - [`surface::iterator`]: `enter` yields a sequence of body states.
//! - [`surface::callback`]: `foreach` takes the loop body as a closure.
//!
//! [`nested`] contains the generated endpoints of the nested one-to-many
//! example protocol for each surface.
//!
//! Every misuse is reported as a [`LoopError`] and aborts the instance it
//! happened on; start a new [`Instance`] to run the protocol again.

pub mod error;
pub mod event;
pub mod frame;
pub mod guard;
pub mod instance;
pub mod nested;
pub mod params;
pub mod stack;
pub mod state;
pub mod surface;

pub use error::{LoopError, Result};
pub use event::{Event, Recorder};
pub use frame::{LoopFrame, LoopId};
pub use guard::UsageGuard;
pub use instance::Instance;
pub use params::{Bound, ParamTable};
pub use stack::{Activation, LoopStack};
pub use state::{LoopHead, Point, Role, StateCore};
pub use surface::{CallbackHead, Foreach, IteratorHead, IteratorTail, PollingHead, Sequencer};
