//! Generated endpoints for the nested one-to-many protocol
//!
//! ```text
//! foreach A[i:1..k] {
//!   foreach A[j:1..k] {
//!     foo(int) to A[j];
//!   }
//!   bar(string) to A[i];
//! }
//! ```
//!
//! One module per surface. Each declares the same protocol points:
//!
//! ```text
//! Outer ──enter──▶ Inner ──enter──▶ InnerBody ──foo──▶ (back to Inner)
//!   │                │
//!   exit            exit──▶ AfterInner ──bar──▶ (back to Outer)
//!   ▼
//! Done
//! ```
//!
//! The iterator and callback surfaces add explicit body-end states
//! (`InnerEnd`, `OuterEnd`) where the completion hook runs.
//!
//! ```
//! use rumpsteak_foreach::nested::polling;
//! use rumpsteak_foreach::{Instance, ParamTable, PollingHead};
//!
//! let instance = Instance::new(ParamTable::new().with("k", 2));
//! let mut outer = polling::start(&instance);
//! while outer.has_more() {
//!     let mut inner = outer.enter()?;
//!     while inner.has_more() {
//!         inner = inner.enter()?.send_foo(42)?;
//!     }
//!     outer = inner.exit()?.send_bar("done".to_string())?;
//! }
//! outer.exit()?.end()?;
//! # Ok::<(), rumpsteak_foreach::LoopError>(())
//! ```
//!
//! Transitions take the state by value, so a state cannot be reused once
//! it has moved on:
//!
//! ```compile_fail
//! use rumpsteak_foreach::nested::polling;
//! use rumpsteak_foreach::{Instance, ParamTable, PollingHead};
//!
//! let instance = Instance::new(ParamTable::new().with("k", 2));
//! let outer = polling::start(&instance);
//! let _inner = outer.enter();
//! let _again = outer.enter();
//! ```

use crate::frame::LoopId;

pub mod callback;
pub mod iterator;
pub mod polling;

/// Id of the `foreach A[i]` loop.
pub const OUTER: LoopId = LoopId(0);
/// Id of the `foreach A[j]` loop.
pub const INNER: LoopId = LoopId(1);
/// Parameter bounding both loops: role `A(k)`.
pub const K: &str = "k";
