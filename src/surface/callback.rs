//! Loops driven by the head itself.
//!
//! The caller hands the whole body over as a closure; `foreach` runs every
//! iteration and returns the state after the loop. A nested loop is a
//! nested `foreach` call inside the closure.
//!
//! ```ignore
//! let done = outer.foreach(|inner| {
//!     inner
//!         .foreach(|body| body.send_foo(1))?
//!         .send_bar("sent".into())
//! })?;
//! ```

use crate::error::Result;
use crate::instance::Instance;
use crate::state::{LoopHead, Point};

/// Callback-surface transition of a loop head.
pub trait CallbackHead: LoopHead + Sized {
    /// First state of the loop body.
    type Body;
    /// Last state of the loop body, returned by the closure.
    type Tail: Point;
    /// State after the loop.
    type Exit;

    fn body(instance: &Instance) -> Self::Body;

    fn after(instance: &Instance) -> Self::Exit;

    /// Run the loop to completion, applying `body` once per iteration.
    ///
    /// An error returned by `body` stops the loop and is propagated as is.
    fn foreach<F>(self, mut body: F) -> Result<Self::Exit>
    where
        F: FnMut(Self::Body) -> Result<Self::Tail>,
    {
        let instance = self.core().consume()?;
        let mut frame = instance.activate(Self::ID, Self::PARAM)?;
        while frame.can_enter() {
            instance.iteration(&frame);
            let tail = body(Self::body(instance)).map_err(|e| instance.abort(e))?;
            tail.core().consume()?;
            frame = instance.complete(Self::ID)?;
        }
        instance.exit(Self::ID)?;
        Ok(Self::after(instance))
    }
}
