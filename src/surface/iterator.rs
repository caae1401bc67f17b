//! Producer/consumer iteration over a single-slot hand-off.
//!
//! `enter` on a loop head returns a [`Foreach`] of body states together with
//! the post-loop continuation. The first body state is available
//! immediately; each later one is produced by the `end` hook of the previous
//! body's last state, which either hands over the next body state or pops
//! the loop's frame and closes the sequence.
//!
//! ```ignore
//! let (bodies, after) = head.enter()?;
//! for body in bodies {
//!     body.send_foo(1)?.end()?;
//! }
//! let next = after.send_bar("done".into())?;
//! ```
//!
//! The sequence and the continuation are reachable at the same time. The
//! sequence must be drained first: the continuation's transition fails with
//! [`LoopError::PrematureExit`] while the loop still has a frame on the
//! stack.

use std::fmt::{self, Debug, Formatter};
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::trace;

use crate::error::{LoopError, Result};
use crate::frame::LoopId;
use crate::instance::Instance;
use crate::state::{LoopHead, Point, StateCore};

/// Producer side of a loop's hand-off, held by the states of its body.
///
/// The buffer holds exactly one body state. Clones share the same slot, and
/// closing one closes the sequence for all of them.
pub struct Sequencer<S> {
    id: LoopId,
    slot: Arc<Mutex<Option<mpsc::Sender<S>>>>,
}

impl<S> Sequencer<S> {
    fn channel(id: LoopId) -> (Self, Foreach<S>) {
        let (tx, rx) = mpsc::channel(1);
        let sequencer = Self {
            id,
            slot: Arc::new(Mutex::new(Some(tx))),
        };
        (sequencer, Foreach { id, rx })
    }

    /// Loop whose body states this sequencer hands over.
    pub fn id(&self) -> LoopId {
        self.id
    }

    pub fn is_closed(&self) -> bool {
        self.lock().as_ref().map_or(true, mpsc::Sender::is_closed)
    }

    /// Hand over the next body state, blocking while the previous one has
    /// not been taken.
    fn put(&self, item: S) -> Result<()> {
        let closed = LoopError::HandOffClosed { id: self.id };
        let tx = self.lock().clone().ok_or_else(|| closed.clone())?;
        match tx.try_send(item) {
            Ok(()) => {}
            Err(TrySendError::Full(item)) => {
                trace!(loop_id = %self.id, "hand-off full, waiting for consumer");
                tx.blocking_send(item).map_err(|_| closed)?;
            }
            Err(TrySendError::Closed(_)) => return Err(closed),
        }
        trace!(loop_id = %self.id, "body state handed over");
        Ok(())
    }

    fn close(&self) {
        self.lock().take();
        trace!(loop_id = %self.id, "sequence closed");
    }

    fn lock(&self) -> MutexGuard<'_, Option<mpsc::Sender<S>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> Clone for Sequencer<S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<S> Debug for Sequencer<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequencer")
            .field("id", &self.id)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Lazy, finite, non-restartable sequence of body states.
///
/// As an [`Iterator`] it blocks the calling thread until the previous body
/// has ended, so it must not be drained from inside an async runtime; use
/// the [`Stream`] impl there instead.
///
/// Dropping the sequence before it is drained makes the next `end` hook
/// fail with [`LoopError::HandOffClosed`]. Holding on to it without
/// draining it, while another thread waits to hand over a body state,
/// blocks that thread forever. The same holds on a single thread: asking
/// for the next body state (for example through `collect`) while still
/// holding the current, unended one blocks the caller forever.
#[derive(Debug)]
pub struct Foreach<S> {
    id: LoopId,
    rx: mpsc::Receiver<S>,
}

impl<S> Foreach<S> {
    pub fn id(&self) -> LoopId {
        self.id
    }
}

impl<S> Iterator for Foreach<S> {
    type Item = S;

    fn next(&mut self) -> Option<S> {
        self.rx.blocking_recv()
    }
}

impl<S> Stream for Foreach<S> {
    type Item = S;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

/// Iterator-surface transitions of a loop head.
pub trait IteratorHead: LoopHead + Sized {
    /// First state of the loop body.
    type Body;
    /// Post-loop continuation.
    type Exit;

    fn body(instance: &Instance, foreach: Sequencer<Self::Body>) -> Self::Body;

    /// Build the continuation. Called on the head itself so the
    /// continuation can inherit the hand-off of an enclosing loop.
    fn after(&self, instance: &Instance) -> Self::Exit;

    /// Enter the loop, returning its body sequence and the continuation.
    fn enter(self) -> Result<(Foreach<Self::Body>, Self::Exit)> {
        let instance = self.core().consume()?;
        let frame = instance.activate(Self::ID, Self::PARAM)?;
        let (foreach, sequence) = Sequencer::channel(Self::ID);
        if frame.can_enter() {
            instance.iteration(&frame);
            foreach
                .put(Self::body(instance, foreach.clone()))
                .map_err(|e| instance.abort(e))?;
        } else {
            instance.exit(Self::ID)?;
            foreach.close();
        }
        Ok((sequence, self.after(instance)))
    }
}

/// Body-completion hook of the last state in a loop body.
pub trait IteratorTail: Point + Sized {
    /// First state of the loop body this tail belongs to.
    type Body;

    fn sequencer(&self) -> &Sequencer<Self::Body>;

    fn next_body(instance: &Instance, foreach: Sequencer<Self::Body>) -> Self::Body;

    /// End this iteration: hand over the next body state, or pop the loop
    /// and close its sequence once the bound is reached.
    fn end(self) -> Result<()> {
        let instance = self.core().consume()?;
        let foreach = self.sequencer();
        let frame = instance.complete(foreach.id())?;
        if frame.can_enter() {
            instance.iteration(&frame);
            foreach
                .put(Self::next_body(instance, foreach.clone()))
                .map_err(|e| instance.abort(e))?;
        } else {
            instance.exit(foreach.id())?;
            foreach.close();
        }
        Ok(())
    }
}

/// Consume a post-loop continuation at a send point.
///
/// Fails with [`LoopError::PrematureExit`] while loop `id` has not been
/// drained.
pub fn send_after<'a, T>(
    core: &'a StateCore,
    id: LoopId,
    label: &'static str,
    payload: T,
) -> Result<&'a Instance> {
    let instance = core.consume()?;
    instance.ensure_closed(id)?;
    instance.accept(label, payload);
    Ok(instance)
}

/// Consume a terminal post-loop continuation.
pub fn terminate_after(core: &StateCore, id: LoopId) -> Result<()> {
    let instance = core.consume()?;
    instance.ensure_closed(id)?;
    instance.terminate()
}
