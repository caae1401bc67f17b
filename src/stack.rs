//! The foreach stack shared by the states of one protocol instance.
//!
//! The top frame is the innermost active loop. The stack is empty exactly
//! when no loop is active, and a loop id appears at most once on it.

use std::fmt::{self, Display, Formatter};

use crate::error::{LoopError, Result};
use crate::frame::{LoopFrame, LoopId};
use crate::params::Bound;

/// Outcome of running the loop-head algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// A new frame was pushed for the loop.
    Fresh,
    /// The loop's frame was already on top and has been advanced.
    Reentered,
}

/// LIFO collection of active loop frames
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopStack {
    frames: Vec<LoopFrame>,
}

impl LoopStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Frames from outermost to innermost.
    pub fn frames(&self) -> &[LoopFrame] {
        &self.frames
    }

    pub fn top(&self) -> Option<&LoopFrame> {
        self.frames.last()
    }

    /// Whether a frame for `id` is anywhere on the stack.
    pub fn contains(&self, id: LoopId) -> bool {
        self.find(id).is_some()
    }

    pub fn find(&self, id: LoopId) -> Option<&LoopFrame> {
        self.frames.iter().rev().find(|frame| frame.id() == id)
    }

    pub fn push(&mut self, id: LoopId, bound: Bound) {
        self.frames.push(LoopFrame::new(id, bound));
    }

    pub fn pop(&mut self) -> Result<LoopFrame> {
        self.frames.pop().ok_or(LoopError::StackUnderflow)
    }

    /// Run the loop-head algorithm for `id`.
    ///
    /// An empty stack, or a top frame belonging to another loop, starts a
    /// fresh activation with the bound produced by `bound`. A top frame for
    /// `id` is a re-entry after a completed iteration and is advanced. The
    /// bound is only looked up for fresh activations.
    pub fn activate<F>(&mut self, id: LoopId, bound: F) -> Result<(Activation, LoopFrame)>
    where
        F: FnOnce() -> Result<Bound>,
    {
        if self.top().map(LoopFrame::id) != Some(id) && self.contains(id) {
            return Err(LoopError::ProtocolEngineFault(format!(
                "loop {} activated while its frame is buried in {}",
                id, self
            )));
        }
        match self.frames.last_mut() {
            Some(top) if top.id() == id => {
                top.advance();
                Ok((Activation::Reentered, *top))
            }
            _ => {
                let frame = LoopFrame::new(id, bound()?);
                self.frames.push(frame);
                Ok((Activation::Fresh, frame))
            }
        }
    }

    /// Body-completion hook: advance the top frame, which must belong to
    /// `id`.
    pub fn complete(&mut self, id: LoopId) -> Result<LoopFrame> {
        match self.frames.last_mut() {
            Some(top) if top.id() == id => {
                top.advance();
                Ok(*top)
            }
            _ => Err(LoopError::MissingLoopFrame { id }),
        }
    }

    /// Loop-exit algorithm: pop the top frame if it belongs to `id` and no
    /// iterations remain.
    pub fn exit(&mut self, id: LoopId) -> Result<LoopFrame> {
        match self.top().copied() {
            Some(top) if top.id() == id => {
                if top.has_next() {
                    return Err(LoopError::PrematureExit {
                        id,
                        current: top.current(),
                        last: top.last(),
                    });
                }
                self.pop()
            }
            _ => Err(LoopError::MissingLoopFrame { id }),
        }
    }

    /// Whether the head for `id` may still enter its body.
    ///
    /// A loop that is not on top has not been entered yet in this
    /// activation, and bounds are never empty, so it must be entered.
    pub fn has_more(&self, id: LoopId) -> bool {
        match self.top() {
            Some(top) if top.id() == id => top.has_next(),
            _ => true,
        }
    }
}

impl Display for LoopStack {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "stack [")?;
        for (i, frame) in self.frames.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", frame)?;
        }
        write!(f, "]")
    }
}
