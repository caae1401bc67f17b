//! Protocol-instance context.
//!
//! An [`Instance`] owns the loop stack, the parameter table and the optional
//! event recorder of one protocol run. Every state object of the run holds a
//! clone of the same handle; separate runs get separate instances and never
//! share a stack.
//!
//! The first fault raised through an instance aborts it. All later stack
//! operations fail with [`LoopError::ProtocolEngineFault`], so a run can
//! never continue from a half-applied state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::error::{LoopError, Result};
use crate::event::{Event, Recorder};
use crate::frame::{LoopFrame, LoopId};
use crate::params::ParamTable;
use crate::stack::{Activation, LoopStack};

/// Shared handle to the state of one protocol run
#[derive(Debug, Clone)]
pub struct Instance {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    id: Uuid,
    stack: Mutex<LoopStack>,
    params: Mutex<ParamTable>,
    recorder: Option<Recorder>,
    aborted: AtomicBool,
}

impl Instance {
    pub fn new(params: ParamTable) -> Self {
        Self::build(params, None)
    }

    /// Create an instance that reports every engine event to `recorder`.
    pub fn with_recorder(params: ParamTable, recorder: Recorder) -> Self {
        Self::build(params, Some(recorder))
    }

    fn build(params: ParamTable, recorder: Option<Recorder>) -> Self {
        let instance = Self {
            inner: Arc::new(Inner {
                id: Uuid::new_v4(),
                stack: Mutex::new(LoopStack::new()),
                params: Mutex::new(params),
                recorder,
                aborted: AtomicBool::new(false),
            }),
        };
        debug!(instance = %instance.id(), "protocol instance created");
        instance
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Snapshot of the parameter table.
    pub fn params(&self) -> ParamTable {
        self.params_lock().clone()
    }

    /// Change a bound. Frames already on the stack keep the bound they
    /// were pushed with; only later activations see the new value.
    pub fn set_param(&self, name: impl Into<String>, bound: usize) -> Option<usize> {
        self.params_lock().set(name, bound)
    }

    /// Snapshot of the loop stack.
    pub fn stack(&self) -> LoopStack {
        self.stack_lock().clone()
    }

    pub fn depth(&self) -> usize {
        self.stack_lock().depth()
    }

    pub fn top(&self) -> Option<LoopFrame> {
        self.stack_lock().top().copied()
    }

    pub fn is_aborted(&self) -> bool {
        self.inner.aborted.load(Ordering::Acquire)
    }

    /// Mark the instance aborted and hand the error back for propagation.
    pub(crate) fn abort(&self, err: LoopError) -> LoopError {
        if !self.inner.aborted.swap(true, Ordering::AcqRel) {
            warn!(instance = %self.id(), error = %err, "protocol instance aborted");
        }
        err
    }

    fn with_stack<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut LoopStack) -> Result<T>,
    {
        if self.is_aborted() {
            return Err(LoopError::ProtocolEngineFault(format!(
                "instance {} was aborted by an earlier fault",
                self.id()
            )));
        }
        let mut stack = self.stack_lock();
        f(&mut stack).map_err(|e| self.abort(e))
    }

    fn stack_lock(&self) -> MutexGuard<'_, LoopStack> {
        self.inner.stack.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn params_lock(&self) -> MutexGuard<'_, ParamTable> {
        self.inner.params.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: Event) {
        if let Some(recorder) = &self.inner.recorder {
            recorder.record(event);
        }
    }

    /// Loop-head algorithm: push a fresh frame for `id` (bound taken from
    /// `param`) or advance its frame on re-entry. Returns the top frame.
    pub(crate) fn activate(&self, id: LoopId, param: &str) -> Result<LoopFrame> {
        let (activation, frame) = self.with_stack(|stack| {
            stack.activate(id, || self.params_lock().bound(param))
        })?;
        match activation {
            Activation::Fresh => {
                debug!(instance = %self.id(), loop_id = %id, bound = frame.bound(), "loop activated");
                self.emit(Event::Activated {
                    id,
                    bound: frame.bound(),
                });
            }
            Activation::Reentered => {
                trace!(instance = %self.id(), %frame, "loop re-entered");
            }
        }
        Ok(frame)
    }

    /// Record that a body-entry state for `frame`'s current iteration was
    /// produced.
    pub(crate) fn iteration(&self, frame: &LoopFrame) {
        trace!(instance = %self.id(), %frame, "body entered");
        self.emit(Event::Iteration {
            id: frame.id(),
            index: frame.current(),
        });
    }

    /// Body-completion hook for loop `id`.
    pub(crate) fn complete(&self, id: LoopId) -> Result<LoopFrame> {
        let frame = self.with_stack(|stack| stack.complete(id))?;
        trace!(instance = %self.id(), %frame, "body completed");
        Ok(frame)
    }

    /// Loop-exit algorithm for loop `id`.
    pub(crate) fn exit(&self, id: LoopId) -> Result<()> {
        let frame = self.with_stack(|stack| stack.exit(id))?;
        debug!(instance = %self.id(), %frame, "loop exited");
        self.emit(Event::Exited { id });
        Ok(())
    }

    /// Fail with [`LoopError::PrematureExit`] while loop `id` still has a
    /// frame on the stack.
    pub(crate) fn ensure_closed(&self, id: LoopId) -> Result<()> {
        self.with_stack(|stack| match stack.find(id) {
            Some(frame) => Err(LoopError::PrematureExit {
                id,
                current: frame.current(),
                last: frame.last(),
            }),
            None => Ok(()),
        })
    }

    pub(crate) fn has_more(&self, id: LoopId) -> bool {
        !self.is_aborted() && self.stack_lock().has_more(id)
    }

    /// Accept a payload at a send point. Transport is external, so the
    /// payload is dropped here.
    pub(crate) fn accept<T>(&self, label: &'static str, payload: T) {
        trace!(
            instance = %self.id(),
            label,
            payload = std::any::type_name::<T>(),
            "payload accepted"
        );
        drop(payload);
        self.emit(Event::Sent { label });
    }

    /// Consume the terminal state. Every loop must have been exited.
    pub(crate) fn terminate(&self) -> Result<()> {
        self.with_stack(|stack| match stack.top() {
            Some(top) => Err(LoopError::PrematureExit {
                id: top.id(),
                current: top.current(),
                last: top.last(),
            }),
            None => Ok(()),
        })?;
        debug!(instance = %self.id(), "protocol terminated");
        self.emit(Event::Terminated);
        Ok(())
    }
}
