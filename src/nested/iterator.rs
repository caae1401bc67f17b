//! Iterator endpoints: loop bodies are delivered through a hand-off and
//! each body ends in an explicit `end` state.

use super::{INNER, K, OUTER};
use crate::error::Result;
use crate::frame::LoopId;
use crate::instance::Instance;
use crate::state::LoopHead;
use crate::surface::iterator::{send_after, terminate_after, IteratorHead, IteratorTail, Sequencer};

crate::protocol_state! {
    /// Initial state, and head of the outer foreach.
    pub struct Outer: LoopHead;
}

crate::protocol_state! {
    /// Head of the inner foreach; delivered by the outer sequence.
    pub struct Inner<Inner>: LoopHead;
}

crate::protocol_state! {
    /// Body of the inner foreach; delivered by the inner sequence.
    pub struct InnerBody<InnerBody>: BodyEntry;
}

crate::protocol_state! {
    /// Ending state of the inner foreach body.
    pub struct InnerEnd<InnerBody>: BodyContinuation;
}

crate::protocol_state! {
    /// Rest of the outer body. Usable once the inner sequence is drained.
    pub struct AfterInner<Inner>: BodyContinuation;
}

crate::protocol_state! {
    /// Ending state of the outer foreach body.
    pub struct OuterEnd<Inner>: BodyContinuation;
}

crate::protocol_state! {
    /// Final state. Usable once the outer sequence is drained.
    pub struct Done: Terminal;
}

pub fn start(instance: &Instance) -> Outer {
    Outer::new(instance)
}

impl LoopHead for Outer {
    const ID: LoopId = OUTER;
    const PARAM: &'static str = K;
}

impl IteratorHead for Outer {
    type Body = Inner;
    type Exit = Done;

    fn body(instance: &Instance, foreach: Sequencer<Inner>) -> Inner {
        Inner::new(instance, foreach)
    }

    fn after(&self, instance: &Instance) -> Done {
        Done::new(instance)
    }
}

impl LoopHead for Inner {
    const ID: LoopId = INNER;
    const PARAM: &'static str = K;
}

impl IteratorHead for Inner {
    type Body = InnerBody;
    type Exit = AfterInner;

    fn body(instance: &Instance, foreach: Sequencer<InnerBody>) -> InnerBody {
        InnerBody::new(instance, foreach)
    }

    fn after(&self, instance: &Instance) -> AfterInner {
        AfterInner::new(instance, self.foreach.clone())
    }
}

impl InnerBody {
    /// `foo(int) to A[j]`.
    pub fn send_foo(self, v: i64) -> Result<InnerEnd> {
        let instance = self.core.send("foo", v)?;
        Ok(InnerEnd::new(instance, self.foreach))
    }
}

impl IteratorTail for InnerEnd {
    type Body = InnerBody;

    fn sequencer(&self) -> &Sequencer<InnerBody> {
        &self.foreach
    }

    fn next_body(instance: &Instance, foreach: Sequencer<InnerBody>) -> InnerBody {
        InnerBody::new(instance, foreach)
    }
}

impl AfterInner {
    /// `bar(string) to A[i]`.
    pub fn send_bar(self, v: String) -> Result<OuterEnd> {
        let instance = send_after(&self.core, INNER, "bar", v)?;
        Ok(OuterEnd::new(instance, self.foreach))
    }
}

impl IteratorTail for OuterEnd {
    type Body = Inner;

    fn sequencer(&self) -> &Sequencer<Inner> {
        &self.foreach
    }

    fn next_body(instance: &Instance, foreach: Sequencer<Inner>) -> Inner {
        Inner::new(instance, foreach)
    }
}

impl Done {
    pub fn end(self) -> Result<()> {
        terminate_after(&self.core, OUTER)
    }
}
