//! Callback endpoints: each foreach takes its body as a closure.

use super::{INNER, K, OUTER};
use crate::error::Result;
use crate::frame::LoopId;
use crate::instance::Instance;
use crate::state::LoopHead;
use crate::surface::CallbackHead;

crate::protocol_state! {
    /// Initial state, and head of the outer foreach.
    pub struct Outer: LoopHead;
}

crate::protocol_state! {
    /// Head of the inner foreach; first state of the outer body.
    pub struct Inner: LoopHead;
}

crate::protocol_state! {
    pub struct InnerBody: BodyEntry;
}

crate::protocol_state! {
    /// Ending state of the inner foreach body, returned to `foreach`.
    pub struct InnerEnd: BodyContinuation;
}

crate::protocol_state! {
    pub struct AfterInner: BodyContinuation;
}

crate::protocol_state! {
    /// Ending state of the outer foreach body, returned to `foreach`.
    pub struct OuterEnd: BodyContinuation;
}

crate::protocol_state! {
    pub struct Done: Terminal;
}

pub fn start(instance: &Instance) -> Outer {
    Outer::new(instance)
}

impl LoopHead for Outer {
    const ID: LoopId = OUTER;
    const PARAM: &'static str = K;
}

impl CallbackHead for Outer {
    type Body = Inner;
    type Tail = OuterEnd;
    type Exit = Done;

    fn body(instance: &Instance) -> Inner {
        Inner::new(instance)
    }

    fn after(instance: &Instance) -> Done {
        Done::new(instance)
    }
}

impl LoopHead for Inner {
    const ID: LoopId = INNER;
    const PARAM: &'static str = K;
}

impl CallbackHead for Inner {
    type Body = InnerBody;
    type Tail = InnerEnd;
    type Exit = AfterInner;

    fn body(instance: &Instance) -> InnerBody {
        InnerBody::new(instance)
    }

    fn after(instance: &Instance) -> AfterInner {
        AfterInner::new(instance)
    }
}

impl InnerBody {
    /// `foo(int) to A[j]`.
    pub fn send_foo(self, v: i64) -> Result<InnerEnd> {
        let instance = self.core.send("foo", v)?;
        Ok(InnerEnd::new(instance))
    }
}

impl AfterInner {
    /// `bar(string) to A[i]`.
    pub fn send_bar(self, v: String) -> Result<OuterEnd> {
        let instance = self.core.send("bar", v)?;
        Ok(OuterEnd::new(instance))
    }
}

impl Done {
    pub fn end(self) -> Result<()> {
        self.core.terminate()
    }
}
