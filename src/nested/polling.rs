//! Polling endpoints: each body ends by returning to its loop head.

use super::{INNER, K, OUTER};
use crate::error::Result;
use crate::frame::LoopId;
use crate::instance::Instance;
use crate::state::LoopHead;
use crate::surface::PollingHead;

crate::protocol_state! {
    /// Initial state, and head of the outer foreach.
    pub struct Outer: LoopHead;
}

crate::protocol_state! {
    /// Head of the inner foreach; first state of the outer body.
    pub struct Inner: LoopHead;
}

crate::protocol_state! {
    /// Body of the inner foreach.
    pub struct InnerBody: BodyEntry;
}

crate::protocol_state! {
    /// Rest of the outer body, after the inner foreach.
    pub struct AfterInner: BodyContinuation;
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

impl PollingHead for Outer {
    type Body = Inner;
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

impl PollingHead for Inner {
    type Body = InnerBody;
    type Exit = AfterInner;

    fn body(instance: &Instance) -> InnerBody {
        InnerBody::new(instance)
    }

    fn after(instance: &Instance) -> AfterInner {
        AfterInner::new(instance)
    }
}

impl InnerBody {
    /// `foo(int) to A[j]`, the only statement of the inner body.
    pub fn send_foo(self, v: i64) -> Result<Inner> {
        let instance = self.core.send("foo", v)?;
        Ok(Inner::new(instance))
    }
}

impl AfterInner {
    /// `bar(string) to A[i]`, the last statement of the outer body.
    pub fn send_bar(self, v: String) -> Result<Outer> {
        let instance = self.core.send("bar", v)?;
        Ok(Outer::new(instance))
    }
}

impl Done {
    pub fn end(self) -> Result<()> {
        self.core.terminate()
    }
}
