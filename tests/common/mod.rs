// Shared drivers for the nested example protocol
//
// Each driver runs the whole protocol through one surface. The recorder
// attached to the instance captures what the engine observed.

#![allow(dead_code)]

use rumpsteak_foreach::nested::{callback, iterator, polling, INNER, OUTER};
use rumpsteak_foreach::{
    CallbackHead, Event, Instance, IteratorHead, IteratorTail, ParamTable, PollingHead, Recorder,
    Result,
};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn recorded(k: usize) -> (Instance, Recorder) {
    init_tracing();
    let recorder = Recorder::new();
    let instance = Instance::with_recorder(ParamTable::new().with("k", k), recorder.clone());
    (instance, recorder)
}

pub fn run_polling(instance: &Instance) -> Result<()> {
    let mut outer = polling::start(instance);
    let mut i = 0;
    while outer.has_more() {
        let mut inner = outer.enter()?;
        let mut j = 0;
        while inner.has_more() {
            inner = inner.enter()?.send_foo(j)?;
            j += 1;
        }
        outer = inner.exit()?.send_bar(format!("outer {}", i))?;
        i += 1;
    }
    outer.exit()?.end()
}

pub fn run_iterator(instance: &Instance) -> Result<()> {
    let (outer_bodies, done) = iterator::start(instance).enter()?;
    for (i, inner) in outer_bodies.enumerate() {
        let (inner_bodies, after) = inner.enter()?;
        for (j, body) in inner_bodies.enumerate() {
            body.send_foo(j as i64)?.end()?;
        }
        after.send_bar(format!("outer {}", i))?.end()?;
    }
    done.end()
}

pub fn run_callback(instance: &Instance) -> Result<()> {
    let mut i = 0;
    callback::start(instance)
        .foreach(|inner| {
            let mut j = 0;
            let after = inner.foreach(|body| {
                j += 1;
                body.send_foo(j)
            })?;
            i += 1;
            after.send_bar(format!("outer {}", i))
        })?
        .end()
}

/// Event order of a complete run where the outer loop runs `outer` times
/// and each inner activation runs `inner` times.
pub fn expected_events(outer: usize, inner: usize) -> Vec<Event> {
    let mut events = vec![Event::Activated {
        id: OUTER,
        bound: outer,
    }];
    for i in 0..outer {
        events.push(Event::Iteration { id: OUTER, index: i });
        events.push(Event::Activated {
            id: INNER,
            bound: inner,
        });
        for j in 0..inner {
            events.push(Event::Iteration { id: INNER, index: j });
            events.push(Event::Sent { label: "foo" });
        }
        events.push(Event::Exited { id: INNER });
        events.push(Event::Sent { label: "bar" });
    }
    events.push(Event::Exited { id: OUTER });
    events.push(Event::Terminated);
    events
}
