// All three surfaces drive the same engine and must be indistinguishable
// from the outside.

mod common;

use common::{expected_events, recorded, run_callback, run_iterator, run_polling};
use rumpsteak_foreach::nested::{callback, iterator, polling, INNER, OUTER};
use rumpsteak_foreach::{
    CallbackHead, Event, Instance, IteratorHead, IteratorTail, LoopHead, PollingHead, Result,
};

#[test]
fn test_polling_event_order() {
    let (instance, recorder) = recorded(2);
    run_polling(&instance).unwrap();
    assert_eq!(recorder.events(), expected_events(2, 2));
    assert_eq!(instance.depth(), 0);
}

#[test]
fn test_iterator_event_order() {
    let (instance, recorder) = recorded(2);
    run_iterator(&instance).unwrap();
    assert_eq!(recorder.events(), expected_events(2, 2));
    assert_eq!(instance.depth(), 0);
}

#[test]
fn test_callback_event_order() {
    let (instance, recorder) = recorded(2);
    run_callback(&instance).unwrap();
    assert_eq!(recorder.events(), expected_events(2, 2));
    assert_eq!(instance.depth(), 0);
}

#[test]
fn test_surfaces_agree() {
    let runs: [fn(&Instance) -> Result<()>; 3] = [run_polling, run_iterator, run_callback];
    let logs: Vec<Vec<Event>> = runs
        .iter()
        .map(|run| {
            let (instance, recorder) = recorded(3);
            run(&instance).unwrap();
            recorder.events()
        })
        .collect();
    assert_eq!(logs[0], logs[1]);
    assert_eq!(logs[1], logs[2]);
}

#[test]
fn test_polling_reentry_advances_by_one() {
    let (instance, _) = recorded(3);
    let inner = polling::start(&instance).enter().unwrap();
    let inner = inner.enter().unwrap().send_foo(1).unwrap();
    let top = instance.top().unwrap();
    assert_eq!((top.id(), top.current(), instance.depth()), (INNER, 0, 2));

    let _body = inner.enter().unwrap();
    let top = instance.top().unwrap();
    assert_eq!((top.id(), top.current(), instance.depth()), (INNER, 1, 2));
}

#[test]
fn test_polling_has_more_before_entry() {
    let (instance, _) = recorded(2);
    let outer = polling::start(&instance);
    assert_eq!(outer.id(), OUTER);
    assert!(outer.has_more());
    let inner = outer.enter().unwrap();
    assert_eq!(inner.id(), INNER);
    // Outer frame on top, inner not entered yet: it must be entered.
    assert!(inner.has_more());
    assert_eq!(instance.depth(), 1);
}

#[test]
fn test_bound_one_exits_after_single_body() {
    let (instance, recorder) = recorded(1);
    let outer = polling::start(&instance);
    let inner = outer.enter().unwrap();
    let inner = inner.enter().unwrap().send_foo(7).unwrap();
    assert!(!inner.has_more());
    assert!(!instance.top().unwrap().has_next());
    let outer = inner.exit().unwrap().send_bar("once".into()).unwrap();
    assert!(!outer.has_more());
    outer.exit().unwrap().end().unwrap();
    assert_eq!(recorder.events(), expected_events(1, 1));
}

#[test]
fn test_iterator_yields_exactly_bound_bodies() {
    let (instance, _) = recorded(4);
    let (outer_bodies, done) = iterator::start(&instance).enter().unwrap();
    let mut outer_count = 0;
    let mut inner_count = 0;
    for inner in outer_bodies {
        outer_count += 1;
        let (inner_bodies, after) = inner.enter().unwrap();
        for body in inner_bodies {
            inner_count += 1;
            body.send_foo(0).unwrap().end().unwrap();
        }
        after.send_bar(String::new()).unwrap().end().unwrap();
    }
    done.end().unwrap();
    assert_eq!((outer_count, inner_count), (4, 16));
}

#[test]
fn test_iterator_first_body_available_before_iteration() {
    let (instance, recorder) = recorded(2);
    let (mut outer_bodies, _done) = iterator::start(&instance).enter().unwrap();
    assert_eq!(outer_bodies.id(), OUTER);
    assert_eq!(
        recorder.events(),
        vec![
            Event::Activated { id: OUTER, bound: 2 },
            Event::Iteration { id: OUTER, index: 0 },
        ]
    );
    assert!(outer_bodies.next().is_some());
}

#[test]
fn test_callback_runs_body_bound_times() {
    let (instance, _) = recorded(3);
    let mut bodies = 0;
    let mut outer_bodies = 0;
    let done = callback::start(&instance)
        .foreach(|inner| {
            outer_bodies += 1;
            inner
                .foreach(|body| {
                    bodies += 1;
                    body.send_foo(bodies)
                })?
                .send_bar("bar".into())
        })
        .unwrap();
    assert_eq!((outer_bodies, bodies), (3, 9));
    assert_eq!(instance.depth(), 0);
    done.end().unwrap();
}
