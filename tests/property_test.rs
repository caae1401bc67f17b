// Property tests over loop bounds.

mod common;

use common::{expected_events, recorded, run_callback, run_iterator, run_polling};
use proptest::prelude::*;
use rumpsteak_foreach::{Activation, Bound, Event, Instance, LoopError, LoopId, LoopStack};

const LOOP: LoopId = LoopId(4);

fn bound(n: usize) -> impl FnOnce() -> rumpsteak_foreach::Result<Bound> {
    move || Bound::new(n).ok_or(LoopError::InvalidBound {
        param: "n".into(),
        bound: n,
    })
}

proptest! {
    #[test]
    fn prop_surfaces_balanced_and_equivalent(k in 1usize..6) {
        let expected = expected_events(k, k);
        let runs: [fn(&Instance) -> rumpsteak_foreach::Result<()>; 3] =
            [run_polling, run_iterator, run_callback];
        for run in runs {
            let (instance, recorder) = recorded(k);
            prop_assert_eq!(instance.depth(), 0);
            prop_assert!(run(&instance).is_ok());
            prop_assert_eq!(instance.depth(), 0);
            prop_assert_eq!(&recorder.events(), &expected);
            let sends = recorder
                .events()
                .iter()
                .filter(|e| **e == Event::Sent { label: "foo" })
                .count();
            prop_assert_eq!(sends, k * k);
        }
    }

    #[test]
    fn prop_exit_only_after_bound_iterations(n in 1usize..32, done in 0usize..32) {
        let mut stack = LoopStack::new();
        stack.activate(LOOP, bound(n)).unwrap();
        let completions = done.min(n - 1);
        for _ in 0..completions {
            let (activation, _) = stack.activate(LOOP, bound(n)).unwrap();
            prop_assert_eq!(activation, Activation::Reentered);
        }
        let result = stack.exit(LOOP);
        if completions + 1 < n {
            let is_premature = matches!(result, Err(LoopError::PrematureExit { .. }));
            prop_assert!(is_premature);
            prop_assert_eq!(stack.depth(), 1);
        } else {
            prop_assert!(result.is_ok());
            prop_assert!(stack.is_empty());
        }
    }

    #[test]
    fn prop_reentry_advances_by_exactly_one(n in 2usize..32, depth in 0usize..4) {
        let mut stack = LoopStack::new();
        for id in 0..depth as u32 {
            stack.activate(LoopId(100 + id), bound(1)).unwrap();
        }
        stack.activate(LOOP, bound(n)).unwrap();
        let before = *stack.top().unwrap();
        stack.activate(LOOP, bound(n)).unwrap();
        let after = *stack.top().unwrap();
        prop_assert_eq!(after.current(), before.current() + 1);
        prop_assert_eq!(after.last(), before.last());
        prop_assert_eq!(stack.depth(), depth + 1);
    }

    #[test]
    fn prop_completions_match_bound(n in 1usize..32) {
        let mut stack = LoopStack::new();
        let (_, mut frame) = stack.activate(LOOP, bound(n)).unwrap();
        let mut bodies = 0;
        while frame.can_enter() {
            bodies += 1;
            frame = stack.complete(LOOP).unwrap();
        }
        prop_assert_eq!(bodies, n);
        prop_assert!(stack.exit(LOOP).is_ok());
        prop_assert_eq!(stack.pop(), Err(LoopError::StackUnderflow));
    }
}
