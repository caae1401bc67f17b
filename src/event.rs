// Observable protocol events
//
// A Recorder attached to an instance captures what the engine did, in
// order, so drivers written against different surfaces can be compared.

use std::sync::{Arc, Mutex, PoisonError};

use crate::frame::LoopId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A fresh frame was pushed for a loop.
    Activated { id: LoopId, bound: usize },
    /// A body-entry state was produced for iteration `index`.
    Iteration { id: LoopId, index: usize },
    /// A payload was accepted at a send point.
    Sent { label: &'static str },
    /// A loop's frame was popped.
    Exited { id: LoopId },
    /// The terminal state was consumed.
    Terminated,
}

/// Recording sink for testing - captures all events for verification
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<Event>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: Event) {
        self.lock().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Event>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let recorder = Recorder::new();
        let shared = recorder.clone();
        shared.record(Event::Activated {
            id: LoopId(0),
            bound: 2,
        });
        shared.record(Event::Sent { label: "foo" });
        assert_eq!(
            recorder.events(),
            vec![
                Event::Activated {
                    id: LoopId(0),
                    bound: 2
                },
                Event::Sent { label: "foo" },
            ]
        );
        recorder.clear();
        assert!(shared.is_empty());
    }
}
