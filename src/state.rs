//! Building blocks for generated protocol states.
//!
//! A generator emits one struct per protocol point. Each embeds a
//! [`StateCore`] (usage guard plus instance handle) and adds only the fields
//! and transition signatures specific to that point; the loop transitions
//! themselves come from the surface traits in [`crate::surface`].

use tracing::trace;

use crate::error::Result;
use crate::frame::LoopId;
use crate::guard::UsageGuard;
use crate::instance::Instance;

/// What a protocol point is, from the engine's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The head of a foreach: enters the body or exits the loop.
    LoopHead,
    /// First state of a loop body.
    BodyEntry,
    /// Any later point, including the last state of a body.
    BodyContinuation,
    /// Final state of the protocol.
    Terminal,
}

/// Usage guard and instance handle shared by every generated state
#[derive(Debug, Clone)]
pub struct StateCore {
    guard: UsageGuard,
    instance: Instance,
    point: &'static str,
    role: Role,
}

impl StateCore {
    pub fn new(instance: &Instance, point: &'static str, role: Role) -> Self {
        Self {
            guard: UsageGuard::new(),
            instance: instance.clone(),
            point,
            role,
        }
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Name of the protocol point, as emitted by the generator.
    pub fn point(&self) -> &'static str {
        self.point
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_consumed(&self) -> bool {
        self.guard.is_consumed()
    }

    /// Consume the state. Must be the first action of every transition.
    ///
    /// Reusing a state aborts its instance.
    pub fn consume(&self) -> Result<&Instance> {
        self.guard
            .consume(self.point)
            .map_err(|e| self.instance.abort(e))?;
        trace!(instance = %self.instance.id(), point = self.point, role = ?self.role, "state consumed");
        Ok(&self.instance)
    }

    /// Consume the state at a send point, accepting `payload`.
    pub fn send<T>(&self, label: &'static str, payload: T) -> Result<&Instance> {
        let instance = self.consume()?;
        instance.accept(label, payload);
        Ok(instance)
    }

    /// Consume the terminal state. Fails if any loop is still active.
    pub fn terminate(&self) -> Result<()> {
        self.consume()?.terminate()
    }
}

/// Access to the embedded core of a generated state.
pub trait Point {
    fn core(&self) -> &StateCore;
}

/// A loop-head point.
pub trait LoopHead: Point {
    /// Unique id of this foreach construct.
    const ID: LoopId;
    /// Name of the parameter holding this loop's bound.
    const PARAM: &'static str;

    fn id(&self) -> LoopId {
        Self::ID
    }
}

/// Declare a generated state struct embedding a [`StateCore`].
///
/// ```ignore
/// protocol_state! {
///     /// Inner foreach head.
///     pub struct Inner: LoopHead;
/// }
/// // States of the iterator surface also carry the hand-off of the loop
/// // they belong to.
/// protocol_state! {
///     pub struct InnerBody<InnerBody>: BodyEntry;
/// }
/// ```
#[macro_export]
macro_rules! protocol_state {
    ($(#[$meta:meta])* $vis:vis struct $name:ident : $role:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            core: $crate::state::StateCore,
        }

        impl $name {
            pub(crate) fn new(instance: &$crate::Instance) -> Self {
                Self {
                    core: $crate::state::StateCore::new(
                        instance,
                        stringify!($name),
                        $crate::state::Role::$role,
                    ),
                }
            }
        }

        impl $crate::state::Point for $name {
            fn core(&self) -> &$crate::state::StateCore {
                &self.core
            }
        }
    };
    ($(#[$meta:meta])* $vis:vis struct $name:ident <$body:ty> : $role:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            core: $crate::state::StateCore,
            foreach: $crate::surface::iterator::Sequencer<$body>,
        }

        impl $name {
            pub(crate) fn new(
                instance: &$crate::Instance,
                foreach: $crate::surface::iterator::Sequencer<$body>,
            ) -> Self {
                Self {
                    core: $crate::state::StateCore::new(
                        instance,
                        stringify!($name),
                        $crate::state::Role::$role,
                    ),
                    foreach,
                }
            }
        }

        impl $crate::state::Point for $name {
            fn core(&self) -> &$crate::state::StateCore {
                &self.core
            }
        }
    };
}
