// Errors raised by the foreach tracking engine
//
// Every variant is a protocol-usage or engine-invariant violation. None of
// them is recovered locally: the instance that raised it is aborted and must
// be discarded.

use thiserror::Error;

use crate::frame::LoopId;

/// Errors that can occur while driving a generated protocol endpoint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoopError {
    #[error("State {point} already used")]
    LinearityViolation { point: &'static str },

    #[error("Cannot pop: loop stack empty")]
    StackUnderflow,

    #[error("Cannot enter body of loop {id} (index: {current}/{last})")]
    BoundsExceeded {
        id: LoopId,
        current: usize,
        last: usize,
    },

    #[error("Premature exit of loop {id} (index: {current}/{last})")]
    PrematureExit {
        id: LoopId,
        current: usize,
        last: usize,
    },

    #[error("No loop {id} to end here")]
    MissingLoopFrame { id: LoopId },

    #[error("Protocol engine fault: {0}")]
    ProtocolEngineFault(String),

    #[error("Invalid bound {bound} for parameter {param:?}: bounds must be positive")]
    InvalidBound { param: String, bound: usize },

    #[error("No bound configured for parameter {0:?}")]
    UnknownParameter(String),

    #[error("Body sequence of loop {id} was dropped before it was drained")]
    HandOffClosed { id: LoopId },
}

impl LoopError {
    /// True when the error was caused by driving the protocol out of order,
    /// false when an engine invariant was already broken.
    pub fn is_usage_error(&self) -> bool {
        !matches!(
            self,
            LoopError::StackUnderflow | LoopError::ProtocolEngineFault(_)
        )
    }
}

/// Result type for foreach tracking operations
pub type Result<T> = std::result::Result<T, LoopError>;
