//! Error types for progression-core.
//!
//! Inputs are clamped rather than rejected, so the only failures the engine
//! reports are caller precondition violations. A failed call never leaves
//! [`crate::RuntimeState`] partially modified.

use crate::state::LifeState;

/// Severity level of an error, used for categorization by callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Retry later may succeed (e.g. mana regenerates).
    Recoverable,

    /// The call was made in the wrong state and should not be retried as-is.
    Validation,
}

impl ErrorSeverity {
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Errors surfaced by [`crate::ProgressionEngine`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    #[error("{operation} requires a {expected} character, but it is {actual}")]
    InvalidLifeState {
        operation: &'static str,
        expected: &'static str,
        actual: LifeState,
    },

    #[error("not enough mana: need {required}, have {available}")]
    InsufficientMana { required: u32, available: u32 },
}

impl ProgressionError {
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidLifeState { .. } => ErrorSeverity::Validation,
            Self::InsufficientMana { .. } => ErrorSeverity::Recoverable,
        }
    }

    /// Static identifier for metrics and tests.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidLifeState { .. } => "INVALID_LIFE_STATE",
            Self::InsufficientMana { .. } => "INSUFFICIENT_MANA",
        }
    }
}
