//! Unified error types surfaced by the runtime API.
//!
//! Wraps worker coordination failures and engine precondition violations so
//! clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use progression_core::ProgressionError;

use super::handle::CharacterId;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("character worker command channel closed")]
    CommandChannelClosed,

    #[error("character worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("character worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("no active character {0}")]
    UnknownCharacter(CharacterId),

    #[error(transparent)]
    Progression(#[from] ProgressionError),
}
