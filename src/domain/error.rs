use crate::infrastructure::RemoteError;

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("card not found: {0}")]
    CardNotFound(String),

    #[error("stage not found: {0}")]
    StageNotFound(String),

    #[error("a drag session is already active")]
    DragInProgress,

    #[error("no drag session is active")]
    NoActiveDrag,

    #[error("board invariant violated: {0}")]
    Inconsistent(String),

    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),
}
