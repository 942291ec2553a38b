use thiserror::Error;

/// Errors returned by history operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// The requested snapshot index does not exist in the log.
    #[error("snapshot index {index} is out of range (history has {len} entries)")]
    OutOfRange { index: usize, len: usize },

    /// There is no earlier snapshot to go back to.
    #[error("nothing to undo")]
    NothingToUndo,
}
