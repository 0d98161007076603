//! Pipeline error type

use std::sync::Arc;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The terminal error state of a table, and the error type flowing through
/// transform functions.
///
/// Errors are shared by reference counting so that a downstream stage can
/// adopt its input's completion error verbatim.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The stage was cancelled from downstream before its input was
    /// exhausted. Never recorded as a completion error; a transform
    /// function that sees this from [`RowSink::push`](crate::RowSink::push)
    /// should propagate it and return.
    #[error("stage cancelled")]
    Cancelled,

    /// A transform function, source, or sink failed.
    #[error("{0}")]
    Failed(Arc<anyhow::Error>),
}

impl Error {
    /// Wrap an arbitrary failure.
    pub fn failed(err: impl Into<anyhow::Error>) -> Self {
        Error::Failed(Arc::new(err.into()))
    }

    /// True if this error is a cancellation rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Failed(Arc::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_failed_displays_inner_message() {
        let err = Error::from(anyhow!("bad field"));
        assert_eq!(err.to_string(), "bad field");
        assert!(!err.is_cancelled());
    }

    #[test]
    fn test_clone_shares_inner_error() {
        let err = Error::failed(anyhow!("oops"));
        let adopted = err.clone();
        assert_eq!(err.to_string(), adopted.to_string());
    }
}
