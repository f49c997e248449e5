use thiserror::Error;

/// The scoring service answered with something outside the feedback grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("empty response from scoring service")]
    Empty,

    #[error("malformed response from scoring service: {0:?}")]
    Malformed(String),
}

/// Faults that end a single guess submission. None of them touch other
/// submissions or the history.
#[derive(Debug, Error)]
pub enum SubmissionFault {
    #[error("invalid scoring service url {url:?}: {reason}")]
    Configuration { url: String, reason: String },

    #[error("scoring service connection failed: {0}")]
    Connection(String),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl SubmissionFault {
    pub fn connection(err: impl std::fmt::Display) -> Self {
        SubmissionFault::Connection(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("puzzle number 0 is not a valid puzzle")]
pub struct InvalidPuzzleNumber;
