use thiserror::Error;

/// Failure taxonomy for the ask/classify/render cycle. Every variant maps to
/// a user-visible message; nothing here propagates as an unhandled fault.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Empty question, rejected before any request is issued.
    #[error("question must not be empty")]
    EmptyQuestion,

    /// Network failure or non-2xx response.
    #[error("Error: {0}")]
    Transport(String),

    /// Result payload fails shape validation.
    #[error("{0}")]
    Format(String),

    /// The backend executed the query but reported an error in the results.
    #[error("{0}")]
    Server(String),
}

impl ClientError {
    pub fn is_format(&self) -> bool {
        matches!(self, ClientError::Format(_))
    }
}
