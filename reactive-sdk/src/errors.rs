use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentServiceError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request to the backend failed or the parsing of the response
    /// failed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The request returned a non-2xx status code. `message` carries the
    /// backend-supplied `message` field when the error body parses, or the
    /// raw body otherwise.
    #[error("{message} (Status {status})")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
    /// The response from the backend was unexpected (e.g. a success body
    /// that does not match the documented shape).
    #[error("Invariant: {0}")]
    Invariant(String),
}

pub type ContentServiceResult<T> = Result<T, ContentServiceError>;
