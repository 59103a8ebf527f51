use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The input did not pass validation; no request was issued and no state
    /// changed.
    #[error("{0}")]
    Validation(String),
    /// The generation request failed (transport error or non-2xx status).
    #[error("Content service error: {0}")]
    Service(#[from] reactive_sdk::ContentServiceError),
}
