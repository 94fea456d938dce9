//! Error taxonomy for the question-answering pipeline.
//!
//! Every stage maps its failures onto one of these variants so callers
//! (the HTTP layer, the CLI) can decide how to present them: user
//! mistakes come back verbatim, provider failures are logged in full but
//! reach the user only as a generic message.

use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, ThisError)]
pub enum Error {
    /// The request itself is unusable: no documents, blank question.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An uploaded file could not be parsed as a PDF.
    #[error("document parse error: {0}")]
    DocumentParse(String),

    /// The embedding provider failed or returned a malformed response.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// The chat model failed or returned a malformed response.
    #[error("generation error: {0}")]
    Generation(String),

    /// An external call exceeded the configured timeout.
    #[error("timeout: {0}")]
    Timeout(String),

    /// The service itself is misconfigured (bad env, unbuildable client).
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// True when the condition is something the user can fix by changing
    /// their input, as opposed to a provider or service failure.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Error::InvalidRequest(_) | Error::DocumentParse(_))
    }
}
