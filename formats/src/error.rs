use thiserror::Error;

/// Errors for whole documents, individual records never fail.
///
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Invalid {0} document: {1}")]
    Json(&'static str, String),
    #[error("Empty {0} document")]
    Empty(&'static str),
}
