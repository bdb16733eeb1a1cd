use thiserror::Error;

use skywatch_formats::FormatError;

/// Custom error type for sources & delivery, allow us to differentiate between errors.
///
/// None of these is retried, the next scheduled run is the retry.
///
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP Error: {0}")]
    HTTP(#[from] reqwest::Error),
    #[error("Error({code}) from {site}: {body}")]
    Status {
        site: &'static str,
        code: u16,
        body: String,
    },
    #[error("{site} refused the request: {reason}")]
    Refused { site: &'static str, reason: String },
    #[error("Bad payload: {0}")]
    Payload(#[from] FormatError),
    #[error("Missing credentials: {0}")]
    MissingCredentials(&'static str),
}
