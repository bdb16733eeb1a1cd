//! Error module
//!

use thiserror::Error;

/// Configuration problems, always fatal and found before any network call.
///
#[derive(Debug, Error)]
pub enum Status {
    #[error("Bad area {0}")]
    BadArea(String),
    #[error("Unknown time zone {0}")]
    BadTimezone(String),
    #[error("Missing credentials, set {0} in the environment")]
    MissingCredentials(&'static str),
    #[error("Unknown location {0}, see `list locations`")]
    UnknownLocation(String),
}
