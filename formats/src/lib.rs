//! Definition of the data formats we read.
//!
//! - `opensky`: state vectors from the OpenSky Network REST API
//! - `noaa`: space weather products from NOAA SWPC (Kp index, alerts)
//!
//! Decoding is forgiving at the record level: a broken field in one record never loses the
//! whole document.
//!

// Re-export for convenience
//
pub use error::*;
pub use noaa::*;
pub use opensky::*;

mod error;
mod noaa;
mod opensky;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
