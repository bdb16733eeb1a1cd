//! Module to deal with the different sites we talk to.
//!
//! There are two sides:
//!
//! - fetching data: aircraft snapshots (`Snapshot`) and space weather (`SpaceWeather`),
//! - delivering the resulting message (`Notify`).
//!
//! Everything is a blocking call bounded by a timeout and nothing is ever retried: the whole
//! program is run again by an external scheduler.
//!

use std::fmt::Debug;
use std::time::Duration;

use eyre::Result;
use reqwest::blocking::Client;

use skywatch_common::BB;
use skywatch_formats::{KpForecast, KpSample, SpaceAlert, StateList};

// Re-export these modules for a shorted import path.
//
pub use access::*;
pub use auth::*;
pub use error::*;

#[macro_use]
mod macros;

mod access;
mod auth;
mod error;

/// What we present ourselves as
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Default timeout for every network call, in seconds
pub const DEF_TIMEOUT: u64 = 15;

/// Anything able to give us the current aircraft state vectors for an area.
///
pub trait Snapshot: Debug {
    /// Return site's name
    fn name(&self) -> String;
    /// Fetch the current state vectors within `area`
    fn fetch(&self, area: &BB) -> Result<StateList>;
}

/// Anything able to give us the space weather products.
///
pub trait SpaceWeather: Debug {
    /// Recent alerts, watches & warnings
    fn alerts(&self) -> Result<Vec<SpaceAlert>>;
    /// Last planetary Kp samples, oldest first
    fn kp_live(&self) -> Result<Vec<KpSample>>;
    /// Three-day Kp forecast
    fn kp_forecast(&self) -> Result<KpForecast>;
    /// Picture to attach to the message
    fn map_url(&self) -> String;
}

/// Delivery of the final message.
///
pub trait Notify: Debug {
    /// Return site's name
    fn name(&self) -> String;
    /// Send plain (Markdown) text
    fn send_text(&self, text: &str) -> Result<()>;
    /// Send a picture by URL with a caption
    fn send_photo(&self, url: &str, caption: &str) -> Result<()>;
}

/// Build the blocking client with our timeout.
///
pub fn http_client(timeout: u64) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout))
        .build()
        .map_err(SourceError::HTTP)?;
    Ok(client)
}

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
