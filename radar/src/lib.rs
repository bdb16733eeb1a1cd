//! Aircraft classification and proximity alerting.
//!
//! Given one snapshot of state vectors, this crate decides which aircraft deserve an alert and
//! renders the message:
//!
//! ```text
//! StateVector -> normalize -> AircraftRecord -> classify -> Tags
//!                                        \-> evaluate (+ point of interest) -> AlertEntry
//! all entries -> aggregate -> Report -> render
//! ```
//!
//! Nothing is kept between runs, every snapshot is evaluated from scratch.
//!

pub use aggregate::*;
pub use classify::*;
pub use config::*;
pub use proximity::*;
pub use record::*;
pub use render::*;
pub use scan::*;

mod aggregate;
mod classify;
mod config;
mod proximity;
mod record;
mod render;
mod scan;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
