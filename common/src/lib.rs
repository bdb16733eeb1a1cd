//! This library is there to share some common code amongst all skywatch modules.
//!
//! - geodesy helpers (distance, bearing, course deviation)
//! - positions, points of interest and bounding boxes
//! - the configuration file engine
//! - logging initialisation
//!

mod config;
mod geodesy;
mod location;
mod logging;
mod macros;

use clap::{crate_name, crate_version};
pub use config::*;
pub use geodesy::*;
pub use location::*;
pub use logging::*;

const NAME: &str = crate_name!();
const VERSION: &str = crate_version!();

pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}
