//! Every site we know how to talk to.
//!

pub use noaa::*;
pub use opensky::*;
pub use telegram::*;

mod noaa;
mod opensky;
mod telegram;
