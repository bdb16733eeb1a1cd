//! Library part of the `skywatchctl` utility.
//!
//! This holds the command-line definition, the configuration file and the sub-commands.  Each
//! sub-command is one complete run: load the configuration, check the credentials, fetch, evaluate
//! and deliver at most one message.
//!
//! Errors are split in two kinds:
//!
//! - configuration errors (`Status`, `ConfigError`, missing credentials) abort the run with a
//!   non-zero exit before any network call,
//! - transport errors (fetch or delivery) are logged and the run ends quietly, the next scheduled
//!   run is the retry.
//!

pub use cli::*;
pub use cmds::*;
pub use config::*;
pub use error::*;

mod cli;
mod cmds;
mod config;
mod error;
