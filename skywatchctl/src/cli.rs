//! Module describing all possible commands and sub-commands to the `skywatchctl` main driver
//!
//! We have two main commands, each of them being one complete run started by an external
//! scheduler:
//!
//! - `planes` fetches one OpenSky snapshot around the point of interest and reports the aircraft
//!   worth an alert,
//! - `aurora` checks the NOAA space weather products and reports flares and high Kp values.
//!
//! `--test` (or `GITHUB_EVENT_NAME=workflow_dispatch`) always sends something so that a silent
//! healthy run can be told apart from a broken one.  `--dry-run` prints the message instead of
//! sending it and does not need any credentials.
//!
//! `list` shows the named locations and the effective radar rules, `completion` is here just to
//! configure the various shells completion system.
//!

use std::path::PathBuf;

use clap::{
    crate_authors, crate_description, crate_name, crate_version, Parser, Subcommand, ValueEnum,
};
use clap_complete::shells::Shell;

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// debug mode.
    #[clap(short = 'D', long = "debug")]
    pub debug: bool,
    /// Hierarchical logging output.
    #[clap(long)]
    pub tree: bool,
    /// Also log into hourly files in this directory.
    #[clap(long)]
    pub log_file: Option<String>,
    /// Verbose mode.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `planes [--test] [--dry-run] [--home NAME]`
/// `aurora [--test] [--dry-run]`
/// `list locations|rules`
/// `completion SHELL`
/// `version`
///
#[derive(Debug, Subcommand)]
pub enum SubCommand {
    /// One aircraft evaluation run
    Planes(PlanesOpts),
    /// One space weather evaluation run
    Aurora(AuroraOpts),
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// List locations or rules
    List(ListOpts),
    /// List all package versions
    Version,
}

// ------

#[derive(Debug, Parser)]
pub struct PlanesOpts {
    /// Diagnostic run, always send something.
    #[clap(short = 't', long)]
    pub test: bool,
    /// Print the message instead of sending it.
    #[clap(short = 'n', long)]
    pub dry_run: bool,
    /// Use this named location as point of interest.
    #[clap(long)]
    pub home: Option<String>,
}

#[derive(Debug, Parser)]
pub struct AuroraOpts {
    /// Diagnostic run, always send something.
    #[clap(short = 't', long)]
    pub test: bool,
    /// Print the message instead of sending it.
    #[clap(short = 'n', long)]
    pub dry_run: bool,
}

// ------

/// Options to generate completion files at runtime
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    #[clap(value_parser)]
    pub shell: Shell,
}

// ------

/// All `list` sub-commands:
///
/// `list locations`
/// `list rules`
///
#[derive(Debug, Parser)]
pub struct ListOpts {
    #[clap(value_parser)]
    pub cmd: ListSubCommand,
}

/// These are the sub-commands for `list`
///
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, ValueEnum)]
pub enum ListSubCommand {
    /// Named points of interest
    Locations,
    /// Effective radar rules & thresholds
    Rules,
}
