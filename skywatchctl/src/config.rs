//! Configuration for `skywatchctl`.
//!
//! The file is HCL, looked for in this order:
//!
//! - `-c FILE` on the command line,
//! - `$HOME/.config/skywatch/skywatch.hcl`,
//! - the default compiled into the binary.
//!
//! Credentials come from the environment (the program runs from a CI scheduler), and the
//! environment always wins over the file.
//!

use std::fmt::{Debug, Formatter};

use eyre::Result;
use serde::Deserialize;
use tracing::{debug, trace};

use skywatch_common::{load_locations, IntoConfig, Location, Versioned, BB};
use skywatch_radar::RadarConfig;
use skywatch_sources::{Auth, NoaaConfig, OpenskyConfig, TelegramConfig, DEF_TIMEOUT};

use crate::Status;

/// Config filename
const CONFIG: &str = "skywatch.hcl";
/// Current version
pub const CVERSION: usize = 1;
/// Default radius around home when no area is given, in nautical miles
const DEF_RADIUS: u32 = 25;

/// Event name set by the CI scheduler for a manually triggered run
const DISPATCH: &str = "workflow_dispatch";

fn def_timeout() -> u64 {
    DEF_TIMEOUT
}

fn def_radius() -> u32 {
    DEF_RADIUS
}

/// Explicit area of interest, in decimal degrees.
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AreaConfig {
    /// Used in message headers, defaults to the home name
    #[serde(default)]
    pub name: String,
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

/// Parameters for the space weather check.
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuroraConfig {
    /// Minimum Kp worth a message
    pub threshold: f64,
    /// Local time zone for display and the night window
    pub tz: String,
    /// Live Kp is only checked between these local hours, wrapping around midnight
    pub night_start: i8,
    pub night_end: i8,
    /// Max. forecast lines
    pub max_forecast: usize,
}

impl Default for AuroraConfig {
    fn default() -> Self {
        Self {
            threshold: 6.,
            tz: "Europe/Berlin".to_string(),
            night_start: 22,
            night_end: 3,
            max_forecast: 3,
        }
    }
}

/// Configuration for the CLI tool.
///
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Version in the file
    pub version: usize,
    /// Network timeout in seconds
    #[serde(default = "def_timeout")]
    pub timeout: u64,
    /// Radius around home when `area` is absent, in nautical miles
    #[serde(default = "def_radius")]
    pub radius: u32,
    /// Alternate locations file for `--home`
    #[serde(default)]
    pub locations: Option<String>,
    #[serde(default)]
    pub opensky: OpenskyConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub noaa: NoaaConfig,
    /// Explicit box, otherwise derived from `home` and `radius`
    pub area: Option<AreaConfig>,
    /// Point of interest
    pub home: Location,
    #[serde(default)]
    pub radar: RadarConfig,
    #[serde(default)]
    pub aurora: AuroraConfig,
}

impl Versioned for Config {
    fn version(&self) -> usize {
        self.version
    }
}

impl IntoConfig for Config {
    const FILENAME: &'static str = CONFIG;
    const VERSION: usize = CVERSION;

    fn embedded() -> Option<&'static str> {
        Some(include_str!("skywatch.hcl"))
    }
}

impl Config {
    /// Replace the point of interest by a named location.  The area is then derived from it.
    ///
    #[tracing::instrument(skip(self))]
    pub fn with_home(&mut self, name: &str) -> Result<()> {
        let all = load_locations(self.locations.clone())?;
        let loc = all
            .get(&name.to_lowercase())
            .ok_or_else(|| Status::UnknownLocation(name.to_string()))?;

        debug!("home is now {} ({})", loc.name, loc.position());
        self.home = loc.clone();
        self.area = None;
        Ok(())
    }

    /// Name and bounding box of the area to scan.
    ///
    pub fn area(&self) -> Result<(String, BB)> {
        match &self.area {
            Some(a) => {
                let bb = BB::new(a.south, a.west, a.north, a.east)
                    .map_err(|e| Status::BadArea(e.to_string()))?;
                let name = if a.name.is_empty() {
                    self.home.name.clone()
                } else {
                    a.name.clone()
                };
                Ok((name, bb))
            }
            None => Ok((
                self.home.name.clone(),
                BB::from_location(&self.home, self.radius),
            )),
        }
    }

    /// Environment wins over the file.
    ///
    pub fn apply_env(&mut self, env: &Env) {
        trace!("apply_env");

        if let Some(user) = &env.opensky_username {
            self.opensky.username = Some(user.clone());
        }
        if let Some(pwd) = &env.opensky_password {
            self.opensky.password = Some(pwd.clone());
        }
        if let Some(chat_id) = &env.chat_id {
            self.telegram.chat_id = Some(chat_id.clone());
        }
    }

    /// OpenSky account if both parts are there.
    ///
    pub fn opensky_auth(&self) -> Auth {
        Auth::from_parts(self.opensky.username.clone(), self.opensky.password.clone())
    }
}

/// Everything we read from the environment, empty values count as unset.
///
#[derive(Clone, Default)]
pub struct Env {
    pub token: Option<String>,
    pub chat_id: Option<String>,
    pub event_name: Option<String>,
    pub opensky_username: Option<String>,
    pub opensky_password: Option<String>,
}

impl Env {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any lookup function, the process environment or a test fixture.
    ///
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        Env {
            token: get("TELEGRAM_TOKEN"),
            chat_id: get("CHAT_ID"),
            event_name: get("GITHUB_EVENT_NAME"),
            opensky_username: get("OPENSKY_USERNAME"),
            opensky_password: get("OPENSKY_PASSWORD"),
        }
    }

    /// A manually triggered run is a diagnostic run.
    ///
    pub fn diagnostic(&self) -> bool {
        self.event_name.as_deref() == Some(DISPATCH)
    }
}

impl Debug for Env {
    /// Hide the secrets
    ///
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let hide = |v: &Option<String>| v.as_ref().map(|_| "HIDDEN");

        f.debug_struct("Env")
            .field("token", &hide(&self.token))
            .field("chat_id", &self.chat_id)
            .field("event_name", &self.event_name)
            .field("opensky_username", &self.opensky_username)
            .field("opensky_password", &hide(&self.opensky_password))
            .finish()
    }
}
