//! Rules & thresholds for the radar, all of them overridable in the `radar` block of the
//! configuration file.
//!

use serde::Deserialize;

/// Military & special operators (German Air Force, NATO AWACS, Italian AF, Belgian AF,
/// Spanish AF, US Air Mobility Command, US Army, RAF tankers)
pub const DEF_MILITARY: &[&str] = &["GAF", "NATO", "IAM", "BAF", "AME", "RCH", "DUKE", "TARTN"];

/// Scheduled traffic we never want low-altitude alerts for
pub const DEF_IGNORE: &[&str] = &[
    "DLH", "EWG", "CLH", "BCS", "DHK", "RYR", "EZY", "EJU", "BAW", "AFR", "KLM", "SWR", "AUA",
    "CFG", "TUI", "WZZ", "CTN", "UPS", "FDX",
];

/// 7700 general emergency, 7600 radio failure
pub const DEF_EMERGENCY: &[&str] = &["7700", "7600"];

/// Tracking link, the callsign is appended
pub const DEF_LINK: &str = "https://www.radarbox.com/flight/";

/// Every heuristic can be switched off on its own.
///
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Rules {
    /// Emergency squawks are always reported
    pub emergency: bool,
    /// Military callsigns are always reported
    pub military: bool,
    /// Low flying aircraft are reported anywhere in the area, not only close or approaching
    pub low_altitude_anywhere: bool,
    /// Anything closer than `near_range_km`
    pub near_range: bool,
    /// Anything heading our way and arriving within `max_eta_min`
    pub approach: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            emergency: true,
            military: true,
            low_altitude_anywhere: false,
            near_range: true,
            approach: true,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RadarConfig {
    /// Callsign prefixes tagged MILITARY
    pub military_prefixes: Vec<String>,
    /// Callsign prefixes never tagged LOW_ALTITUDE
    pub ignore_prefixes: Vec<String>,
    /// Squawk codes tagged EMERGENCY
    pub emergency_squawks: Vec<String>,
    /// Upper limit (exclusive) for LOW_ALTITUDE, in meters
    pub low_altitude_m: f64,
    /// Near-range radius around the point of interest, in km
    pub near_range_km: f64,
    /// Max. angle between heading and bearing to the point of interest, in degrees
    pub max_deviation_deg: f64,
    /// Max. time to reach the point of interest, in minutes
    pub max_eta_min: f64,
    /// Max. number of aircraft in one message
    pub max_alerts: usize,
    /// Tracking link base, empty to disable
    pub link: String,
    pub rules: Rules,
}

fn to_strings(l: &[&str]) -> Vec<String> {
    l.iter().map(|s| s.to_string()).collect()
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            military_prefixes: to_strings(DEF_MILITARY),
            ignore_prefixes: to_strings(DEF_IGNORE),
            emergency_squawks: to_strings(DEF_EMERGENCY),
            low_altitude_m: 2000.,
            near_range_km: 12.,
            max_deviation_deg: 25.,
            max_eta_min: 20.,
            max_alerts: 5,
            link: DEF_LINK.to_string(),
            rules: Rules::default(),
        }
    }
}
