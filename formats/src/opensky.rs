//! Module to load the data coming from the Opensky site.
//!
//! XXX they send out an array of arrays, each representing a specific state vector, with `null`
//!     for every unknown value.
//!
//! We do not use a tuple struct for the arrays: one bad field would make serde reject the whole
//! document.  Every field is extracted by position and anything unexpected is `None`.
//!
//! Documentation is taken from [The Opensky site](https://openskynetwork.github.io/opensky-api/rest.html)
//!

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::FormatError;

/// Origin of state's position
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Source {
    #[default]
    AdsB,
    Asterix,
    MLAT,
    FLARM,
}

impl TryFrom<u64> for Source {
    type Error = u64;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Source::AdsB),
            1 => Ok(Source::Asterix),
            2 => Ok(Source::MLAT),
            3 => Ok(Source::FLARM),
            v => Err(v),
        }
    }
}

/// Position of each field inside a state vector array.
///
mod idx {
    pub const ICAO24: usize = 0;
    pub const CALLSIGN: usize = 1;
    pub const COUNTRY: usize = 2;
    pub const TIME_POSITION: usize = 3;
    pub const LAST_CONTACT: usize = 4;
    pub const LONGITUDE: usize = 5;
    pub const LATITUDE: usize = 6;
    pub const BARO_ALTITUDE: usize = 7;
    pub const ON_GROUND: usize = 8;
    pub const VELOCITY: usize = 9;
    pub const TRUE_TRACK: usize = 10;
    pub const VERTICAL_RATE: usize = 11;
    pub const GEO_ALTITUDE: usize = 13;
    pub const SQUAWK: usize = 14;
    pub const SPI: usize = 15;
    pub const POSITION_SOURCE: usize = 16;
}

/// This is the main container for packets sent by the API.
/// It includes a UNIX timestamp and a set of `StateVector`.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateList {
    /// UNIX timestamp
    pub time: i64,
    /// The state vectors, empty when there is no traffic
    pub states: Vec<StateVector>,
    /// Entries that were not even an array and got dropped
    pub dropped: usize,
}

/// Definition of a state vector, every field being as reported (no defaults applied).
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateVector {
    /// ICAO ID
    pub icao24: String,
    /// Call-sign of the vehicule, space padded
    pub callsign: Option<String>,
    /// Origin Country
    pub origin_country: Option<String>,
    pub time_position: Option<i64>,
    pub last_contact: Option<i64>,
    /// Position
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    /// Barometric altitude in meters
    pub baro_altitude: Option<f64>,
    pub on_ground: bool,
    /// Ground speed in m/s
    pub velocity: Option<f64>,
    /// Track in degrees clockwise from north
    pub true_track: Option<f64>,
    pub vertical_rate: Option<f64>,
    /// Geometric altitude in meters
    pub geo_altitude: Option<f64>,
    pub squawk: Option<String>,
    pub spi: bool,
    /// Position source
    pub position_source: Option<Source>,
}

/// Struct returned by the Opensky API
///
#[derive(Debug, Deserialize)]
struct Payload {
    /// UNIX timestamp
    #[serde(default)]
    pub time: i64,
    /// State vectors, `null` when nothing is in the box
    pub states: Option<Vec<Value>>,
}

impl StateList {
    /// Deserialize from json
    ///
    #[tracing::instrument(skip(input))]
    pub fn from_json(input: &str) -> Result<Self, FormatError> {
        trace!("statelist::from_json");

        let data: Payload = serde_json::from_str(input)
            .map_err(|e| FormatError::Json("opensky", e.to_string()))?;

        let mut dropped = 0;
        let states: Vec<StateVector> = data
            .states
            .unwrap_or_default()
            .iter()
            .filter_map(|r| match r.as_array() {
                Some(fields) => Some(StateVector::from_fields(fields)),
                None => {
                    warn!("not a state vector: {r}");
                    dropped += 1;
                    None
                }
            })
            .collect();

        debug!("{} points, {} dropped", states.len(), dropped);
        Ok(StateList {
            time: data.time,
            states,
            dropped,
        })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl StateVector {
    /// Extract all fields by position
    ///
    pub fn from_fields(fields: &[Value]) -> Self {
        let get = |i: usize| fields.get(i);

        StateVector {
            icao24: as_string(get(idx::ICAO24)).unwrap_or_default(),
            callsign: as_string(get(idx::CALLSIGN)),
            origin_country: as_string(get(idx::COUNTRY)),
            time_position: as_f64(get(idx::TIME_POSITION)).map(|t| t as i64),
            last_contact: as_f64(get(idx::LAST_CONTACT)).map(|t| t as i64),
            longitude: as_f64(get(idx::LONGITUDE)),
            latitude: as_f64(get(idx::LATITUDE)),
            baro_altitude: as_f64(get(idx::BARO_ALTITUDE)),
            on_ground: as_bool(get(idx::ON_GROUND)),
            velocity: as_f64(get(idx::VELOCITY)),
            true_track: as_f64(get(idx::TRUE_TRACK)),
            vertical_rate: as_f64(get(idx::VERTICAL_RATE)),
            geo_altitude: as_f64(get(idx::GEO_ALTITUDE)),
            squawk: as_string(get(idx::SQUAWK)),
            spi: as_bool(get(idx::SPI)),
            position_source: get(idx::POSITION_SOURCE)
                .and_then(Value::as_u64)
                .and_then(|v| Source::try_from(v).ok()),
        }
    }
}

/// Numbers, possibly sent as strings.  NaN & co are treated as missing.
///
pub(crate) fn as_f64(v: Option<&Value>) -> Option<f64> {
    let v = match v? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    v.filter(|v| v.is_finite())
}

fn as_string(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_bool(v: Option<&Value>) -> bool {
    matches!(v, Some(Value::Bool(true)))
}
