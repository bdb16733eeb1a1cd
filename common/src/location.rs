//! Location related module
//!
//! - `Position` is a bare lat/lon pair
//! - `Location` is a named point of interest (the observer)
//! - `BB` is the bounding box we request traffic for
//!
//! A set of named locations can be loaded from a `locations.hcl` file, a default one is embedded.
//!
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::fs;

use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

/// one degree is circumference of earth / 360°, convert into nautical miles
const ONE_DEG_NM: f64 = (40_000. / 1.852) / 360.;

/// A point on the globe, in decimal degrees.
///
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Position {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
}

impl Position {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Actual location, our point of interest
///
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Location {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
}

impl Location {
    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.lat, self.lon)
    }
}

/// Bounding box, the way the OpenSky API wants it.
///
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct BB {
    /// Longitude - X0
    #[serde(alias = "west")]
    pub min_lon: f64,
    /// Latitude - Y0
    #[serde(alias = "south")]
    pub min_lat: f64,
    /// Longitude - X1
    #[serde(alias = "east")]
    pub max_lon: f64,
    /// Latitude - Y1
    #[serde(alias = "north")]
    pub max_lat: f64,
}

impl BB {
    /// Build from the (south, west, north, east) ordering used by most APIs.
    ///
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Result<Self> {
        if south > north || west > east {
            return Err(eyre!(
                "invalid bounding box ({south}, {west}, {north}, {east})"
            ));
        }
        Ok(Self {
            min_lon: west,
            min_lat: south,
            max_lon: east,
            max_lat: north,
        })
    }

    /// Take a location and create a bounding box of `dist` nautical miles away
    ///
    /// So from (lat, lon) we generate the following bounding box:
    /// (lat - dist, lon - dist, lat + dist, lon + dist)
    ///
    #[tracing::instrument]
    pub fn from_location(value: &Location, dist: u32) -> Self {
        Self::from_lat_lon(value.lat, value.lon, dist)
    }

    /// Take a lat lot tuple and create a bounding box of `dist` nautical miles away
    ///
    /// NOTE: `dist` is in Nautical Miles
    ///
    #[tracing::instrument]
    pub fn from_lat_lon(lat: f64, lon: f64, dist: u32) -> Self {
        let dist = dist as f64 / ONE_DEG_NM;

        // Calculate the four corners
        //
        let (min_lat, max_lat) = (lat - dist, lat + dist);
        let (min_lon, max_lon) = (lon - dist, lon + dist);

        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }
}

impl Display for BB {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.2}, {:.2}, {:.2}, {:.2}",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}

/// Current location file version
const LOCATION_FILE_VER: usize = 1;

/// On-disk structure for the locations file
///
#[derive(Debug, Deserialize)]
struct LocationsFile {
    /// Version number for safety
    pub version: usize,
    /// List of locations
    pub location: BTreeMap<String, Location>,
}

/// Load all locations
///
#[tracing::instrument]
pub fn load_locations(fname: Option<String>) -> Result<BTreeMap<String, Location>> {
    trace!("enter");

    // Load from file if specified
    //
    let data = if let Some(fname) = fname {
        fs::read_to_string(fname)?
    } else {
        include_str!("locations.hcl").to_owned()
    };

    let loc: LocationsFile = hcl::from_str(&data)?;
    if loc.version != LOCATION_FILE_VER {
        return Err(eyre!("Bad locations file version, aborting…"));
    }

    // Fill in missing display names with the key
    //
    let all = loc
        .location
        .into_iter()
        .map(|(key, mut loc)| {
            if loc.name.is_empty() {
                loc.name = key.clone();
            }
            (key, loc)
        })
        .collect();
    Ok(all)
}

/// List loaded locations
///
#[tracing::instrument(skip(data))]
pub fn list_locations(data: &BTreeMap<String, Location>, dist: u32) -> Result<String> {
    trace!("enter");
    let header = vec!["Location", "Name", "Lat/Lon", "Bounding box"];

    let mut builder = Builder::default();
    builder.push_record(header);

    data.iter().for_each(|(key, loc)| {
        let point = loc.position().to_string();
        let poly = BB::from_location(loc, dist).to_string();
        builder.push_record(vec![key.as_str(), loc.name.as_str(), &point, &poly]);
    });

    let allf = builder.build().with(Style::modern()).to_string();
    Ok(format!("List all locations ({dist} nm):\n{allf}"))
}
