//! Typed aircraft record, built from one raw state vector.
//!
//! All defaults are applied here so that nothing downstream ever sees a missing value it has
//! to guess about.  Position is the only thing we can not invent: without it the record is
//! `NonEvaluable` and skipped.
//!

use thiserror::Error;
use tracing::trace;

use skywatch_common::{normalize_deg, Position};
use skywatch_formats::StateVector;

/// Callsign used when none was transmitted
pub const UNKNOWN_CALLSIGN: &str = "UNKNOWN";

/// m/s -> km/h
const MS_TO_KMH: f64 = 3.6;

#[derive(Clone, Debug, PartialEq)]
pub struct AircraftRecord {
    /// ICAO 24-bit address, hex
    pub icao24: String,
    /// Trimmed callsign or `UNKNOWN`
    pub callsign: String,
    pub position: Position,
    /// Never negative, 0 when unknown
    pub altitude_m: f64,
    /// Never negative, 0 when unknown
    pub ground_speed_kmh: f64,
    /// In [0, 360) when known
    pub heading_deg: Option<f64>,
    /// Empty when unknown
    pub squawk: String,
    pub on_ground: bool,
}

/// Why a state vector could not be turned into a record.
///
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{icao24}: no {missing}, skipped")]
pub struct NonEvaluable {
    pub icao24: String,
    pub missing: &'static str,
}

impl AircraftRecord {
    /// Build the record, applying all defaults.
    ///
    pub fn normalize(sv: &StateVector) -> Result<Self, NonEvaluable> {
        let position = match (sv.latitude, sv.longitude) {
            (Some(lat), Some(lon)) => Position::new(lat, lon),
            (None, _) => {
                return Err(NonEvaluable {
                    icao24: sv.icao24.clone(),
                    missing: "latitude",
                })
            }
            (_, None) => {
                return Err(NonEvaluable {
                    icao24: sv.icao24.clone(),
                    missing: "longitude",
                })
            }
        };

        let callsign = match sv.callsign.as_deref().map(str::trim) {
            Some(cs) if !cs.is_empty() => cs.to_owned(),
            _ => UNKNOWN_CALLSIGN.to_owned(),
        };

        // Prefer barometric altitude like the rest of the traffic does
        //
        let altitude_m = sv.baro_altitude.or(sv.geo_altitude).unwrap_or(0.).max(0.);
        let ground_speed_kmh = sv.velocity.map(|v| v * MS_TO_KMH).unwrap_or(0.).max(0.);

        let rec = AircraftRecord {
            icao24: sv.icao24.clone(),
            callsign,
            position,
            altitude_m,
            ground_speed_kmh,
            heading_deg: sv.true_track.map(normalize_deg),
            squawk: sv.squawk.as_deref().map(str::trim).unwrap_or_default().to_owned(),
            on_ground: sv.on_ground,
        };
        trace!("{rec:?}");
        Ok(rec)
    }

    /// Can we compute a course toward something?
    ///
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.heading_deg.is_some() && self.ground_speed_kmh > 0.
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn sv() -> StateVector {
        StateVector {
            icao24: "3c6444".to_string(),
            callsign: Some("DLH4AB  ".to_string()),
            latitude: Some(51.83),
            longitude: Some(10.78),
            baro_altitude: Some(1200.),
            velocity: Some(100.),
            true_track: Some(87.3),
            squawk: Some("1000".to_string()),
            ..StateVector::default()
        }
    }

    #[test]
    fn test_normalize_full() {
        let rec = AircraftRecord::normalize(&sv()).unwrap();

        assert_eq!("DLH4AB", rec.callsign);
        assert_eq!(Position::new(51.83, 10.78), rec.position);
        assert_eq!(1200., rec.altitude_m);
        assert!((rec.ground_speed_kmh - 360.).abs() < 1e-9);
        assert_eq!(Some(87.3), rec.heading_deg);
        assert_eq!("1000", rec.squawk);
        assert!(rec.is_moving());
    }

    #[test]
    fn test_normalize_defaults() {
        let sv = StateVector {
            callsign: Some("   ".to_string()),
            baro_altitude: None,
            velocity: None,
            true_track: None,
            squawk: None,
            ..sv()
        };
        let rec = AircraftRecord::normalize(&sv).unwrap();

        assert_eq!(UNKNOWN_CALLSIGN, rec.callsign);
        assert_eq!(0., rec.altitude_m);
        assert_eq!(0., rec.ground_speed_kmh);
        assert_eq!(None, rec.heading_deg);
        assert_eq!("", rec.squawk);
        assert!(!rec.is_moving());
    }

    #[test]
    fn test_normalize_geo_altitude_fallback() {
        let sv = StateVector {
            baro_altitude: None,
            geo_altitude: Some(800.),
            ..sv()
        };
        assert_eq!(800., AircraftRecord::normalize(&sv).unwrap().altitude_m);
    }

    #[rstest]
    #[case(Some(-30.), Some(-2.), 0., 0.)]
    #[case(Some(500.), Some(10.), 500., 36.)]
    fn test_normalize_clamps(
        #[case] alt: Option<f64>,
        #[case] vel: Option<f64>,
        #[case] want_alt: f64,
        #[case] want_speed: f64,
    ) {
        let sv = StateVector {
            baro_altitude: alt,
            velocity: vel,
            ..sv()
        };
        let rec = AircraftRecord::normalize(&sv).unwrap();
        assert_eq!(want_alt, rec.altitude_m);
        assert!((rec.ground_speed_kmh - want_speed).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_heading_wrapped() {
        let sv = StateVector {
            true_track: Some(360.),
            ..sv()
        };
        assert_eq!(Some(0.), AircraftRecord::normalize(&sv).unwrap().heading_deg);
    }

    #[rstest]
    #[case(None, Some(10.), "latitude")]
    #[case(Some(51.), None, "longitude")]
    #[case(None, None, "latitude")]
    fn test_normalize_non_evaluable(
        #[case] lat: Option<f64>,
        #[case] lon: Option<f64>,
        #[case] missing: &str,
    ) {
        let sv = StateVector {
            latitude: lat,
            longitude: lon,
            ..sv()
        };
        let err = AircraftRecord::normalize(&sv).unwrap_err();
        assert_eq!(missing, err.missing);
        assert_eq!("3c6444", err.icao24);
    }
}
