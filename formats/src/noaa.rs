//! NOAA Space Weather Prediction Center products.
//!
//! - `noaa-planetary-k-index-forecast.json`: a table, first row is the header, Kp is sent as a
//!   string.  Newer versions of the product send objects instead of arrays, we read both.
//! - `planetary_k_index_1m.json`: one object per minute, oldest first.
//! - `alerts.json`: all alerts/warnings/watches issued recently, free text in `message`.
//!
//! See [SWPC data service](https://services.swpc.noaa.gov/)
//!

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::opensky::as_f64;
use crate::FormatError;

/// One line of the 3-day Kp forecast.
///
#[derive(Clone, Debug, PartialEq)]
pub struct KpForecastEntry {
    /// UTC time, as `YYYY-MM-DD HH:MM:SS`
    pub time_tag: String,
    /// Planetary K index
    pub kp: f64,
    /// "observed", "estimated" or "predicted"
    pub observed: Option<String>,
}

/// Whole forecast, header removed.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KpForecast {
    pub entries: Vec<KpForecastEntry>,
}

impl KpForecast {
    #[tracing::instrument(skip(input))]
    pub fn from_json(input: &str) -> Result<Self, FormatError> {
        trace!("kpforecast::from_json");

        let rows: Vec<Value> = serde_json::from_str(input)
            .map_err(|e| FormatError::Json("kp forecast", e.to_string()))?;
        if rows.is_empty() {
            return Err(FormatError::Empty("kp forecast"));
        }

        let entries: Vec<_> = rows.iter().filter_map(KpForecastEntry::from_row).collect();
        debug!("{} forecast entries", entries.len());
        Ok(KpForecast { entries })
    }
}

impl KpForecastEntry {
    /// The header row has no numeric `kp` so it goes away here, like any broken line.
    ///
    fn from_row(row: &Value) -> Option<Self> {
        let (time, kp, observed) = match row {
            Value::Array(a) => (a.first(), a.get(1), a.get(2)),
            Value::Object(o) => (o.get("time_tag"), o.get("kp"), o.get("observed")),
            _ => return None,
        };
        Some(KpForecastEntry {
            time_tag: time?.as_str()?.to_owned(),
            kp: as_f64(kp)?,
            observed: observed.and_then(Value::as_str).map(str::to_owned),
        })
    }
}

/// One minute of planetary Kp.
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct KpSample {
    pub time_tag: String,
    pub kp_index: f64,
    #[serde(default)]
    pub estimated_kp: Option<f64>,
}

/// Parse the 1-minute Kp product and return the samples, oldest first.
///
#[tracing::instrument(skip(input))]
pub fn kp_samples_from_json(input: &str) -> Result<Vec<KpSample>, FormatError> {
    trace!("kp_samples_from_json");

    let rows: Vec<Value> = serde_json::from_str(input)
        .map_err(|e| FormatError::Json("kp 1m", e.to_string()))?;
    let all: Vec<KpSample> = rows
        .into_iter()
        .filter_map(|r| serde_json::from_value(r).ok())
        .collect();
    Ok(all)
}

/// Alert, watch or warning issued by SWPC.
///
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SpaceAlert {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub issue_datetime: String,
    #[serde(default)]
    pub message: String,
}

/// Parse `alerts.json`.
///
#[tracing::instrument(skip(input))]
pub fn alerts_from_json(input: &str) -> Result<Vec<SpaceAlert>, FormatError> {
    trace!("alerts_from_json");

    let rows: Vec<Value> = serde_json::from_str(input)
        .map_err(|e| FormatError::Json("alerts", e.to_string()))?;
    let all: Vec<SpaceAlert> = rows
        .into_iter()
        .filter_map(|r| serde_json::from_value(r).ok())
        .collect();
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORECAST: &str = r##"[
["time_tag","kp","observed","noaa_scale"],
["2024-05-10 12:00:00","4.67","observed",null],
["2024-05-10 15:00:00","6.33","estimated","G2"],
["2024-05-10 18:00:00","bad","predicted",null],
["2024-05-10 21:00:00","8.00","predicted","G4"]
]"##;

    #[test]
    fn test_forecast_from_arrays() -> eyre::Result<()> {
        let f = KpForecast::from_json(FORECAST)?;

        assert_eq!(3, f.entries.len());
        assert_eq!("2024-05-10 12:00:00", f.entries[0].time_tag);
        assert_eq!(4.67, f.entries[0].kp);
        assert_eq!(Some("estimated".to_string()), f.entries[1].observed);
        assert_eq!(8.0, f.entries[2].kp);
        Ok(())
    }

    #[test]
    fn test_forecast_from_objects() -> eyre::Result<()> {
        let input = r##"[
{"time_tag":"2024-05-10T12:00:00","kp":4.67,"observed":"observed","noaa_scale":null},
{"time_tag":"2024-05-10T15:00:00","kp":6.33,"observed":"predicted","noaa_scale":"G2"}
]"##;
        let f = KpForecast::from_json(input)?;
        assert_eq!(2, f.entries.len());
        assert_eq!(6.33, f.entries[1].kp);
        Ok(())
    }

    #[test]
    fn test_forecast_empty() {
        assert!(KpForecast::from_json("[]").is_err());
        assert!(KpForecast::from_json("{}").is_err());
    }

    #[test]
    fn test_kp_samples() -> eyre::Result<()> {
        let input = r##"[
{"time_tag":"2024-05-10T20:00:00","kp_index":5,"estimated_kp":5.33,"kp":"5P"},
{"time_tag":"2024-05-10T20:01:00","kp_index":7,"estimated_kp":7.0,"kp":"7Z"},
{"broken":true}
]"##;
        let s = kp_samples_from_json(input)?;
        assert_eq!(2, s.len());
        assert_eq!(7.0, s.last().unwrap().kp_index);
        Ok(())
    }

    #[test]
    fn test_alerts() -> eyre::Result<()> {
        let input = r##"[
{"product_id":"XM5A","issue_datetime":"2024-05-10 06:54:39.357","message":"Space Weather Message Code: ALTTPX\r\nSerial Number: 1\r\nX-ray Class M5"},
{"product_id":"K05W"}
]"##;
        let a = alerts_from_json(input)?;
        assert_eq!(2, a.len());
        assert!(a[0].message.contains("ALTTPX"));
        assert!(a[1].message.is_empty());
        Ok(())
    }
}
