//! Collect the entries of one snapshot into the final alert set.
//!

use tracing::debug;

use crate::AlertEntry;

/// Final outcome of one snapshot.
///
#[derive(Clone, Debug, PartialEq)]
pub enum Report {
    /// Most urgent first, `dropped` is what did not fit under the cap
    Alerts {
        entries: Vec<AlertEntry>,
        dropped: usize,
    },
    /// Nothing alert-worthy, not an error
    NoTraffic,
}

impl Report {
    pub fn entries(&self) -> &[AlertEntry] {
        match self {
            Report::Alerts { entries, .. } => entries,
            Report::NoTraffic => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Report::NoTraffic)
    }
}

/// Sort by severity then distance and keep the first `max`.
///
pub fn aggregate<I>(candidates: I, max: usize) -> Report
where
    I: IntoIterator<Item = Option<AlertEntry>>,
{
    let mut entries: Vec<AlertEntry> = candidates.into_iter().flatten().collect();
    if entries.is_empty() {
        debug!("no alert-worthy traffic");
        return Report::NoTraffic;
    }

    entries.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then(a.distance_km.total_cmp(&b.distance_km))
    });

    let dropped = entries.len().saturating_sub(max);
    entries.truncate(max);
    debug!("{} entries, {} dropped", entries.len(), dropped);

    // A cap of 0 leaves nothing to say
    //
    if entries.is_empty() {
        return Report::NoTraffic;
    }
    Report::Alerts { entries, dropped }
}

#[cfg(test)]
mod tests {
    use skywatch_common::Position;

    use crate::{AircraftRecord, Severity, Tags};

    use super::*;

    fn entry(callsign: &str, severity: Severity, distance: f64) -> AlertEntry {
        AlertEntry {
            record: AircraftRecord {
                icao24: "3c6444".to_string(),
                callsign: callsign.to_string(),
                position: Position::new(51.8, 10.6),
                altitude_m: 1000.,
                ground_speed_kmh: 0.,
                heading_deg: None,
                squawk: String::new(),
                on_ground: false,
            },
            tags: Tags::default(),
            distance_km: distance,
            bearing_deg: None,
            deviation_deg: None,
            eta_min: None,
            severity,
            text: callsign.to_string(),
        }
    }

    #[test]
    fn test_aggregate_cap_and_order() {
        let input = vec![
            Some(entry("A", Severity::Approach, 1.)),
            None,
            Some(entry("N", Severity::Nearby, 3.)),
            Some(entry("T", Severity::Diagnostic, 0.)),
            Some(entry("E", Severity::Emergency, 40.)),
            None,
            Some(entry("L", Severity::LowAltitude, 8.)),
            Some(entry("M", Severity::Military, 20.)),
            Some(entry("N2", Severity::Nearby, 2.)),
        ];

        let r = aggregate(input, 5);
        match r {
            Report::Alerts { entries, dropped } => {
                let names = entries
                    .iter()
                    .map(|e| e.record.callsign.as_str())
                    .collect::<Vec<_>>();
                assert_eq!(vec!["E", "M", "L", "N2", "N"], names);
                assert_eq!(2, dropped);
            }
            Report::NoTraffic => panic!("expected alerts"),
        }
    }

    #[test]
    fn test_aggregate_ties_by_distance() {
        let input = vec![
            Some(entry("far", Severity::Military, 30.)),
            Some(entry("near", Severity::Military, 3.)),
        ];
        let r = aggregate(input, 5);
        assert_eq!("near", r.entries()[0].record.callsign);
        assert_eq!("far", r.entries()[1].record.callsign);
    }

    #[test]
    fn test_aggregate_empty() {
        assert_eq!(Report::NoTraffic, aggregate(Vec::new(), 5));
        assert_eq!(Report::NoTraffic, aggregate(vec![None, None], 5));
        assert!(aggregate(vec![Some(entry("A", Severity::Nearby, 1.))], 0).is_empty());
    }
}
