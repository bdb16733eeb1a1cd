//! One full pass over a snapshot: normalize, classify, evaluate, aggregate.
//!

use std::fmt::{Display, Formatter};

use tracing::{debug, info, warn};

use skywatch_common::Position;
use skywatch_formats::StateList;

use crate::{aggregate, classify, AircraftRecord, ProximityEvaluator, RadarConfig, Report};

/// Counters for one scan, mostly for the logs.
///
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stats {
    /// State vectors in the snapshot
    pub records: usize,
    /// Skipped for lack of position
    pub non_evaluable: usize,
    /// Alert-worthy before the cap
    pub candidates: usize,
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} records, {} skipped, {} candidates",
            self.records, self.non_evaluable, self.candidates
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scan {
    pub report: Report,
    pub stats: Stats,
}

/// The whole alerting engine for one point of interest.
///
#[derive(Clone, Debug)]
pub struct Radar {
    pub cfg: RadarConfig,
    evaluator: ProximityEvaluator,
}

impl Radar {
    pub fn new(cfg: &RadarConfig, home: Position) -> Self {
        Radar {
            cfg: cfg.clone(),
            evaluator: ProximityEvaluator::new(cfg, home),
        }
    }

    /// Evaluate one snapshot.  In diagnostic mode, when nothing is alert-worthy, the nearest
    /// evaluable aircraft is reported with the lowest severity to show the pipeline is alive.
    ///
    #[tracing::instrument(skip(self, list))]
    pub fn scan(&self, list: &StateList, diagnostic: bool) -> Scan {
        let mut stats = Stats {
            records: list.states.len(),
            ..Stats::default()
        };

        let records: Vec<AircraftRecord> = list
            .states
            .iter()
            .filter_map(|sv| match AircraftRecord::normalize(sv) {
                Ok(rec) => Some(rec),
                Err(e) => {
                    warn!("{e}");
                    stats.non_evaluable += 1;
                    None
                }
            })
            .collect();

        let classified: Vec<_> = records
            .iter()
            .map(|rec| (rec, classify(rec, &self.cfg)))
            .collect();

        let candidates: Vec<_> = classified
            .iter()
            .map(|(rec, tags)| self.evaluator.evaluate(rec, tags))
            .collect();
        stats.candidates = candidates.iter().flatten().count();

        let mut report = aggregate(candidates, self.cfg.max_alerts);

        if diagnostic && report.is_empty() {
            let nearest = classified
                .iter()
                .map(|(rec, tags)| self.evaluator.placeholder(rec, tags))
                .min_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
            if let Some(entry) = nearest {
                debug!("diagnostic placeholder: {}", entry.record.callsign);
                report = aggregate([Some(entry)], self.cfg.max_alerts.max(1));
            }
        }

        info!("scan: {stats}");
        Scan { report, stats }
    }
}
