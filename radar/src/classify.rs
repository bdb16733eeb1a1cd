//! Rule-based classification of aircraft records.
//!
//! Each rule is evaluated on its own, a record can carry several tags.  Rules are data coming
//! from `RadarConfig`, nothing is hard-coded here.
//!

use std::collections::BTreeSet;

use strum::Display;
use tracing::trace;

use crate::{AircraftRecord, RadarConfig};

/// Category labels, declared highest priority first so that `Ord` gives display order.
///
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Tag {
    Emergency,
    Military,
    LowAltitude,
    Unclassified,
}

/// Set of tags for one record, iterated in priority order.
///
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Tags(BTreeSet<Tag>);

impl Tags {
    pub fn contains(&self, tag: Tag) -> bool {
        self.0.contains(&tag)
    }

    /// Highest priority tag, if any
    ///
    pub fn highest(&self) -> Option<Tag> {
        self.0.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Tag> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Tag> for Tags {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Tags(iter.into_iter().collect())
    }
}

/// Case-insensitive prefix match, empty prefixes never match.
///
pub fn has_prefix(callsign: &str, prefixes: &[String]) -> bool {
    let cs = callsign.to_ascii_uppercase();
    prefixes
        .iter()
        .filter(|p| !p.is_empty())
        .any(|p| cs.starts_with(&p.to_ascii_uppercase()))
}

/// Apply every rule to the record.
///
pub fn classify(rec: &AircraftRecord, cfg: &RadarConfig) -> Tags {
    let mut tags = BTreeSet::new();

    if !rec.squawk.is_empty() && cfg.emergency_squawks.iter().any(|s| *s == rec.squawk) {
        tags.insert(Tag::Emergency);
    }
    if has_prefix(&rec.callsign, &cfg.military_prefixes) {
        tags.insert(Tag::Military);
    }
    if rec.altitude_m > 0.
        && rec.altitude_m < cfg.low_altitude_m
        && !has_prefix(&rec.callsign, &cfg.ignore_prefixes)
    {
        tags.insert(Tag::LowAltitude);
    }
    if tags.is_empty() {
        tags.insert(Tag::Unclassified);
    }
    trace!("{} -> {:?}", rec.callsign, tags);
    Tags(tags)
}
