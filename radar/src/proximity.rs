//! Proximity evaluation: is this aircraft worth an alert, and how urgent is it?
//!
//! Distance to the point of interest is always known for an evaluable record.  Bearing,
//! course deviation and ETA need a heading and a non-zero ground speed, otherwise they stay
//! `None`, which is not the same as 0.
//!
//! Precedence, highest first:
//!
//! ```text
//! EMERGENCY > MILITARY > LOW ALTITUDE > NEARBY > APPROACHING > TEST
//! ```
//!

use strum::Display;
use tracing::trace;

use skywatch_common::{bearing_deg, course_deviation, distance_km, Position};

use crate::{AircraftRecord, RadarConfig, Tag, Tags, UNKNOWN_CALLSIGN};

/// Alert rank, smallest is the most urgent.
///
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Severity {
    #[strum(serialize = "EMERGENCY")]
    Emergency,
    #[strum(serialize = "MILITARY")]
    Military,
    #[strum(serialize = "LOW ALTITUDE")]
    LowAltitude,
    #[strum(serialize = "NEARBY")]
    Nearby,
    #[strum(serialize = "APPROACHING")]
    Approach,
    #[strum(serialize = "TEST")]
    Diagnostic,
}

impl Severity {
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Emergency => "🚨",
            Severity::Military => "🎖️",
            Severity::LowAltitude => "⬇️",
            Severity::Nearby => "📍",
            Severity::Approach => "🎯",
            Severity::Diagnostic => "🧪",
        }
    }
}

/// What the reserved transponder codes mean.
///
pub fn squawk_meaning(squawk: &str) -> Option<&'static str> {
    match squawk {
        "7500" => Some("unlawful interference"),
        "7600" => Some("radio failure"),
        "7700" => Some("general emergency"),
        _ => None,
    }
}

/// Escape the characters legacy Telegram Markdown would interpret.
///
pub fn escape_markdown(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Geometry of one aircraft relative to the point of interest.
///
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Measure {
    pub distance_km: f64,
    pub bearing_deg: Option<f64>,
    pub deviation_deg: Option<f64>,
    pub eta_min: Option<f64>,
}

/// One alert-worthy aircraft, ready to be aggregated.
///
#[derive(Clone, Debug, PartialEq)]
pub struct AlertEntry {
    pub record: AircraftRecord,
    pub tags: Tags,
    /// Always >= 0
    pub distance_km: f64,
    /// From the aircraft toward the point of interest
    pub bearing_deg: Option<f64>,
    pub deviation_deg: Option<f64>,
    /// Only when moving
    pub eta_min: Option<f64>,
    pub severity: Severity,
    /// Rendered block for the message
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct ProximityEvaluator {
    pub cfg: RadarConfig,
    pub home: Position,
}

impl ProximityEvaluator {
    pub fn new(cfg: &RadarConfig, home: Position) -> Self {
        ProximityEvaluator {
            cfg: cfg.clone(),
            home,
        }
    }

    /// Distance always, course and ETA only when heading and speed are known.
    ///
    pub fn measure(&self, rec: &AircraftRecord) -> Measure {
        let distance = distance_km(&rec.position, &self.home);

        match rec.heading_deg {
            Some(heading) if rec.is_moving() => {
                let bearing = bearing_deg(&rec.position, &self.home);
                Measure {
                    distance_km: distance,
                    bearing_deg: Some(bearing),
                    deviation_deg: Some(course_deviation(heading, bearing)),
                    eta_min: Some(distance / rec.ground_speed_kmh * 60.),
                }
            }
            _ => Measure {
                distance_km: distance,
                ..Measure::default()
            },
        }
    }

    /// Decide whether the record deserves an alert and at which rank.
    ///
    pub fn evaluate(&self, rec: &AircraftRecord, tags: &Tags) -> Option<AlertEntry> {
        let m = self.measure(rec);
        let rules = &self.cfg.rules;

        let near = rules.near_range && m.distance_km < self.cfg.near_range_km;
        let approach = rules.approach
            && match (m.deviation_deg, m.eta_min) {
                (Some(dev), Some(eta)) => {
                    dev < self.cfg.max_deviation_deg && eta < self.cfg.max_eta_min
                }
                _ => false,
            };
        let low = tags.contains(Tag::LowAltitude) && (rules.low_altitude_anywhere || near || approach);

        let severity = if rules.emergency && tags.contains(Tag::Emergency) {
            Severity::Emergency
        } else if rules.military && tags.contains(Tag::Military) {
            Severity::Military
        } else if low {
            Severity::LowAltitude
        } else if near {
            Severity::Nearby
        } else if approach {
            Severity::Approach
        } else {
            trace!("{}: nothing to report at {:.1} km", rec.callsign, m.distance_km);
            return None;
        };
        trace!("{}: {severity} at {:.1} km", rec.callsign, m.distance_km);
        Some(self.entry(rec, tags, m, severity))
    }

    /// Build a diagnostic entry for a record no rule selected.
    ///
    pub fn placeholder(&self, rec: &AircraftRecord, tags: &Tags) -> AlertEntry {
        let m = self.measure(rec);
        self.entry(rec, tags, m, Severity::Diagnostic)
    }

    fn entry(&self, rec: &AircraftRecord, tags: &Tags, m: Measure, severity: Severity) -> AlertEntry {
        let text = self.render_entry(rec, tags, &m, severity);
        AlertEntry {
            record: rec.clone(),
            tags: tags.clone(),
            distance_km: m.distance_km,
            bearing_deg: m.bearing_deg,
            deviation_deg: m.deviation_deg,
            eta_min: m.eta_min,
            severity,
            text,
        }
    }

    fn render_entry(&self, rec: &AircraftRecord, tags: &Tags, m: &Measure, severity: Severity) -> String {
        let mut label = format!("{} *{}*", severity.icon(), severity);
        if severity == Severity::Emergency {
            match squawk_meaning(&rec.squawk) {
                Some(what) => label.push_str(&format!(" squawk {} ({})", rec.squawk, what)),
                None => label.push_str(&format!(" squawk {}", rec.squawk)),
            }
        }

        // Other tags the record carries, the primary one is already in the label.  Tag names
        // contain `_` so they go through the escaper too.
        //
        let primary = match severity {
            Severity::Emergency => Some(Tag::Emergency),
            Severity::Military => Some(Tag::Military),
            Severity::LowAltitude => Some(Tag::LowAltitude),
            _ => None,
        };
        let others = tags
            .iter()
            .filter(|t| Some(*t) != primary && *t != Tag::Unclassified)
            .map(|t| escape_markdown(&t.to_string()))
            .collect::<Vec<_>>();
        if !others.is_empty() {
            label.push_str(&format!(" ({})", others.join(", ")));
        }

        let mut lines = vec![
            label,
            format!("✈️ *{}*", escape_markdown(&rec.callsign)),
            format!(
                "Altitude: {:.0} m | Speed: {:.0} km/h",
                rec.altitude_m, rec.ground_speed_kmh
            ),
        ];

        let mut dist = format!("Distance: {:.1} km", m.distance_km);
        if let Some(eta) = m.eta_min {
            dist.push_str(&format!(" | ETA: {:.0} min", eta));
        }
        lines.push(dist);

        if !self.cfg.link.is_empty() && rec.callsign != UNKNOWN_CALLSIGN {
            lines.push(format!("🔗 [RadarBox]({}{})", self.cfg.link, rec.callsign));
        }
        lines.join("\n")
    }
}
