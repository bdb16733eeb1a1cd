//! This is the module handling the `list` sub-command.
//!

use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

use skywatch_common::{list_locations, load_locations};
use skywatch_radar::RadarConfig;

use crate::Config;

/// All named locations with their derived area.
///
#[tracing::instrument(skip(cfg))]
pub fn list_all_locations(cfg: &Config) -> Result<String> {
    trace!("list_all_locations");

    let all = load_locations(cfg.locations.clone())?;
    list_locations(&all, cfg.radius)
}

/// Effective rules & thresholds.
///
#[tracing::instrument(skip(cfg))]
pub fn list_rules(cfg: &RadarConfig) -> Result<String> {
    trace!("list_rules");

    let onoff = |b: bool| String::from(if b { "on" } else { "off" });

    let mut builder = Builder::default();
    builder.push_record(vec!["Rule", "Value"]);

    let rows = vec![
        ("emergency", onoff(cfg.rules.emergency)),
        ("military", onoff(cfg.rules.military)),
        ("low_altitude_anywhere", onoff(cfg.rules.low_altitude_anywhere)),
        ("near_range", onoff(cfg.rules.near_range)),
        ("approach", onoff(cfg.rules.approach)),
        ("emergency_squawks", cfg.emergency_squawks.join(", ")),
        ("military_prefixes", cfg.military_prefixes.join(", ")),
        ("ignore_prefixes", cfg.ignore_prefixes.join(", ")),
        ("low_altitude_m", format!("< {}", cfg.low_altitude_m)),
        ("near_range_km", format!("< {}", cfg.near_range_km)),
        ("max_deviation_deg", format!("< {}", cfg.max_deviation_deg)),
        ("max_eta_min", format!("< {}", cfg.max_eta_min)),
        ("max_alerts", cfg.max_alerts.to_string()),
        ("link", cfg.link.clone()),
    ];
    rows.iter().for_each(|(name, value)| {
        builder.push_record(vec![*name, value.as_str()]);
    });

    let allf = builder.build().with(Style::modern()).to_string();
    Ok(format!("Radar rules:\n{allf}"))
}
