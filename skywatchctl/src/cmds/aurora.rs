//! This is the module handling the `aurora` sub-command.
//!
//! Three independent checks, any of them can fail without hiding the others:
//!
//! - a strong (M or X class) solar flare in the recent alerts,
//! - the live planetary Kp, only during the local night,
//! - the 3-day Kp forecast, with a trend against the previous slot.
//!
//! The message is a caption for the ovation map picture.
//!

use eyre::Result;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use jiff::Zoned;
use tracing::{error, info, trace};

use skywatch_formats::{KpForecast, KpSample, SpaceAlert};
use skywatch_sources::{Noaa, Notify, SpaceWeather};

use crate::{notifier, AuroraConfig, AuroraOpts, Config, Env, Status};

/// Marker of a X-ray event in SWPC alerts
const FLARE_CODE: &str = "Space Weather Message Code: ALTTPX";

/// Is `hour` inside the window?  `start > end` means the window wraps around midnight.
///
pub fn is_night(hour: i8, start: i8, end: i8) -> bool {
    if start <= end {
        hour >= start && hour < end
    } else {
        hour >= start || hour < end
    }
}

pub fn kp_symbol(kp: f64) -> &'static str {
    if kp >= 7. {
        "🚨"
    } else if kp >= 6. {
        "🟠"
    } else {
        "📈"
    }
}

pub fn trend(prev: f64, curr: f64) -> &'static str {
    if curr > prev {
        "↗️"
    } else if curr < prev {
        "↘️"
    } else {
        "➡️"
    }
}

/// Convert a SWPC UTC time tag to local time, returned unchanged if it can not be parsed.
///
pub fn utc_to_local(time_tag: &str, tz: &TimeZone) -> String {
    let local = time_tag
        .trim()
        .parse::<DateTime>()
        .and_then(|dt| dt.to_zoned(TimeZone::UTC))
        .map(|z| z.with_time_zone(tz.clone()));
    match local {
        Ok(z) => z.strftime("%d.%m. %H:%M").to_string(),
        Err(_) => time_tag.to_string(),
    }
}

pub fn flare_section(alerts: &[SpaceAlert]) -> Option<String> {
    let found = alerts.iter().any(|a| {
        a.message.contains(FLARE_CODE)
            && (a.message.contains("Class M") || a.message.contains("Class X"))
    });
    found.then(|| {
        "💥 *SOLAR FLARE ALERT!*\nStrong (M/X class) flare detected, aurora possible in 1-3 days!"
            .to_string()
    })
}

/// Latest sample is the last one.
///
pub fn live_section(samples: &[KpSample], threshold: f64) -> Option<String> {
    let latest = samples.last()?;
    (latest.kp_index >= threshold)
        .then(|| format!("🔴 *LIVE ALERT: Kp {}* (right now!)", latest.kp_index))
}

/// Forecast slots after the first one, compared with the slot before.
///
pub fn forecast_section(fc: &KpForecast, cfg: &AuroraConfig, tz: &TimeZone) -> Option<String> {
    let lines: Vec<String> = fc
        .entries
        .windows(2)
        .filter(|w| w[1].kp >= cfg.threshold)
        .map(|w| {
            let (prev, curr) = (&w[0], &w[1]);
            format!(
                "{} Kp {} {} ({})",
                kp_symbol(curr.kp),
                curr.kp,
                trend(prev.kp, curr.kp),
                utc_to_local(&curr.time_tag, tz)
            )
        })
        .take(cfg.max_forecast)
        .collect();

    if lines.is_empty() {
        return None;
    }
    Some(format!("*Forecast (next hours):*\n{}", lines.join("\n")))
}

/// Assemble the caption, `None` when there is nothing to say.
///
pub fn caption(sections: &[String], now: &Zoned, threshold: f64, diagnostic: bool) -> Option<String> {
    if sections.is_empty() && !diagnostic {
        return None;
    }

    let header = if diagnostic {
        "*BOT TEST RUN*"
    } else {
        "*AURORA UPDATE*"
    };
    let body = if sections.is_empty() {
        format!("No elevated values right now (Kp < {threshold}).")
    } else {
        sections.join("\n\n")
    };
    Some(format!(
        "{header}\n\n{body}\n\nAs of {} (local)",
        now.strftime("%H:%M")
    ))
}

/// Log and forget a failed feed.
///
fn best_effort<T>(what: &str, res: Result<T>) -> Option<T> {
    match res {
        Ok(v) => Some(v),
        Err(e) => {
            error!("{what}: {e}");
            None
        }
    }
}

/// One evaluation run at `now` (local time).  Returns what was sent.
///
#[tracing::instrument(skip(weather, notify, cfg))]
pub fn run_aurora(
    weather: &dyn SpaceWeather,
    notify: &dyn Notify,
    cfg: &AuroraConfig,
    now: &Zoned,
    diagnostic: bool,
) -> Result<Option<String>> {
    trace!("run_aurora");

    let tz = now.time_zone();
    let mut sections = vec![];

    if let Some(s) = best_effort("alerts", weather.alerts())
        .and_then(|alerts| flare_section(&alerts))
    {
        sections.push(s);
    }

    if is_night(now.hour(), cfg.night_start, cfg.night_end) {
        if let Some(s) = best_effort("kp live", weather.kp_live())
            .and_then(|samples| live_section(&samples, cfg.threshold))
        {
            sections.push(s);
        }
    } else {
        trace!("daytime, no live check");
    }

    if let Some(s) = best_effort("kp forecast", weather.kp_forecast())
        .and_then(|fc| forecast_section(&fc, cfg, tz))
    {
        sections.push(s);
    }

    match caption(&sections, now, cfg.threshold, diagnostic) {
        Some(text) => {
            notify.send_photo(&weather.map_url(), &text)?;
            info!("{} sections sent through {}", sections.len(), notify.name());
            Ok(Some(text))
        }
        None => {
            info!("Nothing elevated, nothing sent.");
            Ok(None)
        }
    }
}

/// Handle `aurora`.
///
#[tracing::instrument(skip(cfg, env))]
pub fn aurora_cmd(cfg: &Config, env: &Env, opts: &AuroraOpts) -> Result<()> {
    let tz = TimeZone::get(&cfg.aurora.tz).map_err(|_| Status::BadTimezone(cfg.aurora.tz.clone()))?;
    let diagnostic = opts.test || env.diagnostic();

    let notify = notifier(cfg, env, opts.dry_run)?;
    let noaa = Noaa::new(&cfg.noaa, cfg.timeout)?;
    let now = Zoned::now().with_time_zone(tz);

    run_aurora(&noaa, notify.as_ref(), &cfg.aurora, &now, diagnostic)?;
    Ok(())
}
