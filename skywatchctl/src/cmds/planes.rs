//! This is the module handling the `planes` sub-command.
//!

use eyre::Result;
use tracing::{info, trace};

use skywatch_common::BB;
use skywatch_radar::{render_message, Radar};
use skywatch_sources::{Notify, Opensky, Snapshot};

use crate::{notifier, Config, Env, PlanesOpts};

/// One evaluation run: fetch, scan, render and deliver.  Returns what was sent.
///
#[tracing::instrument(skip(src, notify, radar))]
pub fn run_planes(
    src: &dyn Snapshot,
    notify: &dyn Notify,
    radar: &Radar,
    name: &str,
    area: &BB,
    diagnostic: bool,
) -> Result<Option<String>> {
    trace!("run_planes");

    info!("Fetching {name} ({area}) from {}", src.name());
    let list = src.fetch(area)?;

    let scan = radar.scan(&list, diagnostic);
    match render_message(&scan.report, name, diagnostic) {
        Some(msg) => {
            notify.send_text(&msg)?;
            info!("{} entries sent through {}", scan.report.entries().len(), notify.name());
            Ok(Some(msg))
        }
        None => {
            info!("No alert-worthy traffic, nothing sent.");
            Ok(None)
        }
    }
}

/// Handle `planes`: everything about configuration is checked before the first network call.
///
#[tracing::instrument(skip(cfg, env))]
pub fn planes_cmd(mut cfg: Config, env: &Env, opts: &PlanesOpts) -> Result<()> {
    if let Some(home) = &opts.home {
        cfg.with_home(home)?;
    }
    let (name, area) = cfg.area()?;
    let diagnostic = opts.test || env.diagnostic();

    let notify = notifier(&cfg, env, opts.dry_run)?;
    let src = Opensky::new(&cfg.opensky, cfg.opensky_auth(), cfg.timeout)?;
    let radar = Radar::new(&cfg.radar, cfg.home.position());

    run_planes(&src, notify.as_ref(), &radar, &name, &area, diagnostic)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use skywatch_common::Position;
    use skywatch_formats::{StateList, StateVector};
    use skywatch_radar::RadarConfig;
    use skywatch_sources::SourceError;

    use crate::cmds::fakes::Recorder;
    use crate::is_transport;

    use super::*;

    const HOME: Position = Position {
        lat: 51.7991,
        lon: 10.6156,
    };

    /// Canned snapshot, or a failing source.
    ///
    #[derive(Debug)]
    struct Canned(Option<StateList>);

    impl Snapshot for Canned {
        fn name(&self) -> String {
            "canned".to_string()
        }

        fn fetch(&self, _area: &BB) -> Result<StateList> {
            match &self.0 {
                Some(list) => Ok(list.clone()),
                None => Err(SourceError::Status {
                    site: "canned",
                    code: 503,
                    body: String::new(),
                }
                .into()),
            }
        }
    }

    fn sv(callsign: &str, lat: f64, lon: f64, squawk: &str) -> StateVector {
        StateVector {
            icao24: "3c6444".to_string(),
            callsign: Some(format!("{callsign:<8}")),
            latitude: Some(lat),
            longitude: Some(lon),
            baro_altitude: Some(9000.),
            velocity: Some(230.),
            true_track: Some(0.),
            squawk: Some(squawk.to_string()),
            ..StateVector::default()
        }
    }

    fn snapshot(states: Vec<StateVector>) -> Canned {
        Canned(Some(StateList {
            time: 1_715_370_000,
            states,
            dropped: 0,
        }))
    }

    fn area() -> BB {
        BB::new(51.4, 10.0, 52.0, 11.2).unwrap()
    }

    fn radar() -> Radar {
        Radar::new(&RadarConfig::default(), HOME)
    }

    #[test]
    fn test_planes_alert_sent() -> Result<()> {
        let src = snapshot(vec![
            sv("DLH4AB", 51.5, 10.2, "1000"),
            sv("GAF618", 51.9, 11.0, ""),
        ]);
        let out = Recorder::default();

        let msg = run_planes(&src, &out, &radar(), "Harz", &area(), false)?;

        let texts = out.texts.borrow();
        assert_eq!(1, texts.len());
        assert_eq!(msg.as_deref(), Some(texts[0].as_str()));
        assert!(texts[0].starts_with("✈️ *HARZ RADAR*"));
        assert!(texts[0].contains("*GAF618*"));
        assert!(!texts[0].contains("DLH4AB"));
        Ok(())
    }

    #[test]
    fn test_planes_quiet() -> Result<()> {
        let src = snapshot(vec![sv("DLH4AB", 51.5, 10.2, "1000")]);
        let out = Recorder::default();

        let msg = run_planes(&src, &out, &radar(), "Harz", &area(), false)?;

        assert!(msg.is_none());
        assert!(out.texts.borrow().is_empty());
        Ok(())
    }

    #[test]
    fn test_planes_empty_diagnostic() -> Result<()> {
        let src = snapshot(vec![]);
        let out = Recorder::default();

        run_planes(&src, &out, &radar(), "Harz", &area(), true)?;

        let texts = out.texts.borrow();
        assert_eq!(1, texts.len());
        assert!(texts[0].starts_with("🧪 *PLANE-BOT TEST*"));
        assert!(texts[0].contains("No special flights"));
        Ok(())
    }

    #[test]
    fn test_planes_diagnostic_placeholder() -> Result<()> {
        let src = snapshot(vec![sv("DLH4AB", 51.5, 10.2, "1000")]);
        let out = Recorder::default();

        run_planes(&src, &out, &radar(), "Harz", &area(), true)?;

        let texts = out.texts.borrow();
        assert!(texts[0].contains("🧪 *TEST*"));
        assert!(texts[0].contains("*DLH4AB*"));
        Ok(())
    }

    #[test]
    fn test_planes_fetch_failure_sends_nothing() {
        let out = Recorder::default();

        let err = run_planes(&Canned(None), &out, &radar(), "Harz", &area(), true).unwrap_err();

        assert!(is_transport(&err));
        assert!(out.texts.borrow().is_empty());
    }

    #[test]
    fn test_planes_delivery_failure() {
        let src = snapshot(vec![sv("DLH9XY", 51.6, 10.9, "7700")]);
        let out = Recorder {
            fail: true,
            ..Recorder::default()
        };

        let err = run_planes(&src, &out, &radar(), "Harz", &area(), false).unwrap_err();
        assert!(is_transport(&err));
    }
}
