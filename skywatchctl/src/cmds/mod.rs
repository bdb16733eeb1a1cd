//! Sub-commands implementation.
//!
//! Every command gets its collaborators (snapshot source, space weather, delivery) as trait
//! objects so they can be exercised without the network.
//!

use eyre::Result;
use tracing::trace;

use skywatch_sources::{Notify, SourceError, Telegram};

use crate::{Config, Env, Status};

pub use aurora::*;
pub use list::*;
pub use planes::*;

mod aurora;
mod list;
mod planes;

/// Delivery to stdout, for `--dry-run`.
///
#[derive(Debug, Default)]
pub struct Console;

impl Notify for Console {
    fn name(&self) -> String {
        "console".to_string()
    }

    fn send_text(&self, text: &str) -> Result<()> {
        println!("{text}");
        Ok(())
    }

    fn send_photo(&self, url: &str, caption: &str) -> Result<()> {
        println!("[{url}]\n{caption}");
        Ok(())
    }
}

/// Pick the delivery side.  Missing credentials are a configuration error, found before any
/// network call.
///
#[tracing::instrument(skip(cfg, env))]
pub fn notifier(cfg: &Config, env: &Env, dry_run: bool) -> Result<Box<dyn Notify>> {
    trace!("notifier");

    if dry_run {
        return Ok(Box::new(Console));
    }
    let token = env
        .token
        .as_deref()
        .ok_or(Status::MissingCredentials("TELEGRAM_TOKEN"))?;
    let chat_id = cfg
        .telegram
        .chat_id
        .as_deref()
        .ok_or(Status::MissingCredentials("CHAT_ID"))?;
    Ok(Box::new(Telegram::new(&cfg.telegram, token, chat_id, cfg.timeout)?))
}

/// Transport errors end the run silently (but loudly in the logs), everything else is fatal.
///
pub fn is_transport(err: &eyre::Report) -> bool {
    matches!(
        err.downcast_ref::<SourceError>(),
        Some(
            SourceError::HTTP(_)
                | SourceError::Status { .. }
                | SourceError::Refused { .. }
                | SourceError::Payload(_)
        )
    )
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::cell::RefCell;

    use eyre::Result;

    use skywatch_sources::{Notify, SourceError};

    /// Keep everything sent, optionally failing like a refused delivery.
    ///
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub fail: bool,
        pub texts: RefCell<Vec<String>>,
        pub photos: RefCell<Vec<(String, String)>>,
    }

    impl Notify for Recorder {
        fn name(&self) -> String {
            "recorder".to_string()
        }

        fn send_text(&self, text: &str) -> Result<()> {
            if self.fail {
                return Err(SourceError::Refused {
                    site: "recorder",
                    reason: "nope".to_string(),
                }
                .into());
            }
            self.texts.borrow_mut().push(text.to_string());
            Ok(())
        }

        fn send_photo(&self, url: &str, caption: &str) -> Result<()> {
            if self.fail {
                return Err(SourceError::Refused {
                    site: "recorder",
                    reason: "nope".to_string(),
                }
                .into());
            }
            self.photos
                .borrow_mut()
                .push((url.to_string(), caption.to_string()));
            Ok(())
        }
    }
}
