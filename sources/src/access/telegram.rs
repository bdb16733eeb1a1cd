//! Telegram Bot API delivery.
//!
//! We only need `sendMessage` and `sendPhoto`.  The bot token is part of the URL so it must
//! never end up in the logs.
//!
//! Telegram caches pictures by URL, so photo URLs get a `t=<timestamp>` parameter to force a
//! fresh download of pictures that change behind the same URL.
//!

use std::fmt::{Debug, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

use eyre::Result;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{http_client, http_post, Notify, SourceError};

/// Site parameters as found in the configuration file
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TelegramConfig {
    /// API endpoint
    pub url: String,
    /// Markdown flavour
    pub parse_mode: String,
    /// Destination, `CHAT_ID` in the environment wins
    pub chat_id: Option<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            url: "https://api.telegram.org".to_string(),
            parse_mode: "Markdown".to_string(),
            chat_id: None,
        }
    }
}

#[derive(Clone)]
pub struct Telegram {
    /// Base API url
    pub base_url: String,
    /// Bot token
    token: String,
    /// Destination
    pub chat_id: String,
    /// Text formatting
    pub parse_mode: String,
    /// reqwest blocking client
    pub client: Client,
}

#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

#[derive(Debug, Serialize)]
struct PhotoMessage<'a> {
    chat_id: &'a str,
    photo: &'a str,
    caption: &'a str,
    parse_mode: &'a str,
}

/// What the API answers, we only look at `ok` & `description`
///
#[derive(Debug, Deserialize)]
struct Answer {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl Telegram {
    #[tracing::instrument(skip(token))]
    pub fn new(cfg: &TelegramConfig, token: &str, chat_id: &str, timeout: u64) -> Result<Self> {
        trace!("telegram::new");

        if token.is_empty() {
            return Err(SourceError::MissingCredentials("telegram token").into());
        }
        if chat_id.is_empty() {
            return Err(SourceError::MissingCredentials("telegram chat id").into());
        }
        Ok(Telegram {
            base_url: cfg.url.trim_end_matches('/').to_owned(),
            token: token.to_owned(),
            chat_id: chat_id.to_owned(),
            parse_mode: cfg.parse_mode.to_owned(),
            client: http_client(timeout)?,
        })
    }

    fn call<T: Serialize + Debug>(&self, method: &str, data: &T) -> Result<()> {
        let url = format!("{}/bot{}/{}", self.base_url, self.token, method);
        debug!("telegram::{method}({data:?})");

        let resp = http_post!(self, &url, data).map_err(|e| SourceError::HTTP(e.without_url()))?;

        let code = resp.status();
        let body = resp.text().map_err(|e| SourceError::HTTP(e.without_url()))?;
        if code != StatusCode::OK {
            return Err(SourceError::Status {
                site: "telegram",
                code: code.as_u16(),
                body,
            }
            .into());
        }

        let answer: Answer = serde_json::from_str(&body).map_err(|e| SourceError::Refused {
            site: "telegram",
            reason: e.to_string(),
        })?;
        if !answer.ok {
            return Err(SourceError::Refused {
                site: "telegram",
                reason: answer.description.unwrap_or_default(),
            }
            .into());
        }
        trace!("telegram::{method} OK");
        Ok(())
    }
}

impl Debug for Telegram {
    /// Hide the token
    ///
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telegram")
            .field("base_url", &self.base_url)
            .field("token", &"HIDDEN")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl Notify for Telegram {
    fn name(&self) -> String {
        "telegram".to_string()
    }

    #[tracing::instrument(skip(self, text))]
    fn send_text(&self, text: &str) -> Result<()> {
        let msg = TextMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: &self.parse_mode,
            disable_web_page_preview: true,
        };
        self.call("sendMessage", &msg)
    }

    #[tracing::instrument(skip(self, caption))]
    fn send_photo(&self, url: &str, caption: &str) -> Result<()> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let photo = cache_bust(url, now);
        let msg = PhotoMessage {
            chat_id: &self.chat_id,
            photo: &photo,
            caption,
            parse_mode: &self.parse_mode,
        };
        self.call("sendPhoto", &msg)
    }
}

/// Append `t=<now>` to the URL.
///
pub fn cache_bust(url: &str, now: u64) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}t={now}")
}
