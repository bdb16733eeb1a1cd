//! OpenSky (.org) specific code
//!
//! We only use the anonymous (or BASIC authenticated) `/states/all` endpoint restricted to a
//! bounding box, once per run.
//!
//! Anonymous users get a 10s resolution and a limited daily quota, which is fine for our
//! cadence.
//!

use eyre::Result;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, trace};

use skywatch_common::BB;
use skywatch_formats::StateList;

use crate::{http_client, http_get, Auth, Snapshot, SourceError};

/// Site parameters as found in the configuration file
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct OpenskyConfig {
    /// Base site url
    pub url: String,
    /// Add this to `url` to fetch data
    pub route: String,
    /// Optional account
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for OpenskyConfig {
    fn default() -> Self {
        Self {
            url: "https://opensky-network.org/api".to_string(),
            route: "/states/all".to_string(),
            username: None,
            password: None,
        }
    }
}

/// This is the Opensky client/source struct.
///
#[derive(Clone, Debug)]
pub struct Opensky {
    /// Base site url taken from config
    pub base_url: String,
    /// Add this to `base_url` to fetch data
    pub get: String,
    /// Credentials
    pub auth: Auth,
    /// reqwest blocking client
    pub client: Client,
}

impl Opensky {
    #[tracing::instrument(skip(auth))]
    pub fn new(cfg: &OpenskyConfig, auth: Auth, timeout: u64) -> Result<Self> {
        trace!("opensky::new");

        Ok(Opensky {
            base_url: cfg.url.trim_end_matches('/').to_owned(),
            get: cfg.route.to_owned(),
            auth,
            client: http_client(timeout)?,
        })
    }
}

impl Snapshot for Opensky {
    fn name(&self) -> String {
        "opensky".to_string()
    }

    /// Single call API, the area is passed as `lamin`/`lomin`/`lamax`/`lomax`.
    ///
    #[tracing::instrument(skip(self), fields(auth = %self.auth))]
    fn fetch(&self, area: &BB) -> Result<StateList> {
        trace!("opensky::fetch");

        let url = format!("{}{}", self.base_url, self.get);
        let query = [
            ("lamin", area.min_lat.to_string()),
            ("lomin", area.min_lon.to_string()),
            ("lamax", area.max_lat.to_string()),
            ("lomax", area.max_lon.to_string()),
        ];
        trace!("Fetching data from {}…", url);

        let resp = match &self.auth {
            Auth::Anon => http_get!(self, &url, &query),
            Auth::Login { username, password } => {
                http_get!(self, &url, &query, username, password)
            }
        }
        .map_err(SourceError::HTTP)?;

        debug!("{:?}", &resp);

        // Check status
        //
        match resp.status() {
            StatusCode::OK => {
                trace!("OK");
            }
            code => {
                let body = resp.text().unwrap_or_default();
                return Err(SourceError::Status {
                    site: "opensky",
                    code: code.as_u16(),
                    body,
                }
                .into());
            }
        }

        trace!("Fetching raw data");
        let resp = resp.text().map_err(SourceError::HTTP)?;
        let sl = StateList::from_json(&resp).map_err(SourceError::Payload)?;
        Ok(sl)
    }
}
