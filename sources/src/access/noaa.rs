//! NOAA Space Weather Prediction Center
//!
//! All products are public JSON files, no authentication.
//!

use eyre::Result;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, trace};

use skywatch_formats::{alerts_from_json, kp_samples_from_json, KpForecast, KpSample, SpaceAlert};

use crate::{http_client, http_get, SourceError, SpaceWeather};

/// Site parameters as found in the configuration file
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoaaConfig {
    pub alerts: String,
    pub kp_live: String,
    pub kp_forecast: String,
    /// Ovation aurora map for the northern hemisphere
    pub map: String,
}

impl Default for NoaaConfig {
    fn default() -> Self {
        Self {
            alerts: "https://services.swpc.noaa.gov/products/alerts.json".to_string(),
            kp_live: "https://services.swpc.noaa.gov/json/planetary_k_index_1m.json".to_string(),
            kp_forecast:
                "https://services.swpc.noaa.gov/products/noaa-planetary-k-index-forecast.json"
                    .to_string(),
            map: "https://services.swpc.noaa.gov/images/animations/ovation/north/latest.jpg"
                .to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Noaa {
    pub cfg: NoaaConfig,
    /// reqwest blocking client
    pub client: Client,
}

impl Noaa {
    #[tracing::instrument]
    pub fn new(cfg: &NoaaConfig, timeout: u64) -> Result<Self> {
        trace!("noaa::new");

        Ok(Noaa {
            cfg: cfg.clone(),
            client: http_client(timeout)?,
        })
    }

    /// Fetch one product as text
    ///
    #[tracing::instrument(skip(self))]
    fn get(&self, url: &str) -> Result<String> {
        let none: [(&str, &str); 0] = [];
        let resp = http_get!(self, url, &none).map_err(SourceError::HTTP)?;
        debug!("{:?}", &resp);

        match resp.status() {
            StatusCode::OK => Ok(resp.text().map_err(SourceError::HTTP)?),
            code => Err(SourceError::Status {
                site: "noaa",
                code: code.as_u16(),
                body: resp.text().unwrap_or_default(),
            }
            .into()),
        }
    }
}

impl SpaceWeather for Noaa {
    fn alerts(&self) -> Result<Vec<SpaceAlert>> {
        let data = self.get(&self.cfg.alerts)?;
        Ok(alerts_from_json(&data).map_err(SourceError::Payload)?)
    }

    fn kp_live(&self) -> Result<Vec<KpSample>> {
        let data = self.get(&self.cfg.kp_live)?;
        Ok(kp_samples_from_json(&data).map_err(SourceError::Payload)?)
    }

    fn kp_forecast(&self) -> Result<KpForecast> {
        let data = self.get(&self.cfg.kp_forecast)?;
        Ok(KpForecast::from_json(&data).map_err(SourceError::Payload)?)
    }

    fn map_url(&self) -> String {
        self.cfg.map.clone()
    }
}
