// Current-weather client for OpenWeatherMap-compatible endpoints.

use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use crate::config::CollectorConfig;
use crate::models::ReadingValues;

#[derive(Debug, Deserialize)]
pub struct CurrentWeather {
    pub main: MainBlock,
    pub wind: WindBlock,
    #[serde(default)]
    pub weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
pub struct MainBlock {
    pub temp: f64,
    pub humidity: f64,
    pub pressure: f64,
}

#[derive(Debug, Deserialize)]
pub struct WindBlock {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct ConditionBlock {
    pub description: String,
}

impl CurrentWeather {
    pub fn into_values(self, city: &str) -> ReadingValues {
        ReadingValues {
            city: city.to_string(),
            temperature: self.main.temp,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
            pressure: self.main.pressure,
            conditions: self
                .weather
                .into_iter()
                .next()
                .map(|c| c.description)
                .unwrap_or_default(),
        }
    }
}

pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    city: String,
    units: String,
    api_key: String,
}

impl WeatherClient {
    /// None when no API key is configured.
    pub fn from_config(config: &CollectorConfig) -> anyhow::Result<Option<Self>> {
        let Some(api_key) = config.api_key.clone().filter(|k| !k.is_empty()) else {
            return Ok(None);
        };
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Some(Self {
            http,
            base_url: config.base_url.clone(),
            city: config.city.clone(),
            units: config.units.clone(),
            api_key,
        }))
    }

    #[instrument(skip(self), fields(operation = "fetch_current", city = %self.city))]
    pub async fn fetch_current(&self) -> anyhow::Result<ReadingValues> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", self.city.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "weather API returned {}",
                response.status()
            ));
        }

        let body: CurrentWeather = response.json().await?;
        Ok(body.into_values(&self.city))
    }
}
