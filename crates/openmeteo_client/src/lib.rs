//! Open-Meteo forecast client.
//!
//! One GET per coordinate pair; the `daily` arrays come back ordered by
//! date ascending starting today, which maps directly onto the engine's
//! day-offset indexing (0 = today, 1 = tomorrow).

pub mod rate_limit;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use common::{Error, Forecast, ForecastProvider, Result};

use crate::rate_limit::RateLimiter;

const BASE_URL: &str = "https://api.open-meteo.com";
const DAILY_FIELDS: &str =
    "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum";

/// Async client with connection pooling and request rate limiting.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
    limiter: RateLimiter,
}

/// Response envelope for `/v1/forecast`. Fields the engine does not use
/// are ignored.
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    daily: DailySeries,
}

/// Per-day arrays, all implicitly indexed by day offset from today.
/// Individual entries may be null and arrays may be short; both decode
/// without error.
#[derive(Debug, Default, Deserialize)]
struct DailySeries {
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
}

impl OpenMeteoClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent("daily-digest-bot/0.1")
            .pool_max_idle_per_host(4)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build Open-Meteo HTTP client");

        Self {
            client,
            base_url: BASE_URL.to_string(),
            limiter: RateLimiter::new(),
        }
    }

    /// Fetch the daily forecast for a coordinate pair.
    ///
    /// Errors here mean "no forecast"; the dispatch loop downgrades them
    /// to a warning and suppresses weather-derived alerts only.
    pub async fn daily_forecast(&self, latitude: f64, longitude: f64) -> Result<Forecast> {
        self.limiter.wait().await;

        let resp = self
            .client
            .get(format!("{}/v1/forecast", self.base_url))
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| Error::Http(format!("forecast request failed: {e}")))?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(500).collect();
            return Err(Error::OpenMeteo(format!(
                "forecast request returned {status}: {snippet}"
            )));
        }

        let data: ForecastResponse = resp
            .json()
            .await
            .map_err(|e| Error::OpenMeteo(format!("JSON parse error: {e}")))?;

        let forecast = normalize(data.daily);
        debug!(
            "Forecast for ({latitude}, {longitude}): {} day(s)",
            forecast.max_temp.len()
        );

        Ok(forecast)
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<Forecast> {
        self.daily_forecast(latitude, longitude).await
    }
}

fn normalize(daily: DailySeries) -> Forecast {
    Forecast {
        max_temp: daily.temperature_2m_max,
        min_temp: daily.temperature_2m_min,
        precipitation_mm: daily.precipitation_sum,
    }
}
