use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use tracing::{debug, instrument};

use crate::{error::FetchError, model::WeatherResponse};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn current_url(&self) -> String {
        format!("{}{}", self.base_url, CURRENT_WEATHER_PATH)
    }
}

// Hand-written so the API key never ends up in logs.
impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn current_weather(&self, city: &str) -> Result<WeatherResponse, FetchError> {
        let res = self
            .http
            .get(self.current_url())
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::Body)?;

        debug!(%status, bytes = body.len(), "current weather response");

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        let parsed: WeatherResponse = serde_json::from_str(&body)?;
        if parsed.weather.is_empty() {
            return Err(FetchError::NoConditions);
        }

        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
