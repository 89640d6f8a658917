use crate::{
    Config, FetchError, WeatherResponse, config::Endpoint,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current weather for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> Result<WeatherResponse, FetchError>;
}

/// Construct the provider for a resolved endpoint.
pub fn provider_from_endpoint(endpoint: Endpoint) -> Box<dyn WeatherProvider> {
    Box::new(OpenWeatherProvider::new(endpoint.api_key, endpoint.base_url))
}

/// Construct the provider from config and the environment, failing fast when
/// no API key is available.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let endpoint = config.endpoint()?;
    Ok(provider_from_endpoint(endpoint))
}
