use crate::{Config, model::Forecast, provider::weatherapi::WeatherApiProvider};
use anyhow::Context;
use async_trait::async_trait;
use log::warn;
use std::{fmt::Debug, sync::Arc};
use thiserror::Error;

pub mod weatherapi;

/// Why a forecast could not be produced. The tool surface collapses all of
/// these into one message, but the cause is kept for logging.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to weather service failed: {0}")]
    Transport(String),

    #[error("request to weather service timed out")]
    Timeout,

    #[error("weather service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode weather service response: {0}")]
    Decode(String),

    #[error("weather service response is missing `{0}`")]
    MissingField(&'static str),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Fetch the multi-day forecast for `location`. Exactly one upstream
    /// request, no retries.
    async fn fetch_forecast(&self, location: &str) -> Result<Forecast, FetchError>;
}

/// Construct the weatherapi.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn ForecastProvider>> {
    if config.api_key.is_none() {
        warn!(
            "No API key configured; upstream requests will be rejected.\n\
             Hint: set {} or run `forecast-mcp configure`.",
            crate::config::API_KEY_ENV
        );
    }

    let provider =
        WeatherApiProvider::from_config(config).context("Failed to build weather HTTP client")?;

    Ok(Arc::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_works_without_api_key() {
        let cfg = Config::default();
        assert!(provider_from_config(&cfg).is_ok());
    }

    #[test]
    fn status_error_mentions_code_and_body() {
        let err = FetchError::Status { status: 401, body: "API key is invalid".into() };
        let msg = err.to_string();

        assert!(msg.contains("401"));
        assert!(msg.contains("API key is invalid"));
    }

    #[test]
    fn missing_field_names_the_path() {
        let err = FetchError::MissingField("forecast.forecastday[].hour[0]");
        assert!(err.to_string().contains("hour[0]"));
    }
}
