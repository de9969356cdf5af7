use async_trait::async_trait;
use chrono::{Local, Timelike};
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    Config,
    model::{Forecast, ForecastDay},
    provider::FetchError,
};

use super::ForecastProvider;

/// Forecast window requested from the service.
pub const FORECAST_DAYS: u8 = 3;

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self { api_key, base_url, http })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(
            config.api_key.clone().unwrap_or_default(),
            config.base_url.clone(),
            config.timeout(),
        )
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast.json", self.base_url.trim_end_matches('/'))
    }

    /// Query parameters for one forecast request. `hour` is the local hour
    /// of day (0–23) at call time.
    pub fn build_query(&self, location: &str, hour: u32) -> Vec<(&'static str, String)> {
        vec![
            ("key", self.api_key.clone()),
            ("q", location.to_string()),
            ("days", FORECAST_DAYS.to_string()),
            ("hour", hour.to_string()),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct WaForecastHour {
    time: String,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    avgtemp_c: f64,
    maxwind_kph: f64,
    daily_will_it_rain: i64,
    daily_will_it_snow: i64,
    uv: f64,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    hour: Vec<WaForecastHour>,
    day: WaDay,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    forecast: WaForecast,
}

impl WaForecastResponse {
    fn into_forecast(self) -> Result<Forecast, FetchError> {
        let days = self
            .forecast
            .forecastday
            .into_iter()
            .map(|fd| {
                let first_hour = fd
                    .hour
                    .into_iter()
                    .next()
                    .ok_or(FetchError::MissingField("forecast.forecastday[].hour[0]"))?;

                Ok(ForecastDay {
                    time: first_hour.time,
                    avg_temp_c: fd.day.avgtemp_c,
                    max_wind_kph: fd.day.maxwind_kph,
                    will_it_rain: fd.day.daily_will_it_rain,
                    will_it_snow: fd.day.daily_will_it_snow,
                    uv: fd.day.uv,
                })
            })
            .collect::<Result<Vec<_>, FetchError>>()?;

        Ok(Forecast { days })
    }
}

#[async_trait]
impl ForecastProvider for WeatherApiProvider {
    async fn fetch_forecast(&self, location: &str) -> Result<Forecast, FetchError> {
        let hour = Local::now().hour(); // 0–23
        debug!("Requesting {FORECAST_DAYS}-day forecast for '{location}' (hour={hour})");

        let res = self
            .http
            .get(self.forecast_url())
            .query(&self.build_query(location, hour))
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: WaForecastResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        parsed.into_forecast()
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base_url: &str) -> WeatherApiProvider {
        WeatherApiProvider::new("KEY".into(), base_url.into(), Duration::from_secs(30))
            .expect("client should build")
    }

    #[test]
    fn query_carries_key_location_days_and_hour() {
        let query = provider("http://localhost").build_query("48.8567,2.3508", 17);

        assert_eq!(
            query,
            vec![
                ("key", "KEY".to_string()),
                ("q", "48.8567,2.3508".to_string()),
                ("days", "3".to_string()),
                ("hour", "17".to_string()),
            ]
        );
    }

    #[test]
    fn location_is_forwarded_verbatim() {
        let query = provider("http://localhost").build_query("  not a place  ", 0);
        assert_eq!(query[1], ("q", "  not a place  ".to_string()));
    }

    #[test]
    fn forecast_url_tolerates_trailing_slash() {
        assert_eq!(
            provider("https://api.weatherapi.com/v1/").forecast_url(),
            "https://api.weatherapi.com/v1/forecast.json"
        );
        assert_eq!(
            provider("https://api.weatherapi.com/v1").forecast_url(),
            "https://api.weatherapi.com/v1/forecast.json"
        );
    }

    #[test]
    fn parses_days_in_upstream_order() {
        let json = r#"{
            "location": {"name": "Paris"},
            "forecast": {"forecastday": [
                {"date": "2024-05-02",
                 "hour": [{"time": "2024-05-02 00:00", "temp_c": 11.0}],
                 "day": {"avgtemp_c": 14.1, "maxwind_kph": 10.0, "daily_will_it_rain": 0,
                         "daily_will_it_snow": 0, "uv": 3.0, "condition": {"text": "Sunny"}}},
                {"date": "2024-05-01",
                 "hour": [{"time": "2024-05-01 00:00"}, {"time": "2024-05-01 01:00"}],
                 "day": {"avgtemp_c": 18.5, "maxwind_kph": 22.0, "daily_will_it_rain": 1,
                         "daily_will_it_snow": 0, "uv": 4.0}}
            ]}
        }"#;

        let parsed: WaForecastResponse = serde_json::from_str(json).expect("valid payload");
        let forecast = parsed.into_forecast().expect("conversion");

        assert_eq!(forecast.days.len(), 2);
        assert_eq!(forecast.days[0].time, "2024-05-02 00:00");
        assert_eq!(forecast.days[1].time, "2024-05-01 00:00");
        assert_eq!(forecast.days[1].will_it_rain, 1);
        assert_eq!(forecast.days[1].uv, 4.0);
    }

    #[test]
    fn empty_hour_list_is_missing_field() {
        let json = r#"{"forecast": {"forecastday": [
            {"hour": [], "day": {"avgtemp_c": 1.0, "maxwind_kph": 1.0,
             "daily_will_it_rain": 0, "daily_will_it_snow": 1, "uv": 1.0}}
        ]}}"#;

        let parsed: WaForecastResponse = serde_json::from_str(json).expect("valid payload");
        let err = parsed.into_forecast().unwrap_err();

        assert!(matches!(err, FetchError::MissingField(_)));
    }

    #[test]
    fn truncate_body_caps_long_bodies() {
        let long = "x".repeat(500);
        let out = truncate_body(&long);

        assert_eq!(out.len(), 203);
        assert!(out.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "°".repeat(300);
        let out = truncate_body(&long);

        assert_eq!(out.chars().count(), 203);
    }
}
