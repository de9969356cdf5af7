/// One forecast day as rendered in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    /// Timestamp of the day's first hourly entry, as sent upstream.
    pub time: String,
    pub avg_temp_c: f64,
    pub max_wind_kph: f64,
    /// Upstream rain flag (0 or 1).
    pub will_it_rain: i64,
    /// Upstream snow flag (0 or 1).
    pub will_it_snow: i64,
    pub uv: f64,
}

/// Parsed upstream forecast, days in the order the service returned them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Forecast {
    pub days: Vec<ForecastDay>,
}
