//! The `get_forecast` tool body: fetch once, render a plain-text report.

use log::warn;
use std::{fmt, sync::Arc};

use crate::{
    model::{Forecast, ForecastDay},
    provider::ForecastProvider,
};

/// Returned whenever the provider yields no usable forecast.
pub const NO_DATA_MESSAGE: &str = "Unable to fetch forecast data for this location";

/// Placed between consecutive day blocks.
pub const DAY_SEPARATOR: &str = "\n--\n";

/// Stateless and cheap to clone; concurrent calls share nothing but the
/// provider's connection pool.
#[derive(Debug, Clone)]
pub struct ForecastBridge {
    provider: Arc<dyn ForecastProvider>,
}

impl ForecastBridge {
    pub fn new(provider: Arc<dyn ForecastProvider>) -> Self {
        Self { provider }
    }

    pub async fn get_forecast(&self, location: &str) -> String {
        match self.provider.fetch_forecast(location).await {
            Ok(forecast) => render_report(&forecast),
            Err(err) => {
                warn!("Forecast for '{location}' unavailable: {err}");
                NO_DATA_MESSAGE.to_string()
            }
        }
    }
}

/// One day as a six-line block, with no leading or trailing newline.
pub fn render_day(day: &ForecastDay) -> String {
    format!(
        "{}:\n\
         Temperature: {}°C\n\
         Max Wind: {} kph\n\
         Chance of rain: {}\n\
         Chance of snow: {}\n\
         UV: {}",
        day.time,
        Number(day.avg_temp_c),
        Number(day.max_wind_kph),
        day.will_it_rain,
        day.will_it_snow,
        Number(day.uv),
    )
}

/// All days, in upstream order. No days renders as an empty string.
pub fn render_report(forecast: &Forecast) -> String {
    forecast.days.iter().map(render_day).collect::<Vec<_>>().join(DAY_SEPARATOR)
}

/// Prints a JSON float the way it reads on the wire: integral values keep
/// one decimal (`22.0`), everything else uses the shortest form (`18.5`).
struct Number(f64);

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
            write!(f, "{v:.1}")
        } else {
            write!(f, "{v}")
        }
    }
}
