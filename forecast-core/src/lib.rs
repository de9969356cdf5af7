//! Core library for the `forecast-mcp` server.
//!
//! This crate defines:
//! - Configuration handling
//! - The forecast provider abstraction and its weatherapi.com implementation
//! - The `get_forecast` tool body that renders a provider result as text
//!
//! It is used by `forecast-mcp`, but has no dependency on any MCP transport.

pub mod bridge;
pub mod config;
pub mod model;
pub mod provider;

pub use bridge::{ForecastBridge, NO_DATA_MESSAGE};
pub use config::{Config, ServerConfig};
pub use model::{Forecast, ForecastDay};
pub use provider::{FetchError, ForecastProvider, provider_from_config};
