//! MCP server for the 3-day forecast tool.
//!
//! - [`server`]: the rmcp tool handler
//! - [`http`]: homepage and streamable-HTTP mount
//!
//! The `forecast-mcp` binary wires these to configuration and the CLI.

pub mod http;
pub mod server;

pub use http::{MCP_PATH, router, serve_http};
pub use server::{ForecastRequest, WeatherServer, serve_stdio};
