use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{Config, ForecastBridge, provider_from_config};
use forecast_mcp::{serve_http, serve_stdio};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast-mcp", version, about = "MCP server for 3-day weather forecasts")]
pub struct Cli {
    // `None` runs `serve`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the MCP server.
    Serve {
        /// Bind host; overrides the config file.
        #[arg(long)]
        host: Option<String>,

        /// Bind port; overrides the config file.
        #[arg(long)]
        port: Option<u16>,

        /// Speak MCP over stdin/stdout instead of HTTP.
        #[arg(long, conflicts_with_all = ["host", "port"])]
        stdio: bool,
    },

    /// Fetch the forecast for a location once and print it.
    Forecast {
        /// "latitude,longitude", city name or IP address.
        location: String,
    },

    /// Store the weatherapi.com API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let command =
            self.command.unwrap_or(Command::Serve { host: None, port: None, stdio: false });

        match command {
            Command::Serve { host, port, stdio } => {
                let config = Config::load()?;
                let bridge = bridge_from_config(&config)?;

                if stdio {
                    return serve_stdio(bridge).await;
                }

                let host = host.unwrap_or(config.server.host);
                let port = port.unwrap_or(config.server.port);
                serve_http(bridge, &format!("{host}:{port}"), shutdown_signal()).await
            }
            Command::Forecast { location } => {
                let config = Config::load()?;
                let bridge = bridge_from_config(&config)?;
                println!("{}", bridge.get_forecast(&location).await);
                Ok(())
            }
            Command::Configure => configure(),
        }
    }
}

fn bridge_from_config(config: &Config) -> anyhow::Result<ForecastBridge> {
    Ok(ForecastBridge::new(provider_from_config(config)?))
}

/// Prompt for the API key and persist it. Environment overrides are not
/// written back.
fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_file()?;

    let api_key = inquire::Password::new("weatherapi.com API key:")
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown requested");
}
