//! MCP (Model Context Protocol) tool surface.
//!
//! Exposes the forecast bridge as a single `get_forecast` tool.

use forecast_core::ForecastBridge;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{ServerHandler, ServiceExt, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;

/// One instance per MCP session; all of them share the bridge.
#[derive(Clone)]
pub struct WeatherServer {
    bridge: ForecastBridge,
    tool_router: ToolRouter<Self>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ForecastRequest {
    /// Location as latitude,longitude e.g. "48.8567,2.3508", city name e.g. "Paris" or IP address
    pub location: String,
}

#[tool_router]
impl WeatherServer {
    pub fn new(bridge: ForecastBridge) -> Self {
        Self { bridge, tool_router: Self::tool_router() }
    }

    // Upstream failures come back as the fixed no-data text, never as a tool error.
    #[tool(description = "Get weather forecast for the next 3 days for a location.")]
    async fn get_forecast(
        &self,
        Parameters(req): Parameters<ForecastRequest>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        let report = self.bridge.get_forecast(&req.location).await;
        Ok(CallToolResult::success(vec![Content::text(report)]))
    }
}

#[tool_handler]
impl ServerHandler for WeatherServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            // `from_build_env` alone would report rmcp's own crate name and version.
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "MCP for weather forecast for 3 days. Call get_forecast with a city name, \
                 a \"latitude,longitude\" pair or an IP address."
                    .into(),
            ),
            ..Default::default()
        }
    }
}

/// Serve the tool over stdin/stdout until the client disconnects.
pub async fn serve_stdio(bridge: ForecastBridge) -> anyhow::Result<()> {
    let service = WeatherServer::new(bridge).serve(rmcp::transport::stdio()).await?;
    log::info!("MCP server running on stdio");

    let reason = service.waiting().await?;
    log::info!("MCP server stopped: {reason:?}");
    Ok(())
}
