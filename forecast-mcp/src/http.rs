//! HTTP mount points: the informational homepage and the MCP endpoint.

use anyhow::Context;
use axum::{Router, response::Html, routing::get};
use forecast_core::ForecastBridge;
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use std::future::Future;
use tokio::net::TcpListener;

use crate::server::WeatherServer;

/// Path the MCP streamable-HTTP service is nested under.
pub const MCP_PATH: &str = "/mcp";

const HOMEPAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>MCP Weather</title>
    <style>
    body {
        display: grid;
        place-items: center;
    }
    </style>
</head>
<body>
    <h1>MCP Weather</h1>
    <p>An MCP to get weather forecasts for the next 3 days for any city</p>
</body>
</html>
"#;

async fn homepage() -> Html<&'static str> {
    Html(HOMEPAGE)
}

/// `GET /` serves the homepage; `/mcp` carries tool traffic.
pub fn router(bridge: ForecastBridge) -> Router {
    let mcp_service = StreamableHttpService::new(
        move || Ok(WeatherServer::new(bridge.clone())),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    Router::new().route("/", get(homepage)).nest_service(MCP_PATH, mcp_service)
}

/// Bind `addr` and serve until `shutdown` resolves.
pub async fn serve_http(
    bridge: ForecastBridge,
    addr: &str,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let listener =
        TcpListener::bind(addr).await.with_context(|| format!("Failed to bind {addr}"))?;
    let local = listener.local_addr()?;
    log::info!("MCP server listening on http://{local}{MCP_PATH}");

    axum::serve(listener, router(bridge))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;

    log::info!("MCP server stopped.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use forecast_core::{FetchError, Forecast, ForecastProvider};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[derive(Debug)]
    struct NoDataProvider;

    #[async_trait]
    impl ForecastProvider for NoDataProvider {
        async fn fetch_forecast(&self, _location: &str) -> Result<Forecast, FetchError> {
            Err(FetchError::Timeout)
        }
    }

    fn app() -> Router {
        router(ForecastBridge::new(Arc::new(NoDataProvider)))
    }

    #[tokio::test]
    async fn homepage_is_html() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/html"));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("<h1>MCP Weather</h1>"));
        assert!(html.contains("next 3 days"));
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let response = app()
            .oneshot(Request::builder().uri("/sse").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
