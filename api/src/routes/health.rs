//! Liveness endpoints.

use axum::Json;
use eyre::Context as _;
use serde::Serialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::instrument;
use utoipa::ToSchema;

use crate::error::Result;

/// The server is up.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    success: bool,
    message: String,
    /// Current server time, RFC 3339.
    timestamp: String,
}

/// Service banner.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RootResponse {
    success: bool,
    message: String,
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "The server is running", body = HealthResponse)
    )
)]
#[instrument]
pub async fn health() -> Result<Json<HealthResponse>> {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .wrap_err("failed to format current time")?;

    Ok(Json(HealthResponse {
        success: true,
        message: "Server is running".to_string(),
        timestamp,
    }))
}

/// API banner
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Identifies the API", body = RootResponse)
    )
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        success: true,
        message: "HealthAI Backend API".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use time::{OffsetDateTime, format_description::well_known::Rfc3339};

    use crate::testing::{app, get, send};

    #[tokio::test]
    async fn health_reports_running() {
        let (status, body) = send(app("http://localhost:1"), get("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Server is running");
        assert!(OffsetDateTime::parse(body["timestamp"].as_str().unwrap(), &Rfc3339).is_ok());
    }

    #[tokio::test]
    async fn root_banner() {
        let (status, body) = send(app("http://localhost:1"), get("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "success": true, "message": "HealthAI Backend API" })
        );
    }
}
