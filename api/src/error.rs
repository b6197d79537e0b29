use std::sync::Arc;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use triage::payload::MissingFields;
use utoipa::ToSchema;

use crate::gateway::GatewayError;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// JSON error response structure.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    pub message: String,
}

/// The central error type used for HTTP responses.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("route {0} not found")]
    NotFound(String),

    #[error("malformed request body")]
    MalformedBody(
        #[source]
        #[from]
        JsonRejection,
    ),

    #[error(transparent)]
    Validation(#[from] MissingFields),

    /// The risk service answered with a non-success status.
    #[error("risk service responded with {status}")]
    Upstream { status: StatusCode, reason: String },

    /// The risk service could not be reached, or its answer was unusable.
    #[error("risk service call failed")]
    Gateway(#[source] GatewayError),

    #[error("internal error")]
    Internal(
        #[source]
        #[from]
        eyre::Report,
    ),
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Upstream { status, reason, .. } => AppError::Upstream { status, reason },
            err => AppError::Gateway(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(path) => (StatusCode::NOT_FOUND, format!("Route {path} not found")),
            AppError::MalformedBody(rejection) => (rejection.status(), rejection.body_text()),
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::Upstream { status, reason } => (*status, format!("ML Model Error: {reason}")),
            AppError::Gateway(..) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to predict risk".to_string(),
            ),
            AppError::Internal(..) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            ),
        };

        let mut response = (
            status,
            Json(ErrorResponse {
                success: false,
                message,
            }),
        )
            .into_response();

        response.extensions_mut().insert(Arc::new(self));

        response
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt as _;
    use serde_json::{Value, json};

    use super::*;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();

        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn validation_error_body() {
        let (status, body) = render(
            MissingFields {
                fields: vec!["bmi"],
            }
            .into(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "success": false, "message": "Missing required fields: age, gender, bmi" })
        );
    }

    #[tokio::test]
    async fn upstream_status_is_kept() {
        let err: AppError = GatewayError::Upstream {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            reason: "Unprocessable Entity".into(),
            body: "{\"detail\":\"bad sex\"}".into(),
        }
        .into();
        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "ML Model Error: Unprocessable Entity");
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn internal_details_are_hidden() {
        let (status, body) = render(eyre::eyre!("clock went backwards").into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal Server Error");
    }
}
