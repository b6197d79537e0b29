//! The risk prediction route.
//!
//! Validates and coerces the client request, forwards it to the external risk
//! scoring service and relays the answer unchanged.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::Value;
use tracing::{info, instrument};
use triage::payload::{PredictRequest, build_payload};

use crate::{
    AppState,
    error::{ErrorResponse, Result},
};

/// Predict health risk
///
/// The body needs `age`, `gender` and `bmi`; `symptoms` is optional and may be
/// a comma separated string or a list of strings. Other fields are ignored.
/// A body sent without a JSON content type is treated as empty.
#[utoipa::path(
    post,
    path = "/api/risk/predict",
    request_body(description = "Age, gender, BMI and symptoms of the patient"),
    responses(
        (status = 200, description = "The risk service response, unchanged"),
        (status = 400, description = "A required field is missing", body = ErrorResponse),
        (status = 500, description = "The risk service could not be reached", body = ErrorResponse),
        (status = "5XX", description = "The risk service rejected the request, with its status", body = ErrorResponse),
    )
)]
#[instrument(skip(gateway))]
#[axum::debug_handler]
pub async fn predict_risk(
    State(AppState { gateway, .. }): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>> {
    let body = match body {
        Ok(Json(body)) => body,
        Err(JsonRejection::MissingJsonContentType(_)) => Value::Null,
        Err(rejection) => return Err(rejection.into()),
    };

    let request = PredictRequest::from_body(&body);
    let payload = build_payload(&request)?;

    info!(?payload, "sending payload to risk service");

    let result = gateway.predict(&payload).await?;
    Ok(Json(result))
}
