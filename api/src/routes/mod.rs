use axum::{Router, http::Uri};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_scalar::{Scalar, Servable as _};

use crate::{AppState, error::AppError};

mod health;
mod risk;

pub fn build_router() -> Router<AppState> {
    let (router, openapi) = OpenApiRouter::<AppState>::new()
        .routes(routes!(risk::predict_risk))
        .routes(routes!(health::health))
        .routes(routes!(health::root))
        .split_for_parts();

    router
        .merge(Scalar::with_url("/docs", openapi))
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> AppError {
    let path = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string);

    AppError::NotFound(path)
}
