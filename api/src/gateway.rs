//! Outbound calls to the external risk scoring service.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{error, instrument};
use triage::models::RiskRequestPayload;

/// Failure modes of a call to the risk service.
#[derive(thiserror::Error, Debug)]
pub enum GatewayError {
    /// The service answered, but not with a 2xx status.
    #[error("risk service responded with {status}")]
    Upstream {
        status: StatusCode,
        reason: String,
        /// Raw response body, kept for logging only.
        body: String,
    },

    /// The request never got an answer (DNS, refused connection, reset).
    #[error("could not reach risk service")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a 2xx status, but the body is not JSON.
    #[error("risk service returned an invalid body")]
    InvalidBody(#[source] reqwest::Error),
}

/// Client for the `POST /predict_risk` endpoint of the risk service.
///
/// Every call is a single request: no retries, no caching, and the timeouts
/// are whatever [`reqwest`] defaults to.
#[derive(Debug, Clone)]
pub struct RiskGateway {
    client: Client,
    endpoint: String,
}

impl RiskGateway {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/predict_risk", base_url.trim_end_matches('/')),
        }
    }

    /// The full URL predictions are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends the payload to the risk service and returns its JSON answer unchanged.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn predict(&self, payload: &RiskRequestPayload) -> Result<Value, GatewayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or_default().to_string();
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), %body, "risk service returned an error");

            return Err(GatewayError::Upstream {
                status,
                reason,
                body,
            });
        }

        response.json().await.map_err(GatewayError::InvalidBody)
    }
}
