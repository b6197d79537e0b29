use std::sync::Arc;

use crate::{config::Configuration, gateway::RiskGateway};

pub mod config;
pub mod error;
pub mod gateway;
pub mod routes;

/// Central application state that is shared across all parts of the API.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The config data.
    pub config: Arc<Configuration>,

    /// Client for the external risk scoring service.
    pub gateway: RiskGateway,
}

impl AppState {
    pub fn new(config: Configuration) -> Self {
        Self {
            gateway: RiskGateway::new(&config.risk_service_url),
            config: Arc::new(config),
        }
    }
}
