use config::{ConfigBuilder, builder::DefaultState};
use eyre::{Context as _, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub env: Environment,

    /// Base URL of the external risk scoring service, without the `/predict_risk` path.
    pub risk_service_url: String,
}

impl Configuration {
    /// Loads the configuration from environment variables, and configuration files.
    pub fn load() -> Result<Self> {
        let mut cfg =
            config::Config::builder().add_source(config::Environment::with_prefix("TRIAGE"));

        if let Ok(env) = std::env::var("TRIAGE_CONFIG_FILE") {
            cfg = cfg.add_source(config::File::with_name(&env));
        }

        Self::from_builder(cfg)
    }

    fn from_builder(cfg: ConfigBuilder<DefaultState>) -> Result<Self> {
        let cfg = cfg
            .build()
            .wrap_err("failed to build config")?
            .try_deserialize::<Self>()
            .wrap_err("failed to deserialize config")?;

        Ok(cfg)
    }

    #[inline]
    pub fn is_production(&self) -> bool {
        self.env == Environment::Production
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Environment {
    #[serde(rename = "development")]
    Development,

    #[serde(rename = "production")]
    #[default]
    Production,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_production() {
        let cfg = config::Config::builder()
            .set_override("risk_service_url", "http://localhost:8000")
            .unwrap();

        let cfg = Configuration::from_builder(cfg).unwrap();
        assert_eq!(cfg.risk_service_url, "http://localhost:8000");
        assert!(cfg.is_production());
    }

    #[test]
    fn development_environment() {
        let cfg = config::Config::builder()
            .set_override("risk_service_url", "http://localhost:8000")
            .unwrap()
            .set_override("env", "development")
            .unwrap();

        let cfg = Configuration::from_builder(cfg).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert!(!cfg.is_production());
    }

    #[test]
    fn risk_service_url_is_required() {
        let cfg = config::Config::builder();
        assert!(Configuration::from_builder(cfg).is_err());
    }
}
