//! Gateway and roster options shared by `serve` and `play`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use huecue_tournament::{GatewayClient, GatewayConfig, Roster};

#[derive(Args, Clone, Debug)]
pub struct GatewayArgs {
    /// Base URL of an OpenAI-compatible gateway
    #[arg(long, default_value = "http://localhost:8000/v1")]
    pub gateway_url: String,

    /// Bearer token for the gateway
    #[arg(long, env = "HUECUE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Roster JSON file: [{"id", "name", "color"}, ...]
    #[arg(long, value_name = "FILE")]
    pub agents: Option<PathBuf>,
}

impl GatewayArgs {
    /// Roster from `--agents`, or the built-in four
    pub fn load_roster(&self) -> Result<Roster> {
        match &self.agents {
            Some(path) => Roster::load(path)
                .with_context(|| format!("Failed to load roster: {}", path.display())),
            None => Ok(Roster::default_roster()),
        }
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        let config = GatewayConfig::new(&self.gateway_url);
        match &self.api_key {
            Some(key) => config.with_api_key(key.clone()),
            None => config,
        }
    }

    pub fn build_provider(&self) -> Result<GatewayClient> {
        GatewayClient::new(self.gateway_config()).context("Failed to build gateway client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> GatewayArgs {
        GatewayArgs {
            gateway_url: "https://gateway.test/v1/".to_string(),
            api_key: None,
            agents: None,
        }
    }

    #[test]
    fn test_default_roster() {
        let roster = args().load_roster().unwrap();
        assert_eq!(roster.len(), 4);
    }

    #[test]
    fn test_missing_roster_file() {
        let mut args = args();
        args.agents = Some(PathBuf::from("/nonexistent/agents.json"));
        let err = args.load_roster().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/agents.json"));
    }

    #[test]
    fn test_gateway_config() {
        let mut args = args();
        assert_eq!(args.gateway_config().api_key, None);
        assert_eq!(args.gateway_config().base_url, "https://gateway.test/v1");

        args.api_key = Some("secret".to_string());
        assert_eq!(args.gateway_config().api_key.as_deref(), Some("secret"));
    }
}
