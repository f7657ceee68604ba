//! Startup connectivity check deciding between production and demo mode.
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::config::Config;
use crate::seedream::client::SeedreamClient;
use crate::seedream::types::ImageGenerationRequest;

/// Operating mode, decided once before the server starts taking requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    Production,
    Demo,
}

impl ApiMode {
    pub fn is_production(self) -> bool {
        self == ApiMode::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApiMode::Production => "production",
            ApiMode::Demo => "demo",
        }
    }
}

impl fmt::Display for ApiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Send one cheap generation request. Any answer in time means production;
/// errors, non-2xx and a hung probe all mean demo. No retries.
pub async fn probe_api(client: &SeedreamClient, limit: Duration) -> ApiMode {
    tracing::info!("Checking Seedream API connectivity at {}", client.base_url());
    let request = ImageGenerationRequest::new(client.model(), "test image").with_size("1K");

    match tokio::time::timeout(limit, client.generate_images(&request)).await {
        Ok(Ok(_)) => {
            tracing::info!("Seedream API reachable, running in production mode");
            ApiMode::Production
        }
        Ok(Err(e)) => {
            tracing::warn!("Seedream API unavailable ({}), running in demo mode", e);
            ApiMode::Demo
        }
        Err(_) => {
            tracing::warn!("Seedream API probe timed out after {:?}, running in demo mode", limit);
            ApiMode::Demo
        }
    }
}

/// Apply the `DEMO_MODE` override and the missing-key shortcut, probing otherwise.
pub async fn resolve_mode(config: &Config, client: &SeedreamClient) -> ApiMode {
    if config.demo_mode {
        tracing::info!("DEMO_MODE set, skipping API probe");
        return ApiMode::Demo;
    }
    if !config.has_api_key() {
        tracing::warn!("SEEDREAM_API_KEY not set, running in demo mode");
        return ApiMode::Demo;
    }
    probe_api(client, config.probe_timeout).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_api_means_demo() {
        let client = SeedreamClient::new("http://127.0.0.1:1", "k", "m", Duration::from_secs(2)).unwrap();
        assert_eq!(probe_api(&client, Duration::from_secs(5)).await, ApiMode::Demo);
    }

    #[tokio::test]
    async fn forced_demo_skips_probe() {
        let mut config = Config::new();
        config.demo_mode = true;
        config.seedream_api_key = "k".into();
        let client = SeedreamClient::new("http://127.0.0.1:1", "k", "m", Duration::from_secs(2)).unwrap();
        assert_eq!(resolve_mode(&config, &client).await, ApiMode::Demo);
    }

    #[tokio::test]
    async fn missing_key_means_demo() {
        let mut config = Config::new();
        config.demo_mode = false;
        config.seedream_api_key = "  ".into();
        let client = SeedreamClient::new("http://127.0.0.1:1", "", "m", Duration::from_secs(2)).unwrap();
        assert_eq!(resolve_mode(&config, &client).await, ApiMode::Demo);
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ApiMode::Production).unwrap(), "production");
        assert_eq!(ApiMode::Demo.to_string(), "demo");
    }
}
