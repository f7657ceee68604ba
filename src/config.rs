//! Env-driven configuration for the service and library.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binaries. Defaults are provided for convenience during development.
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::prompt::catalog::DEMO_IMAGES;

pub const DEFAULT_BASE_URL: &str = "https://ark.ap-southeast.bytepluses.com/api/v3";
pub const DEFAULT_MODEL: &str = "seedream-4-0-250828";
/// Request body cap. Inline product photos exceed axum's 2 MB default.
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub seedream_api_key: String,
    pub seedream_base_url: String,
    pub seedream_model: String,
    pub api_host: String,
    pub api_port: String,
    pub static_dir: String,
    pub demo_mode: bool,
    pub request_timeout: Duration,
    pub probe_timeout: Duration,
    pub pacing: Duration,
    pub inline_results: bool,
    pub max_body_bytes: usize,
    pub demo_images: Vec<String>,
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> Self {
        Config {
            seedream_api_key: env::var("SEEDREAM_API_KEY").unwrap_or_default(),
            seedream_base_url: env::var("SEEDREAM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            seedream_model: env::var("SEEDREAM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            api_port: env::var("API_PORT").unwrap_or_else(|_| "3000".to_string()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "./public".to_string()),
            demo_mode: env_flag("DEMO_MODE", false),
            request_timeout: Duration::from_secs(env_number("REQUEST_TIMEOUT_SECS", 120)),
            probe_timeout: Duration::from_secs(env_number("PROBE_TIMEOUT_SECS", 15)),
            pacing: Duration::from_millis(env_number("PACING_MS", 1000)),
            inline_results: env_flag("INLINE_RESULTS", true),
            max_body_bytes: env_number("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES as u64) as usize,
            demo_images: env::var("DEMO_IMAGE_URLS")
                .map(|raw| split_list(&raw))
                .unwrap_or_else(|_| DEMO_IMAGES.iter().map(|s| s.to_string()).collect()),
        }
    }

    pub fn print_env_vars() {
        let key_state = match env::var("SEEDREAM_API_KEY") {
            Ok(v) if !v.trim().is_empty() => "<set>",
            _ => "<unset>",
        };
        println!("SEEDREAM_API_KEY: {}", key_state);
        for key in [
            "SEEDREAM_BASE_URL",
            "SEEDREAM_MODEL",
            "API_HOST",
            "API_PORT",
            "STATIC_DIR",
            "DEMO_MODE",
            "REQUEST_TIMEOUT_SECS",
            "PROBE_TIMEOUT_SECS",
            "PACING_MS",
            "INLINE_RESULTS",
            "MAX_BODY_BYTES",
            "DEMO_IMAGE_URLS",
        ] {
            println!("{}: {}", key, env::var(key).unwrap_or_else(|_| "<unset>".to_string()));
        }
    }

    /// Listen address built from `api_host`/`api_port`, falling back to
    /// `127.0.0.1:3000` piecewise when either does not parse.
    pub fn socket_addr(&self) -> SocketAddr {
        let ip: IpAddr = self.api_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid API_HOST '{}', falling back to 127.0.0.1", self.api_host);
            IpAddr::from([127, 0, 0, 1])
        });
        let port: u16 = self.api_port.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid API_PORT '{}', falling back to 3000", self.api_port);
            3000
        });
        SocketAddr::new(ip, port)
    }

    pub fn has_api_key(&self) -> bool {
        !self.seedream_api_key.trim().is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => parse_flag(&v).unwrap_or_else(|| {
            tracing::warn!("Invalid {} '{}', falling back to {}", key, v, default);
            default
        }),
        Err(_) => default,
    }
}

fn env_number(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(v) => v.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {} '{}', falling back to {}", key, v, default);
            default
        }),
        Err(_) => default,
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_common_spellings() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" on "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn demo_image_list_drops_blank_entries() {
        let list = split_list("https://a.test/1.jpg, ,https://a.test/2.jpg,");
        assert_eq!(list, vec!["https://a.test/1.jpg", "https://a.test/2.jpg"]);
    }

    #[test]
    fn bad_host_and_port_fall_back() {
        let mut cfg = Config::new();
        cfg.api_host = "not-an-ip".into();
        cfg.api_port = "http".into();
        assert_eq!(cfg.socket_addr(), "127.0.0.1:3000".parse().unwrap());
    }
}
