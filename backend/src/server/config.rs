//! Environment-driven server configuration.
//!
//! Centralised here so the toggles are validated consistently and testable
//! against a mocked environment.

use std::net::SocketAddr;

use mockable::Env;
use tracing::warn;

const BIND_ADDR_ENV: &str = "BIND_ADDR";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SEED_DEMO_ENV: &str = "SEED_DEMO_DATA";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Application configuration resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Socket the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
    /// Whether to load the demo data set at startup.
    pub seed_demo_data: bool,
}

/// Errors raised while validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn bool_from_env<E: Env>(
    env: &E,
    name: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    match env.string(name) {
        Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidEnv {
            name,
            value,
            expected: BOOL_EXPECTED,
        }),
        None => Ok(default),
    }
}

impl AppConfig {
    /// Resolve configuration from the environment.
    ///
    /// `SESSION_COOKIE_SECURE` defaults to secure; local development turns it
    /// off explicitly rather than production turning it on.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ConfigError> {
        let bind_addr = match env.string(BIND_ADDR_ENV) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidEnv {
                name: BIND_ADDR_ENV,
                value,
                expected: "host:port",
            })?,
            None => {
                warn!(default = DEFAULT_BIND_ADDR, "BIND_ADDR not set");
                DEFAULT_BIND_ADDR
                    .parse()
                    .map_err(|_| ConfigError::InvalidEnv {
                        name: BIND_ADDR_ENV,
                        value: DEFAULT_BIND_ADDR.to_owned(),
                        expected: "host:port",
                    })?
            }
        };
        let cookie_secure = bool_from_env(env, COOKIE_SECURE_ENV, true)?;
        let seed_demo_data = bool_from_env(env, SEED_DEMO_ENV, false)?;
        Ok(Self {
            bind_addr,
            cookie_secure,
            seed_demo_data,
        })
    }
}
