use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::inbound::http::routes::RouteRule;

/// Development-only signing secret, used when no secret is configured and
/// `session.allow_insecure_fallback_secret` is set.
pub const INSECURE_FALLBACK_SECRET: &str = "insecure-development-secret-change-me-now";

const MIN_SECRET_BYTES: usize = 32;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub identity: IdentityConfig,
    pub credentials: CredentialsConfig,
    pub gate: GateConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub secret: Option<String>,
    pub expiration_hours: i64,
    pub cookie_name: String,
    pub secure_cookie: bool,
    #[serde(default)]
    pub allow_insecure_fallback_secret: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IdentityConfig {
    pub lookup_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub rehash_legacy_passwords: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GateConfig {
    pub login_path: String,
    pub landing_path: String,
    pub dotted_paths_are_assets: bool,
    pub routes: Vec<RouteRule>,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SESSION__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: SESSION__SECRET=... overrides session.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

impl SessionConfig {
    /// Resolve the process-wide signing secret once, at startup.
    ///
    /// # Errors
    /// * `ConfigError::NotFound` - No secret configured and the fallback is not allowed
    pub fn resolve_secret(&self) -> Result<String, ConfigError> {
        match self.secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => {
                if secret.len() < MIN_SECRET_BYTES {
                    tracing::warn!(
                        length = secret.len(),
                        minimum = MIN_SECRET_BYTES,
                        "Session secret is shorter than recommended"
                    );
                }
                Ok(secret.to_string())
            }
            None if self.allow_insecure_fallback_secret => {
                tracing::warn!(
                    "No session secret configured, using the insecure development fallback; \
                     set SESSION__SECRET before deploying"
                );
                Ok(INSECURE_FALLBACK_SECRET.to_string())
            }
            None => Err(ConfigError::NotFound("session.secret".to_string())),
        }
    }
}

impl IdentityConfig {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}
