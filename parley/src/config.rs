use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Process-wide configuration, resolved once at startup and never mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Raises the default log verbosity to debug.
    pub debug: bool,
}

/// Provider selection plus per-vendor credentials and model identifiers.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Raw `AI_PROVIDER` value. `None` when unset; the relay then falls back
    /// to Anthropic while the health endpoint reports "not configured".
    pub selector: Option<String>,
    pub anthropic: VendorConfig,
    pub openai: VendorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VendorConfig {
    /// Missing keys are not validated here; they surface as upstream
    /// authentication failures on the first call.
    pub api_key: String,
    pub model: String,
    /// Override for tests and proxies. `None` uses the vendor's public API.
    pub base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("PARLEY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("PARLEY_PORT", 5000),
                debug: parse_env_or("PARLEY_DEBUG", false),
            },
            provider: ProviderConfig {
                selector: env::var("AI_PROVIDER").ok(),
                anthropic: VendorConfig {
                    api_key: env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
                    model: env::var("ANTHROPIC_MODEL")
                        .unwrap_or_else(|_| "claude-3-5-sonnet-20241022".to_string()),
                    base_url: env::var("ANTHROPIC_BASE_URL").ok(),
                },
                openai: VendorConfig {
                    api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
                    model: env::var("OPENAI_MODEL")
                        .unwrap_or_else(|_| "gpt-4-turbo-preview".to_string()),
                    base_url: env::var("OPENAI_BASE_URL").ok(),
                },
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

impl ProviderConfig {
    /// Selector as reported by the health endpoint.
    pub fn display_name(&self) -> String {
        self.selector
            .clone()
            .unwrap_or_else(|| "not configured".to_string())
    }
}
