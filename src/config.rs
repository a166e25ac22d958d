//! Directory client configuration parsed from environment variables.

use std::time::Duration;

use access::RetryPolicy;

pub const DEFAULT_API_BASE_URL: &str = "https://scarlet-aid-server.vercel.app";
pub const DEFAULT_LOOKUP_ATTEMPTS: u32 = 3;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request: Duration,
    pub connect: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub api_base_url: String,
    pub lookup_attempts: u32,
    pub timeouts: Timeouts,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            lookup_attempts: DEFAULT_LOOKUP_ATTEMPTS,
            timeouts: Timeouts {
                request: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
                connect: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            },
        }
    }
}

impl ResolverConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `SCARLET_API_BASE_URL`: REST backend base URL
    /// - `SCARLET_ROLE_LOOKUP_ATTEMPTS`: default 3, minimum 1
    /// - `SCARLET_REQUEST_TIMEOUT_SECS`: default 15
    /// - `SCARLET_CONNECT_TIMEOUT_SECS`: default 5
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a numeric variable is set but
    /// does not parse, or the base URL is blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = match std::env::var("SCARLET_API_BASE_URL") {
            Ok(raw) if raw.trim().is_empty() => {
                return Err(ConfigError::Invalid { var: "SCARLET_API_BASE_URL", value: raw });
            }
            Ok(raw) => raw.trim().trim_end_matches('/').to_owned(),
            Err(_) => DEFAULT_API_BASE_URL.to_owned(),
        };
        let lookup_attempts = env_parse("SCARLET_ROLE_LOOKUP_ATTEMPTS", DEFAULT_LOOKUP_ATTEMPTS)?.max(1);
        let timeouts = Timeouts {
            request: Duration::from_secs(env_parse("SCARLET_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?),
            connect: Duration::from_secs(env_parse("SCARLET_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?),
        };
        Ok(Self { api_base_url, lookup_attempts, timeouts })
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.lookup_attempts)
    }
}

fn env_parse<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(var) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid { var, value: raw }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
