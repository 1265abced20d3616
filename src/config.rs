// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values, and the
//! immutable configuration values built from them at startup. Nothing here is
//! mutated after the process has started; the values are passed by reference
//! (or `Arc`) to the components that need them.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | HMAC secret used to sign session tokens | Required |
//! | `JWT_ACCESS_TOKEN_EXPIRATION` | Session token lifetime in minutes | Required |
//! | `JWT_ISSUER` | Issuer written to and checked on session tokens | Optional |
//! | `JWT_AUDIENCE` | Audience written to and checked on session tokens | Optional |
//! | `DISCORD_API_BASE_URL` | Identity provider API base | `https://discord.com/api` |
//! | `DISCORD_HTTP_TIMEOUT_SECS` | Per-call timeout for provider requests | Transport default |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::fmt;
use std::time::Duration;

use url::Url;

/// Environment variable name for the session token signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the session token lifetime (minutes).
pub const JWT_EXPIRATION_ENV: &str = "JWT_ACCESS_TOKEN_EXPIRATION";

/// Environment variable name for the expected/emitted `iss` claim.
pub const JWT_ISSUER_ENV: &str = "JWT_ISSUER";

/// Environment variable name for the expected/emitted `aud` claim.
pub const JWT_AUDIENCE_ENV: &str = "JWT_AUDIENCE";

/// Environment variable name for the identity provider API base URL.
pub const DISCORD_API_BASE_URL_ENV: &str = "DISCORD_API_BASE_URL";

/// Environment variable name for the optional provider request timeout.
pub const DISCORD_HTTP_TIMEOUT_ENV: &str = "DISCORD_HTTP_TIMEOUT_SECS";

/// Environment variable name selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default identity provider API base.
pub const DEFAULT_DISCORD_API_BASE_URL: &str = "https://discord.com/api";

/// HS256 keys shorter than this are rejected at startup.
pub const MIN_SECRET_LEN: usize = 32;

/// Longest accepted session token lifetime, in days.
pub const MAX_LIFETIME_DAYS: i64 = 3650;

/// Startup configuration failures. Always fatal to the process.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required configuration `{0}` is missing")]
    Missing(&'static str),

    #[error("configuration `{var}` is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Signing configuration for session tokens.
#[derive(Clone)]
pub struct JwtTokenConfig {
    secret: Vec<u8>,
    /// Lifetime of every issued session token.
    pub lifetime: chrono::Duration,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl JwtTokenConfig {
    /// Build a configuration directly (tests, embedding).
    pub fn new(secret: impl Into<Vec<u8>>, lifetime: chrono::Duration) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid {
                var: JWT_SECRET_ENV,
                reason: format!("must be at least {MIN_SECRET_LEN} bytes"),
            });
        }
        if lifetime <= chrono::Duration::zero() {
            return Err(ConfigError::Invalid {
                var: JWT_EXPIRATION_ENV,
                reason: "must be positive".to_string(),
            });
        }
        if lifetime > chrono::Duration::days(MAX_LIFETIME_DAYS) {
            return Err(ConfigError::Invalid {
                var: JWT_EXPIRATION_ENV,
                reason: format!("must not exceed {MAX_LIFETIME_DAYS} days"),
            });
        }

        Ok(Self {
            secret,
            lifetime,
            issuer: None,
            audience: None,
        })
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = required(&lookup, JWT_SECRET_ENV)?;
        let minutes_raw = required(&lookup, JWT_EXPIRATION_ENV)?;
        let minutes: i64 = minutes_raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var: JWT_EXPIRATION_ENV,
            reason: format!("expected a whole number of minutes, got `{minutes_raw}`"),
        })?;

        let lifetime = chrono::Duration::try_minutes(minutes).ok_or_else(|| ConfigError::Invalid {
            var: JWT_EXPIRATION_ENV,
            reason: format!("`{minutes_raw}` minutes is out of range"),
        })?;

        let mut config = Self::new(secret.into_bytes(), lifetime)?;
        config.issuer = optional(&lookup, JWT_ISSUER_ENV);
        config.audience = optional(&lookup, JWT_AUDIENCE_ENV);
        Ok(config)
    }
}

impl fmt::Debug for JwtTokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenConfig")
            .field("secret", &"<redacted>")
            .field("lifetime", &self.lifetime)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

/// Identity provider endpoint configuration.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub api_base_url: Url,
    /// `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_DISCORD_API_BASE_URL)
                .expect("default provider URL is valid"),
            timeout: None,
        }
    }
}

impl DiscordConfig {
    pub fn new(api_base_url: Url) -> Self {
        Self {
            api_base_url,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match optional(&lookup, DISCORD_API_BASE_URL_ENV) {
            Some(raw) => Self::new(Url::parse(&raw).map_err(|e| ConfigError::Invalid {
                var: DISCORD_API_BASE_URL_ENV,
                reason: e.to_string(),
            })?),
            None => Self::default(),
        };

        if let Some(raw) = optional(&lookup, DISCORD_HTTP_TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: DISCORD_HTTP_TIMEOUT_ENV,
                reason: format!("expected whole seconds, got `{raw}`"),
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Resolve a provider path (e.g. `oauth2/@me`) against the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, var).ok_or(ConfigError::Missing(var))
}

fn optional<F>(lookup: &F, var: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var).filter(|v| !v.trim().is_empty())
}
