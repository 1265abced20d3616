// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Discord OAuth bearer verification.
//!
//! ## Transport
//!
//! - Every call builds its own HTTP client; nothing is shared between calls
//! - The bearer goes out as `Authorization: Bearer <token>`
//! - One GET per call, never retried: a failed request is a failed check
//! - No timeout unless `DiscordConfig::timeout` is set

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::DiscordConfig;

/// Token introspection endpoint ("who am I").
const USER_PATH: &str = "oauth2/@me";

/// Guild memberships of the token's owner.
const USER_GUILDS_PATH: &str = "users/@me/guilds";

/// Application the bearer was granted to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthApplication {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// User behind a bearer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub discriminator: Option<String>,
}

/// Body of the `oauth2/@me` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProfile {
    pub application: OAuthApplication,
    #[serde(default)]
    pub scopes: Vec<String>,
    pub expires: DateTime<Utc>,
    /// Present only when the grant includes the `identify` scope.
    #[serde(default)]
    pub user: Option<DiscordUser>,
}

/// One entry of the `users/@me/guilds` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub owner: bool,
    #[serde(default)]
    pub permissions: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Checks bearer tokens against the identity provider.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// `true` only when the provider answered 200 for this bearer right now.
    async fn check_is_valid_user(&self, bearer: &str) -> bool;

    /// Profile of the bearer's owner, or `None` on any failure.
    async fn fetch_profile(&self, bearer: &str) -> Option<IdentityProfile>;

    /// Guild memberships of the bearer's owner, or `None` on any failure.
    async fn fetch_guilds(&self, bearer: &str) -> Option<Vec<Guild>>;
}

/// HTTP verifier for the Discord API.
#[derive(Debug, Clone, Default)]
pub struct DiscordAuthManager {
    config: DiscordConfig,
}

impl DiscordAuthManager {
    pub fn new(config: DiscordConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiscordConfig {
        &self.config
    }

    /// A client scoped to a single call.
    fn client(&self) -> Option<Client> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }

        match builder.build() {
            Ok(client) => Some(client),
            Err(e) => {
                warn!(error = %e, "Failed to build identity provider client");
                None
            }
        }
    }

    async fn get(&self, path: &str, bearer: &str) -> Option<reqwest::Response> {
        let url = self.config.endpoint(path);
        let client = self.client()?;

        match client.get(&url).bearer_auth(bearer).send().await {
            Ok(response) => Some(response),
            Err(e) => {
                warn!(%url, error = %e, "Identity provider request failed");
                None
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, bearer: &str) -> Option<T> {
        let response = self.get(path, bearer).await?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(%status, path, "Identity provider returned non-200");
            return None;
        }

        match response.json::<T>().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(path, error = %e, "Identity provider response did not decode");
                None
            }
        }
    }
}

#[async_trait]
impl IdentityVerifier for DiscordAuthManager {
    async fn check_is_valid_user(&self, bearer: &str) -> bool {
        match self.get(USER_PATH, bearer).await {
            Some(response) => {
                let status = response.status();
                debug!(%status, "Identity provider check completed");
                status == StatusCode::OK
            }
            None => false,
        }
    }

    async fn fetch_profile(&self, bearer: &str) -> Option<IdentityProfile> {
        self.get_json(USER_PATH, bearer).await
    }

    async fn fetch_guilds(&self, bearer: &str) -> Option<Vec<Guild>> {
        self.get_json(USER_GUILDS_PATH, bearer).await
    }
}
