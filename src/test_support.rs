// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared fakes for unit tests.

use std::sync::Mutex;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;
use url::Url;

use crate::auth::discord::{DiscordUser, Guild, IdentityProfile, IdentityVerifier, OAuthApplication};
use crate::clock::Clock;
use crate::config::JwtTokenConfig;

/// Bearer the fake provider accepts.
pub(crate) const VALID_BEARER: &str = "abc123";

pub(crate) const TEST_SECRET: &str = "test-secret-test-secret-test-secret!";

pub(crate) fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
}

/// HS256 config with a 15 minute lifetime.
pub(crate) fn jwt_config() -> JwtTokenConfig {
    JwtTokenConfig::new(TEST_SECRET, Duration::minutes(15)).expect("valid test config")
}

// Shared fixed time source for deterministic tests.
pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Advances by `step` on every read.
pub(crate) struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl SteppingClock {
    pub(crate) fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next: Mutex::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut guard = self.next.lock().expect("clock mutex poisoned");
        let now = *guard;
        *guard = now + self.step;
        now
    }
}

/// Verifier with a fixed answer that records every bearer it sees.
pub(crate) struct StaticVerifier {
    accept: bool,
    delay: Option<StdDuration>,
    checked: Mutex<Vec<String>>,
    profiled: Mutex<Vec<String>>,
}

impl StaticVerifier {
    pub(crate) fn accepting() -> Self {
        Self::new(true)
    }

    pub(crate) fn rejecting() -> Self {
        Self::new(false)
    }

    fn new(accept: bool) -> Self {
        Self {
            accept,
            delay: None,
            checked: Mutex::new(Vec::new()),
            profiled: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_delay(mut self, delay: StdDuration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn checked(&self) -> Vec<String> {
        self.checked.lock().expect("checked mutex poisoned").clone()
    }

    pub(crate) fn profiled(&self) -> Vec<String> {
        self.profiled.lock().expect("profiled mutex poisoned").clone()
    }

    fn record_lookup(&self, bearer: &str) {
        self.profiled
            .lock()
            .expect("profiled mutex poisoned")
            .push(bearer.to_string());
    }
}

#[async_trait]
impl IdentityVerifier for StaticVerifier {
    async fn check_is_valid_user(&self, bearer: &str) -> bool {
        self.checked
            .lock()
            .expect("checked mutex poisoned")
            .push(bearer.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.accept
    }

    async fn fetch_profile(&self, bearer: &str) -> Option<IdentityProfile> {
        self.record_lookup(bearer);
        self.accept.then(|| IdentityProfile {
            application: OAuthApplication {
                id: "1000".to_string(),
                name: Some("Site".to_string()),
            },
            scopes: vec!["identify".to_string()],
            expires: fixed_time() + Duration::days(7),
            user: Some(DiscordUser {
                id: "42".to_string(),
                username: "clem".to_string(),
                global_name: None,
                avatar: None,
                discriminator: Some("0".to_string()),
            }),
        })
    }

    async fn fetch_guilds(&self, bearer: &str) -> Option<Vec<Guild>> {
        self.record_lookup(bearer);
        self.accept.then(|| {
            vec![Guild {
                id: "7".to_string(),
                name: "Rustaceans".to_string(),
                icon: None,
                owner: false,
                permissions: Some("0".to_string()),
                features: Vec::new(),
            }]
        })
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {VALID_BEARER}"))
}

async fn oauth_me(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "401: Unauthorized", "code": 0 })))
            .into_response();
    }

    Json(json!({
        "application": { "id": "1000", "name": "Site" },
        "scopes": ["identify", "guilds"],
        "expires": "2026-10-25T12:00:00+00:00",
        "user": {
            "id": "42",
            "username": "clem",
            "global_name": "Clem",
            "avatar": null,
            "discriminator": "0"
        }
    }))
    .into_response()
}

async fn my_guilds(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    Json(json!([
        {
            "id": "7",
            "name": "Rustaceans",
            "icon": null,
            "owner": true,
            "permissions": "2147483647",
            "features": ["COMMUNITY"]
        },
        {
            "id": "8",
            "name": "Bots",
            "icon": "a_1234",
            "owner": false,
            "permissions": "104324673",
            "features": []
        }
    ]))
    .into_response()
}

/// Local stand-in for the provider API. Returns its `/api` base URL.
pub(crate) async fn spawn_fake_provider() -> Url {
    let app = Router::new()
        .route("/api/oauth2/@me", get(oauth_me))
        .route("/api/users/@me/guilds", get(my_guilds));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake provider");
    let addr = listener.local_addr().expect("fake provider address");

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Url::parse(&format!("http://{addr}/api")).expect("fake provider url")
}
