// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

// Fake identity provider shared by the integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use bearer_bridge::config::{DiscordConfig, JwtTokenConfig};
use serde_json::json;
use url::Url;

pub const VALID_BEARER: &str = "abc123";
pub const RATE_LIMITED_BEARER: &str = "rate-limited";

static PROVIDER_URL: OnceLock<Url> = OnceLock::new();
static ME_HITS: AtomicUsize = AtomicUsize::new(0);
static RATE_LIMITED_HITS: AtomicUsize = AtomicUsize::new(0);

// Number of `oauth2/@me` requests seen so far by the shared provider.
pub fn me_hits() -> usize {
    ME_HITS.load(Ordering::SeqCst)
}

// Requests carrying `RATE_LIMITED_BEARER`. Only one test sends that bearer.
pub fn rate_limited_hits() -> usize {
    RATE_LIMITED_HITS.load(Ordering::SeqCst)
}

pub fn jwt_config() -> JwtTokenConfig {
    JwtTokenConfig::new(
        "integration-secret-integration-secret",
        chrono::Duration::minutes(30),
    )
    .expect("valid test config")
    .with_issuer("bearer-bridge-tests")
}

pub fn discord_config() -> DiscordConfig {
    DiscordConfig::new(ensure_provider().clone()).with_timeout(Duration::from_secs(5))
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn rejection(headers: &HeaderMap) -> Option<Response> {
    match bearer(headers) {
        Some(VALID_BEARER) => None,
        Some(RATE_LIMITED_BEARER) => Some(
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "message": "You are being rate limited.", "retry_after": 1.0 })),
            )
                .into_response(),
        ),
        _ => Some(
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "401: Unauthorized", "code": 0 })),
            )
                .into_response(),
        ),
    }
}

async fn oauth_me(headers: HeaderMap) -> Response {
    ME_HITS.fetch_add(1, Ordering::SeqCst);
    if bearer(&headers) == Some(RATE_LIMITED_BEARER) {
        RATE_LIMITED_HITS.fetch_add(1, Ordering::SeqCst);
    }
    if let Some(response) = rejection(&headers) {
        return response;
    }

    Json(json!({
        "application": { "id": "1000", "name": "Site" },
        "scopes": ["identify", "guilds"],
        "expires": "2030-01-01T00:00:00+00:00",
        "user": { "id": "42", "username": "clem", "avatar": null, "discriminator": "0" }
    }))
    .into_response()
}

async fn my_guilds(headers: HeaderMap) -> Response {
    if let Some(response) = rejection(&headers) {
        return response;
    }

    Json(json!([
        { "id": "7", "name": "Rustaceans", "icon": null, "owner": true,
          "permissions": "2147483647", "features": [] }
    ]))
    .into_response()
}

// Start the provider once on its own runtime so it outlives each test's runtime.
pub fn ensure_provider() -> &'static Url {
    PROVIDER_URL.get_or_init(|| {
        let published = Arc::new(OnceLock::<Url>::new());
        let published_thread = Arc::clone(&published);

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("provider runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral provider port");
                let addr = listener.local_addr().expect("provider address");
                let url = Url::parse(&format!("http://{addr}/api")).expect("provider url");
                let _ = published_thread.set(url);

                let app = Router::new()
                    .route("/api/oauth2/@me", get(oauth_me))
                    .route("/api/users/@me/guilds", get(my_guilds));
                axum::serve(listener, app).await.expect("provider failed");
            });
        });

        loop {
            if let Some(url) = published.get() {
                break url.clone();
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    })
}
