// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token claims.

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::error::AuthError;

/// Registered JWT names written by the issuer itself.
const RESERVED_NAMES: [&str; 5] = ["iat", "nbf", "exp", "iss", "aud"];

/// Name of a claim carried in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClaimKind(Cow<'static, str>);

impl ClaimKind {
    /// Binds the verified provider bearer to the session.
    pub const DISCORD_BEARER: ClaimKind = ClaimKind(Cow::Borrowed("DiscordBearer"));

    /// Application-defined claim kind. `None` for registered JWT names.
    pub fn custom(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() || RESERVED_NAMES.contains(&name.as_str()) {
            return None;
        }
        Some(ClaimKind(Cow::Owned(name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClaimKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single (kind, value) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub kind: ClaimKind,
    pub value: String,
}

impl Claim {
    pub fn new(kind: ClaimKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// The bearer-binding claim.
    pub fn discord_bearer(bearer: impl Into<String>) -> Self {
        Self::new(ClaimKind::DISCORD_BEARER, bearer)
    }
}

/// Claims keyed by kind. Later inserts of the same kind replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(BTreeMap<String, String>);

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, claim: Claim) {
        self.0.insert(claim.kind.as_str().to_string(), claim.value);
    }

    pub fn with(mut self, claim: Claim) -> Self {
        self.insert(claim);
        self
    }

    pub fn get(&self, kind: &ClaimKind) -> Option<&str> {
        self.0.get(kind.as_str()).map(String::as_str)
    }

    /// The provider bearer bound to this session, if any.
    pub fn discord_bearer(&self) -> Option<&str> {
        self.get(&ClaimKind::DISCORD_BEARER)
    }

    /// True if any key collides with a registered JWT name.
    pub(crate) fn has_reserved_name(&self) -> bool {
        self.0.keys().any(|k| RESERVED_NAMES.contains(&k.as_str()))
    }
}

impl FromIterator<Claim> for ClaimSet {
    fn from_iter<I: IntoIterator<Item = Claim>>(iter: I) -> Self {
        let mut set = ClaimSet::new();
        for claim in iter {
            set.insert(claim);
        }
        set
    }
}

/// JWT payload of a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub claims: ClaimSet,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Not before (Unix seconds)
    pub nbf: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

/// A validated session token, as seen by code serving an authenticated call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    /// Provider bearer carried by the session
    pub bearer: String,
    /// Every claim in the token, the bearer included
    pub claims: ClaimSet,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthenticatedSession {
    /// Create from decoded token claims.
    pub fn from_claims(claims: SessionClaims) -> Result<Self, AuthError> {
        let bearer = claims
            .claims
            .discord_bearer()
            .ok_or(AuthError::MissingBearerClaim)?
            .to_string();

        Ok(Self {
            bearer,
            issued_at: timestamp(claims.iat)?,
            expires_at: timestamp(claims.exp)?,
            claims: claims.claims,
        })
    }
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, AuthError> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or(AuthError::MalformedToken)
}
