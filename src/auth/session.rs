// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Using an issued session token on later calls.
//!
//! ```rust,ignore
//! let session = AuthenticatedSession::from_authorization_header(header, &issuer)?;
//! let guilds = session.guilds(&verifier).await;
//! ```

use super::claims::AuthenticatedSession;
use super::discord::{Guild, IdentityProfile, IdentityVerifier};
use super::error::AuthError;
use super::issuer::TokenIssuer;

/// Pull the token out of an `Authorization: Bearer <token>` value.
pub fn bearer_from_header(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingAuthHeader)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthHeader)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }

    Ok(token)
}

impl AuthenticatedSession {
    /// Validate a raw session token.
    pub fn from_token(token: &str, issuer: &dyn TokenIssuer) -> Result<Self, AuthError> {
        let claims = issuer.validate_token(token)?;
        Self::from_claims(claims)
    }

    /// Validate the session token carried in an `Authorization` header value.
    pub fn from_authorization_header(
        header: Option<&str>,
        issuer: &dyn TokenIssuer,
    ) -> Result<Self, AuthError> {
        let token = bearer_from_header(header)?;
        Self::from_token(token, issuer)
    }

    /// Provider profile for the session's bearer.
    pub async fn profile(&self, verifier: &dyn IdentityVerifier) -> Option<IdentityProfile> {
        verifier.fetch_profile(&self.bearer).await
    }

    /// Provider guild memberships for the session's bearer.
    pub async fn guilds(&self, verifier: &dyn IdentityVerifier) -> Option<Vec<Guild>> {
        verifier.fetch_guilds(&self.bearer).await
    }
}
