// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Site login: verify a provider bearer, then mint a session token.
//!
//! Each attempt is independent. The only suspension point is the provider
//! check; nothing about a previous attempt is remembered, so the same bearer
//! is re-verified every time it is presented.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::claims::{Claim, ClaimSet};
use super::discord::IdentityVerifier;
use super::error::AuthError;
use super::issuer::TokenIssuer;
use crate::clock::{Clock, SystemClock};

/// Terminal outcome of a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizeStatus {
    Success,
    Forbidden,
}

/// Incoming login attempt.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    /// Provider bearer, forwarded verbatim.
    pub bearer: String,
    /// `Origin` of the calling request, for logging only.
    pub origin: Option<String>,
}

impl LoginRequest {
    pub fn new(bearer: impl Into<String>) -> Self {
        Self {
            bearer: bearer.into(),
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

/// Successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
}

impl LoginResponse {
    pub fn status(&self) -> AuthorizeStatus {
        AuthorizeStatus::Success
    }
}

/// Login use case with injected collaborators.
#[derive(Clone)]
pub struct SiteLogin {
    verifier: Arc<dyn IdentityVerifier>,
    issuer: Arc<dyn TokenIssuer>,
    clock: Arc<dyn Clock>,
}

impl SiteLogin {
    pub fn new(verifier: Arc<dyn IdentityVerifier>, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self::with_clock(verifier, issuer, Arc::new(SystemClock))
    }

    pub fn with_clock(
        verifier: Arc<dyn IdentityVerifier>,
        issuer: Arc<dyn TokenIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            verifier,
            issuer,
            clock,
        }
    }

    /// Run one login attempt.
    ///
    /// Returns `Err(AuthorizeStatus::Forbidden)` when the provider does not
    /// confirm the bearer, when `cancel` fires first, or when signing fails.
    pub async fn login(
        &self,
        request: LoginRequest,
        cancel: &CancellationToken,
    ) -> Result<LoginResponse, AuthorizeStatus> {
        let origin = request.origin.as_deref().unwrap_or("unknown");
        info!(origin, "Site login request initialized");

        let verified = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!(origin, "Site login request cancelled during verification");
                return Err(AuthorizeStatus::Forbidden);
            }
            valid = self.verifier.check_is_valid_user(&request.bearer) => valid,
        };

        match self.issue_for(verified, request.bearer) {
            Ok(token) => {
                info!(origin, "Site login request accepted");
                Ok(LoginResponse { token })
            }
            Err(e) => {
                warn!(origin, code = e.error_code(), error = %e, "Site login request denied");
                Err(AuthorizeStatus::Forbidden)
            }
        }
    }

    /// Mint the session token for a bearer the provider has answered for.
    fn issue_for(&self, verified: bool, bearer: String) -> Result<String, AuthError> {
        if !verified {
            return Err(AuthError::VerificationFailed);
        }

        let claims = ClaimSet::new().with(Claim::discord_bearer(bearer));
        debug!("Generating session token");
        self.issuer.generate_token(&claims, self.clock.now())
    }
}
