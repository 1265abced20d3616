// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token issuance and validation.
//!
//! ## Token Format
//!
//! Session tokens are HS256 JWTs. The payload carries the claim set flattened
//! next to the registered `iat`, `nbf`, `exp` (and `iss`/`aud` when configured):
//!
//! ```text
//! { "DiscordBearer": "<bearer>", "iat": 1700000000, "nbf": 1700000000, "exp": 1700003600 }
//! ```
//!
//! ## Lifetime
//!
//! `exp = iat + lifetime`. A token is accepted while `now <= exp`, with no
//! clock-skew leeway. There is no revocation list: expiry is the only way a
//! token stops being valid.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::{ClaimSet, SessionClaims};
use super::error::AuthError;
use crate::clock::{Clock, SystemClock};
use crate::config::JwtTokenConfig;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Produces and checks session tokens.
pub trait TokenIssuer: Send + Sync {
    /// Sign `claims` as of `issued_at`. Deterministic for a given key and lifetime.
    fn generate_token(&self, claims: &ClaimSet, issued_at: DateTime<Utc>)
        -> Result<String, AuthError>;

    /// Verify signature and expiry of a previously issued token.
    fn validate_token(&self, token: &str) -> Result<SessionClaims, AuthError>;
}

/// HMAC-signed JWT issuer.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    config: Arc<JwtTokenConfig>,
    clock: Arc<dyn Clock>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtTokenIssuer {
    pub fn new(config: Arc<JwtTokenConfig>) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: Arc<JwtTokenConfig>, clock: Arc<dyn Clock>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret());
        let decoding_key = DecodingKey::from_secret(config.secret());
        Self {
            config,
            clock,
            encoding_key,
            decoding_key,
        }
    }

    /// Validate as of an explicit instant.
    pub fn validate_token_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionClaims, AuthError> {
        // Time checks are done below against `now`, not the system clock.
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        if let Some(ref issuer) = self.config.issuer {
            validation.set_issuer(&[issuer]);
        }

        if let Some(ref audience) = self.config.audience {
            validation.set_audience(&[audience]);
        } else {
            validation.validate_aud = false;
        }

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)?.claims;

        let now = now.timestamp();
        if claims.nbf > now {
            return Err(AuthError::TokenNotYetValid);
        }
        if now > claims.exp {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn generate_token(
        &self,
        claims: &ClaimSet,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        if claims.has_reserved_name() {
            return Err(AuthError::Signing(
                "claim set uses a registered JWT name".to_string(),
            ));
        }

        let expires_at = issued_at
            .checked_add_signed(self.config.lifetime)
            .ok_or_else(|| AuthError::Signing("expiry is out of range".to_string()))?;

        let iat = issued_at.timestamp();
        let payload = SessionClaims {
            claims: claims.clone(),
            iat,
            nbf: iat,
            exp: expires_at.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(ALGORITHM), &payload, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> Result<SessionClaims, AuthError> {
        self.validate_token_at(token, self.clock.now())
    }
}
