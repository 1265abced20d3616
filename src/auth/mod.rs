// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Exchanges a Discord OAuth bearer for this service's own session token.
//!
//! ## Auth Flow
//!
//! 1. Client presents its Discord OAuth bearer to `SiteLogin::login`
//! 2. The bearer is checked against `GET /oauth2/@me`:
//!    - 200 → accepted
//!    - anything else (401, 429, network error, ...) → `Forbidden`
//! 3. A session token is signed with the `DiscordBearer` claim set to the
//!    bearer, valid for the configured lifetime
//! 4. Later calls present the session token; `AuthenticatedSession` validates
//!    it and hands back the bearer so the provider can be reached again
//!
//! ## Security
//!
//! - Verification is never cached: every login hits the provider
//! - Session tokens are HS256 with a process-wide secret fixed at startup
//! - No revocation; tokens expire and that is the only lifecycle end
//! - Neither bearer nor session token is ever logged

pub mod claims;
pub mod discord;
pub mod error;
pub mod issuer;
pub mod login;
pub mod session;

pub use claims::{AuthenticatedSession, Claim, ClaimKind, ClaimSet, SessionClaims};
pub use discord::{DiscordAuthManager, Guild, IdentityProfile, IdentityVerifier};
pub use error::AuthError;
pub use issuer::{JwtTokenIssuer, TokenIssuer};
pub use login::{AuthorizeStatus, LoginRequest, LoginResponse, SiteLogin};
pub use session::bearer_from_header;
