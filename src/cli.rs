// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use clap::{Args, Parser, Subcommand};

/// Bearer Bridge
///
/// Exchanges a Discord OAuth bearer for a signed session token, and checks
/// session tokens issued earlier. Signing configuration comes from the
/// environment (`JWT_SECRET`, `JWT_ACCESS_TOKEN_EXPIRATION`, ...).
#[derive(Parser, Debug)]
#[clap(name = "bearer-bridge", version)]
pub struct Opt {
    #[clap(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Verify a provider bearer and print a new session token.
    Login(Login),

    /// Validate a session token and print its claims as JSON.
    Validate(SessionArgs),

    /// Print the provider profile behind a session token.
    Profile(SessionArgs),

    /// Print the provider guild memberships behind a session token.
    Guilds(SessionArgs),
}

#[derive(Args, Debug, Clone)]
pub struct Login {
    /// Discord OAuth bearer token.
    #[clap(long = "bearer")]
    pub bearer: String,

    /// Origin of the calling site, recorded in logs.
    #[clap(long = "origin")]
    pub origin: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Session token previously returned by `login`.
    #[clap(long = "token")]
    pub token: String,
}
