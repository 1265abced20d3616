// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer Bridge - OAuth bearer to session token exchange
//!
//! A client hands over a Discord OAuth bearer; the bridge checks it with
//! Discord and, if Discord accepts it, returns a short-lived signed session
//! token that carries the bearer for later calls.
//!
//! ## Modules
//!
//! - `auth` - Provider verification, token issuance, login
//! - `clock` - Time source
//! - `config` - Startup configuration from the environment
//! - `error` - Process-level errors
//! - `logging` - Tracing setup

pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

#[cfg(test)]
pub(crate) mod test_support;
