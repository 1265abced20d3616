// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use crate::auth::AuthError;
use crate::config::ConfigError;

/// Failures surfaced by the binary.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("login forbidden")]
    Forbidden,

    #[error("identity provider returned no {0}")]
    ProviderUnavailable(&'static str),

    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

impl BridgeError {
    /// Machine-readable code printed alongside the message.
    pub fn error_code(&self) -> &'static str {
        match self {
            BridgeError::Config(ConfigError::Missing(_)) => "configuration_missing",
            BridgeError::Config(ConfigError::Invalid { .. }) => "configuration_invalid",
            BridgeError::Auth(e) => e.error_code(),
            BridgeError::Forbidden => "forbidden",
            BridgeError::ProviderUnavailable(_) => "provider_unavailable",
            BridgeError::Output(_) => "output_error",
        }
    }

    /// Process exit status.
    pub fn exit_code(&self) -> u8 {
        match self {
            // EX_CONFIG
            BridgeError::Config(_) => 78,
            BridgeError::Forbidden => 3,
            BridgeError::Auth(_) => 4,
            BridgeError::ProviderUnavailable(_) => 5,
            BridgeError::Output(_) => 1,
        }
    }
}
