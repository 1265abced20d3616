// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

use crate::config::LOG_FORMAT_ENV;

/// Install the global subscriber.
///
/// `RUST_LOG` drives filtering (default `info`); `LOG_FORMAT=json` switches to
/// structured JSON output. Logs go to stderr so command output on stdout stays
/// machine-readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json = matches!(std::env::var(LOG_FORMAT_ENV).as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .init();
    }
}
