// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use bearer_bridge::auth::{
    AuthenticatedSession, DiscordAuthManager, JwtTokenIssuer, LoginRequest, SiteLogin,
    TokenIssuer,
};
use bearer_bridge::config::{DiscordConfig, JwtTokenConfig};
use bearer_bridge::error::BridgeError;
use bearer_bridge::logging::init_tracing;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use cli::{Mode, Opt};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let opt = Opt::parse();

    match run(opt).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.error_code(), error = %e, "bearer-bridge failed");
            eprintln!("{}: {e}", e.error_code());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(opt: Opt) -> Result<(), BridgeError> {
    // Missing signing configuration is fatal before any work is done.
    let jwt_config = Arc::new(JwtTokenConfig::from_env()?);
    let discord_config = DiscordConfig::from_env()?;
    info!(
        lifetime_secs = jwt_config.lifetime.num_seconds(),
        provider = %discord_config.api_base_url,
        "Configuration loaded"
    );

    let issuer = Arc::new(JwtTokenIssuer::new(jwt_config));
    let verifier = Arc::new(DiscordAuthManager::new(discord_config));

    match opt.mode {
        Mode::Login(args) => {
            let cancel = CancellationToken::new();
            let on_signal = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    on_signal.cancel();
                }
            });

            let mut request = LoginRequest::new(args.bearer);
            if let Some(origin) = args.origin {
                request = request.with_origin(origin);
            }

            let login = SiteLogin::new(verifier, issuer);
            let response = login
                .login(request, &cancel)
                .await
                .map_err(|_| BridgeError::Forbidden)?;
            println!("{}", response.token);
        }
        Mode::Validate(args) => {
            let claims = issuer.validate_token(&args.token)?;
            println!("{}", serde_json::to_string_pretty(&claims)?);
        }
        Mode::Profile(args) => {
            let session = AuthenticatedSession::from_token(&args.token, issuer.as_ref())?;
            let profile = session
                .profile(verifier.as_ref())
                .await
                .ok_or(BridgeError::ProviderUnavailable("profile"))?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Mode::Guilds(args) => {
            let session = AuthenticatedSession::from_token(&args.token, issuer.as_ref())?;
            let guilds = session
                .guilds(verifier.as_ref())
                .await
                .ok_or(BridgeError::ProviderUnavailable("guilds"))?;
            println!("{}", serde_json::to_string_pretty(&guilds)?);
        }
    }

    Ok(())
}
