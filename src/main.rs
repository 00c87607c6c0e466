// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::env;
use std::error::Error;

use tracing::{info, warn};

use willbank_client::auth::AuthState;
use willbank_client::config::ClientConfig;
use willbank_client::{logging, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = ClientConfig::from_env()?;
    logging::init(config.log_format);

    info!(
        base_url = %config.base_url,
        timeout_secs = config.timeout.as_secs(),
        data_dir = %config.data_dir.display(),
        "Starting WillBank client"
    );

    let state = AppState::with_file_storage(config)?;

    if state.auth.restore().await != AuthState::Authenticated {
        let email = env::var("WILLBANK_EMAIL").unwrap_or_default();
        let password = env::var("WILLBANK_PASSWORD").unwrap_or_default();
        if email.is_empty() {
            println!("Not signed in. Set WILLBANK_EMAIL and WILLBANK_PASSWORD to sign in.");
            return Ok(());
        }
        if let Err(e) = state.auth.login(&email, &password).await {
            println!("Sign-in failed: {}", e.display_message());
            return Ok(());
        }
    }

    let Some(user) = state.auth.current_user().await else {
        return Ok(());
    };
    println!("Signed in as {} ({})", user.email, user.role);

    match state.dashboard.for_current_user().await {
        Ok(dashboard) => {
            println!("Customer: {}", dashboard.customer.full_name());
            println!(
                "Total balance: {} XAF across {} account(s)",
                dashboard.total_balance, dashboard.accounts_count
            );
            for entry in &dashboard.accounts {
                println!(
                    "  {} {:?} {:?}: {} XAF",
                    entry.account.id,
                    entry.account.account_type,
                    entry.account.status,
                    entry.account.balance
                );
            }
            for tx in dashboard.recent_transactions.iter().take(5) {
                println!(
                    "  {:?} {} XAF {:?}",
                    tx.transaction_type, tx.amount, tx.status
                );
            }
        }
        Err(e) if e.is_auth_error() => {
            warn!(status = e.status, "Session rejected");
            println!("Session expired, please sign in again.");
        }
        Err(e) => println!("Dashboard unavailable: {}", e.display_message()),
    }

    Ok(())
}
