//! Ledgerly is a REST API server for personal bookkeeping.
//!
//! Users register an account, sign in to obtain a bearer token, and record
//! income and expense transactions organised into categories. Every resource
//! is owned by the user that created it, and the API refuses access across
//! user boundaries. Account balances are derived from the stored
//! transactions with exact decimal arithmetic.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

pub mod auth;
pub mod balance;
pub mod db;
mod error;
mod logging;
pub mod models;
pub mod routes;
mod state;
pub mod stores;

pub use error::Error;
pub use logging::logging_middleware;
pub use routes::build_router;
pub use state::{AppState, AuthState};

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down
/// gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
