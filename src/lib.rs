//! Pennywise is a web app for tracking a personal account balance and the
//! transactions that change it.
//!
//! This library provides a web server that directly serves HTML pages. The
//! dashboard is a single page: dialogs for editing transactions, the profile,
//! settings and help are fetched with htmx and swapped into a dialog root.
//! All state is held in memory for the lifetime of the server.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod dashboard;
mod dialog;
mod endpoints;
mod error;
mod error_page;
mod help;
mod html;
mod logging;
mod navigation;
mod profile;
mod routing;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use dialog::{
    ClosePolicy, DialogController, DialogHost, DialogKind, DialogSize, DismissOutcome,
    DismissTrigger,
};
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use profile::{Currency, Language, ProfileDetails, Settings, UserProfile};
pub use routing::build_router;
pub use timezone::local_today;
pub use transaction::{
    DEMO_OPENING_BALANCE, Ledger, NewTransaction, SortDirection, SortKey, Totals, Transaction,
    TransactionId, TransactionType, TransactionView, TypeFilter, ViewParams, derive_view,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
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
