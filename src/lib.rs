//! A web client for a personal finance REST API.
//!
//! The client serves HTML pages for managing spending categories and
//! transactions. Each form can create a new entity or edit an existing one;
//! submissions are sent to the finance API and the cached data is updated once
//! the API accepts them.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod api;
mod app_state;
mod auth;
mod category;
mod config;
mod endpoints;
mod error;
mod form;
mod html;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod session;
mod store;
mod transaction;
mod user;

#[cfg(test)]
mod test_utils;

pub use api::{FinanceApi, HttpFinanceApi};
pub use app_state::AppState;
pub use auth::BearerToken;
pub use category::{Category, CategoryDraft, CategoryId, Icon};
pub use config::ClientConfig;
pub use error::Error;
pub use form::{Editable, FormMode, FormState, Submission};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use store::{UserSnapshot, UserStore};
pub use transaction::{Transaction, TransactionDraft, TransactionId};
pub use user::{SetUserPayload, User, UserId};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to install terminate signal handler: {error}");
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
