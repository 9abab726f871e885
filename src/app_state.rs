//! Implements a struct that holds the state of the web client.

use std::sync::Arc;

use crate::{api::FinanceApi, session::SessionRegistry};

/// The state shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The client for the finance API.
    pub api: Arc<dyn FinanceApi>,

    /// The form and cache state of every browser session.
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// Create a new [AppState] with no sessions.
    pub fn new(api: Arc<dyn FinanceApi>) -> Self {
        Self {
            api,
            sessions: Arc::new(SessionRegistry::new()),
        }
    }
}
