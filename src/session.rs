//! Per-browser state: the cached user, both forms and the cached transactions.
//!
//! Sessions are keyed by the bearer token, so every browser logged in to the
//! finance API gets its own forms. None of the session locks are held while
//! waiting on the finance API.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    AppState, Error,
    api::FinanceApi,
    auth::BearerToken,
    category::Category,
    form::FormState,
    store::UserStore,
    transaction::Transaction,
};

/// Lock `mutex`, mapping a poisoned lock to [Error::SessionLockError].
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, Error> {
    mutex
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire session lock: {error}"))
        .map_err(|_| Error::SessionLockError)
}

/// The state of one browser session.
#[derive(Debug, Default)]
pub struct Session {
    /// The authenticated user and their categories.
    pub user: UserStore,
    category_form: Mutex<FormState<Category>>,
    transaction_form: Mutex<FormState<Transaction>>,
    /// `None` until the transactions have been fetched.
    transactions: Mutex<Option<Vec<Transaction>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category_form(&self) -> Result<MutexGuard<'_, FormState<Category>>, Error> {
        lock(&self.category_form)
    }

    pub fn transaction_form(&self) -> Result<MutexGuard<'_, FormState<Transaction>>, Error> {
        lock(&self.transaction_form)
    }

    /// The cached transactions, `None` if they have not been fetched yet.
    pub fn transactions(&self) -> Result<Option<Vec<Transaction>>, Error> {
        Ok(lock(&self.transactions)?.clone())
    }

    /// Load the user from the finance API unless it is already cached.
    ///
    /// If the store is written to while the request is in flight, the
    /// response is dropped in favour of the newer data.
    pub async fn hydrate_user(&self, api: &dyn FinanceApi, token: &BearerToken) -> Result<(), Error> {
        let snapshot = self.user.snapshot()?;
        if snapshot.user.is_some() {
            return Ok(());
        }

        let user = api.fetch_user(token).await?.into_user();

        match self.user.replace_user(snapshot.version, user) {
            Ok(_) => Ok(()),
            Err(Error::StaleUser { expected, found }) => {
                tracing::debug!(
                    "dropping fetched user, the store moved from version {expected} to {found}"
                );
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    /// Fetch the transactions from the finance API and replace the cache.
    pub async fn refresh_transactions(
        &self,
        api: &dyn FinanceApi,
        token: &BearerToken,
    ) -> Result<Vec<Transaction>, Error> {
        let transactions = api.list_transactions(token).await?;
        *lock(&self.transactions)? = Some(transactions.clone());

        Ok(transactions)
    }

    /// The cached transactions, fetching them on first use.
    pub async fn load_transactions(
        &self,
        api: &dyn FinanceApi,
        token: &BearerToken,
    ) -> Result<Vec<Transaction>, Error> {
        match self.transactions()? {
            Some(transactions) => Ok(transactions),
            None => self.refresh_transactions(api, token).await,
        }
    }

    /// Drop the cached transactions so the next load fetches them again.
    pub fn invalidate_transactions(&self) -> Result<(), Error> {
        *lock(&self.transactions)? = None;

        Ok(())
    }
}

/// The number of sessions kept before the least recently used one is dropped.
pub const MAX_SESSIONS: usize = 1024;

/// All live sessions, keyed by bearer token.
///
/// Holds at most `capacity` sessions. Sessions whose token the finance API
/// rejects are dropped as soon as the rejection is seen.
#[derive(Debug)]
pub struct SessionRegistry {
    capacity: usize,
    sessions: Mutex<Sessions>,
}

#[derive(Debug, Default)]
struct Sessions {
    entries: HashMap<BearerToken, SessionEntry>,
    /// Incremented on every lookup, used to find the least recently used session.
    clock: u64,
}

#[derive(Debug)]
struct SessionEntry {
    session: Arc<Session>,
    last_used: u64,
}

impl Sessions {
    fn evict_least_recently_used(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(token, _)| token.clone());

        if let Some(token) = oldest {
            tracing::debug!("session limit reached, dropping least recently used session");
            self.entries.remove(&token);
        }
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_capacity(MAX_SESSIONS)
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that keeps at most `capacity` sessions (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            sessions: Mutex::default(),
        }
    }

    /// The session for `token`, created empty on first use.
    pub fn get_or_create(&self, token: &BearerToken) -> Result<Arc<Session>, Error> {
        let mut sessions = lock(&self.sessions)?;
        sessions.clock += 1;
        let now = sessions.clock;

        if let Some(entry) = sessions.entries.get_mut(token) {
            entry.last_used = now;
            return Ok(entry.session.clone());
        }

        if sessions.entries.len() >= self.capacity {
            sessions.evict_least_recently_used();
        }

        tracing::debug!("starting new session");
        let session = Arc::new(Session::new());
        sessions.entries.insert(
            token.clone(),
            SessionEntry {
                session: session.clone(),
                last_used: now,
            },
        );

        Ok(session)
    }

    /// Drop the session for `token`, if there is one.
    pub fn forget(&self, token: &BearerToken) -> Result<(), Error> {
        if lock(&self.sessions)?.entries.remove(token).is_some() {
            tracing::debug!("dropped session");
        }

        Ok(())
    }

    /// The number of live sessions.
    pub fn len(&self) -> Result<usize, Error> {
        Ok(lock(&self.sessions)?.entries.len())
    }

    /// Whether there are no live sessions.
    pub fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.len()? == 0)
    }
}

/// The bearer token and session of the browser making the request.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub token: BearerToken,
    pub session: Arc<Session>,
}

impl CurrentSession {
    /// Load the user into the session, see [Session::hydrate_user].
    ///
    /// The session is dropped from `state` when the finance API does not
    /// accept the token, so unknown tokens do not pile up.
    pub async fn hydrate_user(&self, state: &AppState) -> Result<(), Error> {
        let result = self.session.hydrate_user(state.api.as_ref(), &self.token).await;

        if let Err(Error::RequestRejected {
            status: status @ (401 | 403),
        }) = result
        {
            tracing::info!("the finance API rejected the token with status {status}");
            state.sessions.forget(&self.token)?;
        }

        result
    }
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Ok(token) = BearerToken::from_request_parts(parts, state).await;
        let session = state.sessions.get_or_create(&token)?;

        Ok(Self { token, session })
    }
}
