//! The cache of the authenticated user and their categories.
//!
//! The store is read and written as a whole, but every write bumps a version
//! number so that callers holding an old snapshot can detect that their copy
//! is stale instead of silently overwriting newer data.

use std::sync::{Mutex, MutexGuard};

use crate::{
    Error,
    category::Category,
    user::{SetUserPayload, User},
};

/// A copy of the store's contents at a given version.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSnapshot {
    /// Whether a user has been loaded.
    pub is_authenticated: bool,
    /// The cached user, if any.
    pub user: Option<User>,
    /// Incremented by every write to the store.
    pub version: u64,
}

#[derive(Debug, Default)]
struct AuthState {
    is_authenticated: bool,
    user: Option<User>,
    version: u64,
}

/// Holds the authenticated user for one session.
#[derive(Debug, Default)]
pub struct UserStore {
    state: Mutex<AuthState>,
}

impl UserStore {
    /// Create an empty, logged out store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, AuthState>, Error> {
        self.state
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire the user store lock: {error}"))
            .map_err(|_| Error::SessionLockError)
    }

    /// Copy the current contents of the store.
    pub fn snapshot(&self) -> Result<UserSnapshot, Error> {
        let state = self.lock()?;

        Ok(UserSnapshot {
            is_authenticated: state.is_authenticated,
            user: state.user.clone(),
            version: state.version,
        })
    }

    /// The categories of the cached user, empty if no user is loaded.
    pub fn categories(&self) -> Result<Vec<Category>, Error> {
        let state = self.lock()?;

        Ok(state
            .user
            .as_ref()
            .map(|user| user.categories.clone())
            .unwrap_or_default())
    }

    /// Replace the cached user and mark the session as authenticated.
    ///
    /// Returns the new version.
    pub fn set_user(&self, payload: impl Into<SetUserPayload>) -> Result<u64, Error> {
        let payload: SetUserPayload = payload.into();
        let mut state = self.lock()?;

        state.user = Some(payload.into_user());
        state.is_authenticated = true;
        state.version += 1;

        Ok(state.version)
    }

    /// Forget the cached user.
    pub fn log_out(&self) -> Result<u64, Error> {
        let mut state = self.lock()?;

        state.user = None;
        state.is_authenticated = false;
        state.version += 1;

        Ok(state.version)
    }

    /// Replace the cached user only if the store is still at `expected_version`.
    ///
    /// # Errors
    ///
    /// Returns [Error::StaleUser] if the store was written to after the
    /// caller's snapshot was taken. The store is left unchanged.
    pub fn replace_user(&self, expected_version: u64, user: User) -> Result<u64, Error> {
        let mut state = self.lock()?;

        if state.version != expected_version {
            return Err(Error::StaleUser {
                expected: expected_version,
                found: state.version,
            });
        }

        state.user = Some(user);
        state.is_authenticated = true;
        state.version += 1;

        Ok(state.version)
    }

    /// Apply `update` to the categories of the current user and republish it.
    ///
    /// `update` runs while the store is locked, so it always sees the latest
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns [Error::UserNotLoaded] if there is no cached user.
    pub fn update_categories<F>(&self, update: F) -> Result<u64, Error>
    where
        F: FnOnce(&mut Vec<Category>),
    {
        let mut state = self.lock()?;

        let user = state.user.as_mut().ok_or(Error::UserNotLoaded)?;
        update(&mut user.categories);
        state.version += 1;

        Ok(state.version)
    }
}
