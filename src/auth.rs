//! Reads the bearer credential the finance API issued to the browser.
//!
//! The credential is stored by the log-in flow of the finance API in the
//! `token` cookie. This client never validates it: it is forwarded verbatim to
//! the finance API, which decides whether the request is authorized.

use std::{convert::Infallible, fmt::Debug};

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

/// The name of the cookie holding the bearer credential.
pub const COOKIE_TOKEN: &str = "token";

/// The bearer credential of the current browser session.
///
/// A request without the `token` cookie gets an empty credential and the
/// request to the finance API proceeds anyway.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw credential.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Whether the browser sent no credential.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// The token is a credential, keep it out of the logs.
impl Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "BearerToken(<empty>)")
        } else {
            write!(f, "BearerToken(********)")
        }
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        match jar.get(COOKIE_TOKEN) {
            Some(cookie) => Ok(BearerToken::new(cookie.value())),
            None => {
                tracing::warn!(
                    "request to {} has no {COOKIE_TOKEN} cookie, continuing with an empty credential",
                    parts.uri
                );
                Ok(BearerToken::default())
            }
        }
    }
}
