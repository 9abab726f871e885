//! Settings for connecting to the finance API.

use reqwest::Url;

use crate::Error;

/// Where the finance API lives.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    api_url: Url,
}

impl ClientConfig {
    /// Create a config for the finance API at `api_url`.
    ///
    /// A trailing slash is removed so that endpoint paths can be appended as-is.
    ///
    /// # Errors
    /// Returns [Error::InvalidApiUrl] if `api_url` is not an `http://` or
    /// `https://` URL with a host.
    pub fn new(api_url: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidApiUrl(api_url.to_owned());

        let mut url = Url::parse(api_url.trim()).map_err(|error| {
            tracing::debug!("could not parse API URL {api_url:?}: {error}");
            invalid()
        })?;

        let has_host = url.host_str().is_some_and(|host| !host.is_empty());
        if !matches!(url.scheme(), "http" | "https") || !has_host || url.cannot_be_a_base() {
            return Err(invalid());
        }

        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
        }

        Ok(Self { api_url: url })
    }

    /// The base URL of the finance API without a trailing slash.
    pub fn api_url(&self) -> &str {
        self.api_url.as_str().trim_end_matches('/')
    }

    /// The URL of the endpoint made of `segments`, each percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();

        // Only URLs that cannot be a base have no path segments, and those are rejected in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        url
    }
}
