//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, html::error_view};

/// The errors that may occur in the application.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request to the finance API could not be sent or no response was
    /// received, e.g., the API server is down.
    ///
    /// Callers should pass in the original error as a string.
    #[error("could not reach the finance API: {0}")]
    Network(String),

    /// The finance API answered with a status code outside the success range.
    #[error("the finance API rejected the request with status {status}")]
    RequestRejected {
        /// The HTTP status code returned by the finance API.
        status: u16,
    },

    /// The finance API answered with a success status but the body could not
    /// be decoded.
    #[error("could not decode the finance API response: {0}")]
    InvalidResponse(String),

    /// The cached user was written to after the snapshot with the given
    /// version was taken.
    #[error("the cached user changed (expected version {expected}, found {found})")]
    StaleUser {
        /// The version the caller read.
        expected: u64,
        /// The version currently in the store.
        found: u64,
    },

    /// The categories were changed before the user was loaded from the
    /// finance API.
    #[error("no user has been loaded for this session")]
    UserNotLoaded,

    /// Could not acquire a session lock.
    #[error("could not acquire the session lock")]
    SessionLockError,

    /// The submitted form could not be converted into a draft.
    #[error("{0}")]
    InvalidFormInput(String),

    /// The configured finance API URL is not an HTTP(S) URL.
    #[error("invalid finance API URL \"{0}\", expected an http:// or https:// URL")]
    InvalidApiUrl(String),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Error::InvalidResponse(value.to_string())
        } else if let Some(status) = value.status() {
            Error::RequestRejected {
                status: status.as_u16(),
            }
        } else {
            Error::Network(value.to_string())
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Network(_) => (
                StatusCode::BAD_GATEWAY,
                error_view(
                    "Finance API Unavailable",
                    "502",
                    "Could not reach the finance API.",
                    "Check that the API server is running and try again.",
                ),
            )
                .into_response(),
            Error::RequestRejected { status } => (
                StatusCode::BAD_GATEWAY,
                error_view(
                    "Request Rejected",
                    "502",
                    &format!("The finance API answered with status {status}."),
                    "Try logging in again or check the API server logs.",
                ),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_view(
                        "Internal Server Error",
                        "500",
                        "Sorry, something went wrong.",
                        "Try again later or check the server logs",
                    ),
                )
                    .into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::Network(_) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Could not reach the finance API".to_owned(),
                    details: "Your changes have not been saved. Check your connection and submit \
                        the form again."
                        .to_owned(),
                },
            ),
            Error::RequestRejected { status } => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Your changes were not saved".to_owned(),
                    details: format!(
                        "The finance API rejected the request with status {status}. \
                        The form still holds your changes."
                    ),
                },
            ),
            Error::InvalidResponse(_) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Unexpected response".to_owned(),
                    details: "The finance API sent a response that could not be read. \
                        Refresh the page to see the latest data."
                        .to_owned(),
                },
            ),
            Error::UserNotLoaded => (
                StatusCode::CONFLICT,
                Alert::Error {
                    message: "Not logged in".to_owned(),
                    details: "Your account has not been loaded yet. Refresh the page and try again."
                        .to_owned(),
                },
            ),
            Error::InvalidFormInput(reason) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Error {
                    message: "Invalid form input".to_owned(),
                    details: reason,
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{
        Error,
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    #[tokio::test]
    async fn rejected_request_renders_alert_with_status() {
        let response = Error::RequestRejected { status: 401 }.into_alert_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let text = html.root_element().text().collect::<String>();
        assert!(
            text.contains("status 401"),
            "want alert to mention the status code, got {text:?}"
        );
    }

    #[tokio::test]
    async fn form_input_error_is_unprocessable() {
        let response = Error::InvalidFormInput("bad amount".to_owned()).into_alert_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn network_error_page_is_bad_gateway() {
        let response = Error::Network("connection refused".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
