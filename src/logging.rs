//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{AUTHORIZATION, COOKIE},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::Cookie;

use crate::auth::COOKIE_TOKEN;

/// The number of characters of a request or response body logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

const REDACTED: &str = "********";

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the body is longer than [LOG_BODY_LENGTH_LIMIT] characters, it is
/// truncated and the full body is logged at the `debug` level.
/// The bearer token is never logged.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_text = match read_body(body).await {
        Ok(text) => text,
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    log_message(
        &format!(
            "Received request: {} {}\nheaders: {:#?}",
            parts.method,
            parts.uri,
            redact_headers(&parts.headers)
        ),
        &body_text,
    );

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_text = match read_body(body).await {
        Ok(text) => text,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    log_message(
        &format!(
            "Sending response: {}\nheaders: {:#?}",
            parts.status, parts.headers
        ),
        &body_text,
    );

    Response::from_parts(parts, body_text.into())
}

async fn read_body(body: Body) -> Result<String, axum::Error> {
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await?;

    Ok(String::from_utf8_lossy(&body_bytes).to_string())
}

/// Copy `headers` with the `Authorization` header and the token cookie masked.
fn redact_headers(headers: &HeaderMap) -> HeaderMap {
    let mut redacted = headers.clone();

    if redacted.contains_key(AUTHORIZATION) {
        redacted.insert(AUTHORIZATION, HeaderValue::from_static(REDACTED));
    }

    let cookies = redacted
        .get_all(COOKIE)
        .iter()
        .map(|value| redact_token_cookie(&String::from_utf8_lossy(value.as_bytes())))
        .collect::<Vec<_>>();
    redacted.remove(COOKIE);

    for cookie in cookies {
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            redacted.append(COOKIE, value);
        }
    }

    redacted
}

fn redact_token_cookie(cookie_header: &str) -> String {
    Cookie::split_parse(cookie_header)
        .filter_map(|cookie| {
            cookie
                .inspect_err(|error| tracing::debug!("Not logging malformed cookie: {error}"))
                .ok()
        })
        .map(|mut cookie| {
            if cookie.name() == COOKIE_TOKEN {
                cookie.set_value(REDACTED);
            }

            cookie.to_string()
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn log_message(message: &str, body: &str) {
    match body.char_indices().nth(LOG_BODY_LENGTH_LIMIT) {
        Some((cutoff, _)) => {
            tracing::info!("{message}\nbody: {}...", &body[..cutoff]);
            tracing::debug!("Full body: {body:?}");
        }
        None => tracing::info!("{message}\nbody: {body:?}"),
    }
}
