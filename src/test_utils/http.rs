use axum::{
    body::Body,
    http::{StatusCode, header::CONTENT_TYPE},
    response::Response,
};

#[track_caller]
pub(crate) fn assert_status_ok(response: &Response<Body>) {
    assert_eq!(
        response.status(),
        StatusCode::OK,
        "expected a rendered panel, got {}",
        response.status()
    );
}

#[track_caller]
pub(crate) fn assert_content_type(response: &Response<Body>, content_type: &str) {
    let header = response
        .headers()
        .get(CONTENT_TYPE)
        .expect("content-type header missing");
    assert_eq!(header, content_type);
}
