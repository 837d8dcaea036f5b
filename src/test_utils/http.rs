use axum::{body::Body, http::StatusCode, response::Response};

#[track_caller]
pub(crate) fn assert_status_ok(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::OK);
}

/// Check that htmx is told to load `endpoint` after the request.
#[track_caller]
pub(crate) fn assert_hx_redirect(response: &Response<Body>, endpoint: &str) {
    let got = response
        .headers()
        .get("hx-redirect")
        .map(|value| value.to_str().expect("hx-redirect is not valid text"));

    assert_eq!(got, Some(endpoint));
}
