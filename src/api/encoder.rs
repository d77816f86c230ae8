//! JSON response encoding.

use std::collections::BTreeMap;

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use tracing::error;

/// Content type written on every encoded response.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// String-keyed, string-valued response body. Ordered so output is stable.
pub type Payload = BTreeMap<String, String>;

/// Build a payload from literal pairs.
pub fn payload<const N: usize>(pairs: [(&str, &str); N]) -> Payload {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Serialize a payload into a compact JSON object.
///
/// A string map always serializes; the `Result` is serde_json's signature
/// passed through. [`json_response`] turns the impossible error into a 500.
pub fn encode(payload: &Payload) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(payload)
}

/// Write status, then content type, then body.
pub fn json_response(status: StatusCode, payload: &Payload) -> Response {
    let bytes = match encode(payload) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = %e, "failed to encode response payload");
            return empty_response(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(JSON_CONTENT_TYPE),
    );
    *response.body_mut() = Body::from(bytes);
    response
}

/// Response with a status and no body.
pub fn empty_response(status: StatusCode) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}
