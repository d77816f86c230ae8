//! HTTP API handlers.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};

use super::encoder::{json_response, payload};

/// Body of the welcome message.
pub const WELCOME_MESSAGE: &str = "Welcome from the Go service using Functions Framework!";

/// Something that turns a request into a response.
///
/// Implementations must not fail: whatever they cannot handle still has to
/// produce a response.
pub trait Endpoint: Send + Sync + 'static {
    /// Short name used in logs and metric labels.
    fn name(&self) -> &'static str;

    /// Produce the response for `request`.
    fn handle(&self, request: &Request<Body>) -> Response;
}

/// Welcome handler - always returns 200 with the welcome message.
#[derive(Debug, Clone, Copy, Default)]
pub struct Welcome;

impl Endpoint for Welcome {
    fn name(&self) -> &'static str {
        "welcome"
    }

    fn handle(&self, _request: &Request<Body>) -> Response {
        json_response(StatusCode::OK, &payload([("message", WELCOME_MESSAGE)]))
    }
}

/// Health check handler - always returns 200.
#[derive(Debug, Clone, Copy, Default)]
pub struct Health;

impl Endpoint for Health {
    fn name(&self) -> &'static str {
        "health"
    }

    fn handle(&self, _request: &Request<Body>) -> Response {
        json_response(StatusCode::OK, &payload([("status", "ok")]))
    }
}
