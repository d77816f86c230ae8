//! Per-request dispatch over the route table.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::Response,
};
use tracing::debug;

use super::encoder::empty_response;
use super::routes::RouteTable;
use crate::metrics;

/// Label used for requests that matched no route.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Looks up the endpoint for a request path and runs it.
///
/// Holds nothing but the shared, read-only route table, so dispatches never
/// observe each other.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    table: Arc<RouteTable>,
}

impl Dispatcher {
    /// Create a dispatcher over `table`.
    pub fn new(table: RouteTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// The table this dispatcher consults.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Answer a single request.
    pub fn dispatch(&self, request: &Request<Body>) -> Response {
        let start = Instant::now();
        let path = request.uri().path();

        let (route, response) = match self.table.lookup(path) {
            Some(endpoint) => (endpoint.name(), endpoint.handle(request)),
            None => (UNMATCHED_ROUTE, empty_response(StatusCode::NOT_FOUND)),
        };

        debug!(
            method = %request.method(),
            path,
            route,
            status = response.status().as_u16(),
            "dispatched request"
        );
        metrics::record_request(route, response.status(), start);

        response
    }
}

/// Axum fallback that hands every request to the dispatcher.
pub async fn dispatch(State(dispatcher): State<Dispatcher>, request: Request<Body>) -> Response {
    dispatcher.dispatch(&request)
}
