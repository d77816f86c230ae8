//! HTTP API route definitions.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::dispatcher::Dispatcher;
use super::handlers::{Endpoint, Health, Welcome};
use crate::error::{Result, ServiceError};

/// Immutable exact-match table from path to endpoint.
#[derive(Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, Arc<dyn Endpoint>>,
}

impl RouteTable {
    /// Start an empty table.
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// The service's two routes: `/` and `/health`.
    pub fn standard() -> Self {
        let mut routes: HashMap<String, Arc<dyn Endpoint>> = HashMap::with_capacity(2);
        routes.insert("/".to_string(), Arc::new(Welcome));
        routes.insert("/health".to_string(), Arc::new(Health));
        Self { routes }
    }

    /// Exact-match lookup; no prefix, wildcard or trailing-slash handling.
    pub fn lookup(&self, path: &str) -> Option<&Arc<dyn Endpoint>> {
        self.routes.get(path)
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no route is registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Registered paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for path in self.paths() {
            if let Some(endpoint) = self.routes.get(path) {
                map.entry(&path, &endpoint.name());
            }
        }
        map.finish()
    }
}

/// Collects routes and rejects repeated paths.
#[derive(Default)]
pub struct RouteTableBuilder {
    routes: HashMap<String, Arc<dyn Endpoint>>,
}

impl RouteTableBuilder {
    /// Register `endpoint` at `path`.
    pub fn route(mut self, path: impl Into<String>, endpoint: impl Endpoint) -> Result<Self> {
        let path = path.into();
        if self.routes.contains_key(&path) {
            return Err(ServiceError::DuplicateRoute(path));
        }
        self.routes.insert(path, Arc::new(endpoint));
        Ok(self)
    }

    /// Freeze the table.
    pub fn build(self) -> RouteTable {
        RouteTable {
            routes: self.routes,
        }
    }
}

/// Create the API router.
///
/// Every request falls through to the dispatcher, which owns path matching.
/// No `.route(..)` calls: the [`RouteTable`] is the only matcher, not axum's.
pub fn create_router(table: RouteTable) -> Router {
    Router::new()
        .fallback(super::dispatcher::dispatch)
        .with_state(Dispatcher::new(table))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    async fn send(
        method: Method,
        uri: &str,
        body: &'static str,
    ) -> (StatusCode, Option<String>, String) {
        let app = create_router(RouteTable::standard());
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn standard_table_has_two_routes() {
        let table = RouteTable::standard();
        assert_eq!(table.paths(), vec!["/", "/health"]);
        assert_eq!(table.lookup("/").unwrap().name(), "welcome");
        assert_eq!(table.lookup("/health").unwrap().name(), "health");
    }

    #[test]
    fn lookup_is_exact() {
        let table = RouteTable::standard();
        assert!(table.lookup("/health/").is_none());
        assert!(table.lookup("/HEALTH").is_none());
        assert!(table.lookup("").is_none());
    }

    #[test]
    fn builder_rejects_duplicate_paths() {
        let result = RouteTable::builder()
            .route("/", Welcome)
            .and_then(|b| b.route("/", Health));
        assert!(matches!(result, Err(ServiceError::DuplicateRoute(p)) if p == "/"));
    }

    #[test]
    fn builder_builds_custom_table() {
        let table = RouteTable::builder()
            .route("/ping", Health)
            .unwrap()
            .build();
        assert_eq!(table.len(), 1);
        assert!(table.lookup("/").is_none());
    }

    #[tokio::test]
    async fn get_root_returns_welcome() {
        let (status, content_type, body) = send(Method::GET, "/", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(
            body,
            r#"{"message":"Welcome from the Go service using Functions Framework!"}"#
        );
    }

    #[tokio::test]
    async fn post_health_returns_ok() {
        let (status, content_type, body) = send(Method::POST, "/health", "arbitrary").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body, r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn query_string_does_not_affect_matching() {
        let (status, _, body) = send(Method::GET, "/health?verbose=1", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn unknown_path_returns_404() {
        let (status, _, body) = send(Method::GET, "/missing", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }
}
