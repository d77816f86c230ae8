//! End-to-end tests against a real listener.
//!
//! Each test binds an ephemeral port on loopback, so they can run in parallel.

use std::net::TcpListener as StdListener;

use pretty_assertions::assert_eq;
use tokio::sync::oneshot;
use tokio_test::{assert_err, assert_ok};
use welcome_service::api::RouteTable;
use welcome_service::config::Config;
use welcome_service::server::Server;
use welcome_service::ServiceError;

fn loopback_config(port: u16) -> Config {
    Config {
        port: port.to_string(),
        bind_host: "127.0.0.1".to_string(),
        ..Config::default()
    }
}

type ServerTask = tokio::task::JoinHandle<welcome_service::Result<()>>;

/// Start the service on an ephemeral port, returning its base URL and a stop handle.
async fn spawn_service() -> (String, oneshot::Sender<()>, ServerTask) {
    let server = Server::bind(&loopback_config(0), RouteTable::standard())
        .await
        .expect("bind ephemeral port");
    let base = format!("http://{}", server.local_addr());

    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.run(async {
        let _ = rx.await;
    }));

    (base, tx, handle)
}

#[tokio::test]
async fn serves_welcome_health_and_404() {
    let (base, stop, handle) = spawn_service().await;
    let client = reqwest::Client::new();

    let welcome = client.get(format!("{}/", base)).send().await.unwrap();
    assert_eq!(welcome.status().as_u16(), 200);
    assert_eq!(
        welcome.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    assert_eq!(
        welcome.text().await.unwrap(),
        r#"{"message":"Welcome from the Go service using Functions Framework!"}"#
    );

    let health = client
        .post(format!("{}/health", base))
        .body("arbitrary body")
        .send()
        .await
        .unwrap();
    assert_eq!(health.status().as_u16(), 200);
    assert_eq!(
        health.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    let body: serde_json::Value = health.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "status": "ok" }));

    let missing = client.get(format!("{}/missing", base)).send().await.unwrap();
    assert_eq!(missing.status().as_u16(), 404);

    stop.send(()).unwrap();
    assert_ok!(handle.await.unwrap());
}

#[tokio::test]
async fn repeated_requests_are_byte_identical() {
    let (base, stop, handle) = spawn_service().await;
    let client = reqwest::Client::new();

    let mut bodies = Vec::new();
    for method in [reqwest::Method::GET, reqwest::Method::PUT, reqwest::Method::DELETE] {
        let response = client
            .request(method, format!("{}/", base))
            .body("ignored")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
        bodies.push(response.bytes().await.unwrap());
    }
    assert!(bodies.windows(2).all(|w| w[0] == w[1]));

    stop.send(()).unwrap();
    assert_ok!(handle.await.unwrap());
}

#[tokio::test]
async fn occupied_port_is_a_startup_failure() {
    let occupied = StdListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();

    let result = Server::bind(&loopback_config(port), RouteTable::standard()).await;
    let err = assert_err!(result);
    assert!(err.is_startup());
    assert!(matches!(err, ServiceError::Startup { addr, .. } if addr.port() == port));
}

#[tokio::test]
async fn invalid_port_fails_before_binding() {
    let mut config = loopback_config(0);
    config.port = "99999".to_string();

    let err = assert_err!(Server::bind(&config, RouteTable::standard()).await);
    assert!(matches!(err, ServiceError::InvalidPort(_)));
}
