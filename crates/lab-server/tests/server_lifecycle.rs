//! Lifecycle tests against a real listening socket.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use lab_server::{AppState, Config, Server, ServerError, ServerState};
use tokio::sync::Notify;

fn local_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..Config::default()
    }
}

async fn start(config: Config) -> lab_server::ServerHandle {
    let app = lab_server::create_app(AppState::new(config.clone()));
    Server::bind(&config, app).await.unwrap().spawn()
}

#[tokio::test]
async fn test_serves_over_tcp() {
    let handle = start(local_config()).await;
    assert_eq!(handle.state(), ServerState::Listening);

    let url = format!("http://{}/health", handle.local_addr());
    let response = reqwest::get(&url).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.headers()["x-frame-options"], "DENY");

    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["status"], "healthy");

    handle.close().await.unwrap();
}

#[tokio::test]
async fn test_close_stops_server_and_releases_socket() {
    let handle = start(local_config()).await;
    let addr = handle.local_addr();
    let mut state = handle.subscribe();

    handle.close().await.unwrap();

    assert_eq!(*state.borrow_and_update(), ServerState::Stopped);
    assert!(
        tokio::net::TcpStream::connect(addr).await.is_err(),
        "listener still accepting after close"
    );
}

#[tokio::test]
async fn test_in_flight_request_completes_during_shutdown() {
    let entered = Arc::new(Notify::new());
    let app = {
        let entered = Arc::clone(&entered);
        Router::new().route(
            "/slow",
            get(move || {
                let entered = Arc::clone(&entered);
                async move {
                    entered.notify_one();
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    "done"
                }
            }),
        )
    };

    let config = local_config();
    let handle = Server::bind(&config, app).await.unwrap().spawn();
    let url = format!("http://{}/slow", handle.local_addr());

    let request = tokio::spawn(async move {
        let response = reqwest::get(&url).await.unwrap();
        (response.status(), response.text().await.unwrap())
    });

    entered.notified().await;
    let mut state = handle.subscribe();
    let closing = tokio::spawn(handle.close());

    state
        .wait_for(|s| *s == ServerState::Closing || *s == ServerState::Stopped)
        .await
        .unwrap();

    let (status, body) = request.await.unwrap();
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body, "done");

    closing.await.unwrap().unwrap();
    assert_eq!(*state.borrow(), ServerState::Stopped);
}

#[tokio::test]
async fn test_shutdown_timeout_bounds_the_drain() {
    let entered = Arc::new(Notify::new());
    let app = {
        let entered = Arc::clone(&entered);
        Router::new().route(
            "/stuck",
            get(move || {
                let entered = Arc::clone(&entered);
                async move {
                    entered.notify_one();
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    "late"
                }
            }),
        )
    };

    let config = Config {
        shutdown_timeout: Some(Duration::from_millis(100)),
        ..local_config()
    };
    let handle = Server::bind(&config, app).await.unwrap().spawn();
    let url = format!("http://{}/stuck", handle.local_addr());
    tokio::spawn(async move {
        let _ = reqwest::get(&url).await;
    });

    entered.notified().await;
    let closed = tokio::time::timeout(Duration::from_secs(5), handle.close()).await;
    assert!(matches!(closed, Ok(Ok(()))));
}

#[tokio::test]
async fn test_bind_failure_is_reported() {
    let first = start(local_config()).await;

    let taken = Config {
        port: first.local_addr().port(),
        ..local_config()
    };
    let app = lab_server::create_app(AppState::new(taken.clone()));
    let err = Server::bind(&taken, app).await.err().unwrap();
    assert!(matches!(err, ServerError::Bind { .. }));

    first.close().await.unwrap();
}

#[tokio::test]
async fn test_counter_survives_across_connections() {
    let handle = start(local_config()).await;
    let client = reqwest::Client::new();
    let base = format!("http://{}", handle.local_addr());

    for path in ["/", "/info", "/missing"] {
        client.get(format!("{base}{path}")).send().await.unwrap();
    }
    let json: serde_json::Value = client
        .post(format!("{base}/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["requests_served"], 4);

    handle.close().await.unwrap();
}
