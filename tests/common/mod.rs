#![allow(dead_code)]

use axum::extract::ConnectInfo;
use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use temp_links::domain::clock::ManualClock;
use temp_links::infrastructure::persistence::MemoryLinkRepository;
use temp_links::routes::router;
use temp_links::state::AppState;
use tower::Layer;

pub const BASE_URL: &str = "https://tmp.example.com";

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

/// State over an empty store, driven by a manual clock set to [`start_time`].
pub fn create_test_state() -> (AppState, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start_time()));
    let repository = Arc::new(MemoryLinkRepository::new());
    let state = AppState::new(repository, clock.clone(), format!("{BASE_URL}/"));
    (state, clock)
}

pub fn create_test_server() -> (TestServer, Arc<ManualClock>) {
    let (state, clock) = create_test_state();
    (TestServer::new(router(state)).unwrap(), clock)
}

/// Creates a link through the API and returns its JSON representation.
pub async fn create_link(server: &TestServer, url: &str, mode: &str) -> Value {
    let response = server
        .post("/api/links")
        .json(&json!({ "destinationUrl": url, "expirationMode": mode }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

pub fn short_id(link: &Value) -> String {
    link["shortId"].as_str().unwrap().to_string()
}

/// Inserts a fixed peer address so that peer-keyed rate limiting can run
/// without a real socket.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
