mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use temp_links::api::middleware::rate_limit;
use temp_links::routes::router;

#[tokio::test]
async fn test_rate_limit_rejects_burst_overflow() {
    let (state, _clock) = common::create_test_state();
    let app = router(state)
        .layer(rate_limit::layer(1, 2).unwrap())
        .layer(common::MockConnectInfoLayer);
    let server = TestServer::new(app).unwrap();

    server.get("/health").await.assert_status_ok();
    server.get("/health").await.assert_status_ok();
    server
        .get("/health")
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_proxy_rate_limit_keys_on_forwarded_ip() {
    let (state, _clock) = common::create_test_state();
    let app = router(state)
        .layer(rate_limit::proxy_layer(1, 1).unwrap())
        .layer(common::MockConnectInfoLayer);
    let server = TestServer::new(app).unwrap();

    server
        .get("/health")
        .add_header("x-forwarded-for", "203.0.113.1")
        .await
        .assert_status_ok();
    server
        .get("/health")
        .add_header("x-forwarded-for", "203.0.113.2")
        .await
        .assert_status_ok();
    server
        .get("/health")
        .add_header("x-forwarded-for", "203.0.113.1")
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}
