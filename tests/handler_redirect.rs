mod common;

use axum::http::StatusCode;
use chrono::TimeDelta;
use serde_json::Value;

#[tokio::test]
async fn test_redirect_success() {
    let (server, _clock) = common::create_test_server();
    let link = common::create_link(&server, "https://example.com/target", "1-hour").await;
    let short_id = common::short_id(&link);

    let response = server.get(&format!("/t/{short_id}")).await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/target");

    let body = server
        .get(&format!("/api/links/{short_id}"))
        .await
        .json::<Value>();
    assert_eq!(body["clickCount"], 1);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (server, _clock) = common::create_test_server();

    let response = server.get("/t/nonexistent00").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_single_click_link_is_consumed() {
    let (server, _clock) = common::create_test_server();
    let link = common::create_link(&server, "https://example.com", "1-click").await;
    let short_id = common::short_id(&link);

    server
        .get(&format!("/t/{short_id}"))
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);

    let response = server.get(&format!("/t/{short_id}")).await;
    response.assert_status(StatusCode::GONE);
    assert_eq!(response.json::<Value>()["error"]["code"], "link_expired");

    let body = server
        .get(&format!("/api/links/{short_id}"))
        .await
        .json::<Value>();
    assert_eq!(body["clickCount"], 1);
    assert_eq!(body["isExpired"], true);
}

#[tokio::test]
async fn test_timed_link_expires() {
    let (server, clock) = common::create_test_server();
    let link = common::create_link(&server, "https://example.com", "1-hour").await;
    let short_id = common::short_id(&link);

    clock.advance(TimeDelta::minutes(30));
    server
        .get(&format!("/t/{short_id}"))
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);

    clock.advance(TimeDelta::minutes(31));
    server
        .get(&format!("/t/{short_id}"))
        .await
        .assert_status(StatusCode::GONE);

    let body = server
        .get(&format!("/api/links/{short_id}"))
        .await
        .json::<Value>();
    assert_eq!(body["clickCount"], 1);
    assert_eq!(body["isExpired"], true);
}

#[tokio::test]
async fn test_timed_link_allows_repeated_visits() {
    let (server, _clock) = common::create_test_server();
    let link = common::create_link(&server, "https://example.com", "24-hours").await;
    let short_id = common::short_id(&link);

    for _ in 0..3 {
        server
            .get(&format!("/t/{short_id}"))
            .await
            .assert_status(StatusCode::TEMPORARY_REDIRECT);
    }

    let body = server
        .get(&format!("/api/links/{short_id}"))
        .await
        .json::<Value>();
    assert_eq!(body["clickCount"], 3);
    assert_eq!(body["isExpired"], false);
}
