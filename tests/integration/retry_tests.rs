//! Retry, backoff and cancellation behaviour of the HTTP transport.

use std::time::{Duration, Instant};

use authzen_client::{ErrorKind, HttpOptions, RetryConfig};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{EVALUATION_PATH, TestPdp, view_readme};

#[tokio::test]
async fn test_retries_server_errors() {
    let pdp = TestPdp::start().await;
    pdp.respond_times(500, "boom", 1).await;
    pdp.respond_times(503, "unavailable", 1).await;
    pdp.respond(200, r#"{"decision": true}"#).await;

    let response = pdp.client().authorize(&view_readme()).await.unwrap();

    assert!(response.is_allowed());
    assert_eq!(pdp.requests().await.len(), 3);
}

#[tokio::test]
async fn test_retries_reuse_request_id_and_body() {
    let pdp = TestPdp::start().await;
    pdp.respond_times(502, "", 2).await;
    pdp.respond(200, r#"{"decision": false}"#).await;

    pdp.client().authorize(&view_readme()).await.unwrap();

    let requests = pdp.requests().await;
    assert_eq!(requests.len(), 3);
    let first_id = requests[0].headers.get("x-request-id").unwrap();
    for request in &requests {
        assert_eq!(request.headers.get("x-request-id").unwrap(), first_id);
        assert_eq!(request.body, requests[0].body);
    }
}

#[tokio::test]
async fn test_server_errors_exhaust_retries() {
    let pdp = TestPdp::start().await;
    pdp.respond(500, "still broken").await;

    let err = pdp.client().authorize(&view_readme()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.attempts(), Some(4));
    assert_eq!(pdp.requests().await.len(), 4);
}

#[tokio::test]
async fn test_retries_disabled() {
    let pdp = TestPdp::start().await;
    pdp.respond(503, "").await;

    let client = pdp.builder().retry_config(RetryConfig::disabled()).build().unwrap();
    let err = client.authorize(&view_readme()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.attempts(), Some(1));
    assert_eq!(pdp.requests().await.len(), 1);
}

#[tokio::test]
async fn test_request_timeout_is_per_attempt() {
    let pdp = TestPdp::start().await;
    Mock::given(method("POST"))
        .and(path(EVALUATION_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"decision": true}"#)
                .set_delay(Duration::from_secs(5)),
        )
        .up_to_n_times(1)
        .mount(&pdp.server)
        .await;
    pdp.respond(200, r#"{"decision": true}"#).await;

    let client = pdp
        .builder()
        .http_options(HttpOptions::builder().request_timeout(Duration::from_millis(200)).build())
        .build()
        .unwrap();

    let response = client.authorize(&view_readme()).await.unwrap();

    assert!(response.is_allowed());
    assert_eq!(pdp.requests().await.len(), 2);
}

#[tokio::test]
async fn test_cancel_during_backoff() {
    let pdp = TestPdp::start().await;
    pdp.respond(500, "").await;

    let client = pdp
        .builder()
        .retry_config(
            RetryConfig::new()
                .with_base_delay(Duration::from_secs(60))
                .with_max_delay(Duration::from_secs(60)),
        )
        .build()
        .unwrap();

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let err = client.authorize_with_cancellation(&view_readme(), &cancel).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert!(started.elapsed() < Duration::from_secs(30));
}

#[tokio::test]
async fn test_pre_cancelled_call_sends_nothing() {
    let pdp = TestPdp::start().await;
    pdp.respond(200, r#"{"decision": true}"#).await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = pdp.client().authorize_with_cancellation(&view_readme(), &cancel).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert!(pdp.requests().await.is_empty());
}
