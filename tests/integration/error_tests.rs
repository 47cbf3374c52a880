//! Error classification as seen by callers.

use std::error::Error as _;

use authzen_client::{AuthzClient, ErrorKind, RetryConfig};
use test_case::test_case;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{EVALUATION_PATH, TestPdp, view_readme};

#[test_case(400, "bad request" ; "bad request")]
#[test_case(401, "missing credentials" ; "unauthorized")]
#[test_case(403, "Forbidden" ; "forbidden")]
#[test_case(404, "" ; "not found")]
#[test_case(429, "slow down" ; "too many requests")]
#[tokio::test]
async fn test_client_errors_are_not_retried(status: u16, body: &str) {
    let pdp = TestPdp::start().await;
    pdp.respond(status, body).await;

    let err = pdp.client().authorize(&view_readme()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ClientFailure);
    assert_eq!(err.status(), Some(status));
    assert_eq!(err.body(), Some(body));
    assert_eq!(err.attempts(), Some(1));
    assert!(err.to_string().starts_with(&format!("HTTP request failed with status {status}")));
    assert_eq!(pdp.requests().await.len(), 1);
}

#[tokio::test]
async fn test_forbidden_message() {
    let pdp = TestPdp::start().await;
    pdp.respond(403, "Forbidden").await;

    let err = pdp.client().authorize(&view_readme()).await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP request failed with status 403: Forbidden");
    assert!(err.request_id().is_some());
}

#[tokio::test]
async fn test_unexpected_status() {
    let pdp = TestPdp::start().await;
    pdp.respond(304, "").await;

    let err = pdp.client().authorize(&view_readme()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ClientFailure);
    assert_eq!(err.status(), Some(304));
    assert!(err.to_string().starts_with("unexpected HTTP status 304"));
    assert_eq!(pdp.requests().await.len(), 1);
}

#[tokio::test]
async fn test_redirect_is_a_failure_not_a_decision() {
    let pdp = TestPdp::start().await;
    Mock::given(method("POST"))
        .and(path(EVALUATION_PATH))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/elsewhere"))
        .mount(&pdp.server)
        .await;
    Mock::given(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"decision": true}"#))
        .mount(&pdp.server)
        .await;

    let client = pdp.builder().api_key("secret").build().unwrap();
    let err = client.authorize(&view_readme()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ClientFailure);
    assert_eq!(err.status(), Some(302));
    assert!(err.to_string().starts_with("unexpected HTTP status 302"));
    assert_eq!(pdp.requests().await.len(), 1);
}

#[tokio::test]
async fn test_empty_body() {
    let pdp = TestPdp::start().await;
    pdp.respond(200, "").await;

    let err = pdp.client().authorize(&view_readme()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    assert_eq!(err.message(), "response body was empty");
}

#[test_case("not json" ; "not json")]
#[test_case(r#"{"context": {}}"# ; "missing decision")]
#[test_case(r#"{"decision": "yes"}"# ; "decision not a boolean")]
#[tokio::test]
async fn test_malformed_body(body: &str) {
    let pdp = TestPdp::start().await;
    pdp.respond(200, body).await;

    let err = pdp.client().authorize(&view_readme()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    assert_eq!(err.message(), "failed to decode authorization response");
    assert!(err.source().is_some());
}

#[tokio::test]
async fn test_connection_refused_exhausts_retries() {
    // Bind then drop a listener so the port is closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = AuthzClient::builder()
        .endpoint(format!("http://127.0.0.1:{port}/access/v1/evaluation"))
        .retry_config(crate::common::fast_retries().with_max_retries(2))
        .build()
        .unwrap();

    let err = client.authorize(&view_readme()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.attempts(), Some(3));
    assert!(err.status().is_none());
    assert!(err.source().is_some());
}

#[tokio::test]
async fn test_invalid_configuration() {
    let err = AuthzClient::builder()
        .endpoint("://missing-scheme")
        .retry_config(RetryConfig::disabled())
        .build()
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(err.message(), "endpoint must be a valid URL");
}
