//! End-to-end evaluation tests: request encoding, decisions, headers and
//! context providers.

use authzen_client::testing::AuthorizationClient;
use authzen_client::{
    Action, AuthorizationRequest, Context, ContextValue, Resource, StaticContextProvider, Subject,
    TimestampContextProvider,
};
use serde_json::json;

use crate::common::{TestPdp, view_readme};

#[tokio::test]
async fn test_allow_decision() {
    let pdp = TestPdp::start().await;
    pdp.respond(200, r#"{"decision": true}"#).await;

    let response = pdp.client().authorize(&view_readme()).await.unwrap();

    assert!(response.is_allowed());
    assert!(response.context().is_none());
}

#[tokio::test]
async fn test_deny_decision_is_not_an_error() {
    let pdp = TestPdp::start().await;
    pdp.respond(200, r#"{"decision": false, "context": {"reason_admin": {"en": "not an owner"}}}"#)
        .await;

    let response = pdp.client().authorize(&view_readme()).await.unwrap();

    assert!(response.is_denied());
    let reason = response.context().and_then(|c| c.get("reason_admin")).unwrap();
    assert_eq!(reason.as_object().and_then(|o| o.get("en")).and_then(ContextValue::as_str), Some(
        "not an owner"
    ));
}

#[tokio::test]
async fn test_explicit_empty_response_context() {
    let pdp = TestPdp::start().await;
    pdp.respond(200, r#"{"decision": true, "context": {}}"#).await;

    let response = pdp.client().authorize(&view_readme()).await.unwrap();

    assert!(response.context().is_some_and(Context::is_empty));
}

#[tokio::test]
async fn test_request_document() {
    let pdp = TestPdp::start().await;
    pdp.respond(200, r#"{"decision": true}"#).await;

    let request = AuthorizationRequest::new(
        Subject::builder()
            .entity_type("user")
            .id("alice@acmecorp.com")
            .property("department", "sales")
            .build()
            .unwrap(),
        Resource::builder()
            .entity_type("account")
            .id("123")
            .property("owner", "alice@acmecorp.com")
            .build()
            .unwrap(),
        Action::new("can_read").unwrap(),
    )
    .with_context(Context::new().with("time", "1985-10-26T01:22-07:00"));

    pdp.client().authorize(&request).await.unwrap();

    assert_eq!(
        pdp.request_json(0).await.unwrap(),
        json!({
            "subject": {
                "type": "user",
                "id": "alice@acmecorp.com",
                "properties": {"department": "sales"}
            },
            "resource": {
                "type": "account",
                "id": "123",
                "properties": {"owner": "alice@acmecorp.com"}
            },
            "action": {"name": "can_read"},
            "context": {"time": "1985-10-26T01:22-07:00"}
        })
    );
}

#[tokio::test]
async fn test_empty_context_is_omitted() {
    let pdp = TestPdp::start().await;
    pdp.respond(200, r#"{"decision": true}"#).await;

    let request = view_readme().with_context(Context::new());
    pdp.client().authorize(&request).await.unwrap();

    let body = pdp.request_json(0).await.unwrap();
    assert!(body.get("context").is_none());
    assert!(body["subject"].get("properties").is_none());
}

#[tokio::test]
async fn test_provider_context_overrides_request_context() {
    let pdp = TestPdp::start().await;
    pdp.respond(200, r#"{"decision": true}"#).await;

    let client = pdp
        .builder()
        .context_provider(StaticContextProvider::new(
            Context::new().with("ip", "10.0.0.1").with("tenant", "acme"),
        ))
        .build()
        .unwrap();

    let request = view_readme().with_context(Context::new().with("ip", "192.168.1.1").with("mfa", true));
    client.authorize(&request).await.unwrap();

    assert_eq!(
        pdp.request_json(0).await.unwrap()["context"],
        json!({"ip": "10.0.0.1", "tenant": "acme", "mfa": true})
    );
}

#[tokio::test]
async fn test_timestamp_provider() {
    let pdp = TestPdp::start().await;
    pdp.respond(200, r#"{"decision": true}"#).await;

    let client = pdp.builder().context_provider(TimestampContextProvider::new()).build().unwrap();
    client.authorize(&view_readme()).await.unwrap();

    let body = pdp.request_json(0).await.unwrap();
    let timestamp = body["context"]["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_bearer_authorization_header() {
    let pdp = TestPdp::start().await;
    pdp.respond(200, r#"{"decision": true}"#).await;

    let client = pdp.builder().api_key("s3cret").build().unwrap();
    client.authorize(&view_readme()).await.unwrap();

    assert_eq!(pdp.request_header(0, "authorization").await.as_deref(), Some("Bearer s3cret"));
    assert_eq!(pdp.request_header(0, "content-type").await.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_custom_api_key_header() {
    let pdp = TestPdp::start().await;
    pdp.respond(200, r#"{"decision": true}"#).await;

    let client = pdp.builder().api_key("s3cret").api_key_header("X-API-Key").build().unwrap();
    client.authorize(&view_readme()).await.unwrap();

    assert_eq!(pdp.request_header(0, "x-api-key").await.as_deref(), Some("s3cret"));
    assert_eq!(pdp.request_header(0, "authorization").await, None);
}

#[tokio::test]
async fn test_no_api_key_sends_no_auth_header() {
    let pdp = TestPdp::start().await;
    pdp.respond(200, r#"{"decision": true}"#).await;

    let client = pdp.builder().api_key("   ").build().unwrap();
    client.authorize(&view_readme()).await.unwrap();

    assert_eq!(pdp.request_header(0, "authorization").await, None);
}

#[tokio::test]
async fn test_each_call_gets_a_new_request_id() {
    let pdp = TestPdp::start().await;
    pdp.respond(200, r#"{"decision": true}"#).await;

    let client = pdp.client();
    client.authorize(&view_readme()).await.unwrap();
    client.authorize(&view_readme()).await.unwrap();

    let first = pdp.request_header(0, "x-request-id").await.unwrap();
    let second = pdp.request_header(1, "x-request-id").await.unwrap();
    assert!(uuid::Uuid::parse_str(&first).is_ok());
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_client_behind_trait_object() {
    let pdp = TestPdp::start().await;
    pdp.respond(200, r#"{"decision": true}"#).await;

    let client: Box<dyn AuthorizationClient> = Box::new(pdp.client());
    assert!(client.is_allowed(&view_readme()).await.unwrap());
}

#[tokio::test]
async fn test_concurrent_calls() {
    let pdp = TestPdp::start().await;
    pdp.respond(200, r#"{"decision": true}"#).await;

    let client = pdp.client();
    let calls = (0..8).map(|_| {
        let client = client.clone();
        tokio::spawn(async move { client.is_allowed(&view_readme()).await })
    });

    for call in calls.collect::<Vec<_>>() {
        assert!(call.await.unwrap().unwrap());
    }
    assert_eq!(pdp.requests().await.len(), 8);
}
