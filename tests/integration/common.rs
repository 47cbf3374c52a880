//! Common test harness for AuthZEN client integration tests.
//!
//! Provides a mock PDP and request fixtures.

use std::time::Duration;

use anyhow::{Context as _, Result};
use authzen_client::{
    Action, AuthorizationRequest, AuthzClient, ClientBuilder, Resource, RetryConfig, Subject,
    client::HasEndpoint,
};
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the mock PDP serves evaluations on.
pub const EVALUATION_PATH: &str = "/access/v1/evaluation";

/// A local PDP backed by wiremock.
pub struct TestPdp {
    pub server: MockServer,
}

impl TestPdp {
    /// Starts a PDP with nothing mounted.
    pub async fn start() -> Self {
        Self { server: MockServer::start().await }
    }

    /// The evaluation endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.server.uri(), EVALUATION_PATH)
    }

    /// A client builder pointed at this PDP with millisecond backoff.
    pub fn builder(&self) -> ClientBuilder<HasEndpoint> {
        AuthzClient::builder().endpoint(self.endpoint()).retry_config(fast_retries())
    }

    /// A client with default settings apart from backoff.
    pub fn client(&self) -> AuthzClient {
        self.builder().build().expect("client should build")
    }

    /// Mounts a PDP answering every evaluation with `body`.
    pub async fn respond(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(EVALUATION_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Mounts a response used for the first `times` evaluations only.
    pub async fn respond_times(&self, status: u16, body: &str, times: u64) {
        Mock::given(method("POST"))
            .and(path(EVALUATION_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .up_to_n_times(times)
            .mount(&self.server)
            .await;
    }

    /// Returns every request the PDP received.
    pub async fn requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Returns the JSON body of the `index`th request.
    pub async fn request_json(&self, index: usize) -> Result<Value> {
        let requests = self.requests().await;
        let request = requests.get(index).context("request was not received")?;
        request.body_json().context("request body was not JSON")
    }

    /// Returns a header of the `index`th request.
    pub async fn request_header(&self, index: usize, name: &str) -> Option<String> {
        let requests = self.requests().await;
        let value = requests.get(index)?.headers.get(name)?;
        value.to_str().ok().map(str::to_owned)
    }
}

/// Retries with backoff short enough for tests.
pub fn fast_retries() -> RetryConfig {
    RetryConfig::new()
        .with_base_delay(Duration::from_millis(1))
        .with_max_delay(Duration::from_millis(5))
}

/// `user:alice` viewing `document:readme`.
pub fn view_readme() -> AuthorizationRequest {
    AuthorizationRequest::new(
        Subject::new("user", "alice").expect("valid subject"),
        Resource::new("document", "readme").expect("valid resource"),
        Action::new("view").expect("valid action"),
    )
}
