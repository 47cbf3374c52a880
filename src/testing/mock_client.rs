//! Scripted in-memory stand-in for [`AuthzClient`](crate::AuthzClient).

use std::sync::Arc;

use parking_lot::Mutex;

use super::authorization_client::{AuthorizationClient, AuthorizeFuture};
use crate::types::{AuthorizationRequest, AuthorizationResponse};

/// Answers authorization requests from a script instead of a PDP.
///
/// Decisions are scripted per `(subject id, action name, resource id)`.
/// Requests without a matching expectation get the default decision, which
/// is deny unless the mock was created with [`MockClient::allow_all`].
///
/// ## Example
///
/// ```rust
/// use authzen_client::testing::MockClient;
///
/// let mock = MockClient::new()
///     .expect("alice", "view", "doc-1", true)
///     .expect("bob", "edit", "doc-1", false);
///
/// assert_eq!(mock.call_count(), 0);
/// ```
///
/// Hand the mock to code that takes an [`AuthorizationClient`] and call
/// [`MockClient::verify`] once the test is done.
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    expectations: Arc<Mutex<Vec<Expectation>>>,
    calls: Arc<Mutex<Vec<AuthorizationRequest>>>,
    default_allow: bool,
}

#[derive(Debug, Clone)]
struct Expectation {
    subject_id: String,
    action: String,
    resource_id: String,
    response: AuthorizationResponse,
}

impl Expectation {
    fn matches(&self, request: &AuthorizationRequest) -> bool {
        self.subject_id == request.subject().id()
            && self.action == request.action().name()
            && self.resource_id == request.resource().id()
    }
}

impl MockClient {
    /// Creates a mock client that denies unmatched requests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock client that allows unmatched requests.
    pub fn allow_all() -> Self {
        Self { default_allow: true, ..Self::new() }
    }

    /// Creates a mock client that denies unmatched requests.
    pub fn deny_all() -> Self {
        Self::new()
    }

    /// Adds an expectation with a plain allow/deny decision.
    #[must_use]
    pub fn expect(
        self,
        subject_id: impl Into<String>,
        action: impl Into<String>,
        resource_id: impl Into<String>,
        allowed: bool,
    ) -> Self {
        self.expect_response(subject_id, action, resource_id, AuthorizationResponse::from(allowed))
    }

    /// Adds an expectation returning a full response, context included.
    #[must_use]
    pub fn expect_response(
        self,
        subject_id: impl Into<String>,
        action: impl Into<String>,
        resource_id: impl Into<String>,
        response: AuthorizationResponse,
    ) -> Self {
        self.expectations.lock().push(Expectation {
            subject_id: subject_id.into(),
            action: action.into(),
            resource_id: resource_id.into(),
            response,
        });
        self
    }

    /// Verifies that every expectation was exercised at least once.
    ///
    /// # Panics
    ///
    /// Panics if any expectation was never matched.
    #[allow(clippy::panic)]
    pub fn verify(&self) {
        let expectations = self.expectations.lock();
        let calls = self.calls.lock();

        for expectation in expectations.iter() {
            if !calls.iter().any(|call| expectation.matches(call)) {
                panic!(
                    "Expected authorize({}, {}, {}) was never called",
                    expectation.subject_id, expectation.action, expectation.resource_id
                );
            }
        }
    }

    /// Returns the number of authorize calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Returns every request received, in order.
    pub fn calls(&self) -> Vec<AuthorizationRequest> {
        self.calls.lock().clone()
    }

    /// Clears all expectations and recorded calls.
    pub fn reset(&self) {
        self.expectations.lock().clear();
        self.calls.lock().clear();
    }

    fn find_response(&self, request: &AuthorizationRequest) -> AuthorizationResponse {
        self.expectations
            .lock()
            .iter()
            .find(|expectation| expectation.matches(request))
            .map(|expectation| expectation.response.clone())
            .unwrap_or_else(|| AuthorizationResponse::from(self.default_allow))
    }
}

impl AuthorizationClient for MockClient {
    fn authorize<'a>(
        &'a self,
        request: &'a AuthorizationRequest,
    ) -> AuthorizeFuture<'a, AuthorizationResponse> {
        self.calls.lock().push(request.clone());
        let response = self.find_response(request);
        Box::pin(async move { Ok(response) })
    }
}
