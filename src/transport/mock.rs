//! Mock transport implementation for testing.
//!
//! This module provides a transport that replays scripted outcomes in order,
//! allowing client tests to run without network dependencies.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;

use super::traits::Transport;
use crate::Error;
use crate::config::ClientConfig;
use crate::error::BoxError;

/// A scripted transport outcome.
#[derive(Debug)]
enum Outcome {
    Body(String),
    Failure(BoxError),
}

/// Mock transport for testing.
///
/// Outcomes are consumed in the order they were scripted. Every request body
/// is recorded, including those of calls that fail.
///
/// ## Example
///
/// ```rust
/// use authzen_client::testing::MockTransport;
/// use authzen_client::Error;
///
/// let transport = MockTransport::new();
/// transport.respond_with(r#"{"decision": true}"#);
/// transport.fail_with(Error::client_failure(403, "Forbidden"));
/// assert_eq!(transport.remaining(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    outcomes: RwLock<VecDeque<Outcome>>,
    requests: RwLock<Vec<String>>,
    request_count: AtomicU64,
}

impl MockTransport {
    /// Creates a mock transport with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response body.
    pub fn respond_with(&self, body: impl Into<String>) -> &Self {
        self.outcomes.write().push_back(Outcome::Body(body.into()));
        self
    }

    /// Queues a failure.
    ///
    /// Crate [`Error`]s and foreign errors are both accepted, which lets tests
    /// exercise how the client passes through or wraps transport failures.
    pub fn fail_with(&self, error: impl Into<BoxError>) -> &Self {
        self.outcomes.write().push_back(Outcome::Failure(error.into()));
        self
    }

    /// Returns the number of scripted outcomes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.outcomes.read().len()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Returns the bodies of all requests made so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.read().clone()
    }

    /// Returns the most recent request body.
    pub fn last_request(&self) -> Option<String> {
        self.requests.read().last().cloned()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        _config: &ClientConfig,
        body: String,
        cancel: &CancellationToken,
    ) -> Result<String, BoxError> {
        if cancel.is_cancelled() {
            return Err(Error::cancelled_before_send().into());
        }

        self.request_count.fetch_add(1, Ordering::Relaxed);
        self.requests.write().push(body);

        let outcome = self.outcomes.write().pop_front();
        match outcome {
            Some(Outcome::Body(body)) => Ok(body),
            Some(Outcome::Failure(error)) => Err(error),
            None => Err(Error::transport("mock transport has no scripted outcome left", 1).into()),
        }
    }
}
