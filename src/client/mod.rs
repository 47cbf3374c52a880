//! The authorization client.
//!
//! [`AuthzClient`] runs one evaluation per call:
//!
//! 1. merge the configured provider's context into the request
//! 2. encode the request
//! 3. send it through the transport, which retries transient failures
//! 4. decode the decision
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use authzen_client::prelude::*;
//!
//! # async fn example() -> Result<(), authzen_client::Error> {
//! let client = AuthzClient::builder()
//!     .endpoint("https://pdp.example.com/access/v1/evaluation")
//!     .api_key("my-secret-key")
//!     .build()?;
//!
//! let request = AuthorizationRequest::new(
//!     Subject::new("user", "alice")?,
//!     Resource::new("document", "readme")?,
//!     Action::new("view")?,
//! );
//!
//! if client.authorize(&request).await?.is_allowed() {
//!     println!("access granted");
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod inner;

pub use builder::{ClientBuilder, HasEndpoint, NoEndpoint};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::codec;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::testing::{AuthorizationClient, AuthorizeFuture};
use crate::types::{AuthorizationRequest, AuthorizationResponse};

/// Client for a remote AuthZEN Policy Decision Point.
///
/// Create a client using [`AuthzClient::builder()`].
///
/// ## Thread Safety
///
/// `AuthzClient` is `Clone` and thread-safe. Clones share the configuration
/// and the underlying connection pool, and calls made concurrently do not
/// coordinate with each other.
///
/// ## Errors
///
/// A deny decision is `Ok` with [`AuthorizationResponse::is_denied`]; errors
/// only report calls that produced no decision.
#[derive(Clone)]
pub struct AuthzClient {
    inner: Arc<inner::ClientInner>,
}

impl AuthzClient {
    /// Creates a new client builder.
    ///
    /// The builder uses the typestate pattern so an endpoint must be supplied
    /// before `build()` is available.
    pub fn builder() -> ClientBuilder<NoEndpoint> {
        ClientBuilder::new()
    }

    /// Evaluates an authorization request.
    ///
    /// # Errors
    ///
    /// - [`crate::ErrorKind::ClientFailure`] when the PDP rejects the request (4xx)
    /// - [`crate::ErrorKind::Transport`] when retries are exhausted
    /// - [`crate::ErrorKind::Decode`] when the response body is empty or malformed
    /// - [`crate::ErrorKind::Unexpected`] when a custom transport fails with a
    ///   foreign error
    pub async fn authorize(
        &self,
        request: &AuthorizationRequest,
    ) -> Result<AuthorizationResponse, Error> {
        self.authorize_with_cancellation(request, &CancellationToken::new()).await
    }

    /// Evaluates an authorization request that can be cancelled.
    ///
    /// Cancelling `cancel` while the transport waits between retries ends the
    /// call with [`crate::ErrorKind::Cancelled`]. A token cancelled before the call
    /// starts sends nothing.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use authzen_client::prelude::*;
    /// use tokio_util::sync::CancellationToken;
    ///
    /// # async fn example(client: AuthzClient, request: AuthorizationRequest) {
    /// let cancel = CancellationToken::new();
    /// let guard = cancel.clone();
    ///
    /// tokio::spawn(async move {
    ///     tokio::time::sleep(std::time::Duration::from_secs(1)).await;
    ///     guard.cancel();
    /// });
    ///
    /// match client.authorize_with_cancellation(&request, &cancel).await {
    ///     Err(e) if e.kind() == ErrorKind::Cancelled => println!("gave up"),
    ///     other => println!("{other:?}"),
    /// }
    /// # }
    /// ```
    #[tracing::instrument(
        name = "authorize",
        skip_all,
        fields(subject = %request.subject(), action = %request.action(), resource = %request.resource())
    )]
    pub async fn authorize_with_cancellation(
        &self,
        request: &AuthorizationRequest,
        cancel: &CancellationToken,
    ) -> Result<AuthorizationResponse, Error> {
        if cancel.is_cancelled() {
            return Err(Error::cancelled_before_send());
        }

        let provided = self.inner.context_provider.as_ref().map(|provider| provider.context());
        let request = request.with_provider_context(provided.as_ref());
        let body = codec::encode_request(&request)?;

        tracing::debug!(endpoint = %self.inner.config.endpoint(), "evaluating access request");

        let response_body = self
            .inner
            .transport
            .send(&self.inner.config, body, cancel)
            .await
            .map_err(Error::from_boxed)?;

        let response = codec::decode_response(&response_body)?;
        tracing::debug!(decision = %response, "received access decision");
        Ok(response)
    }

    /// Evaluates a request and returns only whether it was allowed.
    ///
    /// # Errors
    ///
    /// Same as [`authorize`](Self::authorize).
    pub async fn is_allowed(&self, request: &AuthorizationRequest) -> Result<bool, Error> {
        Ok(self.authorize(request).await?.is_allowed())
    }

    /// Returns the endpoint and credentials the client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Creates a client from the inner implementation.
    pub(crate) fn from_inner(inner: inner::ClientInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl std::fmt::Debug for AuthzClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthzClient")
            .field("endpoint", &self.inner.config.endpoint().as_str())
            .field("context_provider", &self.inner.context_provider.is_some())
            .finish_non_exhaustive()
    }
}

impl AuthorizationClient for AuthzClient {
    fn authorize<'a>(
        &'a self,
        request: &'a AuthorizationRequest,
    ) -> AuthorizeFuture<'a, AuthorizationResponse> {
        Box::pin(AuthzClient::authorize(self, request))
    }
}
