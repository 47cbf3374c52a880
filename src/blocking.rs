//! Blocking authorization client.
//!
//! Wraps [`crate::AuthzClient`] and drives each call to completion on a
//! private current-thread runtime, for callers without an async runtime.
//!
//! ```rust,no_run
//! use authzen_client::{Action, AuthorizationRequest, Resource, Subject};
//!
//! # fn main() -> Result<(), authzen_client::Error> {
//! let client = authzen_client::AuthzClient::builder()
//!     .endpoint("https://pdp.example.com/access/v1/evaluation")
//!     .build()?;
//! let client = authzen_client::blocking::AuthzClient::new(client)?;
//!
//! let request = AuthorizationRequest::new(
//!     Subject::new("user", "alice")?,
//!     Resource::new("document", "readme")?,
//!     Action::new("view")?,
//! );
//! let allowed = client.is_allowed(&request)?;
//! # Ok(())
//! # }
//! ```
//!
//! Calling into this client from inside an async runtime panics; use the
//! async client there instead.

use std::sync::Arc;

use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::types::{AuthorizationRequest, AuthorizationResponse};

/// Synchronous counterpart of [`crate::AuthzClient`].
///
/// Cloning is cheap; clones share the runtime and the wrapped client.
#[derive(Clone)]
pub struct AuthzClient {
    client: crate::AuthzClient,
    runtime: Arc<Runtime>,
}

impl AuthzClient {
    /// Wraps an async client.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if
    /// the runtime cannot be started.
    pub fn new(client: crate::AuthzClient) -> Result<Self, Error> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::configuration("failed to start blocking runtime").with_source(e))?;

        Ok(Self { client, runtime: Arc::new(runtime) })
    }

    /// Evaluates an authorization request, blocking until a decision or an
    /// error is available.
    ///
    /// # Errors
    ///
    /// Same as [`crate::AuthzClient::authorize`].
    pub fn authorize(&self, request: &AuthorizationRequest) -> Result<AuthorizationResponse, Error> {
        self.runtime.block_on(self.client.authorize(request))
    }

    /// Evaluates an authorization request that another thread can cancel.
    ///
    /// # Errors
    ///
    /// Same as [`crate::AuthzClient::authorize_with_cancellation`].
    pub fn authorize_with_cancellation(
        &self,
        request: &AuthorizationRequest,
        cancel: &CancellationToken,
    ) -> Result<AuthorizationResponse, Error> {
        self.runtime.block_on(self.client.authorize_with_cancellation(request, cancel))
    }

    /// Evaluates a request and returns only whether it was allowed.
    ///
    /// # Errors
    ///
    /// Same as [`crate::AuthzClient::authorize`].
    pub fn is_allowed(&self, request: &AuthorizationRequest) -> Result<bool, Error> {
        Ok(self.authorize(request)?.is_allowed())
    }

    /// Returns the endpoint and credentials the client was built with.
    pub fn config(&self) -> &ClientConfig {
        self.client.config()
    }

    /// Returns the wrapped async client.
    pub fn as_async(&self) -> &crate::AuthzClient {
        &self.client
    }
}

impl std::fmt::Debug for AuthzClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("blocking::AuthzClient").field("client", &self.client).finish()
    }
}
