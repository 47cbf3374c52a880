//! AuthorizationClient trait for dependency injection.

use std::future::Future;
use std::pin::Pin;

use crate::Error;
use crate::types::{AuthorizationRequest, AuthorizationResponse};

/// Boxed future returned by [`AuthorizationClient`] methods.
pub type AuthorizeFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, Error>> + Send + 'a>>;

/// Object-safe trait for authorization operations.
///
/// This trait allows you to abstract over the real
/// [`AuthzClient`](crate::AuthzClient) and test doubles such as
/// [`MockClient`](super::MockClient).
///
/// ## Example
///
/// ```rust
/// use authzen_client::testing::AuthorizationClient;
/// use authzen_client::{Action, AuthorizationRequest, Error, Resource, Subject};
///
/// // Function that works with any authorization client
/// async fn can_view(client: &dyn AuthorizationClient, user_id: &str) -> Result<bool, Error> {
///     let request = AuthorizationRequest::new(
///         Subject::new("user", user_id)?,
///         Resource::new("dashboard", "main")?,
///         Action::new("view")?,
///     );
///     client.is_allowed(&request).await
/// }
/// ```
///
/// ## Object Safety
///
/// This trait is object-safe, so you can use `&dyn AuthorizationClient`
/// or `Box<dyn AuthorizationClient>` for dynamic dispatch.
pub trait AuthorizationClient: Send + Sync {
    /// Evaluates a request and returns the full decision.
    fn authorize<'a>(
        &'a self,
        request: &'a AuthorizationRequest,
    ) -> AuthorizeFuture<'a, AuthorizationResponse>;

    /// Evaluates a request and returns only whether it was allowed.
    ///
    /// Returns `Ok(false)` on deny; errors are reserved for failed calls.
    fn is_allowed<'a>(&'a self, request: &'a AuthorizationRequest) -> AuthorizeFuture<'a, bool> {
        Box::pin(async move { Ok(self.authorize(request).await?.is_allowed()) })
    }
}
