//! Transport trait definition.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::error::BoxError;

/// Delivers one encoded evaluation request to the PDP and returns the raw
/// response body.
///
/// Implementations own their retry policy. The client treats whatever comes
/// back as final: a crate [`Error`](crate::Error) is passed to the caller
/// unchanged, anything else is wrapped as
/// [`ErrorKind::Unexpected`](crate::ErrorKind::Unexpected).
///
/// `cancel` fires when the caller gives up on the call. Implementations that
/// wait between attempts must stop waiting and fail with
/// [`Error::cancelled`](crate::Error::cancelled).
///
/// ## Example
///
/// ```rust
/// use authzen_client::transport::Transport;
/// use authzen_client::{BoxError, ClientConfig};
/// use tokio_util::sync::CancellationToken;
///
/// struct AlwaysAllow;
///
/// #[async_trait::async_trait]
/// impl Transport for AlwaysAllow {
///     async fn send(
///         &self,
///         _config: &ClientConfig,
///         _body: String,
///         _cancel: &CancellationToken,
///     ) -> Result<String, BoxError> {
///         Ok(r#"{"decision": true}"#.to_owned())
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Sends `body` to the endpoint in `config` and returns the response
    /// body of a successful exchange.
    async fn send(
        &self,
        config: &ClientConfig,
        body: String,
        cancel: &CancellationToken,
    ) -> Result<String, BoxError>;
}

// Allow using Arc<dyn Transport> as Transport
#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(
        &self,
        config: &ClientConfig,
        body: String,
        cancel: &CancellationToken,
    ) -> Result<String, BoxError> {
        (**self).send(config, body, cancel).await
    }
}

// Allow using Box<dyn Transport> as Transport
#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(
        &self,
        config: &ClientConfig,
        body: String,
        cancel: &CancellationToken,
    ) -> Result<String, BoxError> {
        (**self).send(config, body, cancel).await
    }
}
