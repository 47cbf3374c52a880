//! Client builder with typestate pattern.

use std::{marker::PhantomData, sync::Arc, time::Duration};

use super::inner::ClientInner;
#[cfg(feature = "rest")]
use crate::transport::HttpTransport;
use crate::{
    AuthzClient, Error,
    auth::ApiKey,
    config::{ClientConfigBuilder, HttpOptions, RetryConfig},
    provider::ContextProvider,
    transport::Transport,
};

/// Marker type: endpoint not yet provided.
pub struct NoEndpoint;

/// Marker type: endpoint has been provided.
pub struct HasEndpoint;

/// Builder for creating [`AuthzClient`] instances.
///
/// Uses the typestate pattern so that `build()` is only available once an
/// endpoint has been supplied.
///
/// ## Required Configuration
///
/// - `endpoint()`: The PDP evaluation endpoint
///
/// ## Optional Configuration
///
/// - `api_key()` / `api_key_header()`: Credentials sent with every attempt
/// - `retry_config()`: Retry budget and backoff bounds
/// - `connect_timeout()` / `request_timeout()` / `http_options()`: HTTP settings
/// - `context_provider()`: Ambient context merged into every request
/// - `transport()`: Replace the HTTP transport entirely
///
/// ## Example
///
/// ```rust
/// use authzen_client::{AuthzClient, RetryConfig, TimestampContextProvider};
/// use std::time::Duration;
///
/// let client = AuthzClient::builder()
///     .endpoint("https://pdp.example.com/access/v1/evaluation")
///     .api_key("my-secret-key")
///     .retry_config(RetryConfig::new().with_max_retries(5))
///     .request_timeout(Duration::from_secs(2))
///     .context_provider(TimestampContextProvider::new())
///     .build()?;
/// # Ok::<(), authzen_client::Error>(())
/// ```
///
/// Forgetting the endpoint is a compile error:
///
/// ```compile_fail
/// use authzen_client::AuthzClient;
///
/// let client = AuthzClient::builder().api_key("key").build();
/// ```
pub struct ClientBuilder<EndpointState> {
    config: ClientConfigBuilder,
    retry_config: RetryConfig,
    http_options: HttpOptions,
    context_provider: Option<Arc<dyn ContextProvider>>,
    transport: Option<Arc<dyn Transport>>,
    _endpoint_state: PhantomData<EndpointState>,
}

impl ClientBuilder<NoEndpoint> {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config: ClientConfigBuilder::default(),
            retry_config: RetryConfig::default(),
            http_options: HttpOptions::default(),
            context_provider: None,
            transport: None,
            _endpoint_state: PhantomData,
        }
    }

    /// Sets the PDP evaluation endpoint.
    ///
    /// The URL is validated when the client is built.
    pub fn endpoint(self, endpoint: impl Into<String>) -> ClientBuilder<HasEndpoint> {
        ClientBuilder {
            config: self.config.endpoint(endpoint),
            retry_config: self.retry_config,
            http_options: self.http_options,
            context_provider: self.context_provider,
            transport: self.transport,
            _endpoint_state: PhantomData,
        }
    }
}

impl Default for ClientBuilder<NoEndpoint> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ClientBuilder<E> {
    /// Sets the API key. A blank key means no auth header is sent.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<ApiKey>) -> Self {
        self.config = self.config.api_key(api_key);
        self
    }

    /// Sets the header the API key is sent in.
    ///
    /// Defaults to `Authorization`, in which case the value is sent as
    /// `Bearer <key>`. Any other header carries the raw key.
    #[must_use]
    pub fn api_key_header(mut self, header: impl Into<String>) -> Self {
        self.config = self.config.api_key_header(header);
        self
    }

    /// Sets the retry configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use authzen_client::{AuthzClient, RetryConfig};
    ///
    /// let builder = AuthzClient::builder()
    ///     .endpoint("http://localhost:8080/access/v1/evaluation")
    ///     .retry_config(RetryConfig::disabled());
    /// ```
    #[must_use]
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Sets all HTTP options at once.
    #[must_use]
    pub fn http_options(mut self, options: HttpOptions) -> Self {
        self.http_options = options;
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.http_options.connect_timeout = timeout;
        self
    }

    /// Sets the timeout of a single attempt.
    ///
    /// Retries each get the full timeout; it is not a budget for the call.
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.http_options.request_timeout = timeout;
        self
    }

    /// Sets the provider whose context is merged into every request.
    ///
    /// On key collisions the provider's values win.
    #[must_use]
    pub fn context_provider(mut self, provider: impl ContextProvider + 'static) -> Self {
        self.context_provider = Some(Arc::new(provider));
        self
    }

    /// Replaces the HTTP transport.
    ///
    /// The retry configuration and HTTP options only apply to the built-in
    /// transport and are ignored once a custom one is set.
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }
}

impl ClientBuilder<HasEndpoint> {
    /// Builds the client.
    ///
    /// No connection is made; the first request opens one.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if:
    /// - The endpoint is blank or not a valid URL
    /// - The API key header or correlation header is not a valid header name
    /// - The HTTP client cannot be created
    pub fn build(self) -> Result<AuthzClient, Error> {
        let config = self.config.build()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => default_transport(&self.retry_config, &self.http_options)?,
        };

        Ok(AuthzClient::from_inner(ClientInner {
            config,
            transport,
            context_provider: self.context_provider,
        }))
    }
}

#[cfg(feature = "rest")]
fn default_transport(
    retry_config: &RetryConfig,
    http_options: &HttpOptions,
) -> Result<Arc<dyn Transport>, Error> {
    let transport = HttpTransport::builder()
        .retry_config(retry_config.clone())
        .http_options(http_options.clone())
        .build()?;
    Ok(Arc::new(transport))
}

#[cfg(not(feature = "rest"))]
fn default_transport(
    _retry_config: &RetryConfig,
    _http_options: &HttpOptions,
) -> Result<Arc<dyn Transport>, Error> {
    Err(Error::configuration("no transport configured and the 'rest' feature is not enabled"))
}
