//! Static client configuration: where the PDP lives and how to authenticate.

use url::Url;

use crate::Error;
use crate::auth::{ApiKey, ApiKeyAuth};

/// Endpoint and credentials of a PDP.
///
/// A `ClientConfig` is read-only once built and is shared by every call made
/// through a client.
///
/// ## Example
///
/// ```rust
/// use authzen_client::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .endpoint("https://pdp.example.com/access/v1/evaluation")
///     .api_key("my-secret-key")
///     .build()?;
///
/// assert_eq!(config.endpoint().host_str(), Some("pdp.example.com"));
/// assert_eq!(config.auth().map(|a| a.header_name()), Some("Authorization"));
/// # Ok::<(), authzen_client::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    endpoint: Url,
    auth: Option<ApiKeyAuth>,
}

impl ClientConfig {
    /// Starts building a configuration.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Creates an unauthenticated configuration for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if
    /// the endpoint is blank or not a valid URL.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self, Error> {
        Self::builder().endpoint(endpoint.as_ref()).build()
    }

    /// Returns the evaluation endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the API key authentication, if a key is configured.
    pub fn auth(&self) -> Option<&ApiKeyAuth> {
        self.auth.as_ref()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    endpoint: Option<String>,
    api_key: Option<ApiKey>,
    api_key_header: Option<String>,
}

impl ClientConfigBuilder {
    /// Sets the PDP evaluation endpoint URL.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the API key.
    ///
    /// A blank key is treated as no key.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<ApiKey>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the header the API key is sent in (default `Authorization`).
    #[must_use]
    pub fn api_key_header(mut self, header: impl Into<String>) -> Self {
        self.api_key_header = Some(header.into());
        self
    }

    /// Validates and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if
    /// - the endpoint is missing or blank
    /// - the endpoint is not a valid URL
    /// - the API key header name is not a valid HTTP field name
    pub fn build(self) -> Result<ClientConfig, Error> {
        let endpoint = match self.endpoint.as_deref().map(str::trim) {
            Some(endpoint) if !endpoint.is_empty() => Url::parse(endpoint)?,
            _ => return Err(Error::configuration("endpoint must be provided")),
        };

        let auth = match self.api_key {
            Some(key) if !key.is_blank() => {
                Some(ApiKeyAuth::new(key, self.api_key_header.as_deref())?)
            },
            _ => None,
        };

        Ok(ClientConfig { endpoint, auth })
    }
}
