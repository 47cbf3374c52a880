//! API key credentials and the header they are sent in.

use std::fmt;
use std::sync::Arc;

use zeroize::Zeroizing;

use crate::Error;

/// The header an API key is sent in when no other name is configured.
pub const DEFAULT_API_KEY_HEADER: &str = "Authorization";

/// An API key for the PDP.
///
/// The secret is zeroed when the last clone is dropped and never appears in
/// `Debug` output.
///
/// ## Example
///
/// ```rust
/// use authzen_client::ApiKey;
///
/// let key = ApiKey::new("sk_live_abc");
/// assert_eq!(key.expose(), "sk_live_abc");
/// assert!(!format!("{:?}", key).contains("sk_live_abc"));
/// ```
#[derive(Clone)]
pub struct ApiKey {
    secret: Arc<Zeroizing<String>>,
}

impl ApiKey {
    /// Wraps a secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: Arc::new(Zeroizing::new(secret.into())) }
    }

    /// Returns the secret.
    pub fn expose(&self) -> &str {
        self.secret.as_str()
    }

    /// Returns `true` if the secret is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.secret.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"[REDACTED]").finish()
    }
}

impl<S: Into<String>> From<S> for ApiKey {
    fn from(secret: S) -> Self {
        Self::new(secret)
    }
}

/// An API key together with the header it is sent in.
///
/// When the header is `Authorization` (in any letter case) the value is sent
/// as `Bearer <key>`; any other header carries the raw key.
///
/// ## Example
///
/// ```rust
/// use authzen_client::auth::ApiKeyAuth;
///
/// let bearer = ApiKeyAuth::new("secret", None)?;
/// assert_eq!(bearer.header_name(), "Authorization");
/// assert_eq!(bearer.header_value().as_str(), "Bearer secret");
///
/// let custom = ApiKeyAuth::new("secret", Some("X-Api-Key"))?;
/// assert_eq!(custom.header_value().as_str(), "secret");
/// # Ok::<(), authzen_client::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ApiKeyAuth {
    key: ApiKey,
    header_name: String,
}

impl ApiKeyAuth {
    /// Pairs a key with a header name, defaulting to
    /// [`DEFAULT_API_KEY_HEADER`] when `header_name` is `None` or blank.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if
    /// the header name is not a valid HTTP field name.
    pub fn new(key: impl Into<ApiKey>, header_name: Option<&str>) -> Result<Self, Error> {
        let header_name = match header_name.map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_API_KEY_HEADER,
        };
        validate_header_name(header_name)?;

        Ok(Self { key: key.into(), header_name: header_name.to_owned() })
    }

    /// Returns the API key.
    pub fn key(&self) -> &ApiKey {
        &self.key
    }

    /// Returns the header name the key is sent in.
    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    /// Returns `true` if the key is sent as a bearer token.
    pub fn is_bearer(&self) -> bool {
        self.header_name.eq_ignore_ascii_case(DEFAULT_API_KEY_HEADER)
    }

    /// Formats the header value for this key.
    pub fn header_value(&self) -> Zeroizing<String> {
        if self.is_bearer() {
            Zeroizing::new(format!("Bearer {}", self.key.expose()))
        } else {
            Zeroizing::new(self.key.expose().to_owned())
        }
    }
}

/// Checks that `name` can be sent as an HTTP field name.
fn validate_header_name(name: &str) -> Result<(), Error> {
    http::HeaderName::from_bytes(name.as_bytes()).map(drop).map_err(|e| {
        Error::configuration(format!("invalid API key header name: {:?}", name)).with_source(e)
    })
}
