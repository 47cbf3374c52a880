//! HTTP connection options.

use std::time::Duration;

/// The header carrying the per-call correlation ID unless configured
/// otherwise.
pub const DEFAULT_CORRELATION_HEADER: &str = "X-Request-ID";

/// Connection and request options for the HTTP transport.
///
/// The request timeout applies to each attempt on its own; retries do not
/// share a budget.
///
/// ## Example
///
/// ```rust
/// use authzen_client::HttpOptions;
/// use std::time::Duration;
///
/// let options = HttpOptions::builder()
///     .request_timeout(Duration::from_secs(2))
///     .build();
///
/// assert_eq!(options.connect_timeout, Duration::from_secs(10));
/// assert_eq!(options.correlation_header, "X-Request-ID");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct HttpOptions {
    /// Timeout for establishing a connection.
    #[builder(default = Duration::from_secs(10))]
    pub connect_timeout: Duration,

    /// Timeout for a single request/response exchange.
    #[builder(default = Duration::from_secs(10))]
    pub request_timeout: Duration,

    /// Header carrying the per-call correlation ID.
    #[builder(into, default = DEFAULT_CORRELATION_HEADER.to_owned())]
    pub correlation_header: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}
