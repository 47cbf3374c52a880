//! HTTP transport implementation using reqwest.
//!
//! Sends each evaluation as a single `POST` to the configured endpoint and
//! retries transient failures with exponential backoff and full jitter.
//!
//! ## Status Classification
//!
//! | Outcome                     | Handling                              |
//! |-----------------------------|---------------------------------------|
//! | 2xx                         | body returned verbatim                |
//! | 4xx                         | `ClientFailure`, never retried        |
//! | 5xx                         | retried, then `Transport` with status |
//! | other status (incl. 3xx)    | `ClientFailure`, never retried        |
//! | connect/timeout/read error  | retried, then `Transport` with cause  |
//!
//! Redirects are never followed.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::Error;
use crate::config::{ClientConfig, HttpOptions, RetryConfig};
use crate::error::BoxError;
use crate::transport::traits::Transport;
use crate::user_agent;

// ============================================================================
// HTTP Transport
// ============================================================================

/// Retrying HTTP transport using reqwest.
///
/// One correlation ID is generated per call and sent with every attempt of
/// that call. The request timeout applies to each attempt separately.
///
/// ## Example
///
/// ```rust
/// use authzen_client::transport::HttpTransport;
/// use authzen_client::{HttpOptions, RetryConfig};
/// use std::time::Duration;
///
/// let transport = HttpTransport::builder()
///     .retry_config(RetryConfig::new().with_max_retries(5))
///     .http_options(HttpOptions::builder().request_timeout(Duration::from_secs(2)).build())
///     .build()?;
///
/// assert_eq!(transport.retry_config().max_retries, 5);
/// # Ok::<(), authzen_client::Error>(())
/// ```
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    retry_config: RetryConfig,
    options: HttpOptions,
    correlation_header: HeaderName,
    jitter: Arc<Mutex<fastrand::Rng>>,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("retry_config", &self.retry_config)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Creates a transport builder.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::new()
    }

    /// Creates a transport with default retry and HTTP options.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if
    /// the HTTP client cannot be created.
    pub fn new() -> Result<Self, Error> {
        Self::builder().build()
    }

    /// Returns the retry configuration.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }

    /// Returns the HTTP options.
    pub fn options(&self) -> &HttpOptions {
        &self.options
    }

    /// Builds the headers shared by every attempt of one call.
    fn build_headers(&self, config: &ClientConfig, request_id: &str) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        // Note: User-Agent is set at the client level in build()

        let request_id = HeaderValue::from_str(request_id)
            .map_err(|e| Error::configuration("invalid correlation ID").with_source(e))?;
        headers.insert(self.correlation_header.clone(), request_id);

        if let Some(auth) = config.auth() {
            let name = HeaderName::from_bytes(auth.header_name().as_bytes())
                .map_err(|e| Error::configuration("invalid API key header name").with_source(e))?;
            let mut value = HeaderValue::from_str(auth.header_value().as_str()).map_err(|e| {
                Error::configuration("API key is not a valid header value").with_source(e)
            })?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// Makes one attempt and classifies its outcome.
    async fn attempt(
        &self,
        config: &ClientConfig,
        headers: &HeaderMap,
        body: &str,
    ) -> Result<String, AttemptFailure> {
        let response = self
            .client
            .post(config.endpoint().clone())
            .headers(headers.clone())
            .body(body.to_owned())
            .timeout(self.options.request_timeout)
            .send()
            .await
            .map_err(AttemptFailure::from_reqwest)?;

        let status = response.status().as_u16();
        debug!(status, "received authorization response");

        match status {
            200..=299 => response.text().await.map_err(AttemptFailure::Io),
            400..=499 => {
                let (body, read_error) = read_error_body(response).await;
                Err(AttemptFailure::Fatal(
                    with_read_error(Error::client_failure(status, body), read_error),
                ))
            },
            500..=599 => Err(AttemptFailure::Server { status }),
            _ => {
                let (body, read_error) = read_error_body(response).await;
                Err(AttemptFailure::Fatal(
                    with_read_error(Error::unexpected_status(status, body), read_error),
                ))
            },
        }
    }

    /// Executes a call with retry logic.
    async fn execute_with_retry(
        &self,
        config: &ClientConfig,
        body: &str,
        cancel: &CancellationToken,
    ) -> Result<String, Error> {
        let request_id = uuid::Uuid::new_v4().to_string();

        if cancel.is_cancelled() {
            return Err(Error::cancelled_before_send().with_request_id(request_id));
        }

        let headers = self.build_headers(config, &request_id)?;
        let max_attempts = self.retry_config.max_attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(
                endpoint = %config.endpoint(),
                request_id = %request_id,
                attempt,
                "sending authorization request"
            );

            let failure = match self.attempt(config, &headers, body).await {
                Ok(body) => return Ok(body),
                Err(AttemptFailure::Fatal(err)) => {
                    return Err(err.with_attempts(attempt).with_request_id(request_id));
                },
                Err(failure) => failure,
            };

            if attempt >= max_attempts {
                warn!(request_id = %request_id, attempt, error = %failure, "retries exhausted");
                return Err(failure.exhausted(attempt).with_request_id(request_id));
            }

            // First retry uses index 0
            let delay = self.retry_config.delay_for_retry_with(attempt - 1, &mut self.jitter.lock());
            warn!(
                request_id = %request_id,
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %failure,
                "authorization request failed, retrying"
            );

            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    warn!(request_id = %request_id, attempt, "retry wait cancelled");
                    return Err(Error::cancelled().with_attempts(attempt).with_request_id(request_id));
                }
                () = tokio::time::sleep(delay) => {}
            }
        }
    }
}

/// Reads the body of a failed response.
///
/// The status alone decides the outcome, so a body that cannot be read is
/// reported as empty and the read error is handed back to be attached.
async fn read_error_body(response: reqwest::Response) -> (String, Option<reqwest::Error>) {
    match response.text().await {
        Ok(body) => (body, None),
        Err(e) => {
            debug!(error = %e, "failed to read error response body");
            (String::new(), Some(e))
        },
    }
}

fn with_read_error(err: Error, read_error: Option<reqwest::Error>) -> Error {
    match read_error {
        Some(e) => err.with_source(e),
        None => err,
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        config: &ClientConfig,
        body: String,
        cancel: &CancellationToken,
    ) -> Result<String, BoxError> {
        Ok(self.execute_with_retry(config, &body, cancel).await?)
    }
}

// ============================================================================
// Attempt Outcomes
// ============================================================================

/// Why a single attempt did not produce a body.
#[derive(Debug)]
enum AttemptFailure {
    /// The server answered 5xx.
    Server { status: u16 },
    /// No usable response: connect, timeout or body read failure.
    Io(reqwest::Error),
    /// Not retried.
    Fatal(Error),
}

impl AttemptFailure {
    fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_builder() {
            AttemptFailure::Fatal(
                Error::configuration("failed to build HTTP request").with_source(e),
            )
        } else {
            AttemptFailure::Io(e)
        }
    }

    /// Converts a retryable failure into the error reported once the retry
    /// budget is spent.
    fn exhausted(self, attempts: u32) -> Error {
        match self {
            AttemptFailure::Server { status } => Error::transport(
                format!("exhausted retries, last response was HTTP {}", status),
                attempts,
            )
            .with_status(status),
            AttemptFailure::Io(e) => {
                Error::transport("exhausted retries after I/O failure", attempts).with_source(e)
            },
            AttemptFailure::Fatal(err) => err.with_attempts(attempts),
        }
    }
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptFailure::Server { status } => write!(f, "server error: HTTP {}", status),
            AttemptFailure::Io(e) => write!(f, "I/O failure: {}", e),
            AttemptFailure::Fatal(err) => write!(f, "{}", err),
        }
    }
}

// ============================================================================
// HTTP Transport Builder
// ============================================================================

/// Builder for [`HttpTransport`].
#[derive(Debug, Default)]
pub struct HttpTransportBuilder {
    retry_config: RetryConfig,
    options: HttpOptions,
    jitter_seed: Option<u64>,
}

impl HttpTransportBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Sets the retry configuration.
    #[must_use]
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Sets the HTTP options.
    #[must_use]
    pub fn http_options(mut self, options: HttpOptions) -> Self {
        self.options = options;
        self
    }

    /// Seeds the backoff jitter so delays are reproducible.
    #[cfg(test)]
    fn jitter_seed(mut self, seed: u64) -> Self {
        self.jitter_seed = Some(seed);
        self
    }

    /// Builds the HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns a [`Configuration`](crate::ErrorKind::Configuration) error if
    /// the correlation header name is invalid or the HTTP client cannot be
    /// created.
    pub fn build(self) -> Result<HttpTransport, Error> {
        let correlation_header = HeaderName::from_bytes(
            self.options.correlation_header.as_bytes(),
        )
        .map_err(|e| Error::configuration("invalid correlation header name").with_source(e))?;

        let client = reqwest::Client::builder()
            .connect_timeout(self.options.connect_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(user_agent::user_agent())
            .build()
            .map_err(|e| Error::configuration("failed to create HTTP client").with_source(e))?;

        let jitter = self.jitter_seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

        Ok(HttpTransport {
            client,
            retry_config: self.retry_config,
            options: self.options,
            correlation_header,
            jitter: Arc::new(Mutex::new(jitter)),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
