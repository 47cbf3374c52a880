//! Main error type for the AuthZEN client.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use super::ErrorKind;

/// A boxed, thread-safe error used at the [`Transport`](crate::transport::Transport)
/// seam so custom transports can fail with their own error types.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// The single outward-facing error type of the client.
///
/// `Error` carries enough context to branch on the failure and to diagnose it:
/// - [`kind()`](Error::kind): Categorization for `match` statements
/// - [`status()`](Error::status): HTTP status for client failures and
///   exhausted server errors
/// - [`body()`](Error::body): Response body returned with a client failure
/// - [`attempts()`](Error::attempts): Number of attempts a transport error
///   consumed
/// - [`request_id()`](Error::request_id): Correlation ID sent with the call
///
/// ## Error Hierarchy
///
/// ```text
/// Error
/// ├── kind: ErrorKind          (category for matching)
/// ├── message: String          (human-readable description)
/// ├── status: Option<u16>      (HTTP status, if one was received)
/// ├── body: Option<String>     (response body of a client failure)
/// ├── attempts: Option<u32>    (attempts made by the transport)
/// ├── request_id: Option       (correlation ID of the call)
/// └── source: Option           (underlying cause)
/// ```
///
/// ## Example
///
/// ```rust
/// use authzen_client::{Error, ErrorKind};
///
/// fn handle_error(err: &Error) {
///     match err.kind() {
///         ErrorKind::ClientFailure => {
///             eprintln!("PDP rejected the call with {:?}", err.status());
///         }
///         ErrorKind::Transport => {
///             eprintln!("gave up after {:?} attempts", err.attempts());
///         }
///         _ => eprintln!("{}", err),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    /// The error category.
    kind: ErrorKind,

    /// Human-readable error message.
    message: Cow<'static, str>,

    /// HTTP status code, when one was received.
    status: Option<u16>,

    /// Response body of a non-retryable HTTP failure.
    body: Option<String>,

    /// Number of attempts made before the transport gave up.
    attempts: Option<u32>,

    /// Correlation ID sent with the request.
    request_id: Option<String>,

    /// The underlying error, if any.
    source: Option<BoxError>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use authzen_client::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::Validation, "subject 'id' must not be blank");
    /// assert_eq!(err.kind(), ErrorKind::Validation);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            body: None,
            attempts: None,
            request_id: None,
            source: None,
        }
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable message without the kind prefix.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status code, if one was received.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the response body attached to a client failure.
    #[inline]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the number of attempts the transport made.
    #[inline]
    pub fn attempts(&self) -> Option<u32> {
        self.attempts
    }

    /// Returns the correlation ID sent with the failing call.
    #[inline]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Returns `true` if this kind of failure is retried by the transport.
    #[inline]
    pub fn is_retriable(&self) -> bool {
        self.kind.is_retriable()
    }

    /// Sets the HTTP status for this error.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the response body for this error.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the attempt count for this error.
    #[must_use]
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = Some(attempts);
        self
    }

    /// Sets the correlation ID for this error.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Sets an already boxed source error.
    #[must_use]
    pub fn with_boxed_source(mut self, source: BoxError) -> Self {
        self.source = Some(source);
        self
    }

    // Convenience constructors for common error types

    /// Creates a validation error.
    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Creates a transport error recording how many attempts were made.
    pub fn transport(message: impl Into<Cow<'static, str>>, attempts: u32) -> Self {
        Self::new(ErrorKind::Transport, message).with_attempts(attempts)
    }

    /// Creates the error for a non-retryable 4xx response.
    pub fn client_failure(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::new(
            ErrorKind::ClientFailure,
            format!("HTTP request failed with status {}: {}", status, body),
        )
        .with_status(status)
        .with_body(body)
    }

    /// Creates the error for a status code that is neither success, client
    /// error nor server error.
    pub fn unexpected_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::new(
            ErrorKind::ClientFailure,
            format!("unexpected HTTP status {}: {}", status, body),
        )
        .with_status(status)
        .with_body(body)
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    /// Creates the error for a call cancelled while waiting to retry.
    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled, "request cancelled while waiting to retry")
    }

    /// Creates the error for a call whose token fired before the first
    /// attempt.
    pub fn cancelled_before_send() -> Self {
        Self::new(ErrorKind::Cancelled, "request cancelled before it was sent").with_attempts(0)
    }

    /// Wraps an error that did not originate from this crate.
    pub fn unexpected(source: BoxError) -> Self {
        Self::new(
            ErrorKind::Unexpected,
            "authorization request failed due to an unexpected error",
        )
        .with_boxed_source(source)
    }

    /// Recovers a crate error from a boxed error, wrapping anything else as
    /// [`ErrorKind::Unexpected`].
    ///
    /// Crate errors come back unchanged, cause chain included.
    pub fn from_boxed(err: BoxError) -> Self {
        match err.downcast::<Error>() {
            Ok(err) => *err,
            Err(other) => Self::unexpected(other),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;

        if let Some(ref request_id) = self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind, kind.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::configuration("endpoint must be a valid URL").with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::decode(format!("JSON error: {}", err)).with_source(err)
    }
}
