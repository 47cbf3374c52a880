//! Error kind enumeration for categorizing client errors.

/// Categorization of client errors.
///
/// This enum provides a stable interface for matching on error types, enabling
/// different handling strategies for different failure modes.
///
/// ## Where Each Kind Comes From
///
/// | ErrorKind       | Raised by                | Retried internally |
/// |-----------------|--------------------------|--------------------|
/// | `Validation`    | entity constructors      | No                 |
/// | `Configuration` | config / client builders | No                 |
/// | `Transport`     | HTTP transport           | Yes (already spent)|
/// | `ClientFailure` | HTTP transport           | No                 |
/// | `Decode`        | wire codec               | No                 |
/// | `Cancelled`     | backoff wait             | No                 |
/// | `Unexpected`    | client orchestrator      | No                 |
///
/// A `Transport` error surfacing to the caller means the retry budget has
/// already been used up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A required entity field is missing or blank.
    ///
    /// Raised synchronously when building a subject, resource, action or
    /// request. **Not retriable.** Fix the input.
    #[error("validation error")]
    Validation,

    /// The client configuration is invalid (missing or malformed endpoint,
    /// invalid header name, HTTP client construction failure).
    ///
    /// **Not retriable.** Fix the configuration.
    #[error("configuration error")]
    Configuration,

    /// Network I/O failure or server error (5xx) after the retry budget was
    /// exhausted.
    ///
    /// Carries the number of attempts made and, for server errors, the last
    /// HTTP status.
    #[error("transport error")]
    Transport,

    /// The PDP answered with a non-retryable status (4xx or an unexpected
    /// code).
    ///
    /// Carries the status code and the response body.
    #[error("client failure")]
    ClientFailure,

    /// The response body was empty or did not match the wire schema.
    #[error("decode error")]
    Decode,

    /// The call was cancelled before it was sent or while waiting between
    /// retries.
    #[error("cancelled")]
    Cancelled,

    /// An error that did not originate from this crate was raised while
    /// serving an `authorize` call (for example by a custom transport).
    #[error("unexpected error")]
    Unexpected,
}

impl ErrorKind {
    /// Returns `true` if the transport retries this kind of failure before
    /// giving up.
    ///
    /// # Example
    ///
    /// ```rust
    /// use authzen_client::ErrorKind;
    ///
    /// assert!(ErrorKind::Transport.is_retriable());
    /// assert!(!ErrorKind::ClientFailure.is_retriable());
    /// ```
    #[inline]
    pub fn is_retriable(&self) -> bool {
        matches!(self, ErrorKind::Transport)
    }
}
