//! Context providers inject attributes into every request.
//!
//! A client configured with a [`ContextProvider`] asks it for a fresh
//! [`Context`] on every `authorize` call and merges it into the request.
//! Provider attributes override request attributes of the same name.

use std::sync::Arc;

use crate::Context;

/// Supplies context attributes for each authorization call.
///
/// ## Object Safety
///
/// This trait is object-safe and can be used as `Arc<dyn ContextProvider>`.
///
/// ## Example: Deployment Metadata
///
/// ```rust
/// use authzen_client::{Context, ContextProvider};
///
/// struct RegionProvider {
///     region: String,
/// }
///
/// impl ContextProvider for RegionProvider {
///     fn context(&self) -> Context {
///         Context::new().with("region", self.region.as_str())
///     }
/// }
///
/// let provider = RegionProvider { region: "eu-west-1".into() };
/// assert_eq!(provider.context().get("region").and_then(|v| v.as_str()), Some("eu-west-1"));
/// ```
pub trait ContextProvider: Send + Sync {
    /// Returns the context to merge into the current request.
    ///
    /// An empty context leaves the request untouched.
    fn context(&self) -> Context;
}

// Allow using Arc<dyn ContextProvider> as ContextProvider
impl<T: ContextProvider + ?Sized> ContextProvider for Arc<T> {
    fn context(&self) -> Context {
        (**self).context()
    }
}

// Allow using Box<dyn ContextProvider> as ContextProvider
impl<T: ContextProvider + ?Sized> ContextProvider for Box<T> {
    fn context(&self) -> Context {
        (**self).context()
    }
}

/// Stamps each request with the current UTC time.
///
/// The time is written as an RFC 3339 string under `timestamp` unless another
/// key is configured.
#[derive(Debug, Clone)]
pub struct TimestampContextProvider {
    key: Arc<str>,
}

impl TimestampContextProvider {
    /// The attribute name used by [`TimestampContextProvider::new`].
    pub const DEFAULT_KEY: &'static str = "timestamp";

    /// Creates a provider writing to `timestamp`.
    pub fn new() -> Self {
        Self::with_key(Self::DEFAULT_KEY)
    }

    /// Creates a provider writing to `key`.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: Arc::from(key.into()) }
    }

    /// Returns the attribute name the timestamp is written to.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Default for TimestampContextProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextProvider for TimestampContextProvider {
    fn context(&self) -> Context {
        let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        Context::new().with(self.key.as_ref(), now)
    }
}

/// Returns the same context on every call.
///
/// Useful for fixed deployment metadata and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticContextProvider {
    context: Context,
}

impl StaticContextProvider {
    /// Creates a provider that always returns `context`.
    pub fn new(context: Context) -> Self {
        Self { context }
    }
}

impl ContextProvider for StaticContextProvider {
    fn context(&self) -> Context {
        self.context.clone()
    }
}
