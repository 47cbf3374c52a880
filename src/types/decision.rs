//! Decision returned by the PDP.

use std::fmt;

use super::Context;

/// The outcome of an access evaluation.
///
/// A deny is a normal result, not an error: `authorize` returns
/// `Ok(response)` with [`is_allowed()`](Self::is_allowed) `false`.
///
/// The optional context carries whatever diagnostics the PDP chose to return
/// (reasons, obligations, ...). `None` means the PDP sent no `context` member;
/// an explicit empty object is `Some` of an empty [`Context`].
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizationResponse {
    allowed: bool,
    context: Option<Context>,
}

impl AuthorizationResponse {
    /// Creates a response.
    pub fn new(allowed: bool, context: Option<Context>) -> Self {
        Self { allowed, context }
    }

    /// Creates an allow decision without context.
    pub fn allow() -> Self {
        Self::new(true, None)
    }

    /// Creates a deny decision without context.
    pub fn deny() -> Self {
        Self::new(false, None)
    }

    /// Returns `true` if access is allowed.
    #[inline]
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// Returns `true` if access is denied.
    #[inline]
    pub fn is_denied(&self) -> bool {
        !self.allowed
    }

    /// Returns the response context, if the PDP sent one.
    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    /// Consumes the response and returns its context.
    pub fn into_context(self) -> Option<Context> {
        self.context
    }
}

impl From<bool> for AuthorizationResponse {
    fn from(allowed: bool) -> Self {
        Self::new(allowed, None)
    }
}

impl fmt::Display for AuthorizationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.allowed { write!(f, "allowed") } else { write!(f, "denied") }
    }
}
