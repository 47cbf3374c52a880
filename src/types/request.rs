//! The evaluation request sent to the PDP.

use std::borrow::Cow;

use super::{Action, Context, Resource, Subject};
use crate::Error;

/// An immutable access evaluation request.
///
/// "May `subject` perform `action` on `resource`, given `context`?"
///
/// ## Example
///
/// ```rust
/// use authzen_client::{Action, AuthorizationRequest, Context, Resource, Subject};
///
/// let request = AuthorizationRequest::builder()
///     .subject(Subject::new("user", "alice")?)
///     .resource(Resource::new("document", "readme")?)
///     .action(Action::new("view")?)
///     .context(Context::new().with("ip", "10.0.0.1"))
///     .build()?;
///
/// assert_eq!(request.subject().id(), "alice");
/// # Ok::<(), authzen_client::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizationRequest {
    subject: Subject,
    resource: Resource,
    action: Action,
    context: Option<Context>,
}

impl AuthorizationRequest {
    /// Creates a request without context.
    ///
    /// The entities are already validated, so this cannot fail.
    pub fn new(subject: Subject, resource: Resource, action: Action) -> Self {
        Self { subject, resource, action, context: None }
    }

    /// Starts building a request.
    pub fn builder() -> AuthorizationRequestBuilder {
        AuthorizationRequestBuilder::default()
    }

    /// Returns a copy of this request carrying the given context.
    #[must_use]
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Returns the subject.
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Returns the resource.
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Returns the action.
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Returns the request context, if any.
    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    /// Applies a context provider's attributes to this request.
    ///
    /// - A `None` or empty `provider_context` returns `self` borrowed, with no
    ///   copy made.
    /// - A request without context (or with an empty one) takes
    ///   `provider_context` as its context.
    /// - Otherwise the request context is merged with the provider's, and
    ///   **provider attributes override request attributes** with the same
    ///   key.
    ///
    /// Subject, resource and action are carried over unchanged. `self` is
    /// never modified.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use std::borrow::Cow;
    ///
    /// use authzen_client::{Action, AuthorizationRequest, Context, Resource, Subject};
    ///
    /// let request = AuthorizationRequest::new(
    ///     Subject::new("user", "alice")?,
    ///     Resource::new("document", "readme")?,
    ///     Action::new("view")?,
    /// )
    /// .with_context(Context::new().with("ip", "1.2.3.4"));
    ///
    /// let provider = Context::new().with("ip", "9.9.9.9").with("ts", "T1");
    /// let merged = request.with_provider_context(Some(&provider));
    /// assert_eq!(merged.context(), Some(&provider));
    ///
    /// assert!(matches!(request.with_provider_context(None), Cow::Borrowed(_)));
    /// # Ok::<(), authzen_client::Error>(())
    /// ```
    pub fn with_provider_context(
        &self,
        provider_context: Option<&Context>,
    ) -> Cow<'_, AuthorizationRequest> {
        let provider_context = match provider_context {
            Some(context) if !context.is_empty() => context,
            _ => return Cow::Borrowed(self),
        };

        let context = match &self.context {
            Some(existing) if !existing.is_empty() => existing.merge(Some(provider_context)),
            _ => provider_context.clone(),
        };

        Cow::Owned(AuthorizationRequest {
            subject: self.subject.clone(),
            resource: self.resource.clone(),
            action: self.action.clone(),
            context: Some(context),
        })
    }
}

/// Builder for [`AuthorizationRequest`].
///
/// Every field is optional on the builder so that a missing part surfaces as
/// a validation error from [`build`](Self::build) instead of a panic.
#[derive(Debug, Default)]
pub struct AuthorizationRequestBuilder {
    subject: Option<Subject>,
    resource: Option<Resource>,
    action: Option<Action>,
    context: Option<Context>,
}

impl AuthorizationRequestBuilder {
    /// Sets the subject.
    #[must_use]
    pub fn subject(mut self, subject: Subject) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Sets the resource.
    #[must_use]
    pub fn resource(mut self, resource: Resource) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Sets the action.
    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Sets the context.
    #[must_use]
    pub fn context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Validates that subject, resource and action are present and builds the
    /// request.
    ///
    /// # Errors
    ///
    /// Returns a [`Validation`](crate::ErrorKind::Validation) error naming the
    /// first missing part.
    pub fn build(self) -> Result<AuthorizationRequest, Error> {
        let subject = self.subject.ok_or_else(|| Error::validation("subject must be provided"))?;
        let resource =
            self.resource.ok_or_else(|| Error::validation("resource must be provided"))?;
        let action = self.action.ok_or_else(|| Error::validation("action must be provided"))?;

        Ok(AuthorizationRequest { subject, resource, action, context: self.context })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn request() -> AuthorizationRequest {
        AuthorizationRequest::new(
            Subject::new("user", "alice").unwrap(),
            Resource::new("document", "readme").unwrap(),
            Action::new("view").unwrap(),
        )
    }

    #[test]
    fn test_builder_requires_all_parts() {
        let err = AuthorizationRequest::builder()
            .resource(Resource::new("document", "readme").unwrap())
            .action(Action::new("view").unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "subject must be provided");

        let err = AuthorizationRequest::builder()
            .subject(Subject::new("user", "alice").unwrap())
            .action(Action::new("view").unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err.message(), "resource must be provided");

        let err = AuthorizationRequest::builder()
            .subject(Subject::new("user", "alice").unwrap())
            .resource(Resource::new("document", "readme").unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err.message(), "action must be provided");
    }

    #[test]
    fn test_provider_context_none_is_identity() {
        let request = request();
        let result = request.with_provider_context(None);
        assert!(matches!(result, Cow::Borrowed(r) if std::ptr::eq(r, &request)));
    }

    #[test]
    fn test_provider_context_empty_is_identity() {
        let request = request().with_context(Context::new().with("ip", "1.2.3.4"));
        let empty = Context::new();
        let result = request.with_provider_context(Some(&empty));
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_provider_context_on_request_without_context() {
        let request = request();
        let provider = Context::new().with("ts", "T1");

        let result = request.with_provider_context(Some(&provider));

        assert_eq!(result.context(), Some(&provider));
        assert!(Context::ptr_eq(result.context().unwrap(), &provider));
        assert!(request.context().is_none());
    }

    #[test]
    fn test_provider_wins_on_collision() {
        let request = request().with_context(Context::new().with("ip", "1.2.3.4"));
        let provider = Context::new().with("ip", "9.9.9.9").with("ts", "T1");

        let result = request.with_provider_context(Some(&provider));

        let expected = Context::new().with("ip", "9.9.9.9").with("ts", "T1");
        assert_eq!(result.context(), Some(&expected));
        assert_eq!(result.subject(), request.subject());
        assert_eq!(result.resource(), request.resource());
        assert_eq!(result.action(), request.action());

        // Original request keeps its own context
        let original = request.context().unwrap();
        assert_eq!(original.get("ip").and_then(|v| v.as_str()), Some("1.2.3.4"));
        assert!(!original.contains_key("ts"));
    }

    #[test]
    fn test_request_attributes_survive_when_provider_has_other_keys() {
        let request = request().with_context(Context::new().with("ip", "1.2.3.4"));
        let provider = Context::new().with("ts", "T1");

        let result = request.with_provider_context(Some(&provider));

        let context = result.context().unwrap();
        assert_eq!(context.get("ip").and_then(|v| v.as_str()), Some("1.2.3.4"));
        assert_eq!(context.get("ts").and_then(|v| v.as_str()), Some("T1"));
    }
}
