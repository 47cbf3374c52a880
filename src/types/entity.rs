//! Decision entities: the subject, resource and action of an evaluation.
//!
//! Entities are validated once, at construction, and are immutable
//! afterwards. Their properties sit behind an [`Arc`] so cloning a request
//! never copies attribute maps.
//!
//! ## Quick Start
//!
//! ```rust
//! use authzen_client::{Action, Resource, Subject};
//!
//! let subject = Subject::builder()
//!     .id("alice")
//!     .entity_type("user")
//!     .property("department", "engineering")
//!     .build()?;
//!
//! let resource = Resource::new("document", "readme")?;
//! let action = Action::new("view")?;
//!
//! assert_eq!(subject.id(), "alice");
//! assert_eq!(resource.entity_type(), "document");
//! assert_eq!(action.name(), "view");
//! # Ok::<(), authzen_client::Error>(())
//! ```
//!
//! Properties are read-only once the entity exists:
//!
//! ```rust,compile_fail
//! use authzen_client::Subject;
//!
//! let subject = Subject::new("user", "alice").unwrap();
//! subject.properties().insert("role".into(), "admin".into());
//! ```

use std::fmt;
use std::sync::Arc;

use super::{Attributes, ContextValue};
use crate::Error;

/// Returns the trimmed-non-empty value or a validation error with `message`.
fn require_non_blank(value: Option<String>, message: &'static str) -> Result<String, Error> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::validation(message)),
    }
}

/// The principal requesting access (a user, a service account, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    entity_type: String,
    id: String,
    properties: Arc<Attributes>,
}

impl Subject {
    /// Creates a subject without properties.
    ///
    /// # Errors
    ///
    /// Returns a [`Validation`](crate::ErrorKind::Validation) error if either
    /// field is blank.
    pub fn new(entity_type: impl Into<String>, id: impl Into<String>) -> Result<Self, Error> {
        Self::builder().entity_type(entity_type).id(id).build()
    }

    /// Starts building a subject.
    pub fn builder() -> SubjectBuilder {
        SubjectBuilder::default()
    }

    /// Returns the subject type (e.g. "user").
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Returns the subject identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the subject's properties.
    pub fn properties(&self) -> &Attributes {
        &self.properties
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.entity_type, self.id)
    }
}

/// Builder for [`Subject`].
#[derive(Debug, Default)]
pub struct SubjectBuilder {
    entity_type: Option<String>,
    id: Option<String>,
    properties: Attributes,
}

impl SubjectBuilder {
    /// Sets the subject type.
    #[must_use]
    pub fn entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    /// Sets the subject identifier.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a single property.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Adds every property from the given map.
    #[must_use]
    pub fn properties(mut self, properties: Attributes) -> Self {
        self.properties.extend(properties);
        self
    }

    /// Validates the fields and builds the subject.
    ///
    /// # Errors
    ///
    /// Returns a [`Validation`](crate::ErrorKind::Validation) error naming the
    /// first missing or blank field.
    pub fn build(self) -> Result<Subject, Error> {
        let id = require_non_blank(self.id, "subject 'id' must not be blank")?;
        let entity_type = require_non_blank(self.entity_type, "subject 'type' must not be blank")?;
        Ok(Subject { entity_type, id, properties: Arc::new(self.properties) })
    }
}

/// The object being accessed (a document, a folder, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    entity_type: String,
    id: String,
    properties: Arc<Attributes>,
}

impl Resource {
    /// Creates a resource without properties.
    ///
    /// # Errors
    ///
    /// Returns a [`Validation`](crate::ErrorKind::Validation) error if either
    /// field is blank.
    pub fn new(entity_type: impl Into<String>, id: impl Into<String>) -> Result<Self, Error> {
        Self::builder().entity_type(entity_type).id(id).build()
    }

    /// Starts building a resource.
    pub fn builder() -> ResourceBuilder {
        ResourceBuilder::default()
    }

    /// Returns the resource type (e.g. "document").
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Returns the resource identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the resource's properties.
    pub fn properties(&self) -> &Attributes {
        &self.properties
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.entity_type, self.id)
    }
}

/// Builder for [`Resource`].
#[derive(Debug, Default)]
pub struct ResourceBuilder {
    entity_type: Option<String>,
    id: Option<String>,
    properties: Attributes,
}

impl ResourceBuilder {
    /// Sets the resource type.
    #[must_use]
    pub fn entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    /// Sets the resource identifier.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a single property.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Adds every property from the given map.
    #[must_use]
    pub fn properties(mut self, properties: Attributes) -> Self {
        self.properties.extend(properties);
        self
    }

    /// Validates the fields and builds the resource.
    ///
    /// # Errors
    ///
    /// Returns a [`Validation`](crate::ErrorKind::Validation) error naming the
    /// first missing or blank field.
    pub fn build(self) -> Result<Resource, Error> {
        let id = require_non_blank(self.id, "resource 'id' must not be blank")?;
        let entity_type = require_non_blank(self.entity_type, "resource 'type' must not be blank")?;
        Ok(Resource { entity_type, id, properties: Arc::new(self.properties) })
    }
}

/// The operation being attempted on a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    name: String,
    properties: Arc<Attributes>,
}

impl Action {
    /// Creates an action without properties.
    ///
    /// # Errors
    ///
    /// Returns a [`Validation`](crate::ErrorKind::Validation) error if the name
    /// is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, Error> {
        Self::builder().name(name).build()
    }

    /// Starts building an action.
    pub fn builder() -> ActionBuilder {
        ActionBuilder::default()
    }

    /// Returns the action name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the action's properties.
    pub fn properties(&self) -> &Attributes {
        &self.properties
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Builder for [`Action`].
#[derive(Debug, Default)]
pub struct ActionBuilder {
    name: Option<String>,
    properties: Attributes,
}

impl ActionBuilder {
    /// Sets the action name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a single property.
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Adds every property from the given map.
    #[must_use]
    pub fn properties(mut self, properties: Attributes) -> Self {
        self.properties.extend(properties);
        self
    }

    /// Validates the name and builds the action.
    ///
    /// # Errors
    ///
    /// Returns a [`Validation`](crate::ErrorKind::Validation) error if the name
    /// is missing or blank.
    pub fn build(self) -> Result<Action, Error> {
        let name = require_non_blank(self.name, "action 'name' must not be blank")?;
        Ok(Action { name, properties: Arc::new(self.properties) })
    }
}
