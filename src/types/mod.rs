//! Core types for access evaluation.
//!
//! - [`Subject`], [`Resource`], [`Action`]: validated decision entities
//! - [`Context`]: immutable contextual attributes with merge semantics
//! - [`AuthorizationRequest`]: what is sent to the PDP
//! - [`AuthorizationResponse`]: the decision that comes back

mod context;
mod decision;
mod entity;
mod request;

pub use context::{Attributes, Context, ContextValue};
pub use decision::AuthorizationResponse;
pub use entity::{Action, ActionBuilder, Resource, ResourceBuilder, Subject, SubjectBuilder};
pub use request::{AuthorizationRequest, AuthorizationRequestBuilder};
