//! JSON wire format for access evaluation.
//!
//! Request document:
//!
//! ```text
//! {
//!   "subject":  { "type": "...", "id": "...", "properties": { ... } },
//!   "resource": { "type": "...", "id": "...", "properties": { ... } },
//!   "action":   { "name": "...", "properties": { ... } },
//!   "context":  { ... }
//! }
//! ```
//!
//! `properties` and `context` are only written when non-empty. They are
//! omitted, never `null`.
//!
//! Response document:
//!
//! ```text
//! { "decision": true, "context": { ... } }
//! ```

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::types::{
    Action, Attributes, AuthorizationRequest, AuthorizationResponse, Context, Resource, Subject,
};

// ============================================================================
// Request Encoding
// ============================================================================

#[derive(Debug, Serialize)]
struct EvaluationRequest<'a> {
    subject: EntityDto<'a>,
    resource: EntityDto<'a>,
    action: ActionDto<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a Attributes>,
}

#[derive(Debug, Serialize)]
struct EntityDto<'a> {
    #[serde(rename = "type")]
    entity_type: &'a str,
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<&'a Attributes>,
}

#[derive(Debug, Serialize)]
struct ActionDto<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<&'a Attributes>,
}

fn non_empty(attributes: &Attributes) -> Option<&Attributes> {
    (!attributes.is_empty()).then_some(attributes)
}

impl<'a> From<&'a Subject> for EntityDto<'a> {
    fn from(subject: &'a Subject) -> Self {
        Self {
            entity_type: subject.entity_type(),
            id: subject.id(),
            properties: non_empty(subject.properties()),
        }
    }
}

impl<'a> From<&'a Resource> for EntityDto<'a> {
    fn from(resource: &'a Resource) -> Self {
        Self {
            entity_type: resource.entity_type(),
            id: resource.id(),
            properties: non_empty(resource.properties()),
        }
    }
}

impl<'a> From<&'a Action> for ActionDto<'a> {
    fn from(action: &'a Action) -> Self {
        Self { name: action.name(), properties: non_empty(action.properties()) }
    }
}

/// Serializes a request to its JSON wire document.
///
/// # Errors
///
/// Returns a [`Decode`](crate::ErrorKind::Decode) error if the serializer
/// fails.
pub fn encode_request(request: &AuthorizationRequest) -> Result<String, Error> {
    let document = EvaluationRequest {
        subject: request.subject().into(),
        resource: request.resource().into(),
        action: request.action().into(),
        context: request.context().map(Context::attributes).and_then(non_empty),
    };

    serde_json::to_string(&document)
        .map_err(|e| Error::decode("failed to encode authorization request").with_source(e))
}

// ============================================================================
// Response Decoding
// ============================================================================

#[derive(Debug, Deserialize)]
struct EvaluationResponse {
    decision: bool,
    #[serde(default)]
    context: Option<Attributes>,
}

/// Parses a JSON wire document into a response.
///
/// A missing `context` member yields `None`; an explicit `{}` yields an empty
/// context.
///
/// # Errors
///
/// Returns a [`Decode`](crate::ErrorKind::Decode) error if
/// - the body is empty or whitespace only (`"response body was empty"`)
/// - the body is not valid JSON or lacks a boolean `decision`
///   (`"failed to decode authorization response"`, with the parser error as
///   source)
pub fn decode_response(body: &str) -> Result<AuthorizationResponse, Error> {
    if body.trim().is_empty() {
        return Err(Error::decode("response body was empty"));
    }

    let document: EvaluationResponse = serde_json::from_str(body).map_err(|e| {
        Error::decode("failed to decode authorization response").with_source(e)
    })?;

    Ok(AuthorizationResponse::new(document.decision, document.context.map(Context::from)))
}
