//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy importing:
//!
//! ```rust
//! use authzen_client::prelude::*;
//! ```
//!
//! This provides access to:
//! - The client and its builder
//! - Error types
//! - Request, response and context types
//! - Context providers

pub use crate::{
    auth::ApiKey,
    client::{AuthzClient, ClientBuilder},
    config::{ClientConfig, HttpOptions, RetryConfig},
    error::{Error, ErrorKind},
    provider::{ContextProvider, StaticContextProvider, TimestampContextProvider},
    testing::{AuthorizationClient, MockClient},
    types::{
        Action, AuthorizationRequest, AuthorizationResponse, Context, ContextValue, Resource,
        Subject,
    },
};
