//! # AuthZEN Client
//!
//! Rust client for AuthZEN-style access evaluation against a remote Policy
//! Decision Point (PDP).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use authzen_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), authzen_client::Error> {
//!     // Create client
//!     let client = AuthzClient::builder()
//!         .endpoint("https://pdp.example.com/access/v1/evaluation")
//!         .api_key("my-secret-key")
//!         .context_provider(TimestampContextProvider::new())
//!         .build()?;
//!
//!     // Describe the access being attempted
//!     let request = AuthorizationRequest::new(
//!         Subject::builder().entity_type("user").id("alice").property("department", "sales").build()?,
//!         Resource::new("document", "readme")?,
//!         Action::new("view")?,
//!     )
//!     .with_context(Context::new().with("ip", "192.168.1.1"));
//!
//!     // Ask the PDP
//!     let response = client.authorize(&request).await?;
//!     println!("Decision: {}", response);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Immutable entities**: subjects, resources and actions are validated on
//!   construction and never change afterwards
//! - **Context precedence**: provider context overrides request context on key
//!   collisions
//! - **Denial ≠ Error**: `authorize()` returns `Ok` for a deny decision; errors
//!   mean no decision was obtained
//! - **Retries**: server errors and I/O failures are retried with full-jitter
//!   exponential backoff; client errors (4xx) never are
//!
//! ## Features
//!
//! - `rest` (default): Enable the HTTP transport via reqwest
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)
//! - `blocking`: Enable the blocking client

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod auth;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod provider;
pub mod types;

// Transport layer
pub mod transport;

// Testing utilities
pub mod testing;

// Blocking API
#[cfg(feature = "blocking")]
#[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
pub mod blocking;

#[cfg(feature = "rest")]
mod user_agent;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use client::{AuthzClient, ClientBuilder};
pub use error::{BoxError, Error, ErrorKind, Result};
pub use provider::{ContextProvider, StaticContextProvider, TimestampContextProvider};
pub use types::{
    Action, Attributes, AuthorizationRequest, AuthorizationResponse, Context, ContextValue,
    Resource, Subject,
};

// Re-export auth and config types
pub use auth::{ApiKey, ApiKeyAuth};
pub use config::{ClientConfig, HttpOptions, RetryConfig};

// Transport seam
#[cfg(feature = "rest")]
pub use transport::HttpTransport;
pub use transport::Transport;

// Testing support
pub use testing::{AuthorizationClient, MockClient};
