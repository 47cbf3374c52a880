//! Testing utilities for the AuthZEN client.
//!
//! This module provides tools for testing applications that use the client:
//!
//! - [`AuthorizationClient`]: Object-safe trait for dependency injection
//! - [`MockClient`]: Scripted decisions with expectation verification
//! - [`MockTransport`]: Scripted transport for exercising a real
//!   [`AuthzClient`](crate::AuthzClient) without a network
//!
//! ## Quick Start
//!
//! ```rust
//! use authzen_client::testing::{AuthorizationClient, MockClient};
//! use authzen_client::{Action, AuthorizationRequest, Resource, Subject};
//!
//! # async fn example() -> Result<(), authzen_client::Error> {
//! let mock = MockClient::new().expect("alice", "view", "doc-1", true);
//!
//! let request = AuthorizationRequest::new(
//!     Subject::new("user", "alice")?,
//!     Resource::new("document", "doc-1")?,
//!     Action::new("view")?,
//! );
//! assert!(mock.is_allowed(&request).await?);
//! # Ok(())
//! # }
//! ```
//!
//! ## MockClient vs MockTransport
//!
//! | Feature | MockClient | MockTransport |
//! |---------|------------|---------------|
//! | Replaces | whole client | network only |
//! | Runs context provider and codec | ✗ | ✓ |
//! | Records | requests | encoded bodies |
//! | Best for | application tests | client behaviour tests |

mod authorization_client;
mod mock_client;

pub use authorization_client::{AuthorizationClient, AuthorizeFuture};
pub use mock_client::MockClient;

pub use crate::transport::mock::MockTransport;
