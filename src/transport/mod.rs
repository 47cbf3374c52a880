//! Transport layer for PDP communication.
//!
//! This module provides the [`Transport`] seam the client sends encoded
//! requests through, and its implementations:
//!
//! - [`HttpTransport`] (feature `rest`, default): retrying reqwest transport
//! - [`MockTransport`](crate::testing::MockTransport): scripted, for tests
//!
//! ## Feature Flags
//!
//! - `rest` (default): Enable the HTTP transport

pub(crate) mod mock;
mod traits;

#[cfg(feature = "rest")]
mod rest;

pub use traits::Transport;

#[cfg(feature = "rest")]
pub use rest::{HttpTransport, HttpTransportBuilder};
