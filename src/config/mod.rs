//! Configuration types for the AuthZEN client.
//!
//! This module provides configuration options for:
//! - [`ClientConfig`]: PDP endpoint and API key
//! - [`RetryConfig`]: Retry budget and backoff for transient failures
//! - [`HttpOptions`]: Timeouts and the correlation header

mod client;
mod http;
mod retry;

pub use client::{ClientConfig, ClientConfigBuilder};
pub use http::{DEFAULT_CORRELATION_HEADER, HttpOptions};
pub use retry::RetryConfig;
