//! Integration tests for the AuthZEN client.
//!
//! These tests drive the public API end to end against a local
//! [`wiremock`] PDP, so no external environment is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # Include the blocking client
//! cargo test --features blocking --test integration
//!
//! # Run a specific test
//! cargo test --test integration test_retries_server_errors -- --nocapture
//! ```

mod authorize_tests;
#[cfg(feature = "blocking")]
mod blocking_tests;
mod common;
mod error_tests;
mod retry_tests;
