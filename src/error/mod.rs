//! Error types for the AuthZEN client.
//!
//! Every fallible operation in the crate returns [`Error`]. Callers branch on
//! [`Error::kind`] and reach the root cause through
//! [`std::error::Error::source`]:
//!
//! ```text
//! Error (kind = Transport)
//! └── reqwest::Error
//!     └── ... └── std::io::Error
//! ```
//!
//! ## Key Invariant
//!
//! A deny decision is not an error. `authorize()` returns
//! `Ok(AuthorizationResponse { allowed: false, .. })` when the PDP says no;
//! `Err` means the question could not be answered.

mod core;
mod kind;

pub use core::{BoxError, Error};
pub use kind::ErrorKind;

/// A specialized `Result` type for AuthZEN client operations.
pub type Result<T> = std::result::Result<T, Error>;
