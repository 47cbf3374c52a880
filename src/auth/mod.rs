//! Authentication against the PDP.
//!
//! The PDP is authenticated with a static API key sent in a request header:
//!
//! - [`ApiKey`]: the secret, zeroed on drop and redacted in `Debug`
//! - [`ApiKeyAuth`]: a key bound to its header name and value format
//!
//! ```rust
//! use authzen_client::ClientConfig;
//!
//! let config = ClientConfig::builder()
//!     .endpoint("https://pdp.example.com/access/v1/evaluation")
//!     .api_key("my-secret-key")
//!     .api_key_header("X-Api-Key")
//!     .build()?;
//!
//! let auth = config.auth().expect("key configured");
//! assert_eq!(auth.header_value().as_str(), "my-secret-key");
//! # Ok::<(), authzen_client::Error>(())
//! ```

mod api_key;

pub use api_key::{ApiKey, ApiKeyAuth, DEFAULT_API_KEY_HEADER};
