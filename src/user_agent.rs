//! User-Agent header sent with every evaluation call.

use std::sync::OnceLock;

/// Client name used in the User-Agent string.
const CLIENT_NAME: &str = "authzen-client-rust";

/// Crate version from Cargo.toml.
const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

static USER_AGENT: OnceLock<String> = OnceLock::new();

/// Returns the User-Agent string, computed once.
///
/// Format: `authzen-client-rust/0.1.0 (rust/1.92; linux/x86_64)`
pub(crate) fn user_agent() -> &'static str {
    USER_AGENT.get_or_init(|| {
        format!(
            "{}/{} (rust/{}; {}/{})",
            CLIENT_NAME,
            CLIENT_VERSION,
            env!("CARGO_PKG_RUST_VERSION"),
            os_name(),
            std::env::consts::ARCH,
        )
    })
}

/// Returns a normalized OS name.
fn os_name() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}
