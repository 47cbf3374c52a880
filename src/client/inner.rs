//! Internal client state.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::provider::ContextProvider;
use crate::transport::Transport;

/// Read-only state shared by every clone of a client.
pub(crate) struct ClientInner {
    /// Endpoint and credentials.
    pub config: ClientConfig,

    /// Transport the encoded request is sent through.
    pub transport: Arc<dyn Transport>,

    /// Supplies ambient context merged into every request.
    pub context_provider: Option<Arc<dyn ContextProvider>>,
}
