use std::sync::Arc;

use blogforge_mailer::MailTransport;
use blogforge_metadata::provider::MediaProvider;

/// Shared application state passed to all handlers.
///
/// Capabilities are optional: when a credential is missing at startup the
/// matching slot stays `None` and the corresponding endpoint reports a
/// configuration error per request instead of taking the process down.
#[derive(Clone)]
pub struct AppState {
    pub provider: Option<Arc<dyn MediaProvider>>,
    pub transport: Option<Arc<dyn MailTransport>>,
    /// Shared secret for the dispatch endpoint. `None` disables the check.
    pub admin_token: Option<String>,
}
