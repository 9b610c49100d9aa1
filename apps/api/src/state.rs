use std::sync::Arc;

use crate::config::Config;
use crate::store::DocumentStore;
use crate::tailoring::SectionTailor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    /// Pluggable tailoring backend; the default is the Anthropic-backed
    /// `LlmSectionTailor` built from the startup registry.
    pub tailor: Arc<dyn SectionTailor>,
    pub config: Config,
}
