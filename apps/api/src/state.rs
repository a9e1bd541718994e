use std::sync::Arc;

use crate::interview::guard::InFlight;
use crate::llm_client::TextGenerator;
use crate::store::InterviewStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Interview persistence. Default: PgInterviewStore.
    pub store: Arc<dyn InterviewStore>,
    /// The long-lived chat session opened at startup.
    pub generator: Arc<dyn TextGenerator>,
    /// Forms with a generation cycle currently running.
    pub in_flight: InFlight,
}
