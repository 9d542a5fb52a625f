use taglens_inference::InferenceService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The single-flight inference service all handlers classify through
    pub service: InferenceService,
}

impl AppState {
    pub fn new(service: InferenceService) -> Self {
        Self { service }
    }
}
