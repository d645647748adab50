use std::sync::Arc;

use crate::config::Config;
use crate::extraction::DocumentExtractor;

/// Shared, immutable per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub extractor: Arc<DocumentExtractor>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub model: String,
    pub supported_formats: Vec<String>,
}
