// Invoice Extract - document to structured invoice data via Gemini

pub mod config;
pub mod types;
pub mod models;
pub mod llm;
pub mod extraction;
pub mod routes;
pub mod middleware;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

use std::sync::Arc;

use extraction::{DocumentExtractor, MimeRegistry};
use llm::LLM;
use types::AppResult;

/// Wire the configured LLM adapter and the MIME registry into shared state
pub fn build_state(config: Config) -> AppResult<AppState> {
    let llm = LLM::from_config(&config.llm)?;
    let extractor = DocumentExtractor::new(llm, MimeRegistry::default(), config.llm.model.clone());

    Ok(AppState {
        config,
        extractor: Arc::new(extractor),
    })
}

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
