use std::sync::Arc;

use async_trait::async_trait;
use crate::config::LLMConfig;
use crate::types::{AppError, AppResult, LLMProvider, LLMRequest, LLMResponse};

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

#[derive(Clone)]
pub struct LLM {
    adapter: Arc<dyn LLMAdapter>,
    provider_name: String,
}

impl LLM {
    /// Build the adapter named by `config.provider`
    pub fn from_config(config: &LLMConfig) -> AppResult<Self> {
        let provider = LLMProvider::from_name(&config.provider).ok_or_else(|| {
            AppError::Config(format!("Unsupported provider: {}", config.provider))
        })?;

        let adapter: Arc<dyn LLMAdapter> = match provider {
            LLMProvider::Google => Arc::new(crate::llm::google::GoogleAdapter::new(
                &config.google_api_key,
                &config.api_base,
            )),
        };

        Ok(Self {
            adapter,
            provider_name: provider.to_string(),
        })
    }

    pub fn with_adapter(provider_name: impl Into<String>, adapter: Arc<dyn LLMAdapter>) -> Self {
        Self {
            adapter,
            provider_name: provider_name.into(),
        }
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        self.adapter.create_chat_completion(request).await
    }
}
