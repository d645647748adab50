use anyhow::Result;
use serde::Deserialize;
use std::env;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub max_body_bytes: usize,
}

#[derive(Clone, Deserialize)]
pub struct LLMConfig {
    pub provider: String,
    pub google_api_key: String,
    pub model: String,
    pub api_base: String,
}

// Keeps the key out of the startup log line.
impl std::fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMConfig")
            .field("provider", &self.provider)
            .field("google_api_key", &if self.google_api_key.is_empty() { "<unset>" } else { "<set>" })
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                max_body_bytes: match env::var("MAX_BODY_BYTES") {
                    Ok(value) => value.parse()?,
                    Err(_) => DEFAULT_MAX_BODY_BYTES,
                },
            },
            llm: LLMConfig {
                provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "google".to_string()),
                google_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
                model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
                api_base: env::var("GEMINI_API_BASE")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string()),
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: 5000,
                host: "0.0.0.0".to_string(),
                max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            },
            llm: LLMConfig {
                provider: "google".to_string(),
                google_api_key: String::new(),
                model: DEFAULT_GEMINI_MODEL.to_string(),
                api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.llm.model, "gemini-1.5-flash");
        assert_eq!(config.server.max_body_bytes, 25 * 1024 * 1024);
    }

    #[test]
    fn test_debug_masks_api_key() {
        let mut config = Config::default();
        config.llm.google_api_key = "secret-key".to_string();
        let rendered = format!("{:?}", config.llm);
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<set>"));
    }
}
