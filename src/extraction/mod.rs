//! Document extraction
//!
//! One request flows through these steps:
//! 1. Validate the request fields and the MIME allow-list
//! 2. Decode the base64 payload
//! 3. Prepare it for the model ([`preprocess`]): raw bytes for PDF/JPEG,
//!    CSV text for CSV and XLSX
//! 4. Send it with [`prompt::EXTRACTION_PROMPT`] to the model
//! 5. Strip markdown fences from the answer and parse it as JSON

pub mod error;
pub mod formats;
pub mod preprocess;
pub mod prompt;
pub mod response;

pub use error::ExtractError;
pub use formats::{FormatSpec, MimeRegistry, Preprocess};
pub use preprocess::PreparedDocument;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::llm::LLM;
use crate::types::{LLMMessage, LLMRequest};

/// Body of `POST /api/v1/data`. Fields stay untyped until validation so that
/// falsy values of any JSON type (`0`, `false`, `[]`) count as missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    pub file_name: Option<Value>,
    pub file_data: Option<Value>,
    pub mime_type: Option<Value>,
}

pub struct DocumentExtractor {
    llm: LLM,
    registry: MimeRegistry,
    model: String,
}

impl DocumentExtractor {
    pub fn new(llm: LLM, registry: MimeRegistry, model: impl Into<String>) -> Self {
        Self {
            llm,
            registry,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn registry(&self) -> &MimeRegistry {
        &self.registry
    }

    pub async fn extract(&self, request: &ExtractRequest) -> Result<Value, ExtractError> {
        let (file_name, file_data, mime_type) = match (
            present(&request.file_name),
            present(&request.file_data),
            present(&request.mime_type),
        ) {
            (Some(name), Some(data), Some(mime)) => (name, data, mime),
            _ => return Err(ExtractError::InvalidInput),
        };

        let mime_type = match mime_type.as_str() {
            Some(mime) if self.registry.is_supported(mime) => mime,
            Some(mime) => return Err(ExtractError::UnsupportedType(mime.to_string())),
            None => return Err(ExtractError::UnsupportedType(mime_type.to_string())),
        };

        let file_data = file_data.as_str().ok_or_else(|| {
            ExtractError::MalformedRequest("fileData must be a base64 string".to_string())
        })?;

        let file_name = match file_name {
            Value::String(name) => name.clone(),
            other => other.to_string(),
        };

        info!(
            %file_name,
            mime_type,
            payload_len = file_data.len(),
            "Received file"
        );

        let bytes = preprocess::decode_payload(file_data)?;
        let document = self.prepare(mime_type, bytes)?;
        let answer = self.ask_model(document).await?;

        let value = response::parse_model_output(&answer)?;
        let missing = response::missing_sections(&value);
        if !missing.is_empty() {
            warn!(%file_name, ?missing, "Model output lacks expected sections");
        }

        Ok(value)
    }

    pub fn prepare(&self, mime_type: &str, bytes: Vec<u8>) -> Result<PreparedDocument, ExtractError> {
        let spec = self
            .registry
            .lookup(mime_type)
            .ok_or_else(|| ExtractError::UnsupportedFormat(mime_type.to_string()))?;
        preprocess::prepare(spec, bytes)
    }

    async fn ask_model(&self, document: PreparedDocument) -> Result<String, ExtractError> {
        let request = LLMRequest {
            model: self.model.clone(),
            messages: vec![LLMMessage::user_with_document(
                document.mime_type,
                document.data,
                prompt::EXTRACTION_PROMPT,
            )],
        };

        let response = self.llm.create_chat_completion(&request).await?;
        info!(
            provider = self.llm.provider_name(),
            finish_reason = %response.finish_reason,
            total_tokens = response.usage.total_tokens,
            "Model answered"
        );

        Ok(response.content)
    }
}

fn present(field: &Option<Value>) -> Option<&Value> {
    field.as_ref().filter(|value| is_truthy(value))
}

/// `null`, `false`, zero and empty strings, arrays or objects are falsy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
