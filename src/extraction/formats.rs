//! Supported MIME types and how each one is prepared for the model.
//!
//! Adding a format means adding one row to [`SUPPORTED_FORMATS`].

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_CSV: &str = "text/csv";
pub const MIME_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// How a decoded payload is turned into model input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preprocess {
    /// Bytes go to the model untouched
    Passthrough,
    /// Bytes must be UTF-8 CSV text; sent unchanged
    CsvText,
    /// First worksheet re-encoded as CSV text
    SpreadsheetToCsv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub mime_type: &'static str,
    pub label: &'static str,
    pub strategy: Preprocess,
    /// MIME tag attached to the content sent to the model
    pub model_mime_type: &'static str,
}

pub const SUPPORTED_FORMATS: &[FormatSpec] = &[
    FormatSpec {
        mime_type: MIME_PDF,
        label: "PDF",
        strategy: Preprocess::Passthrough,
        model_mime_type: MIME_PDF,
    },
    FormatSpec {
        mime_type: MIME_JPEG,
        label: "JPG",
        strategy: Preprocess::Passthrough,
        model_mime_type: MIME_JPEG,
    },
    FormatSpec {
        mime_type: MIME_CSV,
        label: "CSV",
        strategy: Preprocess::CsvText,
        model_mime_type: MIME_CSV,
    },
    FormatSpec {
        mime_type: MIME_XLSX,
        label: "XLSX",
        strategy: Preprocess::SpreadsheetToCsv,
        model_mime_type: MIME_CSV,
    },
];

/// Immutable MIME allow-list, built once at startup
#[derive(Debug, Clone)]
pub struct MimeRegistry {
    formats: Vec<FormatSpec>,
}

impl MimeRegistry {
    pub fn new(formats: Vec<FormatSpec>) -> Self {
        Self { formats }
    }

    pub fn lookup(&self, mime_type: &str) -> Option<&FormatSpec> {
        self.formats.iter().find(|f| f.mime_type == mime_type)
    }

    pub fn is_supported(&self, mime_type: &str) -> bool {
        self.lookup(mime_type).is_some()
    }

    pub fn label(&self, mime_type: &str) -> Option<&'static str> {
        self.lookup(mime_type).map(|f| f.label)
    }

    pub fn formats(&self) -> &[FormatSpec] {
        &self.formats
    }
}

impl Default for MimeRegistry {
    fn default() -> Self {
        Self::new(SUPPORTED_FORMATS.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_four_formats() {
        let registry = MimeRegistry::default();
        assert_eq!(registry.formats().len(), 4);
        assert_eq!(registry.label(MIME_PDF), Some("PDF"));
        assert_eq!(registry.label(MIME_JPEG), Some("JPG"));
        assert_eq!(registry.label(MIME_CSV), Some("CSV"));
        assert_eq!(registry.label(MIME_XLSX), Some("XLSX"));
    }

    #[test]
    fn test_unknown_types_are_rejected() {
        let registry = MimeRegistry::default();
        assert!(!registry.is_supported("image/png"));
        assert!(!registry.is_supported("application/vnd.ms-excel"));
        assert!(!registry.is_supported("TEXT/CSV"));
        assert!(!registry.is_supported(""));
    }

    #[test]
    fn test_spreadsheets_are_sent_as_csv() {
        let registry = MimeRegistry::default();
        let xlsx = registry.lookup(MIME_XLSX).unwrap();
        assert_eq!(xlsx.strategy, Preprocess::SpreadsheetToCsv);
        assert_eq!(xlsx.model_mime_type, MIME_CSV);
    }
}
