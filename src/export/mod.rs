//! Export functionality
//!
//! Provides exporters for analysis reports:
//! - JSON (camelCase, the same shape the models serialize to)
//! - Markdown (human readable tables per artifact)

pub mod json;
pub mod markdown;

/// Result of an export operation.
///
/// Contains the exported content and format identifier.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[must_use = "export results contain the exported content and should be used"]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
}

/// Error during export
#[derive(Debug, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("IO error: {0}")]
    IoError(String),
}

impl ExportResult {
    /// Write the content to a file
    pub fn write_to(&self, path: &std::path::Path) -> Result<(), ExportError> {
        std::fs::write(path, &self.content).map_err(|e| {
            ExportError::IoError(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}

pub use json::JsonExporter;
pub use markdown::MarkdownExporter;
