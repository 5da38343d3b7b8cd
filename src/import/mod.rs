//! Import functionality
//!
//! Readers turning the raw text of an integration artifact into models:
//! - Parameter schema documents (`.propdef`)
//! - Property stores (`.prop`)
//! - Timer configurations embedded in `custom:schedule` values
//! - Placeholder usage in process definitions (`.iflw`)
//! - BPMN process graphs for guideline checks
//! - Content package archives (feature `package`)

pub mod bpmn;
#[cfg(feature = "package")]
pub mod package;
pub mod propdef;
pub mod properties;
pub mod schedule;
pub mod usage;
pub mod xml;

pub use bpmn::BpmnImporter;
#[cfg(feature = "package")]
pub use package::{ArtifactFiles, PackageArchive};
pub use propdef::ParameterSchemaReader;

/// Error during import
#[derive(Debug, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum ImportError {
    #[error("XML parse error: {0}")]
    XmlParseError(String),
    #[error("Missing input: {0}")]
    MissingInput(String),
    #[error("BPMN parse error: {0}")]
    BPMNParseError(String),
    #[error("Archive error: {0}")]
    ArchiveError(String),
    #[error("Decode error: {0}")]
    DecodeError(String),
}
