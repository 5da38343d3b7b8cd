//! CPI Package Inspector - analysis of exported integration content packages
//!
//! Provides unified interfaces for:
//! - Parameter analysis: externalized parameters classified as in use or
//!   orphaned, grouped by category, with timer schedules decoded
//! - Guideline checks: naming convention, error handling, complexity and
//!   hardcoded URLs over a parsed process graph
//! - Content package loading (feature `package`)
//! - JSON and Markdown report export
//!
//! # Example
//!
//! ```
//! use cpi_package_inspector::{analyze_flow_parameters, check_guidelines};
//!
//! let schema = "<parameters><parameter><name>host</name></parameter></parameters>";
//! let analysis = analyze_flow_parameters(Some(schema), Some("host=example.org"), Some("{{host}}"))
//!     .expect("schema is well-formed");
//! assert!(analysis.in_use.contains("host"));
//!
//! let report = check_guidelines(r#"<definitions><process name="Order Sync"/></definitions>"#)
//!     .expect("process definition is well-formed");
//! assert_eq!(report.summary.total, 4);
//! ```

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod export;
pub mod import;
pub mod models;
pub mod validation;

// Re-export commonly used types
#[cfg(feature = "package")]
pub use analysis::PackageAnalyzer;
pub use analysis::{ParameterAnalyzer, analyze_flow_parameters, classify};
pub use config::{ConfigError, InspectorConfig};
pub use export::{ExportError, ExportResult, JsonExporter, MarkdownExporter};
#[cfg(feature = "package")]
pub use import::{ArtifactFiles, PackageArchive};
pub use import::{BpmnImporter, ImportError, ParameterSchemaReader};
pub use validation::{GuidelineChecker, check_guidelines, evaluate};

// Re-export models
pub use models::{
    ArtifactAnalysis, BpmnNode, BpmnProcessGraph, ClassifiedParameter, ComplianceStatus,
    GraphNode, GroupedReport, GuidelineCheckResult, GuidelineReport, GuidelineSummary,
    GuidelineVerdict, PackageAnalysis, PackageResource, ParameterAnalysis, ParameterDefinition,
    ProcessGraph, ScheduleKind, ScheduleRecord, ScheduleSummary,
};
