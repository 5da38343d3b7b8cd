//! Analysis functionality
//!
//! Combines the readers' outputs into reports:
//! - Parameter classification (in use vs. orphan, grouped by category)
//! - Package analysis across all artifacts of a content package (feature `package`)

#[cfg(feature = "package")]
pub mod package;
pub mod parameters;

#[cfg(feature = "package")]
pub use package::PackageAnalyzer;
pub use parameters::{ParameterAnalyzer, analyze_flow_parameters, classify};
