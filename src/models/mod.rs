//! Models module
//!
//! Plain data produced and consumed by the readers, the classifier and the
//! guideline engine.

pub mod guideline;
pub mod package;
pub mod parameter;
pub mod process;
pub mod schedule;

pub use guideline::{
    ComplianceStatus, GuidelineCheckResult, GuidelineReport, GuidelineSummary, GuidelineVerdict,
    RuleOutcome,
};
pub use package::{ArtifactAnalysis, PackageAnalysis, PackageResource, ResourceIndex};
pub use parameter::{
    ClassifiedParameter, DEFAULT_PARAMETER_TYPE, GLOBAL_CATEGORY, GroupedReport,
    ParameterAnalysis, ParameterDefinition, ParameterGroup, ParameterReference,
    SCHEDULE_PARAMETER_TYPE,
};
pub use process::{BpmnNode, BpmnProcessGraph, GraphNode, ProcessGraph};
pub use schedule::{ScheduleKind, ScheduleRecord, ScheduleSummary};
