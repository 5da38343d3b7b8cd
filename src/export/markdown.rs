//! Markdown exporter for analysis reports
//!
//! Renders parameter, guideline and package reports as Markdown tables
//! for easy reading on GitHub and other platforms.

use super::{ExportError, ExportResult};
use crate::models::{
    ArtifactAnalysis, ComplianceStatus, GroupedReport, GuidelineReport, GuidelineVerdict,
    PackageAnalysis, ParameterAnalysis, ScheduleSummary,
};

/// Markdown exporter for analysis reports
pub struct MarkdownExporter;

impl MarkdownExporter {
    /// Create a new Markdown exporter instance
    pub fn new() -> Self {
        Self
    }

    /// Export a parameter analysis
    ///
    /// Parameters appear in two sections, in use and orphaned, each with one
    /// table per category.
    pub fn export_parameters(
        &self,
        analysis: &ParameterAnalysis,
    ) -> Result<ExportResult, ExportError> {
        let mut md = String::new();
        self.write_parameters(&mut md, analysis, "##");
        Ok(markdown(md))
    }

    /// Export a guideline report
    pub fn export_guidelines(&self, report: &GuidelineReport) -> Result<ExportResult, ExportError> {
        let mut md = String::new();
        self.write_guidelines(&mut md, report, "##");
        Ok(markdown(md))
    }

    /// Export a full package analysis
    ///
    /// # Arguments
    ///
    /// * `analysis` - The package analysis to export
    ///
    /// # Returns
    ///
    /// A Markdown document with an overview table followed by one section
    /// per artifact
    pub fn export_package(&self, analysis: &PackageAnalysis) -> Result<ExportResult, ExportError> {
        let mut md = String::new();

        md.push_str(&format!("# Package: {}\n\n", escape(&analysis.archive_name)));
        if analysis.synthetic {
            md.push_str("*Single integration flow archive without package index.*\n\n");
        }
        if let Some(metadata) = &analysis.metadata {
            md.push_str(metadata.trim());
            md.push_str("\n\n");
        }

        md.push_str("| Artifact | Type | Version | Compliance |\n");
        md.push_str("|----------|------|---------|------------|\n");
        for artifact in &analysis.artifacts {
            let resource = &artifact.resource;
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                escape(resource.title()),
                escape(resource.type_label()),
                resource.version_label().as_deref().map(escape).unwrap_or_default(),
                artifact
                    .guidelines
                    .as_ref()
                    .map(|g| status_badge(g.status()))
                    .unwrap_or("-"),
            ));
        }
        md.push('\n');

        for (resource_type, artifacts) in group_by_type(&analysis.artifacts) {
            let (icon, title, description) = type_heading(resource_type);
            md.push_str(&format!("## {} {} ({})\n\n", icon, title, artifacts.len()));
            md.push_str(&format!("{}\n\n", description));
            for artifact in artifacts {
                self.write_artifact(&mut md, artifact);
            }
        }

        Ok(markdown(md))
    }

    fn write_artifact(&self, md: &mut String, artifact: &ArtifactAnalysis) {
        let resource = &artifact.resource;
        md.push_str(&format!("### {}\n\n", escape(resource.title())));
        if let Some(description) = &resource.description {
            md.push_str(&format!("{}\n\n", description.trim()));
        }

        md.push_str("| Property | Value |\n");
        md.push_str("|----------|-------|\n");
        md.push_str(&format!("| **Id** | {} |\n", escape(&resource.id)));
        md.push_str(&format!("| **Type** | {} |\n", escape(resource.type_label())));
        if let Some(version) = resource.version_label() {
            md.push_str(&format!("| **Version** | {} |\n", escape(&version)));
        }
        if let Some(modified_by) = &resource.modified_by {
            md.push_str(&format!("| **Modified By** | {} |\n", escape(modified_by)));
        }
        if let Some(modified) = resource.modified_date() {
            md.push_str(&format!(
                "| **Modified At** | {} |\n",
                modified.format("%Y-%m-%d")
            ));
        }
        md.push('\n');

        if let Some(report) = &artifact.guidelines {
            self.write_guidelines(md, report, "####");
        }
        if let Some(parameters) = &artifact.parameters {
            self.write_parameters(md, parameters, "####");
        }
        if !artifact.scripts.is_empty() {
            md.push_str("#### Scripts\n\n");
            for script in &artifact.scripts {
                md.push_str(&format!("- `{}`\n", script));
            }
            md.push('\n');
        }
    }

    fn write_guidelines(&self, md: &mut String, report: &GuidelineReport, heading: &str) {
        md.push_str(&format!(
            "{} Guidelines {}\n\n",
            heading,
            status_badge(report.status())
        ));
        md.push_str(&format!(
            "{} passed, {} warnings, {} failed ({} checks)\n\n",
            report.summary.pass, report.summary.warn, report.summary.fail, report.summary.total
        ));

        md.push_str("| Check | Result | Message |\n");
        md.push_str("|-------|--------|---------|\n");
        for result in &report.results {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                escape(&result.name),
                verdict_badge(result.result),
                escape(&result.message)
            ));
        }
        md.push('\n');
    }

    fn write_parameters(&self, md: &mut String, analysis: &ParameterAnalysis, heading: &str) {
        md.push_str(&format!("{} Parameters in Use\n\n", heading));
        write_groups(md, &analysis.in_use, heading);
        md.push_str(&format!("{} Orphaned Parameters\n\n", heading));
        write_groups(md, &analysis.orphan, heading);
    }
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn markdown(content: String) -> ExportResult {
    ExportResult {
        content,
        format: "markdown".to_string(),
    }
}

fn write_groups(md: &mut String, report: &GroupedReport, heading: &str) {
    if report.is_empty() {
        md.push_str("*None*\n\n");
        return;
    }

    for group in report.groups() {
        md.push_str(&format!("{}# {}\n\n", heading, escape(&group.category)));
        md.push_str("| Name | Label | Type | Value |\n");
        md.push_str("|------|-------|------|-------|\n");
        for param in &group.parameters {
            let value = match &param.schedule {
                Some(schedule) => describe_schedule(schedule),
                None => escape(&param.value),
            };
            md.push_str(&format!(
                "| `{}` | {} | {} | {} |\n",
                param.name,
                escape(&param.label),
                escape(&param.param_type),
                value
            ));
        }
        md.push('\n');
    }
}

/// Artifacts grouped by resource type, in order of first appearance
fn group_by_type(artifacts: &[ArtifactAnalysis]) -> Vec<(&str, Vec<&ArtifactAnalysis>)> {
    let mut groups: Vec<(&str, Vec<&ArtifactAnalysis>)> = Vec::new();
    for artifact in artifacts {
        let resource_type = artifact.resource.type_label();
        match groups.iter_mut().find(|(t, _)| *t == resource_type) {
            Some((_, members)) => members.push(artifact),
            None => groups.push((resource_type, vec![artifact])),
        }
    }
    groups
}

/// Icon, section title and blurb of a resource type section
fn type_heading(resource_type: &str) -> (&'static str, &str, &'static str) {
    match resource_type {
        "IFlow" => (
            "🔄",
            "Integration Flows",
            "Main flows defining how data is processed and sent.",
        ),
        "ScriptCollection" => (
            "📜",
            "Script Collections",
            "Script sets (Groovy, JavaScript) implementing custom logic.",
        ),
        "MessageMapping" => (
            "🗺️",
            "Message Mappings",
            "Definitions converting data from one format to another.",
        ),
        "Other" => (
            "📄",
            "Other Artifacts",
            "Other components and supporting configuration.",
        ),
        other => ("📄", other, "Miscellaneous artifacts."),
    }
}

/// One-line description of a timer configuration
pub fn describe_schedule(schedule: &ScheduleSummary) -> String {
    let mut parts = vec![schedule.kind.to_string()];
    if let Some(frequency) = &schedule.frequency {
        parts.push(format!("every {}", frequency));
    }
    if let Some(fire_at) = &schedule.fire_at {
        parts.push(format!("at {}", fire_at));
    }
    if let Some(cron) = &schedule.cron_expression {
        parts.push(format!("`{}`", cron));
    }
    if let Some(start) = &schedule.start_at {
        parts.push(format!("from {}", start));
    }
    if let Some(end) = &schedule.end_at {
        parts.push(format!("until {}", end));
    }
    if let Some(zone) = &schedule.time_zone {
        parts.push(format!("({})", zone));
    }
    escape(&parts.join(" "))
}

fn status_badge(status: ComplianceStatus) -> &'static str {
    match status {
        ComplianceStatus::Green => "🟢 Green",
        ComplianceStatus::Yellow => "🟡 Yellow",
        ComplianceStatus::Red => "🔴 Red",
    }
}

fn verdict_badge(verdict: GuidelineVerdict) -> &'static str {
    match verdict {
        GuidelineVerdict::Pass => "✅ pass",
        GuidelineVerdict::Warn => "⚠️ warn",
        GuidelineVerdict::Fail => "❌ fail",
    }
}

/// Keep cell content on one line and away from the column separator
fn escape(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}
