//! JSON exporter for analysis reports

use serde::Serialize;

use super::{ExportError, ExportResult};
use crate::models::{GuidelineReport, PackageAnalysis, ParameterAnalysis};

/// Pretty-printed JSON exporter
#[derive(Debug, Default)]
pub struct JsonExporter;

impl JsonExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn export_parameters(
        &self,
        analysis: &ParameterAnalysis,
    ) -> Result<ExportResult, ExportError> {
        to_json(analysis)
    }

    pub fn export_guidelines(&self, report: &GuidelineReport) -> Result<ExportResult, ExportError> {
        to_json(report)
    }

    pub fn export_package(&self, analysis: &PackageAnalysis) -> Result<ExportResult, ExportError> {
        to_json(analysis)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<ExportResult, ExportError> {
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| ExportError::SerializationError(e.to_string()))?;
    Ok(ExportResult {
        content,
        format: "json".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ClassifiedParameter, GuidelineCheckResult, GuidelineVerdict, ScheduleKind,
        ScheduleSummary,
    };

    #[test]
    fn test_parameters_use_camel_case_keys() {
        let mut analysis = ParameterAnalysis::default();
        analysis.in_use.push(ClassifiedParameter {
            name: "timer".to_string(),
            label: "Timer".to_string(),
            category: "Scheduling".to_string(),
            param_type: "custom:schedule".to_string(),
            value: "<row/>".to_string(),
            schedule: Some(ScheduleSummary {
                kind: ScheduleKind::RunOnce,
                fire_at: Some("10:00".to_string()),
                frequency: None,
                cron_expression: None,
                start_at: None,
                end_at: None,
                time_zone: None,
            }),
        });

        let result = JsonExporter::new().export_parameters(&analysis).unwrap();
        assert_eq!(result.format, "json");
        let json: serde_json::Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(json["inUse"][0]["category"], "Scheduling");
        assert_eq!(json["inUse"][0]["parameters"][0]["schedule"]["scheduleKind"], "run_once");
        assert_eq!(json["inUse"][0]["parameters"][0]["schedule"]["fireAt"], "10:00");
        assert!(json["orphan"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_guideline_report_shape() {
        let mut report = GuidelineReport::new();
        report.push(GuidelineCheckResult {
            id: "complexity".to_string(),
            name: "Complexity".to_string(),
            description: String::new(),
            result: GuidelineVerdict::Warn,
            message: "16 steps".to_string(),
        });

        let result = JsonExporter::new().export_guidelines(&report).unwrap();
        let json: serde_json::Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(json["summary"]["warn"], 1);
        assert_eq!(json["summary"]["total"], 1);
        assert_eq!(json["results"][0]["result"], "warn");
        assert!(json["timestamp"].is_string());
    }
}
