//! Export module tests

#![cfg(feature = "package")]

use cpi_package_inspector::analysis::{PackageAnalyzer, analyze_flow_parameters};
use cpi_package_inspector::export::{JsonExporter, MarkdownExporter};
use cpi_package_inspector::models::{
    ArtifactAnalysis, PackageAnalysis, PackageResource, ParameterAnalysis,
};
use cpi_package_inspector::validation::check_guidelines;
use std::io::{Cursor, Write};
use zip::write::{FileOptions, ZipWriter};

const SCHEMA: &str = "<parameters>\
    <parameter><name>Host</name></parameter>\
    <parameter><name>Timer</name><type>custom:schedule</type></parameter>\
    <parameter><name>Unused</name></parameter>\
    </parameters>";

const PROPERTIES: &str = "Host=api.example.com\n\
Timer=<row><cell>timeType</cell><cell>TIME_INTERVAL</cell></row><row><cell>OnEveryMinute</cell><cell>15</cell></row>\n\
Unused=legacy\n";

const PROCESS: &str = r#"<bpmn2:definitions xmlns:bpmn2="http://www.omg.org/spec/BPMN/20100524/MODEL">
    <bpmn2:process id="Process_1" name="Order Sync">
        <bpmn2:startEvent id="Start" name="Every {{Timer}}"/>
        <bpmn2:serviceTask id="Call" name="{{Host}}"/>
    </bpmn2:process>
</bpmn2:definitions>"#;

fn parameters() -> ParameterAnalysis {
    analyze_flow_parameters(Some(SCHEMA), Some(PROPERTIES), Some(PROCESS)).unwrap()
}

fn package() -> PackageAnalysis {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in [
        ("parameters.propdef", SCHEMA),
        ("parameters.prop", PROPERTIES),
        ("Order_Sync.iflw", PROCESS),
    ] {
        writer.start_file(name, FileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    let bytes = writer.finish().unwrap().into_inner();
    PackageAnalyzer::new()
        .analyze_bytes("Order_Sync.zip", &bytes)
        .unwrap()
}

mod json_tests {
    use super::*;

    #[test]
    fn test_parameter_report_json() {
        let result = JsonExporter::new().export_parameters(&parameters()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&result.content).unwrap();

        let in_use = json["inUse"].as_array().unwrap();
        assert_eq!(in_use.len(), 1);
        let params = in_use[0]["parameters"].as_array().unwrap();
        assert_eq!(params[0]["name"], "Host");
        assert_eq!(params[0]["type"], "xsd:string");
        assert_eq!(params[1]["schedule"]["scheduleKind"], "recurring");
        assert_eq!(params[1]["schedule"]["frequency"], "15 minutes");
        assert_eq!(json["orphan"][0]["parameters"][0]["value"], "legacy");
    }

    #[test]
    fn test_package_round_trips() {
        let analysis = package();
        let result = JsonExporter::new().export_package(&analysis).unwrap();
        let restored: PackageAnalysis = serde_json::from_str(&result.content).unwrap();
        assert_eq!(restored, analysis);
    }
}

mod markdown_tests {
    use super::*;

    #[test]
    fn test_parameter_tables() {
        let md = MarkdownExporter::new()
            .export_parameters(&parameters())
            .unwrap()
            .content;

        assert!(md.contains("## Parameters in Use"));
        assert!(md.contains("### Global Parameters"));
        assert!(md.contains("| `Host` | Host | xsd:string | api.example.com |"));
        assert!(md.contains("| `Timer` | Timer | custom:schedule | recurring every 15 minutes |"));
        assert!(md.contains("| `Unused` | Unused | xsd:string | legacy |"));
    }

    #[test]
    fn test_guideline_table() {
        let report = check_guidelines(PROCESS).unwrap();
        let md = MarkdownExporter::new()
            .export_guidelines(&report)
            .unwrap()
            .content;

        assert!(md.starts_with("## Guidelines 🔴 Red"));
        assert!(md.contains("3 passed, 0 warnings, 1 failed (4 checks)"));
        assert!(md.contains("| Error Handling | ❌ fail |"));
    }

    #[test]
    fn test_package_document() {
        let md = MarkdownExporter::new()
            .export_package(&package())
            .unwrap()
            .content;

        assert!(md.starts_with("# Package: Order_Sync.zip"));
        assert!(md.contains("Single integration flow archive"));
        assert!(md.contains("| Order_Sync | IFlow | 1.0.0 | 🔴 Red |"));
        assert!(md.contains("## 🔄 Integration Flows (1)\n"));
        assert!(md.contains("### Order_Sync\n"));
        assert!(md.contains("#### Guidelines"));
        assert!(md.contains("#### Parameters in Use"));
        assert!(md.contains("#### Orphaned Parameters"));
    }

    #[test]
    fn test_artifacts_grouped_by_type_with_details() {
        let entries = [
            serde_json::json!({
                "id": "flow1",
                "displayName": "Order Sync",
                "resourceType": "IFlow",
                "modifiedAt": 1700000000000i64,
                "additionalAttributes": {"shortText": {"attributeValues": ["Sends orders to CRM"]}}
            }),
            serde_json::json!({"id": "scripts1", "name": "Helpers", "resourceType": "ScriptCollection"}),
            serde_json::json!({"id": "flow2", "displayName": "Invoice Sync", "resourceType": "IFlow"}),
            serde_json::json!({"id": "misc1", "name": "Misc"}),
        ];
        let artifacts = entries
            .into_iter()
            .map(|e| ArtifactAnalysis::new(PackageResource::from_index_entry(e).unwrap()))
            .collect();
        let analysis = PackageAnalysis {
            archive_name: "Orders.zip".to_string(),
            metadata: None,
            synthetic: false,
            artifacts,
        };

        let md = MarkdownExporter::new()
            .export_package(&analysis)
            .unwrap()
            .content;

        let flows = md.find("## 🔄 Integration Flows (2)").unwrap();
        let scripts = md.find("## 📜 Script Collections (1)").unwrap();
        let other = md.find("## 📄 Other Artifacts (1)").unwrap();
        assert!(flows < scripts && scripts < other);

        let order_sync = md.find("### Order Sync\n").unwrap();
        let invoice_sync = md.find("### Invoice Sync\n").unwrap();
        assert!(order_sync < invoice_sync && invoice_sync < scripts);

        assert!(md.contains("### Order Sync\n\nSends orders to CRM\n"));
        assert!(md.contains("| **Modified At** | 2023-11-14 |"));
        assert!(md.contains("| Misc | Other |  | - |"));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");
        let result = MarkdownExporter::new().export_package(&package()).unwrap();
        result.write_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), result.content);
    }
}
