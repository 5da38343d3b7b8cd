//! Parameter classification
//!
//! Cross-references declared parameters with configured values and
//! placeholder usage. Declared parameters split into "in use" (referenced by
//! a `{{name}}` placeholder) and "orphan" (never referenced). Only
//! parameters with a configured value are reported.

use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::config::ParameterSection;
use crate::import::ImportError;
use crate::import::propdef::ParameterSchemaReader;
use crate::import::properties::parse_properties;
use crate::import::schedule::{is_schedule_table, parse_schedule};
use crate::import::usage::extract_used_parameters;
use crate::models::{ClassifiedParameter, GroupedReport, ParameterAnalysis, ParameterDefinition};

/// Partition definitions by usage and group configured ones by category.
///
/// Definitions without a configured value (or with an empty one) are left
/// out of both reports. Input order is preserved within each partition and
/// category.
pub fn classify(
    definitions: &[ParameterDefinition],
    configured: &HashMap<String, String>,
    used: &HashSet<String>,
) -> ParameterAnalysis {
    let (used_defs, orphan_defs): (Vec<&ParameterDefinition>, Vec<&ParameterDefinition>) =
        definitions.iter().partition(|d| used.contains(&d.name));

    ParameterAnalysis {
        in_use: group_configured(&used_defs, configured),
        orphan: group_configured(&orphan_defs, configured),
    }
}

fn group_configured(
    definitions: &[&ParameterDefinition],
    configured: &HashMap<String, String>,
) -> GroupedReport {
    let mut report = GroupedReport::new();
    for definition in definitions {
        let Some(value) = configured.get(&definition.name).filter(|v| !v.is_empty()) else {
            continue;
        };
        report.push(classified(definition, value));
    }
    report
}

fn classified(definition: &ParameterDefinition, value: &str) -> ClassifiedParameter {
    let schedule = (definition.is_schedule() && is_schedule_table(value))
        .then(|| parse_schedule(value).summary());

    ClassifiedParameter {
        name: definition.name.clone(),
        label: definition.label.clone(),
        category: definition.category.clone(),
        param_type: definition.param_type.clone(),
        value: value.to_string(),
        schedule,
    }
}

/// Parameter analyzer for one artifact's schema, property and process texts.
#[derive(Debug, Clone, Default)]
pub struct ParameterAnalyzer {
    reader: ParameterSchemaReader,
}

impl ParameterAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &ParameterSection) -> Self {
        Self {
            reader: ParameterSchemaReader::with_config(config),
        }
    }

    /// Run the analysis, reporting why it could not be done.
    ///
    /// # Errors
    ///
    /// `ImportError::MissingInput` without a schema document, or
    /// `ImportError::XmlParseError` when the schema is not well-formed.
    pub fn try_analyze(
        &self,
        schema: Option<&str>,
        properties: Option<&str>,
        process: Option<&str>,
    ) -> Result<ParameterAnalysis, ImportError> {
        let schema = schema
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ImportError::MissingInput("parameter schema document".to_string()))?;

        let definitions = self.reader.read(schema)?;
        let configured = parse_properties(properties);
        let used = extract_used_parameters(process);

        let analysis = classify(&definitions, &configured, &used);
        debug!(
            "Classified {} definitions: {} in use, {} orphaned",
            definitions.len(),
            analysis.in_use.len(),
            analysis.orphan.len()
        );
        Ok(analysis)
    }

    /// Best-effort analysis: any failure is logged and yields `None`.
    pub fn analyze(
        &self,
        schema: Option<&str>,
        properties: Option<&str>,
        process: Option<&str>,
    ) -> Option<ParameterAnalysis> {
        match self.try_analyze(schema, properties, process) {
            Ok(analysis) => Some(analysis),
            Err(ImportError::MissingInput(what)) => {
                debug!("No parameter analysis: missing {}", what);
                None
            }
            Err(e) => {
                warn!("Could not analyze flow parameters: {}", e);
                None
            }
        }
    }
}

/// Analyze an artifact's parameters with the default configuration.
///
/// Returns `None` when the schema is absent or unparsable. A missing
/// property store is treated as empty, so every parameter is dropped.
pub fn analyze_flow_parameters(
    schema: Option<&str>,
    properties: Option<&str>,
    process: Option<&str>,
) -> Option<ParameterAnalysis> {
    ParameterAnalyzer::new().analyze(schema, properties, process)
}
