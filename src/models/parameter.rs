//! Externalized parameter models
//!
//! Declared parameters come from an artifact's parameter schema document
//! (`.propdef`), configured values from its property store (`.prop`). The
//! classifier combines both into [`ClassifiedParameter`] records grouped by
//! category.

use serde::{Deserialize, Serialize};

use super::schedule::ScheduleSummary;

/// Category used when no reference entry assigns one
pub const GLOBAL_CATEGORY: &str = "Global Parameters";

/// Parameter type used when the schema omits `type`
pub const DEFAULT_PARAMETER_TYPE: &str = "xsd:string";

/// Sentinel type marking a timer configuration value
pub const SCHEDULE_PARAMETER_TYPE: &str = "custom:schedule";

/// A parameter declared in a schema document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDefinition {
    /// Unique parameter name within the schema document
    pub name: String,
    /// Type tag, e.g. `xsd:string` or `custom:schedule`
    #[serde(rename = "type")]
    pub param_type: String,
    /// Display label (defaults to `name`)
    pub label: String,
    /// Grouping key (defaults to the global category)
    pub category: String,
}

impl ParameterDefinition {
    /// Create a definition with the default label and category.
    pub fn new(
        name: impl Into<String>,
        param_type: impl Into<String>,
        global_category: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            param_type: param_type.into(),
            category: global_category.into(),
        }
    }

    /// Whether values of this parameter are timer configurations
    pub fn is_schedule(&self) -> bool {
        self.param_type == SCHEDULE_PARAMETER_TYPE
    }

    /// Apply a reference entry's label and category overrides.
    ///
    /// Blank attributes fall back to the parameter name and the global
    /// category respectively.
    pub fn apply_reference(&mut self, reference: &ParameterReference, global_category: &str) {
        self.label = non_blank(reference.attribute_uilabel.as_deref())
            .unwrap_or(&self.name)
            .to_string();
        self.category = non_blank(reference.attribute_category.as_deref())
            .unwrap_or(global_category)
            .to_string();
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Override record from the schema's `param_references` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterReference {
    pub param_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_uilabel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_category: Option<String>,
}

/// A declared parameter that has a configured value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedParameter {
    pub name: String,
    pub label: String,
    pub category: String,
    #[serde(rename = "type")]
    pub param_type: String,
    /// Configured value, never empty
    pub value: String,
    /// Parsed timer configuration for `custom:schedule` values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleSummary>,
}

/// Parameters sharing one category, in definition order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterGroup {
    pub category: String,
    pub parameters: Vec<ClassifiedParameter>,
}

/// Category-grouped parameters.
///
/// Groups keep the order in which their category was first encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupedReport {
    groups: Vec<ParameterGroup>,
}

impl GroupedReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter to its category bucket, creating the bucket on
    /// first sight of the category.
    pub fn push(&mut self, parameter: ClassifiedParameter) {
        match self
            .groups
            .iter_mut()
            .find(|g| g.category == parameter.category)
        {
            Some(group) => group.parameters.push(parameter),
            None => self.groups.push(ParameterGroup {
                category: parameter.category.clone(),
                parameters: vec![parameter],
            }),
        }
    }

    /// Parameters of one category
    pub fn get(&self, category: &str) -> Option<&[ClassifiedParameter]> {
        self.groups
            .iter()
            .find(|g| g.category == category)
            .map(|g| g.parameters.as_slice())
    }

    /// Category names in first-encounter order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.category.as_str())
    }

    pub fn groups(&self) -> &[ParameterGroup] {
        &self.groups
    }

    /// All parameters, group by group
    pub fn parameters(&self) -> impl Iterator<Item = &ClassifiedParameter> {
        self.groups.iter().flat_map(|g| g.parameters.iter())
    }

    /// Look up a parameter by name across all groups
    pub fn find(&self, name: &str) -> Option<&ClassifiedParameter> {
        self.parameters().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Total number of parameters
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.parameters.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Result of a parameter analysis: used and orphaned parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterAnalysis {
    pub in_use: GroupedReport,
    pub orphan: GroupedReport,
}

impl ParameterAnalysis {
    /// Whether neither partition holds any parameter
    pub fn is_empty(&self) -> bool {
        self.in_use.is_empty() && self.orphan.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, category: &str) -> ClassifiedParameter {
        ClassifiedParameter {
            name: name.to_string(),
            label: name.to_string(),
            category: category.to_string(),
            param_type: DEFAULT_PARAMETER_TYPE.to_string(),
            value: "v".to_string(),
            schedule: None,
        }
    }

    #[test]
    fn test_grouped_report_keeps_first_encounter_order() {
        let mut report = GroupedReport::new();
        report.push(param("a", "Zeta"));
        report.push(param("b", "Alpha"));
        report.push(param("c", "Zeta"));

        let categories: Vec<_> = report.categories().collect();
        assert_eq!(categories, vec!["Zeta", "Alpha"]);
        let zeta: Vec<_> = report
            .get("Zeta")
            .unwrap()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(zeta, vec!["a", "c"]);
        assert_eq!(report.len(), 3);
    }

    #[test]
    fn test_apply_reference_falls_back_on_blank_attributes() {
        let mut def = ParameterDefinition::new("host", DEFAULT_PARAMETER_TYPE, GLOBAL_CATEGORY);
        def.apply_reference(
            &ParameterReference {
                param_key: "host".to_string(),
                attribute_uilabel: Some("  ".to_string()),
                attribute_category: None,
            },
            GLOBAL_CATEGORY,
        );
        assert_eq!(def.label, "host");
        assert_eq!(def.category, GLOBAL_CATEGORY);
    }

    #[test]
    fn test_grouped_report_serializes_as_list() {
        let mut report = GroupedReport::new();
        report.push(param("a", "Connection"));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json[0]["category"], "Connection");
        assert_eq!(json[0]["parameters"][0]["type"], "xsd:string");
    }
}
