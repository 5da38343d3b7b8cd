//! Parameter schema reader
//!
//! Reads the parameter definition document (`.propdef`) of an artifact:
//!
//! ```xml
//! <parameters>
//!   <parameter><name>host</name><type>xsd:string</type></parameter>
//!   <param_references>
//!     <reference param_key="host" attribute_uilabel="Host" attribute_category="Connection"/>
//!   </param_references>
//! </parameters>
//! ```

use tracing::debug;

use super::ImportError;
use super::xml::{XmlDocument, XmlElement};
use crate::config::ParameterSection;
use crate::models::{
    DEFAULT_PARAMETER_TYPE, GLOBAL_CATEGORY, ParameterDefinition, ParameterReference,
};

/// Reads parameter definitions and applies reference overrides.
#[derive(Debug, Clone)]
pub struct ParameterSchemaReader {
    global_category: String,
    default_type: String,
}

impl Default for ParameterSchemaReader {
    fn default() -> Self {
        Self {
            global_category: GLOBAL_CATEGORY.to_string(),
            default_type: DEFAULT_PARAMETER_TYPE.to_string(),
        }
    }
}

impl ParameterSchemaReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reader using the category and type defaults of a configuration
    pub fn with_config(config: &ParameterSection) -> Self {
        Self {
            global_category: config.global_category.clone(),
            default_type: config.default_type.clone(),
        }
    }

    pub fn global_category(&self) -> &str {
        &self.global_category
    }

    /// Parse a schema document into parameter definitions.
    ///
    /// `parameter` elements without a name are skipped. A name declared twice
    /// keeps its first position and the data of its last declaration.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::XmlParseError` when the document is not
    /// well-formed XML.
    pub fn read(&self, content: &str) -> Result<Vec<ParameterDefinition>, ImportError> {
        let doc = XmlDocument::parse(content)?;

        let mut definitions: Vec<ParameterDefinition> = Vec::new();
        for element in doc.elements("parameter") {
            let Some(definition) = self.definition(element) else {
                continue;
            };
            match definitions.iter_mut().find(|d| d.name == definition.name) {
                Some(existing) => *existing = definition,
                None => definitions.push(definition),
            }
        }

        for reference in Self::references(&doc) {
            if let Some(definition) = definitions
                .iter_mut()
                .find(|d| d.name == reference.param_key)
            {
                definition.apply_reference(&reference, &self.global_category);
            }
        }

        debug!(
            "Read {} parameter definitions from schema",
            definitions.len()
        );
        Ok(definitions)
    }

    fn definition(&self, element: &XmlElement) -> Option<ParameterDefinition> {
        let name = element.find_child_text("name")?;
        let param_type = element
            .find_child_text("type")
            .unwrap_or_else(|| self.default_type.clone());
        Some(ParameterDefinition::new(
            name,
            param_type,
            self.global_category.as_str(),
        ))
    }

    /// Reference entries in document order; later entries for the same key
    /// override earlier ones when applied.
    pub fn references(doc: &XmlDocument) -> Vec<ParameterReference> {
        doc.elements("param_references")
            .into_iter()
            .flat_map(|section| section.children_named("reference"))
            .filter_map(|reference| {
                let param_key = reference.attribute("param_key")?.to_string();
                Some(ParameterReference {
                    param_key,
                    attribute_uilabel: reference.attribute("attribute_uilabel").map(str::to_string),
                    attribute_category: reference
                        .attribute("attribute_category")
                        .map(str::to_string),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<parameters>
    <parameter><name>host</name><type>xsd:string</type></parameter>
    <parameter><name>timer</name><type>custom:schedule</type></parameter>
    <parameter><name>retries</name></parameter>
    <parameter><type>xsd:int</type></parameter>
    <param_references>
        <reference param_key="host" attribute_uilabel="Receiver Host" attribute_category="Connection"/>
        <reference param_key="timer" attribute_uilabel="" attribute_category=""/>
        <reference param_key="unknown" attribute_uilabel="Nobody"/>
    </param_references>
</parameters>"#;

    #[test]
    fn test_read_definitions_and_defaults() {
        let defs = ParameterSchemaReader::new().read(SCHEMA).unwrap();
        let names: Vec<_> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["host", "timer", "retries"]);
        assert_eq!(defs[2].param_type, DEFAULT_PARAMETER_TYPE);
        assert_eq!(defs[2].label, "retries");
        assert_eq!(defs[2].category, GLOBAL_CATEGORY);
        assert!(defs[1].is_schedule());
    }

    #[test]
    fn test_references_override_label_and_category() {
        let defs = ParameterSchemaReader::new().read(SCHEMA).unwrap();
        assert_eq!(defs[0].label, "Receiver Host");
        assert_eq!(defs[0].category, "Connection");
        // blank attributes fall back to defaults
        assert_eq!(defs[1].label, "timer");
        assert_eq!(defs[1].category, GLOBAL_CATEGORY);
    }

    #[test]
    fn test_duplicate_names_keep_last_declaration() {
        let schema = r#"<parameters>
            <parameter><name>a</name><type>xsd:string</type></parameter>
            <parameter><name>b</name></parameter>
            <parameter><name>a</name><type>xsd:int</type></parameter>
        </parameters>"#;
        let defs = ParameterSchemaReader::new().read(schema).unwrap();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].name, "a");
        assert_eq!(defs[0].param_type, "xsd:int");
    }

    #[test]
    fn test_last_reference_wins() {
        let schema = r#"<parameters>
            <parameter><name>a</name></parameter>
            <param_references>
                <reference param_key="a" attribute_category="First"/>
                <reference param_key="a" attribute_category="Second"/>
            </param_references>
        </parameters>"#;
        let defs = ParameterSchemaReader::new().read(schema).unwrap();
        assert_eq!(defs[0].category, "Second");
    }

    #[test]
    fn test_configured_global_category() {
        let section = ParameterSection {
            global_category: "Globale Parameter".to_string(),
            ..Default::default()
        };
        let defs = ParameterSchemaReader::with_config(&section)
            .read("<parameters><parameter><name>x</name></parameter></parameters>")
            .unwrap();
        assert_eq!(defs[0].category, "Globale Parameter");
    }

    #[test]
    fn test_unparsable_schema_is_an_error() {
        let result = ParameterSchemaReader::new().read("<parameters><parameter>");
        assert!(matches!(result, Err(ImportError::XmlParseError(_))));
    }
}
