//! Content package models
//!
//! A content package archive carries a base64 encoded JSON resource index
//! (`resources.cnt`) listing its artifacts. Each artifact's payload is stored
//! next to it as `<id>_content`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::guideline::GuidelineReport;
use super::parameter::ParameterAnalysis;

/// Resource type tag of integration flows
pub const IFLOW_RESOURCE_TYPE: &str = "IFlow";

/// Resource type tag of script collections
pub const SCRIPT_COLLECTION_RESOURCE_TYPE: &str = "ScriptCollection";

/// Type label of resources without a resource type
pub const OTHER_RESOURCE_TYPE: &str = "Other";

/// Decoded `resources.cnt` document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceIndex {
    #[serde(default)]
    pub resources: Vec<PackageResource>,
}

/// One artifact entry of the resource index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageResource {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_version: Option<String>,
    /// Numeric in most exports, but not guaranteed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,
    /// Milliseconds since the epoch, as a number or a numeric string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<Value>,
    /// First value of `additionalAttributes.shortText`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl PackageResource {
    /// Resource for an archive holding a single integration flow
    pub fn iflow(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            display_name: Some(id.clone()),
            id,
            name: Some(name.into()),
            resource_type: IFLOW_RESOURCE_TYPE.to_string(),
            semantic_version: Some("1.0.0".to_string()),
            ..Default::default()
        }
    }

    /// Read one entry of a resource index document
    pub fn from_index_entry(entry: Value) -> Result<Self, serde_json::Error> {
        let short_text = entry
            .pointer("/additionalAttributes/shortText/attributeValues/0")
            .and_then(Value::as_str)
            .map(str::to_string);
        let mut resource: Self = serde_json::from_value(entry)?;
        if resource.description.is_none() {
            resource.description = short_text.filter(|t| !t.trim().is_empty());
        }
        Ok(resource)
    }

    /// Name shown to users: display name, then name, then id
    pub fn title(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(&self.id)
    }

    /// Semantic version, or the raw version when absent
    pub fn version_label(&self) -> Option<String> {
        self.semantic_version.clone().or_else(|| {
            self.version.as_ref().map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
        })
    }

    /// Resource type, or `Other` when the index leaves it empty
    pub fn type_label(&self) -> &str {
        if self.resource_type.is_empty() {
            OTHER_RESOURCE_TYPE
        } else {
            &self.resource_type
        }
    }

    /// Last modification time, if `modifiedAt` holds epoch milliseconds
    pub fn modified_date(&self) -> Option<DateTime<Utc>> {
        let millis = match self.modified_at.as_ref()? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
            Value::String(s) => s.trim().parse().ok()?,
            _ => return None,
        };
        DateTime::from_timestamp_millis(millis)
    }

    /// Archive entry name of this resource's payload
    pub fn content_entry(&self) -> String {
        format!("{}_content", self.id)
    }

    pub fn is_iflow(&self) -> bool {
        self.resource_type == IFLOW_RESOURCE_TYPE
    }

    pub fn is_script_collection(&self) -> bool {
        self.resource_type == SCRIPT_COLLECTION_RESOURCE_TYPE
    }
}

/// Analysis results for one artifact of a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactAnalysis {
    pub resource: PackageResource,
    /// `None` when the artifact has no analyzable parameter schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ParameterAnalysis>,
    /// `None` when the process definition could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidelines: Option<GuidelineReport>,
    /// Script file names, for script collections
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<String>,
}

impl ArtifactAnalysis {
    pub fn new(resource: PackageResource) -> Self {
        Self {
            resource,
            parameters: None,
            guidelines: None,
            scripts: Vec::new(),
        }
    }
}

/// Analysis results for a whole content package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageAnalysis {
    /// File name of the analyzed archive
    pub archive_name: String,
    /// Decoded `contentmetadata.md`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    /// True when the archive was a bare integration flow rather than a package
    pub synthetic: bool,
    pub artifacts: Vec<ArtifactAnalysis>,
}

impl PackageAnalysis {
    pub fn artifact(&self, id: &str) -> Option<&ArtifactAnalysis> {
        self.artifacts.iter().find(|a| a.resource.id == id)
    }
}
