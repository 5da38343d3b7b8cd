//! Process graph abstraction
//!
//! Guideline rules only need a narrow view of a process definition: the root
//! process name and a registry of typed nodes with edge counts and extension
//! properties. [`ProcessGraph`] and [`GraphNode`] describe that view;
//! [`BpmnProcessGraph`] is the implementation built from BPMN XML by
//! [`crate::import::bpmn::BpmnImporter`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One element of a process graph.
pub trait GraphNode {
    /// Element id, empty when the source had none
    fn id(&self) -> &str;

    /// Type tag such as `bpmn:ServiceTask`
    fn type_tag(&self) -> &str;

    fn incoming(&self) -> usize;

    fn outgoing(&self) -> usize;

    /// Whether this is an event-triggered sub-process
    fn triggered_by_event(&self) -> bool;

    /// Extension property lookup by key
    fn extension_property(&self, key: &str) -> Option<&str>;
}

/// Read-only query surface over a parsed process definition.
pub trait ProcessGraph {
    /// Name of the first process element, if it has one
    fn root_process_name(&self) -> Option<&str>;

    /// Every node in the registry
    fn nodes(&self) -> Box<dyn Iterator<Item = &dyn GraphNode> + '_>;
}

/// Node of a BPMN process definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BpmnNode {
    pub id: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub incoming: usize,
    pub outgoing: usize,
    pub triggered_by_event: bool,
    /// Source element of a flow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_ref: Option<String>,
    /// Target element of a flow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_ref: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl BpmnNode {
    pub fn new(id: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_tag: type_tag.into(),
            ..Default::default()
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_event_trigger(mut self, triggered: bool) -> Self {
        self.triggered_by_event = triggered;
        self
    }
}

impl GraphNode for BpmnNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn type_tag(&self) -> &str {
        &self.type_tag
    }

    fn incoming(&self) -> usize {
        self.incoming
    }

    fn outgoing(&self) -> usize {
        self.outgoing
    }

    fn triggered_by_event(&self) -> bool {
        self.triggered_by_event
    }

    fn extension_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

/// Process graph built from a BPMN process definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BpmnProcessGraph {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_name: Option<String>,
    pub nodes: Vec<BpmnNode>,
}

impl BpmnProcessGraph {
    pub fn new(process_name: Option<String>) -> Self {
        Self {
            process_name,
            nodes: Vec::new(),
        }
    }

    pub fn with_node(mut self, node: BpmnNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn node(&self, id: &str) -> Option<&BpmnNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

impl ProcessGraph for BpmnProcessGraph {
    fn root_process_name(&self) -> Option<&str> {
        self.process_name.as_deref()
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = &dyn GraphNode> + '_> {
        Box::new(self.nodes.iter().map(|n| n as &dyn GraphNode))
    }
}
