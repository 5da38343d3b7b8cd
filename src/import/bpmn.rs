//! BPMN importer
//!
//! Builds a [`BpmnProcessGraph`] from the BPMN 2.0 XML of an integration
//! flow (`.iflw`). The graph registers participants and message flows of the
//! collaboration plus every flow element of every process, descending into
//! sub-processes. Extension properties are read from
//! `extensionElements/property` entries holding `key` and `value` children.

use std::collections::HashMap;
use tracing::debug;

use super::ImportError;
use super::xml::{XmlDocument, XmlElement};
use crate::models::{BpmnNode, BpmnProcessGraph};

/// Children of a process that are not drawn as diagram shapes.
/// A `dataObject` is only shown through its `dataObjectReference`.
const NON_FLOW_CHILDREN: &[&str] = &[
    "extensionElements",
    "dataObject",
    "documentation",
    "laneSet",
    "ioSpecification",
    "property",
    "incoming",
    "outgoing",
    "auditing",
    "monitoring",
    "supports",
    "correlationSubscription",
    "multiInstanceLoopCharacteristics",
    "standardLoopCharacteristics",
    "dataInputAssociation",
    "dataOutputAssociation",
];

/// Flow elements whose children are flow elements again
const CONTAINERS: &[&str] = &["subProcess", "transaction", "adHocSubProcess"];

/// BPMN Importer
#[derive(Debug, Default)]
pub struct BpmnImporter;

impl BpmnImporter {
    /// Create a new BpmnImporter
    pub fn new() -> Self {
        Self
    }

    /// Import BPMN XML content into a process graph.
    ///
    /// # Arguments
    ///
    /// * `xml_content` - The BPMN XML content as a string.
    ///
    /// # Returns
    ///
    /// The `BpmnProcessGraph`, or an error if the content is not well-formed
    /// XML or its root is not a `definitions` element.
    pub fn import(&self, xml_content: &str) -> Result<BpmnProcessGraph, ImportError> {
        let doc = XmlDocument::parse(xml_content)
            .map_err(|e| ImportError::BPMNParseError(e.to_string()))?;
        let definitions = doc.root();
        if !definitions.is("definitions") {
            return Err(ImportError::BPMNParseError(format!(
                "expected <definitions> root, found <{}>",
                definitions.name()
            )));
        }

        let process_name = definitions
            .child("process")
            .and_then(|p| p.attribute("name"))
            .map(str::to_string);
        let mut graph = BpmnProcessGraph::new(process_name);

        for collaboration in definitions.children_named("collaboration") {
            for element in collaboration.children() {
                if !NON_FLOW_CHILDREN.contains(&element.local_name()) {
                    graph.nodes.push(node_from_element(element));
                }
            }
        }
        for process in definitions.children_named("process") {
            collect_flow_elements(process, &mut graph.nodes);
        }

        count_edges(&mut graph.nodes);

        debug!(
            "Imported BPMN graph with {} nodes (process: {:?})",
            graph.nodes.len(),
            graph.process_name
        );
        Ok(graph)
    }
}

fn collect_flow_elements(container: &XmlElement, nodes: &mut Vec<BpmnNode>) {
    for element in container.children() {
        if NON_FLOW_CHILDREN.contains(&element.local_name()) {
            continue;
        }
        nodes.push(node_from_element(element));
        if CONTAINERS.contains(&element.local_name()) {
            collect_flow_elements(element, nodes);
        }
    }
}

fn node_from_element(element: &XmlElement) -> BpmnNode {
    let mut node = BpmnNode::new(
        element.attribute("id").unwrap_or_default(),
        type_tag(element.local_name()),
    );
    node.name = element.attribute("name").map(str::to_string);
    node.triggered_by_event = element.attribute("triggeredByEvent") == Some("true");

    if let Some(extensions) = element.child("extensionElements") {
        for property in extensions.children_named("property") {
            if let Some(key) = property.find_child_text("key") {
                let value = property.find_child_text("value").unwrap_or_default();
                node.properties.insert(key, value);
            }
        }
    }

    node.source_ref = element.attribute("sourceRef").map(str::to_string);
    node.target_ref = element.attribute("targetRef").map(str::to_string);

    node
}

/// `serviceTask` -> `bpmn:ServiceTask`
fn type_tag(local_name: &str) -> String {
    let mut chars = local_name.chars();
    match chars.next() {
        Some(first) => format!("bpmn:{}{}", first.to_uppercase(), chars.as_str()),
        None => "bpmn:".to_string(),
    }
}

fn count_edges(nodes: &mut [BpmnNode]) {
    let mut incoming: HashMap<String, usize> = HashMap::new();
    let mut outgoing: HashMap<String, usize> = HashMap::new();

    for node in nodes.iter() {
        if let (Some(source), Some(target)) = (&node.source_ref, &node.target_ref) {
            *outgoing.entry(source.clone()).or_default() += 1;
            *incoming.entry(target.clone()).or_default() += 1;
        }
    }

    for node in nodes.iter_mut() {
        node.incoming = incoming.get(&node.id).copied().unwrap_or(0);
        node.outgoing = outgoing.get(&node.id).copied().unwrap_or(0);
    }
}
