//! Guideline checks for integration flows
//!
//! A fixed, ordered list of independent rules is run against a process
//! graph. Each rule yields pass, warn or fail with a message; the report
//! counts verdicts and keeps results in rule order.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::import::bpmn::BpmnImporter;
use crate::models::{GuidelineCheckResult, GuidelineReport, ProcessGraph, RuleOutcome};

static RE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s'"]+"#).expect("Invalid regex"));

/// Type substrings of nodes counted as logical steps
const COMPLEXITY_NODE_TYPES: &[&str] = &["Task", "SubProcess", "Gateway", "Event", "DataObject"];

/// More steps than this is a warning
pub const COMPLEXITY_WARN_THRESHOLD: usize = 15;

/// More steps than this is a failure
pub const COMPLEXITY_FAIL_THRESHOLD: usize = 25;

/// A guideline rule: identity plus a pure check over the graph.
#[derive(Clone, Copy)]
pub struct GuidelineRule {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub check: fn(&dyn ProcessGraph) -> RuleOutcome,
}

impl GuidelineRule {
    /// Run this rule against a graph
    pub fn evaluate(&self, graph: &dyn ProcessGraph) -> GuidelineCheckResult {
        let outcome = (self.check)(graph);
        GuidelineCheckResult {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            result: outcome.result,
            message: outcome.message,
        }
    }
}

impl std::fmt::Debug for GuidelineRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuidelineRule").field("id", &self.id).finish()
    }
}

/// The built-in rules, in report order.
pub const GUIDELINE_RULES: &[GuidelineRule] = &[
    GuidelineRule {
        id: "naming-convention",
        name: "Integration Flow Naming Convention",
        description: "Checks whether the integration flow name follows the recommended pattern (e.g. <Area> <Interface>).",
        check: check_naming_convention,
    },
    GuidelineRule {
        id: "error-handling",
        name: "Error Handling",
        description: "Checks whether the integration flow has an exception sub-process for robust error handling.",
        check: check_error_handling,
    },
    GuidelineRule {
        id: "complexity",
        name: "Integration Flow Complexity",
        description: "Counts flow steps to assess complexity. Very complex flows should be modularized.",
        check: check_complexity,
    },
    GuidelineRule {
        id: "hardcoded-urls",
        name: "Hardcoded URLs",
        description: "Checks whether message bodies set by content modifiers contain fixed URLs.",
        check: check_hardcoded_urls,
    },
];

/// Guideline engine over a rule list.
#[derive(Debug, Clone)]
pub struct GuidelineChecker {
    rules: Vec<GuidelineRule>,
}

impl Default for GuidelineChecker {
    fn default() -> Self {
        Self {
            rules: GUIDELINE_RULES.to_vec(),
        }
    }
}

impl GuidelineChecker {
    /// Checker with the built-in rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Checker with a custom rule list
    pub fn with_rules(rules: Vec<GuidelineRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[GuidelineRule] {
        &self.rules
    }

    /// Run every rule and aggregate the verdicts.
    pub fn evaluate(&self, graph: &dyn ProcessGraph) -> GuidelineReport {
        let mut report = GuidelineReport::new();
        for rule in &self.rules {
            let result = rule.evaluate(graph);
            debug!("Guideline '{}': {}", result.id, result.result);
            report.push(result);
        }
        report
    }

    /// Import a process definition and evaluate it.
    ///
    /// Returns `None` when the definition cannot be turned into a graph; no
    /// partial report is produced in that case.
    pub fn check(&self, process_xml: &str) -> Option<GuidelineReport> {
        match BpmnImporter::new().import(process_xml) {
            Ok(graph) => Some(self.evaluate(&graph)),
            Err(e) => {
                warn!("Error processing BPMN for guideline checks: {}", e);
                None
            }
        }
    }
}

/// Evaluate the built-in rules against a graph
pub fn evaluate(graph: &dyn ProcessGraph) -> GuidelineReport {
    GuidelineChecker::new().evaluate(graph)
}

/// Evaluate the built-in rules against a process definition text
pub fn check_guidelines(process_xml: &str) -> Option<GuidelineReport> {
    GuidelineChecker::new().check(process_xml)
}

/// Pass for a name with a space and more than five characters; warn otherwise.
pub fn check_naming_convention(graph: &dyn ProcessGraph) -> RuleOutcome {
    let name = graph.root_process_name().unwrap_or_default();
    if !name.is_empty() && name.contains(' ') && name.chars().count() > 5 {
        RuleOutcome::pass(format!(
            "The integration flow name \"{}\" appears to follow a naming pattern.",
            name
        ))
    } else {
        RuleOutcome::warn(format!(
            "The integration flow name \"{}\" may not follow the recommended convention (e.g. \"FIN Sales Order - SAP to Salesforce\").",
            name
        ))
    }
}

/// Pass when an event-triggered sub-process exists; fail otherwise.
pub fn check_error_handling(graph: &dyn ProcessGraph) -> RuleOutcome {
    let has_exception_subprocess = graph
        .nodes()
        .any(|n| n.type_tag() == "bpmn:SubProcess" && n.triggered_by_event());

    if has_exception_subprocess {
        RuleOutcome::pass(
            "The integration flow contains an exception sub-process for error handling.",
        )
    } else {
        RuleOutcome::fail("No exception sub-process found. Error handling may not be robust.")
    }
}

/// Number of nodes counted by the complexity rule; each node counts once.
pub fn count_flow_steps(graph: &dyn ProcessGraph) -> usize {
    graph
        .nodes()
        .filter(|n| {
            let tag = n.type_tag();
            tag.starts_with("bpmn:") && COMPLEXITY_NODE_TYPES.iter().any(|t| tag.contains(*t))
        })
        .count()
}

/// Fail above 25 steps, warn above 15, pass otherwise.
pub fn check_complexity(graph: &dyn ProcessGraph) -> RuleOutcome {
    let count = count_flow_steps(graph);

    if count > COMPLEXITY_FAIL_THRESHOLD {
        RuleOutcome::fail(format!(
            "The integration flow has {} elements, which is considered too complex. Consider modularizing it with local processes or ProcessDirect.",
            count
        ))
    } else if count > COMPLEXITY_WARN_THRESHOLD {
        RuleOutcome::warn(format!(
            "The integration flow has {} elements. Monitor its complexity to keep it maintainable.",
            count
        ))
    } else {
        RuleOutcome::pass(format!(
            "The integration flow has {} elements, an acceptable level of complexity.",
            count
        ))
    }
}

/// Warn when any `body` extension property contains an HTTP(S) URL.
pub fn check_hardcoded_urls(graph: &dyn ProcessGraph) -> RuleOutcome {
    let hardcoded_found = graph
        .nodes()
        .filter_map(|n| n.extension_property("body"))
        .any(|body| RE_URL.is_match(body));

    if hardcoded_found {
        RuleOutcome::warn(
            "Potential hardcoded URLs were found in a content modifier. Externalize parameters whenever possible.",
        )
    } else {
        RuleOutcome::pass("No obvious hardcoded URLs were found in content modifiers.")
    }
}
