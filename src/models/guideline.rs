//! Guideline report models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single guideline rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuidelineVerdict {
    Pass,
    Warn,
    Fail,
}

impl fmt::Display for GuidelineVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuidelineVerdict::Pass => write!(f, "pass"),
            GuidelineVerdict::Warn => write!(f, "warn"),
            GuidelineVerdict::Fail => write!(f, "fail"),
        }
    }
}

/// Verdict plus explanation, as returned by a rule check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub result: GuidelineVerdict,
    pub message: String,
}

impl RuleOutcome {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            result: GuidelineVerdict::Pass,
            message: message.into(),
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            result: GuidelineVerdict::Warn,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            result: GuidelineVerdict::Fail,
            message: message.into(),
        }
    }
}

/// Result of running one rule against one process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineCheckResult {
    pub id: String,
    pub name: String,
    pub description: String,
    pub result: GuidelineVerdict,
    pub message: String,
}

/// Verdict counts over all rules of a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineSummary {
    pub pass: usize,
    pub warn: usize,
    pub fail: usize,
    pub total: usize,
}

impl GuidelineSummary {
    /// Count one verdict
    pub fn record(&mut self, verdict: GuidelineVerdict) {
        match verdict {
            GuidelineVerdict::Pass => self.pass += 1,
            GuidelineVerdict::Warn => self.warn += 1,
            GuidelineVerdict::Fail => self.fail += 1,
        }
        self.total += 1;
    }
}

/// Traffic-light status of a guideline report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceStatus {
    Green,
    Yellow,
    Red,
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceStatus::Green => write!(f, "green"),
            ComplianceStatus::Yellow => write!(f, "yellow"),
            ComplianceStatus::Red => write!(f, "red"),
        }
    }
}

/// Guideline results for one process definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineReport {
    pub summary: GuidelineSummary,
    pub results: Vec<GuidelineCheckResult>,
    pub timestamp: DateTime<Utc>,
}

impl GuidelineReport {
    /// Create an empty report stamped with the current time
    pub fn new() -> Self {
        Self {
            summary: GuidelineSummary::default(),
            results: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Append a rule result and count its verdict
    pub fn push(&mut self, result: GuidelineCheckResult) {
        self.summary.record(result.result);
        self.results.push(result);
    }

    /// Look up a result by rule id
    pub fn result(&self, id: &str) -> Option<&GuidelineCheckResult> {
        self.results.iter().find(|r| r.id == id)
    }

    /// Red on any failure, yellow on any warning, green otherwise
    pub fn status(&self) -> ComplianceStatus {
        if self.summary.fail > 0 {
            ComplianceStatus::Red
        } else if self.summary.warn > 0 {
            ComplianceStatus::Yellow
        } else {
            ComplianceStatus::Green
        }
    }
}

impl Default for GuidelineReport {
    fn default() -> Self {
        Self::new()
    }
}
