//! Timer configuration models
//!
//! A `custom:schedule` parameter value is a row/cell table flattened into a
//! string. Once parsed it becomes a [`ScheduleRecord`], which classifies
//! itself into a [`ScheduleKind`] and produces a display [`ScheduleSummary`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of timer a schedule record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleKind {
    RunOnce,
    Recurring,
    Cron,
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleKind::RunOnce => write!(f, "run once"),
            ScheduleKind::Recurring => write!(f, "recurring"),
            ScheduleKind::Cron => write!(f, "cron"),
        }
    }
}

/// Flat key/value view of a timer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleRecord {
    fields: BTreeMap<String, String>,
}

impl ScheduleRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any earlier value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Field value, treating empty strings as absent
    fn present(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Classify the record.
    ///
    /// `timeType == TIME_INTERVAL` wins over `triggerType == cron`; anything
    /// else is a one-off run.
    pub fn kind(&self) -> ScheduleKind {
        if self.get("timeType") == Some("TIME_INTERVAL") {
            ScheduleKind::Recurring
        } else if self.get("triggerType") == Some("cron") {
            ScheduleKind::Cron
        } else {
            ScheduleKind::RunOnce
        }
    }

    /// Repeat interval of a recurring timer, e.g. `"2 hours"`.
    pub fn frequency(&self) -> Option<String> {
        [
            ("OnEveryMinute", "minutes"),
            ("OnEveryHour", "hours"),
            ("OnEveryDay", "days"),
        ]
        .iter()
        .find_map(|(key, unit)| self.present(key).map(|n| format!("{} {}", n, unit)))
    }

    /// Cron expression assembled from the individual cron fields.
    ///
    /// When none of the fields is present the alternate `schedule1`
    /// encoding is used instead, if available.
    pub fn cron_expression(&self) -> String {
        const FIELDS: [(&str, &str); 6] = [
            ("second", "*"),
            ("minute", "*"),
            ("hour", "*"),
            ("day_of_month", "?"),
            ("month", "*"),
            ("dayOfWeek", "*"),
        ];

        let has_fields = FIELDS.iter().any(|(key, _)| self.present(key).is_some());
        if !has_fields && let Some(derived) = self.schedule1_expression() {
            return derived;
        }

        FIELDS
            .iter()
            .map(|(key, default)| self.present(key).unwrap_or(default))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Display-only cron expression derived from `schedule1`: the text
    /// before the first `&`, with `+` read as a space.
    pub fn schedule1_expression(&self) -> Option<String> {
        let raw = self.present("schedule1")?;
        let head = raw.split('&').next().unwrap_or(raw);
        Some(head.replace('+', " "))
    }

    /// Build the display summary for this record.
    pub fn summary(&self) -> ScheduleSummary {
        let kind = self.kind();
        let owned = |key: &str| self.present(key).map(str::to_string);

        let mut summary = ScheduleSummary {
            kind,
            fire_at: None,
            frequency: None,
            cron_expression: None,
            start_at: None,
            end_at: None,
            time_zone: owned("timeZone"),
        };

        match kind {
            ScheduleKind::RunOnce => summary.fire_at = owned("fireAt"),
            ScheduleKind::Recurring => {
                summary.frequency = self.frequency();
                summary.start_at = owned("startAt");
                summary.end_at = owned("endAt");
            }
            ScheduleKind::Cron => {
                summary.cron_expression = Some(self.cron_expression());
                summary.start_at = owned("startAt");
                summary.end_at = owned("endAt");
            }
        }

        summary
    }
}

/// Rendering-ready view of a timer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    #[serde(rename = "scheduleKind")]
    pub kind: ScheduleKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fire_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[(&str, &str)]) -> ScheduleRecord {
        let mut record = ScheduleRecord::new();
        for (k, v) in fields {
            record.insert(*k, *v);
        }
        record
    }

    #[test]
    fn test_time_interval_is_always_recurring() {
        let r = record(&[("timeType", "TIME_INTERVAL"), ("triggerType", "cron")]);
        assert_eq!(r.kind(), ScheduleKind::Recurring);
    }

    #[test]
    fn test_cron_trigger_without_interval() {
        let r = record(&[("timeType", "ON_DATE"), ("triggerType", "cron")]);
        assert_eq!(r.kind(), ScheduleKind::Cron);
    }

    #[test]
    fn test_everything_else_runs_once() {
        assert_eq!(ScheduleRecord::new().kind(), ScheduleKind::RunOnce);
        let r = record(&[("triggerType", "simple"), ("fireAt", "2024-01-01 10:00")]);
        assert_eq!(r.kind(), ScheduleKind::RunOnce);
        assert_eq!(r.summary().fire_at.as_deref(), Some("2024-01-01 10:00"));
    }

    #[test]
    fn test_frequency_prefers_minutes() {
        let r = record(&[("OnEveryMinute", "5"), ("OnEveryHour", "2")]);
        assert_eq!(r.frequency().as_deref(), Some("5 minutes"));
        let r = record(&[("OnEveryDay", "1")]);
        assert_eq!(r.frequency().as_deref(), Some("1 days"));
        assert_eq!(ScheduleRecord::new().frequency(), None);
    }

    #[test]
    fn test_cron_expression_defaults() {
        let r = record(&[("triggerType", "cron"), ("minute", "0/15"), ("hour", "8")]);
        assert_eq!(r.cron_expression(), "* 0/15 8 ? * *");
    }

    #[test]
    fn test_cron_expression_from_schedule1() {
        let r = record(&[
            ("triggerType", "cron"),
            ("schedule1", "0+0/10+*+?+*+MON-FRI&trigger.timeZone=UTC"),
        ]);
        assert_eq!(r.cron_expression(), "0 0/10 * ? * MON-FRI");
    }

    #[test]
    fn test_cron_fields_take_priority_over_schedule1() {
        let r = record(&[("second", "30"), ("schedule1", "1+2+3+?+*+*")]);
        assert_eq!(r.cron_expression(), "30 * * ? * *");
    }

    #[test]
    fn test_recurring_summary() {
        let r = record(&[
            ("timeType", "TIME_INTERVAL"),
            ("OnEveryHour", "2"),
            ("startAt", "08:00"),
            ("timeZone", "UTC"),
        ]);
        let summary = r.summary();
        assert_eq!(summary.kind, ScheduleKind::Recurring);
        assert_eq!(summary.frequency.as_deref(), Some("2 hours"));
        assert_eq!(summary.start_at.as_deref(), Some("08:00"));
        assert_eq!(summary.end_at, None);
        assert_eq!(summary.time_zone.as_deref(), Some("UTC"));
        assert_eq!(summary.cron_expression, None);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ScheduleKind::RunOnce).unwrap();
        assert_eq!(json, "\"run_once\"");
    }
}
