//! Timer configuration parser
//!
//! Schedule values are stored as a string of `<row>` blocks, each holding a
//! key `<cell>` and a value `<cell>`. Colons inside cells are escaped as `\:`.
//!
//! ```text
//! <row><cell>timeType</cell><cell>TIME_INTERVAL</cell></row><row><cell>startAt</cell><cell>08\:00</cell></row>
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ScheduleRecord;

static RE_ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"<row>(.*?)</row>").expect("Invalid regex"));
static RE_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<cell>(.*?)</cell>").expect("Invalid regex"));

/// Whether a configured value looks like a row/cell timer table
pub fn is_schedule_table(value: &str) -> bool {
    value.contains("<row>")
}

/// Parse a timer configuration into a flat record.
///
/// Rows that do not hold exactly two cells are dropped; malformed input
/// never fails, it just yields fewer (or no) fields.
pub fn parse_schedule(raw: &str) -> ScheduleRecord {
    let mut record = ScheduleRecord::new();

    for row in RE_ROW.captures_iter(raw) {
        let cells: Vec<&str> = RE_CELL
            .captures_iter(&row[1])
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();

        if let [key, value] = cells.as_slice() {
            record.insert(unescape_cell(key), unescape_cell(value));
        }
    }

    record
}

fn unescape_cell(cell: &str) -> String {
    cell.replace("\\:", ":")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleKind;

    #[test]
    fn test_parse_rows_into_fields() {
        let record = parse_schedule(
            "<row><cell>timeType</cell><cell>TIME_INTERVAL</cell></row>\
             <row><cell>OnEveryHour</cell><cell>2</cell></row>",
        );
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("OnEveryHour"), Some("2"));
        assert_eq!(record.kind(), ScheduleKind::Recurring);
    }

    #[test]
    fn test_escaped_colons_are_restored() {
        let record = parse_schedule(r"<row><cell>fireAt</cell><cell>2024-05-01 10\:30\:00</cell></row>");
        assert_eq!(record.get("fireAt"), Some("2024-05-01 10:30:00"));
    }

    #[test]
    fn test_rows_without_two_cells_are_dropped() {
        let record = parse_schedule(
            "<row><cell>only</cell></row>\
             <row><cell>a</cell><cell>b</cell><cell>c</cell></row>\
             <row><cell>timeZone</cell><cell>UTC</cell></row>",
        );
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("timeZone"), Some("UTC"));
    }

    #[test]
    fn test_garbage_yields_empty_record() {
        assert!(parse_schedule("not a table").is_empty());
        assert!(parse_schedule("<row><cell>unterminated").is_empty());
        assert!(parse_schedule("").is_empty());
    }

    #[test]
    fn test_empty_cells_are_kept() {
        let record = parse_schedule("<row><cell>endAt</cell><cell></cell></row>");
        assert_eq!(record.get("endAt"), Some(""));
    }

    #[test]
    fn test_is_schedule_table() {
        assert!(is_schedule_table("<row><cell>a</cell><cell>b</cell></row>"));
        assert!(!is_schedule_table("0 0 * * * ?"));
    }
}
