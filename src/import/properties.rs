//! Property store reader
//!
//! Reads the `key=value` lines of an artifact's `.prop` file. Blank lines and
//! `#` comments are skipped, lines without `=` are ignored, and a repeated
//! key keeps its last value.

use std::collections::HashMap;

/// Parse property store text into a key/value map.
///
/// A missing or empty input yields an empty map.
pub fn parse_properties(content: Option<&str>) -> HashMap<String, String> {
    let mut values = HashMap::new();
    let Some(content) = content else {
        return values;
    };

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            values.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_pairs() {
        let props = parse_properties(Some("host=example.org\nport = 8080\r\n"));
        assert_eq!(props.len(), 2);
        assert_eq!(props["host"], "example.org");
        assert_eq!(props["port"], "8080");
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let props = parse_properties(Some("# header\n\n   \n  # indented=comment\nkey=value"));
        assert_eq!(props.len(), 1);
        assert_eq!(props["key"], "value");
    }

    #[test]
    fn test_split_at_first_equals_only() {
        let props = parse_properties(Some("query=a=b&c=d"));
        assert_eq!(props["query"], "a=b&c=d");
    }

    #[test]
    fn test_lines_without_separator_are_ignored() {
        let props = parse_properties(Some("no separator here\nx=1"));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_last_duplicate_wins() {
        let props = parse_properties(Some("a=1\na=2"));
        assert_eq!(props["a"], "2");
    }

    #[test]
    fn test_missing_input_yields_empty_map() {
        assert!(parse_properties(None).is_empty());
        assert!(parse_properties(Some("")).is_empty());
    }

    #[test]
    fn test_parsing_is_repeatable() {
        let text = "key=value\n";
        assert_eq!(parse_properties(Some(text)), parse_properties(Some(text)));
    }
}
