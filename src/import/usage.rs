//! Placeholder usage extraction
//!
//! Process definitions reference externalized parameters as `{{name}}`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static RE_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("Invalid regex"));

/// Collect the names of all parameters referenced by placeholder tokens.
///
/// Names are not checked against any schema.
pub fn extract_used_parameters(process_content: Option<&str>) -> HashSet<String> {
    process_content
        .map(|content| {
            RE_PLACEHOLDER
                .captures_iter(content)
                .map(|c| c[1].to_string())
                .collect()
        })
        .unwrap_or_default()
}
