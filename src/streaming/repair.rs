//! Best-effort decoding of bodies holding several JSON objects.
//!
//! Some responses arrive as objects separated by newlines with no enclosing
//! array. This is a heuristic, not a JSON-lines parser.

use serde_json::Value;

/// Parse `text` as one JSON document, or as newline-separated objects.
///
/// The direct parse is tried first. If it fails, every `}\n{` boundary is
/// rewritten to `},{` and the whole text is wrapped in `[...]` before a
/// second parse. Objects split over several lines, or separated by anything
/// other than a single newline, are not repaired.
///
/// # Errors
///
/// Returns the error from the second parse if both attempts fail.
///
/// # Example
///
/// ```
/// use anthropic_http::streaming::parse_concatenated_objects;
/// use serde_json::json;
///
/// let value = parse_concatenated_objects("{\"a\":1}\n{\"b\":2}").unwrap();
/// assert_eq!(value, json!([{"a": 1}, {"b": 2}]));
/// ```
pub fn parse_concatenated_objects(text: &str) -> Result<Value, serde_json::Error> {
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }

    let repaired = format!("[{}]", text.replace("}\n{", "},{"));
    serde_json::from_str(&repaired)
}
