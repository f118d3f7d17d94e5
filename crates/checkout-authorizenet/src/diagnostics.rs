//! # Server Diagnostic Extraction
//!
//! Best-effort parsing of the diagnostic messages the backend attaches
//! to unhandled failures.
//!
//! The framework serializes diagnostics as a JSON-encoded list under
//! `_server_messages`; each entry is either a bare string or a
//! JSON-encoded object carrying a `message` field. Anything that does
//! not parse is surfaced verbatim rather than dropped.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct FailureBody {
    #[serde(rename = "_server_messages")]
    server_messages: Option<String>,
    exc_type: Option<String>,
}

/// Extract human-readable diagnostic messages from a raw failure body.
///
/// Returns an empty list when the body carries no recognizable
/// diagnostics; the caller decides what to fall back to.
pub fn extract_server_messages(body: &str) -> Vec<String> {
    let parsed: FailureBody = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) => return Vec::new(),
    };

    let mut messages = Vec::new();

    if let Some(raw_list) = parsed.server_messages {
        match serde_json::from_str::<Vec<String>>(&raw_list) {
            Ok(entries) => {
                for entry in entries {
                    messages.push(humanize_entry(&entry));
                }
            }
            // The list itself is mangled; keep it verbatim
            Err(_) => messages.push(raw_list),
        }
    }

    if messages.is_empty() {
        if let Some(exc_type) = parsed.exc_type {
            messages.push(format!("Server Error: {}", exc_type));
        }
    }

    messages
}

/// Convert one diagnostic entry to a user-facing string.
///
/// Entries wrapping a `message` field become "Server Error: <message>";
/// everything else is included verbatim.
fn humanize_entry(entry: &str) -> String {
    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(entry) {
        if let Some(message) = obj.get("message").and_then(|m| m.as_str()) {
            return format!("Server Error: {}", message);
        }
    }
    entry.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_object_entries() {
        let body = r#"{
            "exc": "Traceback...",
            "_server_messages": "[\"{\\\"message\\\": \\\"Card number invalid\\\"}\"]"
        }"#;

        let messages = extract_server_messages(body);
        assert_eq!(messages, vec!["Server Error: Card number invalid".to_string()]);
    }

    #[test]
    fn test_bare_string_entry_kept_verbatim() {
        let body = r#"{"_server_messages": "[\"something went sideways\"]"}"#;

        let messages = extract_server_messages(body);
        assert_eq!(messages, vec!["something went sideways".to_string()]);
    }

    #[test]
    fn test_mixed_entries() {
        let body = r#"{
            "_server_messages": "[\"{\\\"message\\\": \\\"Gateway rejected\\\"}\", \"raw text\"]"
        }"#;

        let messages = extract_server_messages(body);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], "Server Error: Gateway rejected");
        assert_eq!(messages[1], "raw text");
    }

    #[test]
    fn test_mangled_list_kept_verbatim() {
        let body = r#"{"_server_messages": "not a json list"}"#;

        let messages = extract_server_messages(body);
        assert_eq!(messages, vec!["not a json list".to_string()]);
    }

    #[test]
    fn test_exc_type_fallback() {
        let body = r#"{"exc_type": "ValidationError"}"#;

        let messages = extract_server_messages(body);
        assert_eq!(messages, vec!["Server Error: ValidationError".to_string()]);
    }

    #[test]
    fn test_unparsable_body_yields_nothing() {
        assert!(extract_server_messages("<html>502 Bad Gateway</html>").is_empty());
        assert!(extract_server_messages("").is_empty());
    }

    #[test]
    fn test_object_without_message_field_kept_verbatim() {
        let body = r#"{"_server_messages": "[\"{\\\"title\\\": \\\"no message key\\\"}\"]"}"#;

        let messages = extract_server_messages(body);
        assert_eq!(messages, vec![r#"{"title": "no message key"}"#.to_string()]);
    }
}
