//! Diff generation for audit logging

use serde_json::Value;

/// Longest string value shown verbatim in a diff
const MAX_VALUE_CHARS: usize = 50;

/// Generate a human-readable diff between two JSON values
///
/// Only top-level fields are compared; nested values are summarised.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        key,
                        format_value(before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            if changes.is_empty() {
                None
            } else {
                Some(changes.join(", "))
            }
        }
        _ if before != after => Some(format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )),
        _ => None,
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > MAX_VALUE_CHARS => {
            let head: String = s.chars().take(MAX_VALUE_CHARS - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_field() {
        let before = json!({"name": "Quick Eats", "phone": null});
        let after = json!({"name": "Quick Eats Cafe", "phone": null});

        assert_eq!(
            generate_diff(&before, &after).unwrap(),
            "name: \"Quick Eats\" -> \"Quick Eats Cafe\""
        );
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"notes": "old"});
        let after = json!({"amount": 3500});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("notes: \"old\" -> (removed)"));
        assert!(diff.contains("amount: (added) -> 3500"));
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"amount": 5500});
        assert!(generate_diff(&value, &value).is_none());
    }

    #[test]
    fn test_long_multibyte_string_is_truncated() {
        let long = "₹".repeat(80);
        let diff = generate_diff(&json!({"d": ""}), &json!({"d": long})).unwrap();
        assert!(diff.ends_with("...\""));
    }
}
