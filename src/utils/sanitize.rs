use serde_json::Value;

/// Strips HTML tags from a string, keeping the surrounding text.
///
/// No tags are allowed at all; a `<` that is never closed swallows the rest
/// of the input, matching the strictest setting of the sanitizer the API
/// always ran with.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;

    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }

    out
}

/// Recursively strips HTML from every string in a JSON payload.
///
/// Non-string leaves (numbers, booleans, null) pass through untouched.
pub fn sanitize_value(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(strip_tags(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize_value).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, sanitize_value(v)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_tags_removes_markup() {
        assert_eq!(strip_tags("<script>alert(1)</script>hola"), "alert(1)hola");
        assert_eq!(strip_tags("<b>John</b> Doe"), "John Doe");
    }

    #[test]
    fn test_strip_tags_plain_text_unchanged() {
        assert_eq!(strip_tags("John Doe"), "John Doe");
        assert_eq!(strip_tags(""), "");
    }

    #[test]
    fn test_strip_tags_unclosed_tag() {
        assert_eq!(strip_tags("hola <img src=x"), "hola ");
    }

    #[test]
    fn test_sanitize_value_nested() {
        let input = json!({
            "name": "<i>Jane</i>",
            "count": 3,
            "active": true,
            "tags": ["<a>uno</a>", "dos"],
            "nested": { "email": "jane@<b>mail</b>.com" }
        });

        let sanitized = sanitize_value(input);

        assert_eq!(sanitized["name"], "Jane");
        assert_eq!(sanitized["count"], 3);
        assert_eq!(sanitized["active"], true);
        assert_eq!(sanitized["tags"][0], "uno");
        assert_eq!(sanitized["tags"][1], "dos");
        assert_eq!(sanitized["nested"]["email"], "jane@mail.com");
    }

    #[test]
    fn test_sanitize_value_null_passthrough() {
        assert_eq!(sanitize_value(json!(null)), json!(null));
    }
}
