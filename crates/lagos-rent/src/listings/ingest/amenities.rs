use serde_json::Value;

/// Normalizes whatever the backend sent for `amenities` into a clean list.
///
/// Accepted shapes: a list of strings, a list holding one JSON-encoded list,
/// a list holding one comma-joined string, or a bare string in either form.
/// Anything else yields an empty list.
pub fn normalize_amenities(raw: &Value) -> Vec<String> {
    let items = match raw {
        Value::Array(values) => {
            let strings: Vec<&str> = values.iter().filter_map(Value::as_str).collect();
            match strings.as_slice() {
                [single] => split_encoded(single),
                _ => strings.into_iter().map(str::to_string).collect(),
            }
        }
        Value::String(text) => split_encoded(text),
        _ => Vec::new(),
    };

    dedupe(items)
}

/// Same normalization for amenities that arrive as plain text (CSV cells).
pub fn normalize_amenity_text(raw: &str) -> Vec<String> {
    dedupe(split_encoded(raw))
}

fn split_encoded(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        if let Ok(Value::Array(values)) = serde_json::from_str::<Value>(trimmed) {
            return values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
        }
    }

    trimmed.split(',').map(str::to_string).collect()
}

fn dedupe(items: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let amenity = clean(&item);
        if amenity.is_empty() || cleaned.contains(&amenity) {
            continue;
        }
        cleaned.push(amenity);
    }
    cleaned
}

fn clean(item: &str) -> String {
    item.trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '[' | ']'))
        .trim()
        .to_lowercase()
}
