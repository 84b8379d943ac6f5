use serde_json::Value;

use mocky_core::Record;

/// TypeScript interface describing the first record.
///
/// Only the first record is sampled; later records with other fields or
/// types are not reconciled.
pub fn to_interface(records: &[Record], name: &str) -> String {
    let Some(sample) = records.first() else {
        return String::new();
    };

    let mut ts = format!("export interface {name} {{\n");
    for (key, value) in sample {
        ts.push_str(&format!("  {}: {};\n", property_name(key), infer_type(value)));
    }
    ts.push_str("}\n");
    ts
}

/// TypeScript type for a JSON value. Arrays use their first element.
pub fn infer_type(value: &Value) -> String {
    match value {
        Value::Null => "any".to_string(),
        Value::Array(items) => match items.first() {
            Some(first) => format!("{}[]", infer_type(first)),
            None => "any[]".to_string(),
        },
        Value::Object(_) => "object".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::Bool(_) => "boolean".to_string(),
    }
}

fn property_name(key: &str) -> String {
    let mut chars = key.chars();
    let valid = match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '$')
        }
        _ => false,
    };
    if valid {
        key.to_string()
    } else {
        Value::String(key.to_string()).to_string()
    }
}
