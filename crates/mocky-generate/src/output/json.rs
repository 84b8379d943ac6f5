use crate::model::GeneratedOutput;

/// Pretty-printed JSON with two-space indentation and source key order.
pub fn to_json(output: &GeneratedOutput) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(output)
}
