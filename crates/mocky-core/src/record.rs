use serde_json::{Map, Value};

/// A generated record: field name to JSON value, in insertion order.
pub type Record = Map<String, Value>;

/// Ordered sequence of records of one entity type.
pub type Dataset = Vec<Record>;

/// Build a record from `(field, value)` pairs, keeping their order.
pub fn record<I>(fields: I) -> Record
where
    I: IntoIterator<Item = (&'static str, Value)>,
{
    fields
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Value of the `id` field when it is a string.
pub fn record_id(record: &Record) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}
