//! User-supplied template expansion.
//!
//! The template is parsed once per call:
//! - invalid JSON yields a single `{"error": ...}` record;
//! - an array is returned entry by entry and `count` is ignored; object
//!   entries are kept as they are, any other entry becomes `{value}` since
//!   every record is a field mapping;
//! - an object is copied `count` times, each copy getting a fresh `id`;
//! - any other value is wrapped as `{id, value}`, `count` times.

use rand::RngCore;
use serde_json::{Value, json};
use tracing::warn;

use mocky_core::record::record;
use mocky_core::{Dataset, EntityType, Record};

use crate::randomizer::random_id;

pub const INVALID_TEMPLATE_MESSAGE: &str = "Invalid JSON template";

pub fn generate(count: usize, template: &str, rng: &mut dyn RngCore) -> Dataset {
    let parsed: Value = match serde_json::from_str(template) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "custom template is not valid JSON");
            return vec![record([("error", json!(INVALID_TEMPLATE_MESSAGE))])];
        }
    };

    let prefix = EntityType::Custom.id_prefix();
    match parsed {
        Value::Array(items) => items.into_iter().map(array_item).collect(),
        Value::Object(template) => (0..count)
            .map(|_| {
                let mut copy = Record::new();
                copy.insert("id".to_string(), json!(random_id(rng, prefix)));
                for (key, value) in &template {
                    if key != "id" {
                        copy.insert(key.clone(), value.clone());
                    }
                }
                copy
            })
            .collect(),
        primitive => (0..count)
            .map(|_| {
                record([
                    ("id", json!(random_id(rng, prefix))),
                    ("value", primitive.clone()),
                ])
            })
            .collect(),
    }
}

/// Objects pass through untouched; scalars, nulls and nested arrays are
/// wrapped as `{"value": entry}` without an `id`.
fn array_item(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => record([("value", other)]),
    }
}
