use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use mocky_core::{Dataset, EntityType, Record, RelationMode};

/// Options for the generation engine.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Fixed reference instant; `None` uses the current time on each call.
    pub now: Option<DateTime<Utc>>,
}

/// One named dataset in a multi-collection result.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub entity: EntityType,
    pub records: Dataset,
}

/// Shaped result of a generation request.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedOutput {
    /// A single dataset (non-relational, `single` or `nested` mode).
    Records(Dataset),
    /// Primary dataset first, then each auxiliary dataset.
    Collections(Vec<Collection>),
}

impl GeneratedOutput {
    /// The primary dataset: the only one, or the first collection.
    pub fn primary(&self) -> &[Record] {
        match self {
            GeneratedOutput::Records(records) => records,
            GeneratedOutput::Collections(collections) => collections
                .first()
                .map(|collection| collection.records.as_slice())
                .unwrap_or_default(),
        }
    }

    pub fn collection(&self, entity: EntityType) -> Option<&[Record]> {
        match self {
            GeneratedOutput::Records(_) => None,
            GeneratedOutput::Collections(collections) => collections
                .iter()
                .find(|collection| collection.entity == entity)
                .map(|collection| collection.records.as_slice()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            GeneratedOutput::Records(records) => records.is_empty(),
            GeneratedOutput::Collections(collections) => collections
                .iter()
                .all(|collection| collection.records.is_empty()),
        }
    }

    /// JSON view: an array of records, or an object of named arrays.
    pub fn to_value(&self) -> Value {
        match self {
            GeneratedOutput::Records(records) => dataset_value(records),
            GeneratedOutput::Collections(collections) => {
                let map: Map<String, Value> = collections
                    .iter()
                    .map(|collection| {
                        (
                            collection.entity.as_str().to_string(),
                            dataset_value(&collection.records),
                        )
                    })
                    .collect();
                Value::Object(map)
            }
        }
    }
}

fn dataset_value(records: &[Record]) -> Value {
    Value::Array(records.iter().cloned().map(Value::Object).collect())
}

impl Serialize for GeneratedOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GeneratedOutput::Records(records) => records.serialize(serializer),
            GeneratedOutput::Collections(collections) => {
                let mut map = serializer.serialize_map(Some(collections.len()))?;
                for collection in collections {
                    map.serialize_entry(collection.entity.as_str(), &collection.records)?;
                }
                map.end()
            }
        }
    }
}

/// Size of one dataset produced by a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionReport {
    pub entity: EntityType,
    pub records: u64,
    pub auxiliary: bool,
}

/// Summary of a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub entity: EntityType,
    pub rows_requested: u64,
    pub relational: bool,
    pub relation_mode: RelationMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub collections: Vec<CollectionReport>,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, entity: EntityType, rows_requested: u64) -> Self {
        Self {
            run_id,
            entity,
            rows_requested,
            relational: false,
            relation_mode: RelationMode::Single,
            seed: None,
            collections: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn record_collection(&mut self, entity: EntityType, records: usize, auxiliary: bool) {
        self.collections.push(CollectionReport {
            entity,
            records: records as u64,
            auxiliary,
        });
    }

    /// Records generated across all datasets.
    pub fn total_records(&self) -> u64 {
        self.collections.iter().map(|c| c.records).sum()
    }
}
