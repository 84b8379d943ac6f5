//! Core contracts for Mocky.
//!
//! This crate defines the entity catalogue, generation configuration, export
//! targets, the relationship descriptor table, and dataset validation rules
//! shared by the generator and the CLI.

pub mod config;
pub mod error;
pub mod record;
pub mod relationships;
pub mod types;
pub mod validation;

pub use config::{GenerationConfig, MAX_COUNT, MIN_COUNT};
pub use error::{Error, Result};
pub use record::{Dataset, Record};
pub use relationships::{ForeignKeyField, RelationshipDescriptor, relationship_for};
pub use types::{EntityType, ExportTarget, RelationMode, SqlDialect};
pub use validation::{
    BusinessRule, CustomRule, DatasetValidation, ItemValidation, ValidationSummary, has_rules,
    validate_dataset, validate_item,
};
