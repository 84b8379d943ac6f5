//! Mock data generation engine for Mocky.
//!
//! This crate turns a [`mocky_core::GenerationConfig`] into generated records,
//! resolves auxiliary datasets for relational output, shapes the result into
//! the requested topology, and serializes it into the supported text formats.

pub mod engine;
pub mod errors;
pub mod foreign;
pub mod generators;
pub mod model;
pub mod output;
pub mod planner;
pub mod randomizer;
pub mod shaper;

pub use engine::{GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use model::{Collection, CollectionReport, GenerateOptions, GeneratedOutput, GenerationReport};
pub use output::{ExportOptions, export};
