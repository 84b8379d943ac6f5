use std::time::Instant;

use chrono::Utc;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use mocky_core::{Dataset, GenerationConfig};

use crate::errors::GenerationError;
use crate::foreign::InMemoryForeignContext;
use crate::generators::{GeneratorContext, generate_dataset};
use crate::model::{Collection, GenerateOptions, GeneratedOutput, GenerationReport};
use crate::planner::plan_auxiliary;
use crate::shaper::shape;

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub output: GeneratedOutput,
    pub report: GenerationReport,
}

/// Entry point for generating mock datasets.
///
/// The engine holds no mutable state; each call owns its random source, so a
/// shared engine can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    /// Validate `config` before generating.
    pub fn generate_checked(
        &self,
        config: &GenerationConfig,
    ) -> Result<GenerationResult, GenerationError> {
        config.validate().map_err(|err| match err {
            mocky_core::Error::InvalidConfig(message) => GenerationError::InvalidConfig(message),
            other => GenerationError::Core(other),
        })?;
        Ok(self.generate(config))
    }

    /// Generate without validating bounds: a zero count yields an empty
    /// dataset, and a malformed custom template yields an error record.
    pub fn generate(&self, config: &GenerationConfig) -> GenerationResult {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        self.generate_with_rng(config, &mut rng)
    }

    /// Generate drawing every random value from `rng`.
    pub fn generate_with_rng(
        &self,
        config: &GenerationConfig,
        rng: &mut dyn RngCore,
    ) -> GenerationResult {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let now = self.options.now.unwrap_or_else(Utc::now);
        let entity = config.entity;
        let count = config.count as usize;

        let mut report = GenerationReport::new(run_id.clone(), entity, u64::from(config.count));
        report.relational = config.relational;
        report.relation_mode = config.relation_mode;
        report.seed = config.seed;

        info!(
            run_id = %run_id,
            entity = %entity,
            count,
            relational = config.relational,
            mode = %config.relation_mode,
            seed = config.seed,
            "generation started"
        );

        let tasks = if config.relational {
            plan_auxiliary(entity, count)
        } else {
            Vec::new()
        };

        // Auxiliary datasets go through the plain path: no pools, no nesting.
        let plain = InMemoryForeignContext::new();
        let plain_ctx = GeneratorContext {
            now,
            foreign: &plain,
            custom_template: &config.custom_template,
        };

        let mut foreign = InMemoryForeignContext::new();
        let mut auxiliary = Vec::with_capacity(tasks.len());
        for task in &tasks {
            let records = generate_dataset(task.entity, task.count, &plain_ctx, rng);
            debug!(
                run_id = %run_id,
                entity = %task.entity,
                records = records.len(),
                "auxiliary dataset generated"
            );
            foreign.ingest(task.entity, &records);
            auxiliary.push(Collection {
                entity: task.entity,
                records,
            });
        }

        let ctx = GeneratorContext {
            now,
            foreign: &foreign,
            custom_template: &config.custom_template,
        };
        let primary: Dataset = generate_dataset(entity, count, &ctx, rng);
        report.record_collection(entity, primary.len(), false);
        for collection in &auxiliary {
            report.record_collection(collection.entity, collection.records.len(), true);
        }

        let output = if auxiliary.is_empty() {
            GeneratedOutput::Records(primary)
        } else {
            shape(config.relation_mode, entity, &primary, &auxiliary, &foreign)
        };

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            run_id = %run_id,
            entity = %entity,
            records = report.total_records(),
            duration_ms = report.duration_ms,
            "generation completed"
        );

        GenerationResult { output, report }
    }
}
