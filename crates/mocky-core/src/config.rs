use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{EntityType, RelationMode};

/// Smallest record count accepted from callers.
pub const MIN_COUNT: u32 = 1;
/// Largest record count accepted from callers.
pub const MAX_COUNT: u32 = 500;

/// Configuration for a single generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Dataset type to generate.
    #[serde(rename = "type")]
    pub entity: EntityType,
    /// Number of primary records.
    pub count: u32,
    /// Generate auxiliary datasets and wire foreign keys.
    #[serde(default)]
    pub relational: bool,
    /// Output topology used when `relational` is set.
    #[serde(default)]
    pub relation_mode: RelationMode,
    /// JSON text used by the `custom` dataset type.
    #[serde(default = "default_custom_template")]
    pub custom_template: String,
    /// Optional seed for reproducible output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_custom_template() -> String {
    "{}".to_string()
}

impl GenerationConfig {
    pub fn new(entity: EntityType, count: u32) -> Self {
        Self {
            entity,
            count,
            relational: false,
            relation_mode: RelationMode::Single,
            custom_template: default_custom_template(),
            seed: None,
        }
    }

    pub fn relational(mut self, mode: RelationMode) -> Self {
        self.relational = true;
        self.relation_mode = mode;
        self
    }

    pub fn with_custom_template(mut self, template: impl Into<String>) -> Self {
        self.custom_template = template.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the caller-side invariants: count bounds and, for `custom`,
    /// a template that parses as JSON.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_COUNT..=MAX_COUNT).contains(&self.count) {
            return Err(Error::InvalidConfig(format!(
                "count must be between {MIN_COUNT} and {MAX_COUNT}, got {}",
                self.count
            )));
        }

        if self.entity == EntityType::Custom {
            serde_json::from_str::<serde_json::Value>(&self.custom_template).map_err(|err| {
                Error::InvalidConfig(format!("custom template is not valid JSON: {err}"))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_counts_outside_bounds() {
        assert!(GenerationConfig::new(EntityType::Users, 0).validate().is_err());
        assert!(GenerationConfig::new(EntityType::Users, 501).validate().is_err());
        assert!(GenerationConfig::new(EntityType::Users, 1).validate().is_ok());
        assert!(GenerationConfig::new(EntityType::Users, 500).validate().is_ok());
    }

    #[test]
    fn custom_template_must_parse() {
        let config = GenerationConfig::new(EntityType::Custom, 3).with_custom_template("{nope");
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        // Non-custom types ignore the template text.
        let config = GenerationConfig::new(EntityType::Users, 3).with_custom_template("{nope");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserializes_camel_case_fields() {
        let config: GenerationConfig = serde_json::from_str(
            r#"{"type":"comments","count":10,"relational":true,"relationMode":"multi"}"#,
        )
        .expect("parse config");
        assert_eq!(config.entity, EntityType::Comments);
        assert_eq!(config.relation_mode, RelationMode::Multi);
        assert_eq!(config.custom_template, "{}");
        assert_eq!(config.seed, None);
    }
}
