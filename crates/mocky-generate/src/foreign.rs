use std::collections::{BTreeMap, HashMap};

use rand::RngCore;

use mocky_core::record::record_id;
use mocky_core::{EntityType, Record};

use crate::randomizer::{random_choice, random_id};

/// Source of foreign-key values and referenced records.
pub trait ForeignContext {
    /// Draw an id referencing `references`; falls back to a freestanding id
    /// with the entity's prefix when no pool is available.
    fn pick_fk(&self, references: EntityType, rng: &mut dyn RngCore) -> String;
    /// Find the record of type `references` whose `id` equals `id`.
    fn lookup_parent(&self, references: EntityType, id: &str) -> Option<&Record>;
}

/// Foreign-key pools backed by generated auxiliary datasets.
#[derive(Debug, Default)]
pub struct InMemoryForeignContext {
    ids: BTreeMap<EntityType, Vec<String>>,
    rows_by_id: BTreeMap<EntityType, HashMap<String, Record>>,
}

impl InMemoryForeignContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generated dataset as the pool for `entity`.
    pub fn ingest(&mut self, entity: EntityType, rows: &[Record]) {
        let mut ids = Vec::with_capacity(rows.len());
        let mut row_map = HashMap::with_capacity(rows.len());

        for row in rows {
            if let Some(id) = record_id(row) {
                ids.push(id.to_string());
                row_map.insert(id.to_string(), row.clone());
            }
        }

        self.ids.insert(entity, ids);
        self.rows_by_id.insert(entity, row_map);
    }

    pub fn pool(&self, entity: EntityType) -> &[String] {
        self.ids.get(&entity).map(Vec::as_slice).unwrap_or_default()
    }
}

impl ForeignContext for InMemoryForeignContext {
    fn pick_fk(&self, references: EntityType, rng: &mut dyn RngCore) -> String {
        match random_choice(rng, self.pool(references)) {
            Some(id) => id.clone(),
            None => random_id(rng, references.id_prefix()),
        }
    }

    fn lookup_parent(&self, references: EntityType, id: &str) -> Option<&Record> {
        self.rows_by_id.get(&references)?.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mocky_core::record::record;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use serde_json::json;

    #[test]
    fn empty_pool_synthesizes_prefixed_ids() {
        let context = InMemoryForeignContext::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let id = context.pick_fk(EntityType::Posts, &mut rng);
        assert!(id.starts_with("post_"));
    }

    #[test]
    fn picks_come_from_ingested_pool() {
        let mut context = InMemoryForeignContext::new();
        let rows = vec![
            record([("id", json!("usr_a")), ("firstName", json!("Ann"))]),
            record([("id", json!("usr_b")), ("firstName", json!("Bob"))]),
        ];
        context.ingest(EntityType::Users, &rows);

        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..20 {
            let id = context.pick_fk(EntityType::Users, &mut rng);
            assert!(id == "usr_a" || id == "usr_b");
        }

        let parent = context
            .lookup_parent(EntityType::Users, "usr_b")
            .expect("parent exists");
        assert_eq!(parent.get("firstName"), Some(&json!("Bob")));
        assert!(context.lookup_parent(EntityType::Users, "usr_z").is_none());
    }
}
