use serde_json::Value;

use mocky_core::{EntityType, Record, RelationMode, relationship_for};

use crate::foreign::ForeignContext;
use crate::model::{Collection, GeneratedOutput};

/// Reshape the primary dataset and its auxiliary datasets into `mode`.
///
/// Inputs are never modified; nested mode works on copies of the primary
/// records.
pub fn shape(
    mode: RelationMode,
    entity: EntityType,
    primary: &[Record],
    auxiliary: &[Collection],
    foreign: &dyn ForeignContext,
) -> GeneratedOutput {
    match mode {
        RelationMode::Single => GeneratedOutput::Records(primary.to_vec()),
        RelationMode::Nested => GeneratedOutput::Records(
            primary
                .iter()
                .map(|record| embed_parents(entity, record, foreign))
                .collect(),
        ),
        RelationMode::Multi => {
            let mut collections = Vec::with_capacity(auxiliary.len() + 1);
            collections.push(Collection {
                entity,
                records: primary.to_vec(),
            });
            collections.extend(auxiliary.iter().cloned());
            GeneratedOutput::Collections(collections)
        }
    }
}

/// Copy of `record` with each referenced record embedded under the singular
/// name of its type. Unresolved references leave the key absent.
fn embed_parents(entity: EntityType, record: &Record, foreign: &dyn ForeignContext) -> Record {
    let mut shaped = record.clone();
    for fk in relationship_for(entity).foreign_keys {
        let parent = record
            .get(fk.field)
            .and_then(Value::as_str)
            .and_then(|id| foreign.lookup_parent(fk.references, id));
        if let Some(parent) = parent {
            shaped.insert(
                fk.references.singular().to_string(),
                Value::Object(parent.clone()),
            );
        }
    }
    shaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foreign::InMemoryForeignContext;
    use mocky_core::record::record;
    use serde_json::json;

    fn fixtures() -> (Vec<Record>, Vec<Collection>, InMemoryForeignContext) {
        let users = vec![record([("id", json!("usr_1")), ("firstName", json!("Ann"))])];
        let posts = vec![
            record([("id", json!("post_1")), ("authorId", json!("usr_1"))]),
            record([("id", json!("post_2")), ("authorId", json!("usr_missing"))]),
        ];
        let mut foreign = InMemoryForeignContext::new();
        foreign.ingest(EntityType::Users, &users);
        let auxiliary = vec![Collection {
            entity: EntityType::Users,
            records: users,
        }];
        (posts, auxiliary, foreign)
    }

    #[test]
    fn nested_embeds_matches_and_omits_misses() {
        let (posts, auxiliary, foreign) = fixtures();
        let shaped = shape(
            RelationMode::Nested,
            EntityType::Posts,
            &posts,
            &auxiliary,
            &foreign,
        );

        let records = shaped.primary();
        assert_eq!(records[0]["user"]["id"], json!("usr_1"));
        assert!(!records[1].contains_key("user"));
        // Source records are untouched.
        assert!(!posts[0].contains_key("user"));
    }

    #[test]
    fn multi_lists_primary_first() {
        let (posts, auxiliary, foreign) = fixtures();
        let shaped = shape(
            RelationMode::Multi,
            EntityType::Posts,
            &posts,
            &auxiliary,
            &foreign,
        );

        let value = shaped.to_value();
        let keys: Vec<&str> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["posts", "users"]);
    }

    #[test]
    fn single_returns_primary_unchanged() {
        let (posts, auxiliary, foreign) = fixtures();
        let shaped = shape(
            RelationMode::Single,
            EntityType::Posts,
            &posts,
            &auxiliary,
            &foreign,
        );
        assert_eq!(shaped, GeneratedOutput::Records(posts));
    }
}
