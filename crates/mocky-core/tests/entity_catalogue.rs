use mocky_core::types::singularize;
use mocky_core::{EntityType, ExportTarget, RelationMode, SqlDialect, relationship_for};

#[test]
fn entity_tags_round_trip_through_from_str() {
    for entity in EntityType::ALL {
        let parsed: EntityType = entity.as_str().parse().expect("parse entity");
        assert_eq!(parsed, entity);
    }
    assert!("widgets".parse::<EntityType>().is_err());
}

#[test]
fn entity_serializes_as_lowercase_tag() {
    let json = serde_json::to_string(&EntityType::Transactions).expect("serialize");
    assert_eq!(json, "\"transactions\"");
}

#[test]
fn singular_strips_one_trailing_s() {
    assert_eq!(EntityType::Users.singular(), "user");
    assert_eq!(EntityType::Posts.singular(), "post");
    assert_eq!(EntityType::Addresses.singular(), "addresse");
    assert_eq!(singularize("data"), "data");
}

#[test]
fn export_targets_accept_aliases() {
    assert_eq!(
        "ts".parse::<ExportTarget>().expect("alias"),
        ExportTarget::TypescriptInterface
    );
    assert_eq!(
        "mysql-dump".parse::<ExportTarget>().expect("dump"),
        ExportTarget::MysqlDump
    );
    assert!(ExportTarget::SqlInsert.is_sql());
    assert!(!ExportTarget::Csv.is_sql());
}

#[test]
fn dialect_and_mode_parse() {
    assert_eq!(
        "postgres".parse::<SqlDialect>().expect("dialect"),
        SqlDialect::Postgresql
    );
    assert_eq!(
        "NESTED".parse::<RelationMode>().expect("mode"),
        RelationMode::Nested
    );
}

#[test]
fn comments_depend_on_users_and_posts() {
    let descriptor = relationship_for(EntityType::Comments);
    assert_eq!(descriptor.requires, &[EntityType::Users, EntityType::Posts]);
    assert_eq!(descriptor.ratio, 5);
    assert!(!relationship_for(EntityType::Users).has_dependencies());
}
