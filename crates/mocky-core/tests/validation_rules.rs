use mocky_core::record::record;
use mocky_core::validation::{BusinessRule, CustomRule, apply_custom_rules, has_rules};
use mocky_core::{EntityType, Record, validate_dataset, validate_item};
use serde_json::json;

fn valid_user() -> Record {
    record([
        ("id", json!("usr_abc123xyz")),
        ("firstName", json!("Mary")),
        ("lastName", json!("Smith")),
        ("email", json!("mary.smith12@example.com")),
        ("role", json!("Editor")),
        ("isActive", json!(true)),
        ("age", json!(34)),
        ("city", json!("Chicago")),
        ("createdAt", json!("2023-04-05T06:07:08.009Z")),
        (
            "avatar",
            json!("https://api.dicebear.com/7.x/avataaars/svg?seed=MarySmith"),
        ),
    ])
}

#[test]
fn well_formed_user_passes() {
    let result = validate_item(&valid_user(), EntityType::Users);
    assert!(result.is_valid, "unexpected errors: {:?}", result.errors);
}

#[test]
fn reports_missing_and_mistyped_fields() {
    let mut user = valid_user();
    user.remove("email");
    user.insert("isActive".to_string(), json!("yes"));
    user.insert("age".to_string(), json!(12));

    let result = validate_item(&user, EntityType::Users);
    assert!(!result.is_valid);
    assert!(
        result
            .errors
            .contains(&"Missing required field: email".to_string())
    );
    assert!(
        result
            .errors
            .contains(&"Field isActive should be of type boolean".to_string())
    );
    assert!(
        result
            .errors
            .contains(&"Field age should be at least 18".to_string())
    );
}

#[test]
fn types_without_rules_are_rejected() {
    assert!(!has_rules(EntityType::Events));
    let result = validate_item(&valid_user(), EntityType::Events);
    assert_eq!(result.errors, vec!["Unknown data type: events".to_string()]);
}

#[test]
fn dataset_summary_counts_and_truncates() {
    let mut data = vec![valid_user()];
    for _ in 0..12 {
        let mut bad = valid_user();
        bad.insert("role".to_string(), json!("Pirate"));
        data.push(bad);
    }

    let validation = validate_dataset(&data, EntityType::Users);
    assert_eq!(validation.total_count, 13);
    assert_eq!(validation.valid_count, 1);
    assert_eq!(validation.invalid_count, 12);
    assert!(validation.errors[0].starts_with("Item 1: Field role should be one of"));

    let summary = validation.summary();
    assert_eq!(summary.errors.len(), 10);
    assert!(summary.has_more_errors);
    assert_eq!(summary.success_rate, 7.7);
}

#[test]
fn custom_rules_append_errors() {
    let data = vec![valid_user()];
    let rule = CustomRule::new(
        "city",
        |value, _| value.as_str() == Some("Houston"),
        "city must be Houston",
    );

    let validation = apply_custom_rules(&data, &[rule], EntityType::Users);
    assert!(!validation.is_valid);
    assert_eq!(validation.errors, vec!["Item 0: city must be Houston".to_string()]);
}

#[test]
fn business_rules_detect_conflicts() {
    let duplicate = vec![valid_user(), valid_user()];
    assert!(!BusinessRule::UniqueEmails.check(&duplicate));

    let cheap_tv = vec![record([
        ("category", json!("Electronics")),
        ("price", json!(4.5)),
    ])];
    assert!(!BusinessRule::ReasonablePricing.check(&cheap_tv));

    let young_ceo = vec![record([("role", json!("CEO")), ("age", json!(22))])];
    assert!(!BusinessRule::AgeRoleCompatibility.check(&young_ceo));
    assert!(BusinessRule::AgeRoleCompatibility.check(&[valid_user()]));
}
