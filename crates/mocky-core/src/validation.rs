use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::record::Record;
use crate::types::EntityType;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const ISO_TIMESTAMP_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z$";
const SUMMARY_ERROR_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    String,
    Number,
    Boolean,
}

impl FieldKind {
    fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
        }
    }
}

#[derive(Debug)]
struct FieldRule {
    field: &'static str,
    kind: FieldKind,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Regex>,
    allowed: &'static [&'static str],
    min: Option<f64>,
    max: Option<f64>,
}

impl FieldRule {
    fn new(field: &'static str, kind: FieldKind) -> Self {
        Self {
            field,
            kind,
            min_length: None,
            max_length: None,
            pattern: None,
            allowed: &[],
            min: None,
            max: None,
        }
    }

    fn length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    fn pattern(mut self, pattern: &str) -> Self {
        self.pattern = Regex::new(pattern).ok();
        self
    }

    fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = allowed;
        self
    }

    fn range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    fn check(&self, value: &Value, errors: &mut Vec<String>) {
        let field = self.field;
        if !self.kind.matches(value) {
            errors.push(format!(
                "Field {field} should be of type {}",
                self.kind.name()
            ));
            return;
        }

        if let Some(text) = value.as_str() {
            let length = text.chars().count();
            if let Some(min) = self.min_length.filter(|min| length < *min) {
                errors.push(format!("Field {field} should be at least {min} characters"));
            }
            if let Some(max) = self.max_length.filter(|max| length > *max) {
                errors.push(format!("Field {field} should be at most {max} characters"));
            }
            if let Some(pattern) = &self.pattern {
                if !pattern.is_match(text) {
                    errors.push(format!("Field {field} does not match expected format"));
                }
            }
            if !self.allowed.is_empty() && !self.allowed.contains(&text) {
                errors.push(format!(
                    "Field {field} should be one of: {}",
                    self.allowed.join(", ")
                ));
            }
        }

        if let Some(number) = value.as_f64() {
            if let Some(min) = self.min.filter(|min| number < *min) {
                errors.push(format!("Field {field} should be at least {min}"));
            }
            if let Some(max) = self.max.filter(|max| number > *max) {
                errors.push(format!("Field {field} should be at most {max}"));
            }
        }
    }
}

#[derive(Debug)]
struct TypeRules {
    required_fields: &'static [&'static str],
    field_rules: Vec<FieldRule>,
}

const USER_ROLES: &[&str] = &[
    "Admin",
    "User",
    "Editor",
    "Viewer",
    "Moderator",
    "Manager",
    "Supervisor",
    "Director",
    "CEO",
    "CTO",
    "Developer",
    "Designer",
    "Analyst",
    "Coordinator",
];

const PRODUCT_CATEGORIES: &[&str] = &[
    "Electronics",
    "Home",
    "Clothing",
    "Sports",
    "Food",
    "Beauty",
    "Automotive",
    "Books",
    "Home & Kitchen",
    "Sports & Outdoors",
    "Books & Media",
    "Beauty & Personal Care",
    "Office Supplies",
];

fn rules() -> &'static BTreeMap<EntityType, TypeRules> {
    static RULES: OnceLock<BTreeMap<EntityType, TypeRules>> = OnceLock::new();
    RULES.get_or_init(|| {
        let mut rules = BTreeMap::new();
        rules.insert(
            EntityType::Users,
            TypeRules {
                required_fields: &["id", "firstName", "lastName", "email", "role", "isActive"],
                field_rules: vec![
                    FieldRule::new("id", FieldKind::String).pattern(r"^usr_[a-z0-9]+$"),
                    FieldRule::new("firstName", FieldKind::String).length(Some(1), Some(50)),
                    FieldRule::new("lastName", FieldKind::String).length(Some(1), Some(50)),
                    FieldRule::new("email", FieldKind::String).pattern(EMAIL_PATTERN),
                    FieldRule::new("role", FieldKind::String).one_of(USER_ROLES),
                    FieldRule::new("isActive", FieldKind::Boolean),
                    FieldRule::new("age", FieldKind::Number).range(Some(18.0), Some(100.0)),
                    FieldRule::new("city", FieldKind::String).length(None, Some(100)),
                    FieldRule::new("createdAt", FieldKind::String).pattern(ISO_TIMESTAMP_PATTERN),
                    FieldRule::new("avatar", FieldKind::String)
                        .pattern(r"^https://api\.dicebear\.com/.*$"),
                ],
            },
        );
        rules.insert(
            EntityType::Products,
            TypeRules {
                required_fields: &["id", "name", "price", "category", "inStock"],
                field_rules: vec![
                    FieldRule::new("id", FieldKind::String).pattern(r"^prod_[a-z0-9]+$"),
                    FieldRule::new("name", FieldKind::String).length(Some(1), Some(200)),
                    FieldRule::new("price", FieldKind::Number).range(Some(0.0), Some(100000.0)),
                    FieldRule::new("category", FieldKind::String).one_of(PRODUCT_CATEGORIES),
                    FieldRule::new("inStock", FieldKind::Boolean),
                    FieldRule::new("stockCount", FieldKind::Number).range(Some(0.0), Some(10000.0)),
                    FieldRule::new("rating", FieldKind::Number).range(Some(1.0), Some(5.0)),
                    FieldRule::new("reviewsCount", FieldKind::Number)
                        .range(Some(0.0), Some(100000.0)),
                    FieldRule::new("brand", FieldKind::String).length(None, Some(100)),
                    FieldRule::new("color", FieldKind::String).length(None, Some(50)),
                    FieldRule::new("weight", FieldKind::Number).range(Some(0.0), Some(1000.0)),
                ],
            },
        );
        rules
    })
}

/// Whether validation rules exist for the entity type.
pub fn has_rules(entity: EntityType) -> bool {
    rules().contains_key(&entity)
}

/// Validation outcome for a single record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemValidation {
    pub index: usize,
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Validation outcome for a whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub total_count: usize,
    pub details: Vec<ItemValidation>,
}

/// Condensed report derived from a [`DatasetValidation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub is_valid: bool,
    pub total_items: usize,
    pub valid_items: usize,
    pub invalid_items: usize,
    /// Percentage of valid items, rounded to one decimal.
    pub success_rate: f64,
    pub errors: Vec<String>,
    pub has_more_errors: bool,
}

/// Validate one record against the rules of its entity type.
pub fn validate_item(item: &Record, entity: EntityType) -> ItemValidation {
    let Some(type_rules) = rules().get(&entity) else {
        return ItemValidation {
            index: 0,
            is_valid: false,
            errors: vec![format!("Unknown data type: {entity}")],
        };
    };

    let mut errors = Vec::new();
    for field in type_rules.required_fields {
        if item.get(*field).is_none_or(Value::is_null) {
            errors.push(format!("Missing required field: {field}"));
        }
    }

    for rule in &type_rules.field_rules {
        if let Some(value) = item.get(rule.field) {
            rule.check(value, &mut errors);
        }
    }

    ItemValidation {
        index: 0,
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Validate every record of a dataset.
pub fn validate_dataset(data: &[Record], entity: EntityType) -> DatasetValidation {
    let details: Vec<ItemValidation> = data
        .iter()
        .enumerate()
        .map(|(index, item)| ItemValidation {
            index,
            ..validate_item(item, entity)
        })
        .collect();

    let valid_count = details.iter().filter(|detail| detail.is_valid).count();
    let invalid_count = details.len() - valid_count;
    let errors = details
        .iter()
        .filter(|detail| !detail.is_valid)
        .flat_map(|detail| {
            detail
                .errors
                .iter()
                .map(move |error| format!("Item {}: {error}", detail.index))
        })
        .collect();

    DatasetValidation {
        is_valid: invalid_count == 0,
        errors,
        valid_count,
        invalid_count,
        total_count: data.len(),
        details,
    }
}

impl DatasetValidation {
    pub fn summary(&self) -> ValidationSummary {
        let success_rate = if self.total_count > 0 {
            let rate = self.valid_count as f64 / self.total_count as f64 * 100.0;
            (rate * 10.0).round() / 10.0
        } else {
            0.0
        };

        ValidationSummary {
            is_valid: self.is_valid,
            total_items: self.total_count,
            valid_items: self.valid_count,
            invalid_items: self.invalid_count,
            success_rate,
            errors: self
                .errors
                .iter()
                .take(SUMMARY_ERROR_LIMIT)
                .cloned()
                .collect(),
            has_more_errors: self.errors.len() > SUMMARY_ERROR_LIMIT,
        }
    }
}

/// Caller-supplied predicate over one field of each record.
pub struct CustomRule {
    pub field_name: String,
    pub error_message: String,
    validator: Box<dyn Fn(&Value, &Record) -> bool + Send + Sync>,
}

impl CustomRule {
    pub fn new<F>(field_name: impl Into<String>, validator: F, error_message: impl Into<String>) -> Self
    where
        F: Fn(&Value, &Record) -> bool + Send + Sync + 'static,
    {
        Self {
            field_name: field_name.into(),
            error_message: error_message.into(),
            validator: Box::new(validator),
        }
    }
}

impl std::fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomRule")
            .field("field_name", &self.field_name)
            .field("error_message", &self.error_message)
            .finish_non_exhaustive()
    }
}

/// Run the built-in rules for `entity`, then every custom rule on records
/// that carry the rule's field.
pub fn apply_custom_rules(
    data: &[Record],
    custom_rules: &[CustomRule],
    entity: EntityType,
) -> DatasetValidation {
    let mut validation = validate_dataset(data, entity);
    let mut custom_errors = Vec::new();

    for rule in custom_rules {
        for (index, item) in data.iter().enumerate() {
            if let Some(value) = item.get(&rule.field_name) {
                if !(rule.validator)(value, item) {
                    custom_errors.push(format!("Item {index}: {}", rule.error_message));
                }
            }
        }
    }

    validation.is_valid = validation.errors.is_empty() && custom_errors.is_empty();
    validation.errors.extend(custom_errors);
    validation
}

/// Cross-record consistency checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessRule {
    /// Every present `email` is distinct.
    UniqueEmails,
    /// Electronics cost at least 10, clothing at most 1000.
    ReasonablePricing,
    /// CEOs are at least 30; students are between 16 and 25.
    AgeRoleCompatibility,
}

impl BusinessRule {
    pub const ALL: [BusinessRule; 3] = [
        BusinessRule::UniqueEmails,
        BusinessRule::ReasonablePricing,
        BusinessRule::AgeRoleCompatibility,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BusinessRule::UniqueEmails => "uniqueEmails",
            BusinessRule::ReasonablePricing => "reasonablePricing",
            BusinessRule::AgeRoleCompatibility => "ageRoleCompatibility",
        }
    }

    pub fn check(&self, data: &[Record]) -> bool {
        match self {
            BusinessRule::UniqueEmails => {
                let emails: Vec<&str> = data
                    .iter()
                    .filter_map(|item| item.get("email").and_then(Value::as_str))
                    .filter(|email| !email.is_empty())
                    .collect();
                let unique: HashSet<&str> = emails.iter().copied().collect();
                unique.len() == emails.len()
            }
            BusinessRule::ReasonablePricing => data.iter().all(|item| {
                let price = item.get("price").and_then(Value::as_f64);
                match (item.get("category").and_then(Value::as_str), price) {
                    (Some("Electronics"), Some(price)) => price >= 10.0,
                    (Some("Clothing"), Some(price)) => price <= 1000.0,
                    _ => true,
                }
            }),
            BusinessRule::AgeRoleCompatibility => data.iter().all(|item| {
                let age = item.get("age").and_then(Value::as_f64);
                match (item.get("role").and_then(Value::as_str), age) {
                    (Some("CEO"), Some(age)) => age >= 30.0,
                    (Some("Student"), Some(age)) => (16.0..=25.0).contains(&age),
                    _ => true,
                }
            }),
        }
    }
}
