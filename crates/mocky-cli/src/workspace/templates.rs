//! Saved generation templates, persisted as one JSON array file.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use jsonschema::JSONSchema;
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use mocky_core::{EntityType, GenerationConfig, RelationMode};

use super::atomic::write_json_atomic;
use super::ids::new_template_id;
use super::{WorkspaceError, WorkspaceResult};

pub const EXPORT_VERSION: &str = "1.0";
const TOP_TEMPLATES: usize = 5;

/// A stored generation template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub config: GenerationConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_data: Option<Value>,
    pub data_type: EntityType,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub usage_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported_at: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Fields supplied when saving a new template.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDraft {
    pub name: String,
    pub description: String,
    pub config: GenerationConfig,
    /// Defaults to the config's dataset type.
    pub data_type: Option<EntityType>,
    pub sample_data: Option<Value>,
    pub tags: Vec<String>,
}

impl TemplateDraft {
    pub fn new(name: impl Into<String>, config: GenerationConfig) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            config,
            data_type: None,
            sample_data: None,
            tags: Vec::new(),
        }
    }
}

/// Partial update; `None` fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct TemplateUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub config: Option<GenerationConfig>,
    pub tags: Option<Vec<String>>,
}

/// Wrapper written by `export` and accepted by `import`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateExport {
    pub version: String,
    pub exported_at: String,
    pub templates: Vec<Template>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateStats {
    pub total: usize,
    pub by_type: BTreeMap<EntityType, usize>,
    pub most_used: Vec<Template>,
    pub recently_used: Vec<Template>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortKey {
    #[default]
    Name,
    Created,
    Updated,
    Usage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Import document. Ids and `importedAt` are always reassigned, so entries
/// only need a name and a config.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct TemplateImport {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    exported_at: Option<String>,
    templates: Vec<ImportedTemplate>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ImportedTemplate {
    name: String,
    #[serde(default)]
    description: String,
    config: GenerationConfig,
    #[serde(default)]
    data_type: Option<EntityType>,
    #[serde(default)]
    sample_data: Option<Value>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    usage_count: u64,
    #[serde(default)]
    last_used: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

/// Built-in template offered on a fresh workspace.
#[derive(Debug, Clone, Copy)]
pub struct SampleTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub entity: EntityType,
    pub count: u32,
    pub relation_mode: Option<RelationMode>,
    pub tags: &'static [&'static str],
}

impl SampleTemplate {
    fn draft(&self) -> TemplateDraft {
        let mut config = GenerationConfig::new(self.entity, self.count);
        if let Some(mode) = self.relation_mode {
            config = config.relational(mode);
        }
        TemplateDraft {
            name: self.name.to_string(),
            description: self.description.to_string(),
            config,
            data_type: Some(self.entity),
            sample_data: None,
            tags: self.tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }
}

pub const SAMPLE_TEMPLATES: [SampleTemplate; 5] = [
    SampleTemplate {
        name: "Small Business Users",
        description: "Basic user profiles suitable for small business applications",
        entity: EntityType::Users,
        count: 25,
        relation_mode: None,
        tags: &["users", "small-business", "basic"],
    },
    SampleTemplate {
        name: "E-commerce Products",
        description: "Product catalog for online store with pricing and inventory",
        entity: EntityType::Products,
        count: 50,
        relation_mode: None,
        tags: &["products", "ecommerce", "retail"],
    },
    SampleTemplate {
        name: "Blog Content",
        description: "Blog posts and comments for content management testing",
        entity: EntityType::Posts,
        count: 30,
        relation_mode: Some(RelationMode::Nested),
        tags: &["posts", "blog", "content"],
    },
    SampleTemplate {
        name: "Company Directory",
        description: "Corporate structure with employees and departments",
        entity: EntityType::Companies,
        count: 15,
        relation_mode: None,
        tags: &["companies", "corporate", "directory"],
    },
    SampleTemplate {
        name: "Event Management",
        description: "Events, schedules, and attendees for event planning apps",
        entity: EntityType::Events,
        count: 20,
        relation_mode: Some(RelationMode::Multi),
        tags: &["events", "scheduling", "calendar"],
    },
];

/// Template collection backed by `templates.json`. Every mutation is written
/// through immediately.
#[derive(Debug)]
pub struct TemplateStore {
    path: PathBuf,
    templates: Vec<Template>,
}

impl TemplateStore {
    /// Load the store; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> WorkspaceResult<Self> {
        let path = path.into();
        let templates = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Vec::new()
        };
        Ok(Self { path, templates })
    }

    /// Load the store, seeding the sample templates when it is empty.
    pub fn open_seeded(path: impl Into<PathBuf>, now: DateTime<Utc>) -> WorkspaceResult<Self> {
        let mut store = Self::open(path)?;
        if store.templates.is_empty() {
            store.templates = SAMPLE_TEMPLATES
                .iter()
                .map(|sample| Template::from_draft(sample.draft(), now))
                .collect();
            store.persist()?;
            info!(count = store.templates.len(), "sample templates seeded");
        }
        Ok(store)
    }

    pub fn all(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|template| template.id == id)
    }

    pub fn save(&mut self, draft: TemplateDraft, now: DateTime<Utc>) -> WorkspaceResult<Template> {
        if draft.name.trim().is_empty() {
            return Err(WorkspaceError::Invalid(
                "template name must not be empty".to_string(),
            ));
        }
        draft
            .config
            .validate()
            .map_err(|err| WorkspaceError::Invalid(err.to_string()))?;

        let template = Template::from_draft(draft, now);
        self.templates.push(template.clone());
        self.persist()?;
        info!(id = %template.id, name = %template.name, "template saved");
        Ok(template)
    }

    pub fn update(
        &mut self,
        id: &str,
        update: TemplateUpdate,
        now: DateTime<Utc>,
    ) -> WorkspaceResult<Template> {
        let template = self.find_mut(id)?;
        if let Some(name) = update.name {
            template.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            template.description = description.trim().to_string();
        }
        if let Some(config) = update.config {
            template.data_type = config.entity;
            template.config = config;
        }
        if let Some(tags) = update.tags {
            template.tags = tags;
        }
        template.updated_at = timestamp(now);

        let updated = template.clone();
        self.persist()?;
        info!(id = %updated.id, "template updated");
        Ok(updated)
    }

    pub fn delete(&mut self, id: &str) -> WorkspaceResult<()> {
        let before = self.templates.len();
        self.templates.retain(|template| template.id != id);
        if self.templates.len() == before {
            return Err(WorkspaceError::TemplateNotFound(id.to_string()));
        }
        self.persist()?;
        info!(id = %id, "template deleted");
        Ok(())
    }

    /// Bump `usageCount` and stamp `lastUsed`.
    pub fn record_usage(&mut self, id: &str, now: DateTime<Utc>) -> WorkspaceResult<Template> {
        let template = self.find_mut(id)?;
        template.usage_count += 1;
        template.last_used = Some(timestamp(now));
        let used = template.clone();
        self.persist()?;
        Ok(used)
    }

    /// Case-insensitive match on name, description or any tag. A blank query
    /// matches everything.
    pub fn search(&self, query: &str) -> Vec<&Template> {
        let term = query.trim().to_lowercase();
        self.templates
            .iter()
            .filter(|template| {
                term.is_empty()
                    || template.name.to_lowercase().contains(&term)
                    || template.description.to_lowercase().contains(&term)
                    || template
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&term))
            })
            .collect()
    }

    pub fn filter_by_type(&self, data_type: Option<EntityType>) -> Vec<&Template> {
        self.templates
            .iter()
            .filter(|template| data_type.is_none_or(|wanted| template.data_type == wanted))
            .collect()
    }

    pub fn stats(&self) -> TemplateStats {
        let mut by_type = BTreeMap::new();
        for template in &self.templates {
            *by_type.entry(template.data_type).or_insert(0) += 1;
        }

        let mut most_used: Vec<&Template> = self.templates.iter().collect();
        most_used.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));

        let mut recently_used: Vec<&Template> = self
            .templates
            .iter()
            .filter(|template| template.last_used.is_some())
            .collect();
        recently_used.sort_by(|a, b| {
            parse_timestamp(b.last_used.as_deref()).cmp(&parse_timestamp(a.last_used.as_deref()))
        });

        TemplateStats {
            total: self.templates.len(),
            by_type,
            most_used: most_used.into_iter().take(TOP_TEMPLATES).cloned().collect(),
            recently_used: recently_used
                .into_iter()
                .take(TOP_TEMPLATES)
                .cloned()
                .collect(),
        }
    }

    pub fn export(&self, now: DateTime<Utc>) -> TemplateExport {
        TemplateExport {
            version: EXPORT_VERSION.to_string(),
            exported_at: timestamp(now),
            templates: self.templates.clone(),
        }
    }

    /// Append the templates of an export document. Each gets a fresh id and
    /// an `importedAt` stamp.
    pub fn import(&mut self, content: &str, now: DateTime<Utc>) -> WorkspaceResult<Vec<Template>> {
        let document: Value = serde_json::from_str(content)
            .map_err(|err| WorkspaceError::InvalidTemplateFile(format!("not valid JSON: {err}")))?;
        validate_import(&document)?;
        let import: TemplateImport = serde_json::from_value(document)
            .map_err(|err| WorkspaceError::InvalidTemplateFile(err.to_string()))?;

        let stamp = timestamp(now);
        let imported: Vec<Template> = import
            .templates
            .into_iter()
            .map(|entry| Template {
                id: new_template_id(now),
                name: entry.name,
                description: entry.description,
                data_type: entry.data_type.unwrap_or(entry.config.entity),
                config: entry.config,
                sample_data: entry.sample_data,
                created_at: entry.created_at.unwrap_or_else(|| stamp.clone()),
                updated_at: entry.updated_at.unwrap_or_else(|| stamp.clone()),
                usage_count: entry.usage_count,
                last_used: entry.last_used,
                imported_at: Some(stamp.clone()),
                tags: entry.tags,
            })
            .collect();

        self.templates.extend(imported.iter().cloned());
        self.persist()?;
        info!(
            count = imported.len(),
            version = import.version.as_deref().unwrap_or("unknown"),
            exported_at = import.exported_at.as_deref().unwrap_or("unknown"),
            "templates imported"
        );
        Ok(imported)
    }

    fn find_mut(&mut self, id: &str) -> WorkspaceResult<&mut Template> {
        self.templates
            .iter_mut()
            .find(|template| template.id == id)
            .ok_or_else(|| WorkspaceError::TemplateNotFound(id.to_string()))
    }

    fn persist(&self) -> WorkspaceResult<()> {
        write_json_atomic(&self.path, &self.templates)
    }
}

impl Template {
    fn from_draft(draft: TemplateDraft, now: DateTime<Utc>) -> Self {
        let stamp = timestamp(now);
        Self {
            id: new_template_id(now),
            name: draft.name.trim().to_string(),
            description: draft.description.trim().to_string(),
            data_type: draft.data_type.unwrap_or(draft.config.entity),
            config: draft.config,
            sample_data: draft.sample_data,
            created_at: stamp.clone(),
            updated_at: stamp,
            usage_count: 0,
            last_used: None,
            imported_at: None,
            tags: draft.tags,
        }
    }
}

/// Stable sort by `key`; ties keep their current order.
pub fn sort_templates(templates: &mut [&Template], key: SortKey, order: SortOrder) {
    templates.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare(a: &Template, b: &Template, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Created => parse_timestamp(Some(&a.created_at))
            .cmp(&parse_timestamp(Some(&b.created_at))),
        SortKey::Updated => parse_timestamp(Some(&a.updated_at))
            .cmp(&parse_timestamp(Some(&b.updated_at))),
        SortKey::Usage => a.usage_count.cmp(&b.usage_count),
    }
}

fn validate_import(document: &Value) -> WorkspaceResult<()> {
    let schema = serde_json::to_value(schema_for!(TemplateImport))?;
    let compiled =
        JSONSchema::compile(&schema).map_err(|err| WorkspaceError::Invalid(err.to_string()))?;

    if let Err(errors) = compiled.validate(document) {
        let messages: Vec<String> = errors
            .map(|error| {
                let path = error.instance_path.to_string();
                let path = if path.is_empty() { "/".to_string() } else { path };
                format!("{path}: {error}")
            })
            .collect();
        return Err(WorkspaceError::InvalidTemplateFile(messages.join("; ")));
    }
    Ok(())
}

fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<FixedOffset>> {
    value.and_then(|text| DateTime::parse_from_rfc3339(text).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::path::Path;

    fn temp_store_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("mocky_templates_{}", uuid::Uuid::new_v4()))
            .join("templates.json")
    }

    fn cleanup(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::remove_dir_all(parent).ok();
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .expect("valid instant")
    }

    #[test]
    fn fresh_store_is_seeded_once() {
        let path = temp_store_path();
        let store = TemplateStore::open_seeded(&path, now()).expect("open");
        assert_eq!(store.all().len(), SAMPLE_TEMPLATES.len());
        let blog = store
            .all()
            .iter()
            .find(|template| template.name == "Blog Content")
            .expect("blog sample");
        assert!(blog.config.relational);
        assert_eq!(blog.config.relation_mode, RelationMode::Nested);
        assert_eq!(blog.tags, vec!["posts", "blog", "content"]);

        let reopened = TemplateStore::open_seeded(&path, now()).expect("reopen");
        assert_eq!(reopened.all(), store.all());
        cleanup(&path);
    }

    #[test]
    fn save_update_and_delete() {
        let path = temp_store_path();
        let mut store = TemplateStore::open(&path).expect("open");
        assert!(store.all().is_empty());

        let mut draft = TemplateDraft::new(
            "  Checkout load  ",
            GenerationConfig::new(EntityType::Transactions, 100),
        );
        draft.tags = vec!["payments".to_string()];
        let saved = store.save(draft, now()).expect("save");
        assert_eq!(saved.name, "Checkout load");
        assert_eq!(saved.data_type, EntityType::Transactions);
        assert_eq!(saved.usage_count, 0);

        let later = now() + Duration::hours(1);
        let updated = store
            .update(
                &saved.id,
                TemplateUpdate {
                    description: Some("Bulk payments".to_string()),
                    config: Some(GenerationConfig::new(EntityType::Users, 5)),
                    ..TemplateUpdate::default()
                },
                later,
            )
            .expect("update");
        assert_eq!(updated.description, "Bulk payments");
        assert_eq!(updated.data_type, EntityType::Users);
        assert_ne!(updated.updated_at, saved.updated_at);

        let reopened = TemplateStore::open(&path).expect("reopen");
        assert_eq!(reopened.get(&saved.id), Some(&updated));

        store.delete(&saved.id).expect("delete");
        assert!(store.get(&saved.id).is_none());
        assert!(matches!(
            store.delete(&saved.id),
            Err(WorkspaceError::TemplateNotFound(_))
        ));
        cleanup(&path);
    }

    #[test]
    fn save_rejects_invalid_drafts() {
        let path = temp_store_path();
        let mut store = TemplateStore::open(&path).expect("open");
        let blank = TemplateDraft::new("  ", GenerationConfig::new(EntityType::Users, 5));
        assert!(store.save(blank, now()).is_err());
        let too_many = TemplateDraft::new("Big", GenerationConfig::new(EntityType::Users, 900));
        assert!(store.save(too_many, now()).is_err());
        assert!(store.all().is_empty());
    }

    #[test]
    fn usage_feeds_stats() {
        let path = temp_store_path();
        let mut store = TemplateStore::open_seeded(&path, now()).expect("open");
        let ids: Vec<String> = store.all().iter().map(|t| t.id.clone()).collect();

        store.record_usage(&ids[2], now()).expect("use");
        store
            .record_usage(&ids[2], now() + Duration::minutes(1))
            .expect("use");
        store
            .record_usage(&ids[4], now() + Duration::minutes(5))
            .expect("use");

        let stats = store.stats();
        assert_eq!(stats.total, 5);
        assert_eq!(stats.by_type.get(&EntityType::Users), Some(&1));
        assert_eq!(stats.most_used[0].id, ids[2]);
        assert_eq!(stats.most_used[0].usage_count, 2);
        assert_eq!(stats.recently_used.len(), 2);
        assert_eq!(stats.recently_used[0].id, ids[4]);
        assert!(store.record_usage("missing", now()).is_err());
        cleanup(&path);
    }

    #[test]
    fn search_filter_and_sort() {
        let path = temp_store_path();
        let store = TemplateStore::open_seeded(&path, now()).expect("open");

        let found: Vec<&str> = store
            .search("ECOMMERCE")
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(found, vec!["E-commerce Products"]);
        assert_eq!(store.search("   ").len(), 5);
        assert_eq!(store.search("employees").len(), 1);

        assert_eq!(store.filter_by_type(Some(EntityType::Events)).len(), 1);
        assert!(store.filter_by_type(Some(EntityType::Custom)).is_empty());
        assert_eq!(store.filter_by_type(None).len(), 5);

        let mut sorted = store.filter_by_type(None);
        sort_templates(&mut sorted, SortKey::Name, SortOrder::Desc);
        let names: Vec<&str> = sorted.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Small Business Users",
                "Event Management",
                "E-commerce Products",
                "Company Directory",
                "Blog Content",
            ]
        );
        cleanup(&path);
    }

    #[test]
    fn export_then_import_appends_copies() {
        let path = temp_store_path();
        let mut store = TemplateStore::open_seeded(&path, now()).expect("open");
        let exported = store.export(now());
        assert_eq!(exported.version, EXPORT_VERSION);
        let text = serde_json::to_string(&exported).expect("encode export");

        let later = now() + Duration::days(1);
        let imported = store.import(&text, later).expect("import");
        assert_eq!(imported.len(), 5);
        assert_eq!(store.all().len(), 10);
        for template in &imported {
            assert!(exported.templates.iter().all(|original| original.id != template.id));
            assert_eq!(template.imported_at.as_deref(), Some("2024-06-02T12:00:00.000Z"));
        }
        cleanup(&path);
    }

    #[test]
    fn import_rejects_malformed_documents() {
        let path = temp_store_path();
        let mut store = TemplateStore::open(&path).expect("open");

        for document in [
            "not json",
            r#"{"version": "1.0"}"#,
            r#"{"templates": {}}"#,
            r#"{"templates": [{"name": "No config"}]}"#,
            r#"{"templates": [{"name": "Bad type", "config": {"type": "robots", "count": 3}}]}"#,
        ] {
            let err = store.import(document, now()).expect_err(document);
            assert!(matches!(err, WorkspaceError::InvalidTemplateFile(_)), "{document}");
        }
        assert!(store.all().is_empty());
    }

    #[test]
    fn import_accepts_minimal_entries() {
        let path = temp_store_path();
        let mut store = TemplateStore::open(&path).expect("open");
        let document = r#"{"templates": [{"name": "Tiny", "config": {"type": "users", "count": 3}}]}"#;
        let imported = store.import(document, now()).expect("import");
        assert_eq!(imported[0].data_type, EntityType::Users);
        assert_eq!(imported[0].config.custom_template, "{}");
        assert_eq!(imported[0].created_at, "2024-06-01T12:00:00.000Z");
        cleanup(&path);
    }
}
