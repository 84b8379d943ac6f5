use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Dataset types the generator knows how to produce.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Users,
    Products,
    Posts,
    Comments,
    Companies,
    Addresses,
    Transactions,
    Events,
    Schedules,
    Custom,
}

impl EntityType {
    pub const ALL: [EntityType; 10] = [
        EntityType::Users,
        EntityType::Products,
        EntityType::Posts,
        EntityType::Comments,
        EntityType::Companies,
        EntityType::Addresses,
        EntityType::Transactions,
        EntityType::Events,
        EntityType::Schedules,
        EntityType::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Users => "users",
            EntityType::Products => "products",
            EntityType::Posts => "posts",
            EntityType::Comments => "comments",
            EntityType::Companies => "companies",
            EntityType::Addresses => "addresses",
            EntityType::Transactions => "transactions",
            EntityType::Events => "events",
            EntityType::Schedules => "schedules",
            EntityType::Custom => "custom",
        }
    }

    /// Prefix used for `id` tokens of this entity (`usr_xxxxxxxxx`).
    pub fn id_prefix(&self) -> &'static str {
        match self {
            EntityType::Users => "usr",
            EntityType::Products => "prod",
            EntityType::Posts => "post",
            EntityType::Comments => "cmt",
            EntityType::Companies => "comp",
            EntityType::Addresses => "addr",
            EntityType::Transactions => "txn",
            EntityType::Events => "evt",
            EntityType::Schedules => "sch",
            EntityType::Custom => "item",
        }
    }

    /// Key used when an entity of this type is embedded into another record.
    ///
    /// Strips one trailing `s`; irregular plurals are not handled.
    pub fn singular(&self) -> &str {
        singularize(self.as_str())
    }

    /// Mock REST endpoint path for this dataset.
    pub fn endpoint(&self) -> String {
        format!("/api/{}", self.as_str())
    }
}

/// Naive singular form: drop a trailing literal `s`.
pub fn singularize(name: &str) -> &str {
    name.strip_suffix('s').unwrap_or(name)
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        EntityType::ALL
            .into_iter()
            .find(|entity| entity.as_str() == normalized)
            .ok_or_else(|| Error::UnknownEntity(value.to_string()))
    }
}

/// Output topology for relational generation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum RelationMode {
    /// Primary dataset with plain foreign-key ids.
    #[default]
    Single,
    /// Primary dataset with referenced records embedded.
    Nested,
    /// Primary and auxiliary datasets as sibling collections.
    Multi,
}

impl RelationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationMode::Single => "single",
            RelationMode::Nested => "nested",
            RelationMode::Multi => "multi",
        }
    }
}

impl fmt::Display for RelationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationMode {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(RelationMode::Single),
            "nested" => Ok(RelationMode::Nested),
            "multi" => Ok(RelationMode::Multi),
            _ => Err(Error::UnknownRelationMode(value.to_string())),
        }
    }
}

/// SQL dialects supported by the SQL exporters.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    #[default]
    Mysql,
    Postgresql,
    Sqlite,
}

impl SqlDialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SqlDialect::Mysql => "mysql",
            SqlDialect::Postgresql => "postgresql",
            SqlDialect::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SqlDialect {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(SqlDialect::Mysql),
            "postgresql" | "postgres" => Ok(SqlDialect::Postgresql),
            "sqlite" => Ok(SqlDialect::Sqlite),
            _ => Err(Error::UnknownDialect(value.to_string())),
        }
    }
}

/// Serialization formats offered for a generated result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ExportTarget {
    Json,
    Csv,
    Tsv,
    Xml,
    TypescriptInterface,
    SqlCreate,
    SqlInsert,
    SqlFull,
    MysqlDump,
}

impl ExportTarget {
    pub const ALL: [ExportTarget; 9] = [
        ExportTarget::Json,
        ExportTarget::Csv,
        ExportTarget::Tsv,
        ExportTarget::Xml,
        ExportTarget::TypescriptInterface,
        ExportTarget::SqlCreate,
        ExportTarget::SqlInsert,
        ExportTarget::SqlFull,
        ExportTarget::MysqlDump,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportTarget::Json => "json",
            ExportTarget::Csv => "csv",
            ExportTarget::Tsv => "tsv",
            ExportTarget::Xml => "xml",
            ExportTarget::TypescriptInterface => "typescript-interface",
            ExportTarget::SqlCreate => "sql-create",
            ExportTarget::SqlInsert => "sql-insert",
            ExportTarget::SqlFull => "sql-full",
            ExportTarget::MysqlDump => "mysql-dump",
        }
    }

    /// Conventional file extension for the target.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportTarget::Json => "json",
            ExportTarget::Csv => "csv",
            ExportTarget::Tsv => "tsv",
            ExportTarget::Xml => "xml",
            ExportTarget::TypescriptInterface => "ts",
            ExportTarget::SqlCreate
            | ExportTarget::SqlInsert
            | ExportTarget::SqlFull
            | ExportTarget::MysqlDump => "sql",
        }
    }

    pub fn is_sql(&self) -> bool {
        matches!(
            self,
            ExportTarget::SqlCreate
                | ExportTarget::SqlInsert
                | ExportTarget::SqlFull
                | ExportTarget::MysqlDump
        )
    }
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportTarget {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        let alias = match normalized.as_str() {
            "typescript" | "ts" => "typescript-interface",
            "sql" => "sql-full",
            other => other,
        };
        ExportTarget::ALL
            .into_iter()
            .find(|target| target.as_str() == alias)
            .ok_or_else(|| Error::UnknownFormat(value.to_string()))
    }
}
