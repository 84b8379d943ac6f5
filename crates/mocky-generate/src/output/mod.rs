//! Text exporters for generated results.
//!
//! JSON and XML serialize the whole shaped tree; the tabular, typed and SQL
//! formats work on the primary dataset only.

pub mod csv;
pub mod json;
pub mod sql;
pub mod typescript;
pub mod xml;

use chrono::{DateTime, Utc};

use mocky_core::{ExportTarget, SqlDialect};

use crate::errors::GenerationError;
use crate::model::GeneratedOutput;

pub const DEFAULT_TABLE_NAME: &str = "generated_data";
pub const DEFAULT_INTERFACE_NAME: &str = "GeneratedData";
pub const DEFAULT_XML_ROOT: &str = "data";

/// Knobs shared by the exporters. Unset fields fall back to the defaults above.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub table_name: Option<String>,
    pub dialect: SqlDialect,
    pub interface_name: Option<String>,
    pub root_name: Option<String>,
    /// Timestamp written into the dump header; `None` uses the current time.
    pub generated_at: Option<DateTime<Utc>>,
}

impl ExportOptions {
    pub fn table_name(&self) -> &str {
        self.table_name.as_deref().unwrap_or(DEFAULT_TABLE_NAME)
    }

    pub fn interface_name(&self) -> &str {
        self.interface_name
            .as_deref()
            .unwrap_or(DEFAULT_INTERFACE_NAME)
    }

    pub fn root_name(&self) -> &str {
        self.root_name.as_deref().unwrap_or(DEFAULT_XML_ROOT)
    }
}

/// Serialize `output` into `target`.
pub fn export(
    output: &GeneratedOutput,
    target: ExportTarget,
    options: &ExportOptions,
) -> Result<String, GenerationError> {
    let records = output.primary();
    let text = match target {
        ExportTarget::Json => json::to_json(output)?,
        ExportTarget::Xml => xml::to_xml(&output.to_value(), options.root_name()),
        ExportTarget::Csv => csv::to_csv(records)?,
        ExportTarget::Tsv => csv::to_tsv(records)?,
        ExportTarget::TypescriptInterface => {
            typescript::to_interface(records, options.interface_name())
        }
        ExportTarget::SqlCreate => {
            sql::create_table(records, options.table_name(), options.dialect)
        }
        ExportTarget::SqlInsert => sql::insert(records, options.table_name(), options.dialect),
        ExportTarget::SqlFull => sql::full(records, options.table_name(), options.dialect),
        ExportTarget::MysqlDump => sql::dump(
            records,
            options.table_name(),
            options.generated_at.unwrap_or_else(Utc::now),
        ),
    };
    Ok(text)
}
