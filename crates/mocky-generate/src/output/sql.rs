use std::sync::OnceLock;

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde_json::{Number, Value};

use mocky_core::{Record, SqlDialect};

const VARCHAR_LIMIT: usize = 255;

/// Column derived from the first record of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Key in the source record.
    pub key: String,
    /// Sanitized SQL identifier.
    pub name: String,
    pub sql_type: &'static str,
    pub nullable: bool,
}

/// Columns in key order of the first record. Types and nullability come from
/// that record alone.
pub fn columns(records: &[Record], dialect: SqlDialect) -> Vec<Column> {
    let Some(sample) = records.first() else {
        return Vec::new();
    };
    sample
        .iter()
        .map(|(key, value)| Column {
            key: key.clone(),
            name: sanitize_identifier(key),
            sql_type: column_type(value, dialect),
            nullable: value.is_null(),
        })
        .collect()
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
pub fn sanitize_identifier(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

/// SQL column type for a sampled value.
pub fn column_type(value: &Value, dialect: SqlDialect) -> &'static str {
    match (value, dialect) {
        (Value::Null, _) => "TEXT",
        (Value::Bool(_), SqlDialect::Sqlite) => "INTEGER",
        (Value::Bool(_), _) => "BOOLEAN",
        (Value::Number(number), dialect) => number_type(number, dialect),
        (Value::String(_), SqlDialect::Sqlite) => "TEXT",
        (Value::String(text), _) if is_date_like(text) => match dialect {
            SqlDialect::Postgresql => "TIMESTAMP",
            _ => "DATETIME",
        },
        (Value::String(text), _) if text.chars().count() > VARCHAR_LIMIT => "TEXT",
        (Value::String(_), _) => "VARCHAR(255)",
        (Value::Array(_) | Value::Object(_), SqlDialect::Mysql) => "JSON",
        (Value::Array(_) | Value::Object(_), SqlDialect::Postgresql) => "JSONB",
        (Value::Array(_) | Value::Object(_), SqlDialect::Sqlite) => "TEXT",
    }
}

fn number_type(number: &Number, dialect: SqlDialect) -> &'static str {
    let integral = number.is_i64()
        || number.is_u64()
        || number.as_f64().is_some_and(|value| value.fract() == 0.0);
    let wide = number
        .as_i64()
        .is_some_and(|value| i32::try_from(value).is_err())
        || number.as_u64().is_some_and(|value| value > i32::MAX as u64);

    match (dialect, integral, wide) {
        (SqlDialect::Sqlite, true, _) => "INTEGER",
        (SqlDialect::Sqlite, false, _) => "REAL",
        (_, true, true) => "BIGINT",
        (SqlDialect::Mysql, true, false) => "INT",
        (SqlDialect::Postgresql, true, false) => "INTEGER",
        (_, false, _) => "DECIMAL(10,2)",
    }
}

fn is_date_like(text: &str) -> bool {
    static DATE: OnceLock<Option<Regex>> = OnceLock::new();
    DATE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").ok())
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(text))
}

/// Quote an already sanitized identifier for `dialect`.
pub fn quote_identifier(name: &str, dialect: SqlDialect) -> String {
    match dialect {
        SqlDialect::Mysql => format!("`{name}`"),
        SqlDialect::Postgresql | SqlDialect::Sqlite => format!("\"{name}\""),
    }
}

/// `CREATE TABLE` statement for the dataset's columns.
pub fn create_table(records: &[Record], table: &str, dialect: SqlDialect) -> String {
    let columns = columns(records, dialect);
    if columns.is_empty() {
        return String::new();
    }

    let definitions: Vec<String> = columns
        .iter()
        .map(|column| {
            let mut definition = format!(
                "  {} {} {}",
                quote_identifier(&column.name, dialect),
                column.sql_type,
                if column.nullable { "NULL" } else { "NOT NULL" }
            );
            if column.name == "id" {
                definition.push_str(" PRIMARY KEY");
            }
            definition
        })
        .collect();

    format!(
        "CREATE TABLE {} (\n{}\n);",
        quote_identifier(&sanitize_identifier(table), dialect),
        definitions.join(",\n")
    )
}

/// One multi-row `INSERT` statement. Columns come from the first record;
/// keys missing from later records insert `NULL`.
pub fn insert(records: &[Record], table: &str, dialect: SqlDialect) -> String {
    let columns = columns(records, dialect);
    if columns.is_empty() {
        return String::new();
    }

    let names: Vec<String> = columns
        .iter()
        .map(|column| quote_identifier(&column.name, dialect))
        .collect();
    let rows: Vec<String> = records
        .iter()
        .map(|record| {
            let values: Vec<String> = columns
                .iter()
                .map(|column| literal(record.get(&column.key), dialect))
                .collect();
            format!("  ({})", values.join(", "))
        })
        .collect();

    format!(
        "INSERT INTO {} ({}) VALUES\n{};",
        quote_identifier(&sanitize_identifier(table), dialect),
        names.join(", "),
        rows.join(",\n")
    )
}

/// `CREATE TABLE`, a blank line, then the `INSERT`.
pub fn full(records: &[Record], table: &str, dialect: SqlDialect) -> String {
    if columns(records, dialect).is_empty() {
        return String::new();
    }
    format!(
        "{}\n\n{}",
        create_table(records, table, dialect),
        insert(records, table, dialect)
    )
}

/// MySQL dump: comment header, `DROP TABLE IF EXISTS`, then [`full`].
pub fn dump(records: &[Record], table: &str, generated_at: DateTime<Utc>) -> String {
    let dialect = SqlDialect::Mysql;
    if columns(records, dialect).is_empty() {
        return String::new();
    }
    let quoted = quote_identifier(&sanitize_identifier(table), dialect);
    format!(
        "-- Mocky SQL dump\n\
         -- Table: {quoted}\n\
         -- Rows: {rows}\n\
         -- Generated at: {generated}\n\
         \n\
         DROP TABLE IF EXISTS {quoted};\n\
         \n\
         {body}\n",
        rows = records.len(),
        generated = generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        body = full(records, table, dialect),
    )
}

/// SQL literal for a record value.
pub fn literal(value: Option<&Value>, dialect: SqlDialect) -> String {
    match value {
        None | Some(Value::Null) => "NULL".to_string(),
        Some(Value::Bool(flag)) => match (dialect, flag) {
            (SqlDialect::Postgresql, true) => "TRUE".to_string(),
            (SqlDialect::Postgresql, false) => "FALSE".to_string(),
            (_, true) => "1".to_string(),
            (_, false) => "0".to_string(),
        },
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::String(text)) => quote_string(text, dialect),
        Some(nested @ (Value::Array(_) | Value::Object(_))) => {
            quote_string(&nested.to_string(), dialect)
        }
    }
}

fn quote_string(text: &str, dialect: SqlDialect) -> String {
    let mut escaped = text.replace('\'', "''");
    if dialect == SqlDialect::Mysql {
        escaped = escaped.replace('\\', "\\\\");
    }
    format!("'{escaped}'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mocky_core::record::record;
    use serde_json::json;

    fn sample() -> Vec<Record> {
        vec![
            record([
                ("id", json!("usr_1")),
                ("first-name", json!("O'Neil")),
                ("age", json!(30)),
                ("price", json!(19.99)),
                ("isActive", json!(true)),
                ("createdAt", json!("2024-03-01T10:00:00.000Z")),
                ("tags", json!(["a", "b"])),
                ("avatar", Value::Null),
            ]),
            record([("id", json!("usr_2")), ("age", json!(41))]),
        ]
    }

    #[test]
    fn mysql_create_table_maps_types() {
        let sql = create_table(&sample(), "users", SqlDialect::Mysql);
        let expected = [
            "CREATE TABLE `users` (",
            "  `id` VARCHAR(255) NOT NULL PRIMARY KEY,",
            "  `first_name` VARCHAR(255) NOT NULL,",
            "  `age` INT NOT NULL,",
            "  `price` DECIMAL(10,2) NOT NULL,",
            "  `isActive` BOOLEAN NOT NULL,",
            "  `createdAt` DATETIME NOT NULL,",
            "  `tags` JSON NOT NULL,",
            "  `avatar` TEXT NULL",
            ");",
        ]
        .join("\n");
        assert_eq!(sql, expected);
    }

    #[test]
    fn dialects_differ_for_dates_and_json() {
        let records = sample();
        let postgres = create_table(&records, "users", SqlDialect::Postgresql);
        assert!(postgres.contains("\"createdAt\" TIMESTAMP NOT NULL"));
        assert!(postgres.contains("\"tags\" JSONB NOT NULL"));

        let sqlite = create_table(&records, "users", SqlDialect::Sqlite);
        assert!(sqlite.contains("\"createdAt\" TEXT NOT NULL"));
        assert!(sqlite.contains("\"isActive\" INTEGER NOT NULL"));
        assert!(sqlite.contains("\"price\" REAL NOT NULL"));
    }

    #[test]
    fn long_strings_become_text() {
        let long = "x".repeat(300);
        assert_eq!(column_type(&json!(long), SqlDialect::Mysql), "TEXT");
        assert_eq!(column_type(&json!("short"), SqlDialect::Mysql), "VARCHAR(255)");
    }

    #[test]
    fn insert_formats_literals() {
        let sql = insert(&sample(), "users", SqlDialect::Mysql);
        let expected = [
            "INSERT INTO `users` (`id`, `first_name`, `age`, `price`, `isActive`, `createdAt`, `tags`, `avatar`) VALUES",
            "  ('usr_1', 'O''Neil', 30, 19.99, 1, '2024-03-01T10:00:00.000Z', '[\"a\",\"b\"]', NULL),",
            "  ('usr_2', NULL, 41, NULL, NULL, NULL, NULL, NULL);",
        ]
        .join("\n");
        assert_eq!(sql, expected);
    }

    #[test]
    fn postgres_booleans_are_keywords() {
        assert_eq!(literal(Some(&json!(true)), SqlDialect::Postgresql), "TRUE");
        assert_eq!(literal(Some(&json!(false)), SqlDialect::Sqlite), "0");
    }

    #[test]
    fn dump_wraps_full_script() {
        let generated_at = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .expect("timestamp")
            .with_timezone(&Utc);
        let sql = dump(&sample(), "users", generated_at);
        assert!(sql.starts_with("-- Mocky SQL dump\n-- Table: `users`\n-- Rows: 2\n"));
        assert!(sql.contains("-- Generated at: 2024-05-01T12:00:00Z\n"));
        let drop = sql.find("DROP TABLE IF EXISTS `users`;").expect("drop");
        let create = sql.find("CREATE TABLE `users`").expect("create");
        let insert = sql.find("INSERT INTO `users`").expect("insert");
        assert!(drop < create && create < insert);
    }

    #[test]
    fn empty_dataset_yields_empty_text() {
        assert_eq!(create_table(&[], "t", SqlDialect::Mysql), "");
        assert_eq!(insert(&[], "t", SqlDialect::Mysql), "");
        assert_eq!(full(&[], "t", SqlDialect::Mysql), "");
        assert_eq!(dump(&[], "t", Utc::now()), "");
    }

    #[test]
    fn records_without_fields_yield_empty_text() {
        let records = vec![Record::new(), Record::new()];
        for dialect in [SqlDialect::Mysql, SqlDialect::Postgresql, SqlDialect::Sqlite] {
            assert_eq!(create_table(&records, "t", dialect), "");
            assert_eq!(insert(&records, "t", dialect), "");
            assert_eq!(full(&records, "t", dialect), "");
        }
        assert_eq!(dump(&records, "t", Utc::now()), "");
    }
}
