use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde_json::Value;

use mocky_core::Record;

use crate::errors::GenerationError;

/// Comma-separated values with a header row; fields are quoted only when
/// they contain the delimiter, a quote or a newline.
pub fn to_csv(records: &[Record]) -> Result<String, GenerationError> {
    write_delimited(records, b',', QuoteStyle::Necessary, |value| value)
}

/// Tab-separated values with a header row. Tabs inside string values become
/// single spaces; nothing is quoted.
pub fn to_tsv(records: &[Record]) -> Result<String, GenerationError> {
    write_delimited(records, b'\t', QuoteStyle::Never, |value| {
        value.replace('\t', " ")
    })
}

/// Union of keys across all records, in first-seen order.
pub fn header(records: &[Record]) -> Vec<&str> {
    let mut columns: Vec<&str> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key);
            }
        }
    }
    columns
}

fn write_delimited(
    records: &[Record],
    delimiter: u8,
    quote_style: QuoteStyle,
    clean: impl Fn(String) -> String,
) -> Result<String, GenerationError> {
    if records.is_empty() {
        return Ok(String::new());
    }

    let columns = header(records);
    let mut builder = WriterBuilder::new();
    builder
        .delimiter(delimiter)
        .quote_style(quote_style)
        .terminator(Terminator::Any(b'\n'))
        .has_headers(false);

    let mut bytes = encode_row(&builder, &columns)?;
    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|column| record.get(*column).map(cell).map(&clean).unwrap_or_default())
            .collect();
        bytes.extend(encode_row(&builder, &row)?);
    }

    let mut text = String::from_utf8(bytes)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// `csv` writes a lone empty field as `""`; such rows become a bare newline.
fn encode_row<T: AsRef<[u8]>>(
    builder: &WriterBuilder,
    row: &[T],
) -> Result<Vec<u8>, GenerationError> {
    if matches!(row, [only] if only.as_ref().is_empty()) {
        return Ok(vec![b'\n']);
    }
    let mut writer = builder.from_writer(Vec::new());
    writer.write_record(row)?;
    writer.flush()?;
    writer.into_inner().map_err(|err| err.into_error().into())
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mocky_core::record::record;
    use serde_json::json;

    #[test]
    fn header_is_first_seen_union() {
        let records = vec![
            record([("id", json!("a")), ("name", json!("x"))]),
            record([("id", json!("b")), ("extra", json!(1))]),
        ];
        assert_eq!(header(&records), vec!["id", "name", "extra"]);
    }

    #[test]
    fn csv_quotes_only_when_needed() {
        let records = vec![record([
            ("plain", json!("abc")),
            ("comma", json!("a,b")),
            ("quote", json!("say \"hi\"")),
            ("tags", json!(["x", "y"])),
        ])];
        let text = to_csv(&records).expect("csv");
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines[0], "plain,comma,quote,tags");
        assert_eq!(
            lines[1],
            r#"abc,"a,b","say ""hi""","[""x"",""y""]""#
        );
    }

    #[test]
    fn missing_and_null_cells_are_empty() {
        let records = vec![
            record([("id", json!("a")), ("note", Value::Null)]),
            record([("id", json!("b"))]),
        ];
        let text = to_csv(&records).expect("csv");
        assert_eq!(text, "id,note\na,\nb,");
    }

    #[test]
    fn single_column_empty_cells_stay_unquoted() {
        let records = vec![
            record([("a", json!("x"))]),
            record([("a", Value::Null)]),
            record([("b", json!("y"))]),
        ];
        assert_eq!(to_csv(&records[..2]).expect("csv"), "a\nx\n");
        assert_eq!(to_tsv(&records[..2]).expect("tsv"), "a\nx\n");
        assert_eq!(to_csv(&records).expect("csv"), "a,b\nx,\n,\n,y");

        let only_missing = vec![record([("a", json!("x"))]), record([])];
        let text = to_tsv(&only_missing).expect("tsv");
        assert_eq!(text.split('\n').count(), only_missing.len() + 1);
    }

    #[test]
    fn tsv_replaces_tabs_without_quoting() {
        let records = vec![record([
            ("id", json!("a")),
            ("text", json!("one\ttwo, \"three\"")),
        ])];
        let text = to_tsv(&records).expect("tsv");
        assert_eq!(text, "id\ttext\na\tone two, \"three\"");
    }

    #[test]
    fn empty_input_yields_empty_text() {
        assert_eq!(to_csv(&[]).expect("csv"), "");
        assert_eq!(to_tsv(&[]).expect("tsv"), "");
    }
}
