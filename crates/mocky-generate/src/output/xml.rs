use serde_json::{Map, Value};

const INDENT: &str = "  ";

/// XML document wrapping `value` in a `root` element.
///
/// Arrays become repeated `<item>` elements, objects become child elements
/// named after their keys, and nulls render as self-closing elements. Keys
/// are used as element names without sanitizing.
pub fn to_xml(value: &Value, root: &str) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<{root}>\n"));
    match value {
        Value::Array(items) => {
            for item in items {
                write_element(&mut xml, "item", item, 1);
            }
        }
        Value::Object(fields) => write_fields(&mut xml, fields, 1),
        scalar => write_element(&mut xml, "value", scalar, 1),
    }
    xml.push_str(&format!("</{root}>"));
    xml
}

fn write_fields(xml: &mut String, fields: &Map<String, Value>, depth: usize) {
    for (key, value) in fields {
        write_element(xml, key, value, depth);
    }
}

fn write_element(xml: &mut String, name: &str, value: &Value, depth: usize) {
    let indent = INDENT.repeat(depth);
    match value {
        Value::Null => xml.push_str(&format!("{indent}<{name}/>\n")),
        Value::Object(fields) => {
            xml.push_str(&format!("{indent}<{name}>\n"));
            write_fields(xml, fields, depth + 1);
            xml.push_str(&format!("{indent}</{name}>\n"));
        }
        Value::Array(items) => {
            xml.push_str(&format!("{indent}<{name}>\n"));
            for item in items {
                write_element(xml, "item", item, depth + 1);
            }
            xml.push_str(&format!("{indent}</{name}>\n"));
        }
        Value::String(text) => {
            xml.push_str(&format!("{indent}<{name}>{}</{name}>\n", escape(text)));
        }
        Value::Bool(_) | Value::Number(_) => {
            xml.push_str(&format!("{indent}<{name}>{value}</{name}>\n"));
        }
    }
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_become_items() {
        let value = json!([{ "id": "a", "note": null, "tags": ["x", "y"] }]);
        let xml = to_xml(&value, "data");
        let expected = [
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>",
            "<data>",
            "  <item>",
            "    <id>a</id>",
            "    <note/>",
            "    <tags>",
            "      <item>x</item>",
            "      <item>y</item>",
            "    </tags>",
            "  </item>",
            "</data>",
        ]
        .join("\n");
        assert_eq!(xml, expected);
    }

    #[test]
    fn nested_objects_recurse() {
        let value = json!([{ "user": { "id": "usr_1", "age": 30 } }]);
        let xml = to_xml(&value, "data");
        assert!(xml.contains("    <user>\n      <id>usr_1</id>\n      <age>30</age>\n    </user>\n"));
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(
            escape(r#"Tom & "Jerry" <'cat'>"#),
            "Tom &amp; &quot;Jerry&quot; &lt;&apos;cat&apos;&gt;"
        );
    }

    #[test]
    fn collections_map_to_named_children() {
        let value = json!({ "posts": [{ "id": "p" }], "users": [] });
        let xml = to_xml(&value, "data");
        assert!(xml.contains("  <posts>\n    <item>\n      <id>p</id>\n    </item>\n  </posts>\n"));
        assert!(xml.contains("  <users>\n  </users>\n"));
    }
}
