//! Line-oriented parser for plugin reference config blocks.
//!
//! Reference docs interleave `#` comment lines with `key = value`
//! declarations. An uncommented declaration is an active (required) field; a
//! commented one documents an optional field with its inactive default:
//!
//! ```text
//! ## Destination files
//! files = ["stdout"]
//!
//! ## Rotate logs after this interval
//! # rotation_interval = "0h"
//! ```

use crate::model::NodeRole;
use crate::schema::fields::{FieldSpec, FieldType, PluginFieldSchema};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Substrings marking a field as credential-bearing.
const SENSITIVE_MARKERS: [&str; 4] = ["token", "key", "password", "secret"];

/// Pull the reference config block out of a plugin README: the ```toml fence
/// under the `## Configuration` heading, else the first toml fence anywhere.
pub fn extract_config_block(markdown: &str) -> Option<String> {
    let configured = Regex::new(r"(?s)## Configuration.*?```toml\r?\n(.*?)```").unwrap();
    if let Some(caps) = configured.captures(markdown) {
        return Some(caps[1].trim().to_string());
    }
    let any_fence = Regex::new(r"(?s)```toml\r?\n(.*?)```").unwrap();
    any_fence
        .captures(markdown)
        .map(|caps| caps[1].trim().to_string())
}

/// Parse a reference config block into a field schema.
///
/// Comment lines accumulate into a description buffer attached to the next
/// declaration; blank or unrelated lines discard the buffer. A block with no
/// declarations yields an empty field list, not an error. Duplicate
/// identifiers keep their first position but take the last declaration's
/// content.
pub fn parse(raw: &str, plugin: &str, role: NodeRole) -> PluginFieldSchema {
    let declaration = Regex::new(r"^\s*(#+\s*)?([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.*?)\s*$").unwrap();

    let mut fields: Vec<FieldSpec> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();
    let mut description_buf: Vec<String> = Vec::new();
    let mut plugin_description = String::new();

    for (i, line) in raw.lines().enumerate() {
        let line = line.trim();

        if i == 0 {
            if let Some(stripped) = strip_comment_marker(line) {
                plugin_description = stripped.to_string();
            }
        }

        if line.is_empty() {
            description_buf.clear();
            continue;
        }

        if let Some(caps) = declaration.captures(line) {
            let required = caps.get(1).is_none();
            let name = caps[2].to_string();
            let raw_value = caps[3].trim();

            let field_type = infer_type(raw_value);
            let spec = FieldSpec {
                sensitive: is_sensitive(&name),
                default: parse_default(field_type, raw_value),
                description: description_buf.join(" "),
                field_type,
                required,
                name: name.clone(),
            };
            description_buf.clear();

            match index_of.get(&name) {
                // Docs sometimes repeat an example declaration; the last
                // occurrence wins, keeping the original position.
                Some(&idx) => fields[idx] = spec,
                None => {
                    index_of.insert(name, fields.len());
                    fields.push(spec);
                }
            }
        } else if let Some(stripped) = strip_comment_marker(line) {
            if !stripped.is_empty() {
                description_buf.push(stripped.to_string());
            }
        } else {
            description_buf.clear();
        }
    }

    PluginFieldSchema {
        plugin: plugin.to_string(),
        role,
        description: plugin_description,
        fields,
    }
}

fn strip_comment_marker(line: &str) -> Option<&str> {
    line.starts_with('#')
        .then(|| line.trim_start_matches('#').trim())
}

fn is_sensitive(name: &str) -> bool {
    SENSITIVE_MARKERS.iter().any(|m| name.contains(m))
}

/// Infer a field's type from its value's lexical shape. Unbalanced brackets
/// and other unclassifiable shapes degrade to string.
fn infer_type(raw: &str) -> FieldType {
    if raw.starts_with('[') && raw.ends_with(']') {
        return FieldType::Array;
    }
    if raw == "true" || raw == "false" {
        return FieldType::Boolean;
    }
    if raw.starts_with('{') && raw.ends_with('}') {
        return FieldType::Object;
    }
    if !raw.is_empty() && raw.parse::<f64>().is_ok() {
        return FieldType::Number;
    }
    if raw.starts_with('[') || raw.starts_with('{') {
        warn!(value = raw, "unclassifiable field value shape, treating as string");
    }
    FieldType::String
}

/// Best-effort default value per inferred type; failures fall back to a
/// string carrying the raw text.
fn parse_default(field_type: FieldType, raw: &str) -> Value {
    match field_type {
        FieldType::Boolean => Value::Bool(raw == "true"),
        FieldType::Number => raw
            .parse::<i64>()
            .map(Value::from)
            .or_else(|_| raw.parse::<f64>().map(Value::from))
            .unwrap_or_else(|_| Value::String(raw.to_string())),
        FieldType::Array => serde_json::from_str(raw).unwrap_or_else(|_| {
            // Not valid JSON (single quotes, bare words); split on commas
            // and keep the elements as strings.
            let inner = raw.trim_start_matches('[').trim_end_matches(']');
            let items: Vec<Value> = inner
                .split(',')
                .map(|s| s.trim().trim_matches('"').trim_matches('\''))
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect();
            Value::Array(items)
        }),
        FieldType::Object => serde_json::from_str(raw)
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new())),
        FieldType::String => Value::String(raw.trim_matches('"').to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn required_and_optional_split() {
        let schema = parse("x = 1\n# y = 2\n", "demo", NodeRole::Input);
        assert_eq!(schema.fields.len(), 2);

        let x = &schema.fields[0];
        assert_eq!(x.name, "x");
        assert!(x.required);
        assert_eq!(x.field_type, FieldType::Number);
        assert_eq!(x.default, json!(1));

        let y = &schema.fields[1];
        assert_eq!(y.name, "y");
        assert!(!y.required);
        assert_eq!(y.default, json!(2));
    }

    #[test]
    fn comments_attach_to_the_next_declaration() {
        let block = "\
# Read metrics about cpu usage
## Whether to report per-cpu stats
## in addition to the total
percpu = true

## unrelated trailing comment
";
        let schema = parse(block, "cpu", NodeRole::Input);
        assert_eq!(schema.description, "Read metrics about cpu usage");
        assert_eq!(schema.fields.len(), 1);
        assert_eq!(
            schema.fields[0].description,
            "Read metrics about cpu usage Whether to report per-cpu stats in addition to the total"
        );
    }

    #[test]
    fn blank_line_discards_the_description_buffer() {
        let block = "\
## stale comment

files = [\"stdout\"]
";
        let schema = parse(block, "file", NodeRole::Output);
        assert_eq!(schema.fields[0].description, "");
    }

    #[test]
    fn type_inference_covers_all_shapes() {
        let block = r#"
urls = ["http://localhost:8086"]
timeout = "5s"
debug = false
limit = 10.5
fields = {integer = ["usage_*"]}
"#;
        let schema = parse(block, "demo", NodeRole::Output);
        let types: Vec<FieldType> = schema.fields.iter().map(|f| f.field_type).collect();
        assert_eq!(
            types,
            [
                FieldType::Array,
                FieldType::String,
                FieldType::Boolean,
                FieldType::Number,
                FieldType::Object,
            ]
        );
        assert_eq!(schema.fields[0].default, json!(["http://localhost:8086"]));
        assert_eq!(schema.fields[1].default, json!("5s"));
        assert_eq!(schema.fields[3].default, json!(10.5));
    }

    #[test]
    fn sensitive_fields_detected_by_name() {
        let block = "token = \"abc\"\nbucket = \"b\"\napi_key = \"k\"\n";
        let schema = parse(block, "influxdb_v2", NodeRole::Output);
        let sensitive: Vec<bool> = schema.fields.iter().map(|f| f.sensitive).collect();
        assert_eq!(sensitive, [true, false, true]);
    }

    #[test]
    fn duplicate_identifiers_last_occurrence_wins() {
        let block = "interval = \"10s\"\nfiles = [\"a\"]\ninterval = \"30s\"\n";
        let schema = parse(block, "demo", NodeRole::Input);
        assert_eq!(schema.fields.len(), 2);
        // Position of the first occurrence, content of the last.
        assert_eq!(schema.fields[0].name, "interval");
        assert_eq!(schema.fields[0].default, json!("30s"));
    }

    #[test]
    fn no_declarations_yield_empty_schema() {
        let schema = parse("just prose\nno fields here\n", "demo", NodeRole::Input);
        assert!(schema.fields.is_empty());
    }

    #[test]
    fn unbalanced_bracket_degrades_to_string() {
        let schema = parse("broken = [1, 2\n", "demo", NodeRole::Input);
        assert_eq!(schema.fields[0].field_type, FieldType::String);
        assert_eq!(schema.fields[0].default, json!("[1, 2"));
    }

    #[test]
    fn config_block_extraction_prefers_configuration_section() {
        let md = "\
# file output

```toml
wrong = true
```

## Configuration

```toml
files = [\"stdout\"]
```
";
        assert_eq!(
            extract_config_block(md).as_deref(),
            Some("files = [\"stdout\"]")
        );

        let fallback = "intro\n```toml\nx = 1\n```\n";
        assert_eq!(extract_config_block(fallback).as_deref(), Some("x = 1"));
        assert_eq!(extract_config_block("no fences"), None);
    }
}
