//! Schema node to TypeScript type text mapping.
//!
//! [`ts_type`] is a pure, total function: every decoded node maps to some
//! type text, and unrecognized shapes degrade to the fallback type instead
//! of failing. Safe for repeated or parallel invocation.

use super::contract::{LiteralValue, SchemaIr};
use super::utils::{escape_js_string, quote_if_needed};

/// Type emitted for shapes the mapper cannot interpret.
pub const FALLBACK_TYPE: &str = "unknown";

/// Map one schema node to TypeScript type text.
pub fn ts_type(node: &SchemaIr) -> String {
    match node {
        SchemaIr::Literal(value) => print_literal(value),
        SchemaIr::Enum(values) => {
            if values.is_empty() {
                return FALLBACK_TYPE.to_string();
            }
            values
                .iter()
                .map(print_literal)
                .collect::<Vec<_>>()
                .join(" | ")
        }
        SchemaIr::Union(members) => {
            if members.is_empty() {
                return FALLBACK_TYPE.to_string();
            }
            members.iter().map(ts_type).collect::<Vec<_>>().join(" | ")
        }
        SchemaIr::Intersection(members) => {
            if members.is_empty() {
                return FALLBACK_TYPE.to_string();
            }
            members
                .iter()
                .map(|member| {
                    let text = ts_type(member);
                    if is_union_like(member) {
                        format!("({text})")
                    } else {
                        text
                    }
                })
                .collect::<Vec<_>>()
                .join(" & ")
        }
        SchemaIr::Primitive(primitive) => primitive.as_str().to_string(),
        SchemaIr::Array(item) => match item {
            Some(item) => {
                let text = ts_type(item);
                if is_union_like(item) {
                    format!("({text})[]")
                } else {
                    format!("{text}[]")
                }
            }
            None => format!("{FALLBACK_TYPE}[]"),
        },
        SchemaIr::Record(value) => format!("Record<string, {}>", ts_type(value)),
        SchemaIr::Object {
            properties,
            required,
        } => {
            if properties.is_empty() {
                return format!("Record<string, {FALLBACK_TYPE}>");
            }
            let fields: Vec<_> = properties
                .iter()
                .map(|(name, schema)| {
                    let opt = if required.contains(name) { "" } else { "?" };
                    format!("{}{}: {}", quote_if_needed(name), opt, ts_type(schema))
                })
                .collect();
            format!("{{ {} }}", fields.join("; "))
        }
        SchemaIr::Unknown => FALLBACK_TYPE.to_string(),
    }
}

/// A member whose rendered text is a `|`-joined list needs parentheses in
/// array and intersection positions.
fn is_union_like(node: &SchemaIr) -> bool {
    match node {
        SchemaIr::Union(members) => members.len() > 1,
        SchemaIr::Enum(values) => values.len() > 1,
        _ => false,
    }
}

fn print_literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::String(s) => format!("\"{}\"", escape_js_string(s)),
        LiteralValue::Integer(i) => i.to_string(),
        LiteralValue::Float(n) => n.to_string(),
        LiteralValue::Bool(b) => b.to_string(),
        LiteralValue::Null => "null".to_string(),
    }
}
