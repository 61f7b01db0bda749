//! Contract document structs for serde deserialization.
//!
//! This module defines the wire shape of a contract document (routes plus
//! JSON-Schema-like type shapes) and the decode boundary that turns the
//! field-probing wire schema into an explicit tagged [`SchemaIr`] union.
//! Decoding happens exactly once per node; everything downstream matches
//! exhaustively on the tagged form.

use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashSet;

/// Root contract document handed to the generator.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDocument {
    /// Contract version, echoed verbatim into the artifact header.
    pub version: String,
    /// Generation timestamp of the contract, echoed verbatim.
    pub generated_at: String,
    /// Ordered route list. Order is significant: it fixes trie insertion
    /// order and therefore the emitted declaration order.
    #[serde(default)]
    pub routes: Vec<RouteDescriptor>,
}

impl ContractDocument {
    /// Parse a contract document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A single route in the contract.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDescriptor {
    /// HTTP verb, case-insensitive. Lowercased before use as a trie key.
    pub method: String,
    /// Slash-delimited path; dynamic segments are written `:name`.
    pub path: String,
    /// Optional route name.
    pub name: Option<String>,
    /// Optional description, emitted verbatim as a doc comment.
    pub description: Option<String>,
    /// Marks an event-stream route. Streaming routes get a subscription
    /// signature instead of a request/response signature.
    #[serde(default)]
    pub streaming: bool,
    /// Input/output shapes for the route.
    pub schema: Option<RouteSchema>,
}

/// The four optional schema slots a route may carry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteSchema {
    pub body: Option<RawSchema>,
    pub query: Option<RawSchema>,
    pub params: Option<RawSchema>,
    pub response: Option<RawSchema>,
}

/// JSON-Schema-like wire shape of one type node.
///
/// This is the open, partially-ambiguous grammar as it appears on the wire.
/// It is never interpreted directly; [`SchemaIr::from_raw`] resolves the
/// keyword precedence in one place.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSchema {
    /// Declared primitive kind (string, number, integer, boolean, null,
    /// array, object).
    #[serde(rename = "type")]
    pub schema_type: Option<String>,

    /// Constant value; the schema matches only this exact value.
    ///
    /// Uses a presence-preserving deserializer so an explicit `"const": null`
    /// decodes as `Some(Value::Null)` instead of being conflated with an
    /// absent `const`.
    #[serde(rename = "const", default, deserialize_with = "deserialize_present")]
    pub const_value: Option<serde_json::Value>,

    /// Enumeration of allowed values, ordered. Kept as raw JSON so a
    /// non-scalar member degrades at decode time instead of failing the
    /// document parse.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<serde_json::Value>>,

    /// Union members (any of these schemas).
    #[serde(rename = "anyOf")]
    pub any_of: Option<Vec<RawSchema>>,

    /// Union members (exactly one of these schemas). Treated identically
    /// to `anyOf`.
    #[serde(rename = "oneOf")]
    pub one_of: Option<Vec<RawSchema>>,

    /// Intersection members (all of these schemas combined).
    #[serde(rename = "allOf")]
    pub all_of: Option<Vec<RawSchema>>,

    /// Item schema for array types.
    pub items: Option<Box<RawSchema>>,

    /// Named properties for object types, in source order.
    pub properties: Option<IndexMap<String, RawSchema>>,

    /// Required property names for object types.
    pub required: Option<Vec<String>>,

    /// Uniform value schema for record/dict types (or a bare boolean).
    pub additional_properties: Option<AdditionalProperties>,
}

/// Deserialize a field as present (`Some`) whenever the key exists, even if
/// its value is JSON `null`; absence is handled by `#[serde(default)]`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// A literal value appearing in `const` or `enum` positions.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl LiteralValue {
    /// Convert a JSON value to a literal, if it is scalar.
    fn from_json(value: &serde_json::Value) -> Option<LiteralValue> {
        match value {
            serde_json::Value::Null => Some(LiteralValue::Null),
            serde_json::Value::Bool(b) => Some(LiteralValue::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(LiteralValue::Integer(i))
                } else {
                    n.as_f64().map(LiteralValue::Float)
                }
            }
            serde_json::Value::String(s) => Some(LiteralValue::String(s.clone())),
            _ => None,
        }
    }
}

/// `additionalProperties` can be a boolean or a schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<RawSchema>),
}

/// Primitive kinds the target type system distinguishes.
///
/// Numeric width is not tracked: integer and float both collapse to
/// [`Primitive::Number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Null,
}

impl Primitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Null => "null",
        }
    }
}

/// Decoded schema node. Exactly one variant applies per node; the wire
/// keyword precedence is resolved by [`SchemaIr::from_raw`] and nowhere else.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaIr {
    /// A single constant value.
    Literal(LiteralValue),
    /// An ordered set of allowed values.
    Enum(Vec<LiteralValue>),
    /// Ordered union members, not deduplicated.
    Union(Vec<SchemaIr>),
    /// Ordered intersection members.
    Intersection(Vec<SchemaIr>),
    Primitive(Primitive),
    /// Array with an optional item schema.
    Array(Option<Box<SchemaIr>>),
    /// Uniform string-keyed mapping to one value schema.
    Record(Box<SchemaIr>),
    /// Fixed-shape object with named fields.
    Object {
        properties: IndexMap<String, SchemaIr>,
        required: HashSet<String>,
    },
    /// Unrecognized shape; maps to the fallback type.
    Unknown,
}

impl SchemaIr {
    /// Decode one wire node. Total: unmatched input yields [`SchemaIr::Unknown`].
    ///
    /// Precedence, first match wins: `const`, `enum`, `anyOf`, `oneOf`
    /// (both union spellings decode identically), `allOf`, then the declared
    /// `type`, then bare `properties` without a `type`.
    pub fn from_raw(raw: &RawSchema) -> SchemaIr {
        if let Some(value) = &raw.const_value {
            return match LiteralValue::from_json(value) {
                Some(literal) => SchemaIr::Literal(literal),
                None => SchemaIr::Unknown,
            };
        }

        if let Some(values) = &raw.enum_values {
            let literals: Option<Vec<LiteralValue>> =
                values.iter().map(LiteralValue::from_json).collect();
            return match literals {
                Some(literals) => SchemaIr::Enum(literals),
                None => SchemaIr::Unknown,
            };
        }

        if let Some(members) = &raw.any_of {
            return SchemaIr::Union(decode_members(members));
        }
        if let Some(members) = &raw.one_of {
            return SchemaIr::Union(decode_members(members));
        }
        if let Some(members) = &raw.all_of {
            return SchemaIr::Intersection(decode_members(members));
        }

        match raw.schema_type.as_deref() {
            Some("string") => SchemaIr::Primitive(Primitive::String),
            Some("number") | Some("integer") => SchemaIr::Primitive(Primitive::Number),
            Some("boolean") => SchemaIr::Primitive(Primitive::Boolean),
            Some("null") => SchemaIr::Primitive(Primitive::Null),
            Some("array") => SchemaIr::Array(
                raw.items
                    .as_deref()
                    .map(|items| Box::new(SchemaIr::from_raw(items))),
            ),
            Some("object") => decode_object(raw),
            Some(_) => SchemaIr::Unknown,
            None => {
                if raw.properties.as_ref().is_some_and(|p| !p.is_empty()) {
                    decode_object(raw)
                } else {
                    SchemaIr::Unknown
                }
            }
        }
    }
}

fn decode_members(members: &[RawSchema]) -> Vec<SchemaIr> {
    members.iter().map(SchemaIr::from_raw).collect()
}

/// Object-kind decoding: a schema-valued `additionalProperties` wins as a
/// record; declared fields form a fixed shape; a field-less object with no
/// record marker becomes a record of the fallback type so schema-less
/// payloads still render as valid syntax.
fn decode_object(raw: &RawSchema) -> SchemaIr {
    if let Some(AdditionalProperties::Schema(value)) = &raw.additional_properties {
        return SchemaIr::Record(Box::new(SchemaIr::from_raw(value)));
    }

    match &raw.properties {
        Some(properties) if !properties.is_empty() => {
            let required: HashSet<String> = raw
                .required
                .as_ref()
                .map(|names| names.iter().cloned().collect())
                .unwrap_or_default();
            let properties = properties
                .iter()
                .map(|(name, schema)| (name.clone(), SchemaIr::from_raw(schema)))
                .collect();
            SchemaIr::Object {
                properties,
                required,
            }
        }
        _ => SchemaIr::Record(Box::new(SchemaIr::Unknown)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn decode(json: &str) -> SchemaIr {
        let raw: RawSchema = serde_json::from_str(json).unwrap();
        SchemaIr::from_raw(&raw)
    }

    #[test]
    fn test_const_wins_over_enum() {
        let ir = decode(r#"{ "const": "fixed", "enum": ["a", "b"], "type": "string" }"#);
        assert_eq!(ir, SchemaIr::Literal(LiteralValue::String("fixed".into())));
    }

    #[test]
    fn test_enum_wins_over_type() {
        let ir = decode(r#"{ "enum": ["a", "b"], "type": "string" }"#);
        assert_eq!(
            ir,
            SchemaIr::Enum(vec![
                LiteralValue::String("a".into()),
                LiteralValue::String("b".into()),
            ])
        );
    }

    #[test]
    fn test_any_of_wins_over_type() {
        let ir = decode(r#"{ "anyOf": [{ "type": "string" }, { "type": "null" }], "type": "object" }"#);
        assert_eq!(
            ir,
            SchemaIr::Union(vec![
                SchemaIr::Primitive(Primitive::String),
                SchemaIr::Primitive(Primitive::Null),
            ])
        );
    }

    #[test]
    fn test_one_of_decodes_like_any_of() {
        let any_of = decode(r#"{ "anyOf": [{ "type": "string" }, { "type": "number" }] }"#);
        let one_of = decode(r#"{ "oneOf": [{ "type": "string" }, { "type": "number" }] }"#);
        assert_eq!(any_of, one_of);
    }

    #[test]
    fn test_integer_collapses_to_number() {
        assert_eq!(
            decode(r#"{ "type": "integer" }"#),
            SchemaIr::Primitive(Primitive::Number)
        );
        assert_eq!(
            decode(r#"{ "type": "number" }"#),
            SchemaIr::Primitive(Primitive::Number)
        );
    }

    #[test]
    fn test_record_from_additional_properties() {
        let ir = decode(r#"{ "type": "object", "additionalProperties": { "type": "string" } }"#);
        assert_eq!(
            ir,
            SchemaIr::Record(Box::new(SchemaIr::Primitive(Primitive::String)))
        );
    }

    #[test]
    fn test_bare_object_becomes_unknown_record() {
        let ir = decode(r#"{ "type": "object" }"#);
        assert_eq!(ir, SchemaIr::Record(Box::new(SchemaIr::Unknown)));
    }

    #[test]
    fn test_properties_without_type_decode_as_object() {
        let ir = decode(r#"{ "properties": { "id": { "type": "string" } }, "required": ["id"] }"#);
        match ir {
            SchemaIr::Object {
                properties,
                required,
            } => {
                assert_eq!(properties.len(), 1);
                assert!(required.contains("id"));
            }
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_property_order_is_preserved() {
        let ir = decode(
            r#"{ "type": "object", "properties": { "zulu": { "type": "string" }, "alpha": { "type": "number" } } }"#,
        );
        match ir {
            SchemaIr::Object { properties, .. } => {
                let names: Vec<_> = properties.keys().cloned().collect();
                assert_eq!(names, vec!["zulu", "alpha"]);
            }
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_shape_is_unknown() {
        assert_eq!(decode(r#"{}"#), SchemaIr::Unknown);
        assert_eq!(decode(r#"{ "type": "frobnicator" }"#), SchemaIr::Unknown);
        assert_eq!(decode(r#"{ "const": [1, 2, 3] }"#), SchemaIr::Unknown);
    }

    #[test]
    fn test_nonscalar_enum_member_degrades_to_unknown() {
        assert_eq!(
            decode(r#"{ "enum": [["a", "b"], "c"] }"#),
            SchemaIr::Unknown
        );
        assert_eq!(
            decode(r#"{ "enum": [{ "nested": true }] }"#),
            SchemaIr::Unknown
        );
    }

    #[test]
    fn test_nonscalar_enum_member_does_not_abort_parse() {
        let document = ContractDocument::from_json(
            r#"{ "version": "1.0.0", "generatedAt": "t", "routes": [
                { "method": "GET", "path": "/things", "schema": {
                    "response": { "enum": [["a", "b"], "c"] }
                } }
            ] }"#,
        )
        .unwrap();
        assert_eq!(document.routes.len(), 1);
    }

    #[test]
    fn test_document_parses_with_defaults() {
        let document = ContractDocument::from_json(
            r#"{ "version": "1.0.0", "generatedAt": "2025-01-01T00:00:00Z" }"#,
        )
        .unwrap();
        assert_eq!(document.version, "1.0.0");
        assert!(document.routes.is_empty());
    }
}
