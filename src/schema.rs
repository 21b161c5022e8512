//! Rendering a `TypeDescriptor` as a portable JSON-Schema-style document.
//!
//! Mapping:
//! - `Null` → `{"type": "null"}`
//! - scalars → `boolean` / `integer` / `number` / `string`
//! - `Optional(T)` → `T` with `"nullable": true`
//! - `Union` → `{"anyOf": [...]}`
//! - `Sequence(T)` → `{"type": "array", "items": T}`
//! - `Record` → `{"type": "object", "title", "properties", "required"}`, properties
//!   keyed by field identifier, sorted by identifier
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ir::{ScalarKind, TypeDescriptor};
use crate::naming;

/// Indent width used when none is given.
pub const DEFAULT_INDENT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Schema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<SchemaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<Schema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl Schema {
    fn of_type(t: SchemaType) -> Self {
        Schema { type_: Some(t), ..Schema::default() }
    }

    /// Whether a value matching this schema may be null.
    pub fn accepts_null(&self) -> bool {
        self.nullable || self.type_ == Some(SchemaType::Null)
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Pretty JSON text using `indent` spaces per level.
    pub fn to_json_string(&self, indent: usize) -> Result<String> {
        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut out = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Read a rendered document back. Errors carry the JSON path of the offending node.
    pub fn from_json_str(src: &str) -> Result<Self> {
        crate::path_de::from_str_with_path(src)
    }
}

fn scalar_type(kind: ScalarKind) -> SchemaType {
    match kind {
        ScalarKind::Bool => SchemaType::Boolean,
        ScalarKind::Int => SchemaType::Integer,
        ScalarKind::Float => SchemaType::Number,
        ScalarKind::String => SchemaType::String,
    }
}

pub fn render_schema(t: &TypeDescriptor) -> Schema {
    match t {
        TypeDescriptor::Null => Schema::of_type(SchemaType::Null),
        TypeDescriptor::Scalar(kind) => Schema::of_type(scalar_type(*kind)),
        TypeDescriptor::Optional(inner) => {
            let mut s = render_schema(inner);
            s.nullable = true;
            s
        }
        TypeDescriptor::Union(arms) => Schema {
            any_of: Some(arms.iter().map(render_schema).collect()),
            ..Schema::default()
        },
        TypeDescriptor::Sequence(el) => Schema {
            items: Some(Box::new(render_schema(el))),
            ..Schema::of_type(SchemaType::Array)
        },
        TypeDescriptor::Record(rec) => {
            // colliding identifiers: the last raw key (in sorted order) wins
            let mut props = IndexMap::new();
            for (key, field) in &rec.fields {
                props.insert(naming::field_ident(key), render_schema(field));
            }
            props.sort_keys();
            let required = props
                .iter()
                .filter(|(_, s)| !s.accepts_null())
                .map(|(k, _)| k.clone())
                .collect();
            Schema {
                title: Some(rec.name.clone()),
                properties: Some(props),
                required,
                ..Schema::of_type(SchemaType::Object)
            }
        }
    }
}
