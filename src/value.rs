//! Generic recursive sample shape consumed by inference.
//!
//! A `Value` is what a markup tree looks like after normalization: scalars,
//! ordered sequences (repeated children) and field-keyed mappings (attributes and
//! child elements). It is also a faithful image of plain JSON, so JSON documents can
//! be fed to the same engine.
use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Scalar(Scalar),
    Sequence(Vec<Value>),
    Mapping(IndexMap<String, Value>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    String(String),
}

/// Primitive scalar kinds. Ordering is the canonical order used inside unions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    String,
}

/// The four structural shapes a sample can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Null,
    Scalar,
    Sequence,
    Mapping,
}

impl Value {
    pub fn shape(&self) -> Shape {
        match self {
            Value::Null => Shape::Null,
            Value::Scalar(_) => Shape::Scalar,
            Value::Sequence(_) => Shape::Sequence,
            Value::Mapping(_) => Shape::Mapping,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::Scalar(Scalar::String(s.into()))
    }

    /// Convert back to plain JSON. Non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as J;
        match self {
            Value::Null => J::Null,
            Value::Scalar(Scalar::Bool(b)) => J::Bool(*b),
            Value::Scalar(Scalar::Int(i)) => J::from(*i),
            Value::Scalar(Scalar::Float(f)) => serde_json::Number::from_f64(f.0)
                .map(J::Number)
                .unwrap_or(J::Null),
            Value::Scalar(Scalar::String(s)) => J::String(s.clone()),
            Value::Sequence(xs) => J::Array(xs.iter().map(Value::to_json).collect()),
            Value::Mapping(m) => J::Object(
                m.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::Int(_) => ScalarKind::Int,
            Scalar::Float(_) => ScalarKind::Float,
            Scalar::String(_) => ScalarKind::String,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as J;
        match v {
            J::Null => Value::Null,
            J::Bool(b) => Value::Scalar(Scalar::Bool(b)),
            J::Number(n) => match n.as_i64() {
                Some(i) => Value::Scalar(Scalar::Int(i)),
                // u64 above i64::MAX and real floats
                None => Value::Scalar(Scalar::Float(OrderedFloat(n.as_f64().unwrap_or(f64::NAN)))),
            },
            J::String(s) => Value::Scalar(Scalar::String(s)),
            J::Array(xs) => Value::Sequence(xs.into_iter().map(Value::from).collect()),
            J::Object(m) => Value::Mapping(m.into_iter().map(|(k, v)| (k, Value::from(v))).collect()),
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        Value::from(v.clone())
    }
}
