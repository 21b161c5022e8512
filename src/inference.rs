//! Recursive unification of sample values into one `TypeDescriptor`.
//!
//! Every position in the tree is typed from the multiset of samples observed there:
//! nulls (and absent keys) make it optional, each distinct scalar kind is one
//! alternative, all sequence samples pool their elements into one element type, and
//! all mapping samples merge key-wise into one record.
//!
//! Properties:
//! - Total: there is always an answer; "never saw anything" is `TypeDescriptor::Null`.
//! - Order-independent: the result depends only on the *set* of samples.
//! - Names are metadata; they never influence structure.
pub mod scalar;
pub mod arr;
pub mod obj;

use crate::error::{Error, Result};
use crate::ir::TypeDescriptor;
use crate::value::{Scalar, Value};

use indexmap::IndexMap;

// ------------------------------- Unify ------------------------------------ //

/// Unify all `samples` observed at one position.
///
/// An empty slice is allowed here and means "absent everywhere"; the public entry
/// points reject it at the top level.
pub fn unify(samples: &[&Value], name: Option<&str>) -> TypeDescriptor {
    let optional = samples.iter().any(|v| v.is_null());

    let mut scalars: Vec<&Scalar> = Vec::new();
    let mut sequences: Vec<&[Value]> = Vec::new();
    let mut mappings: Vec<&IndexMap<String, Value>> = Vec::new();
    for v in samples {
        match v {
            Value::Null => {}
            Value::Scalar(s) => scalars.push(s),
            Value::Sequence(xs) => sequences.push(xs.as_slice()),
            Value::Mapping(m) => mappings.push(m),
        }
    }

    if scalars.is_empty() && sequences.is_empty() && mappings.is_empty() {
        return TypeDescriptor::Null;
    }

    let mut arms: Vec<TypeDescriptor> = scalar::distinct_kinds(&scalars)
        .into_iter()
        .map(TypeDescriptor::Scalar)
        .collect();
    if !sequences.is_empty() {
        arms.push(arr::unify_sequences(&sequences));
    }
    if !mappings.is_empty() {
        arms.push(obj::unify_mappings(&mappings, name));
    }

    let core = TypeDescriptor::union(arms);
    if optional { TypeDescriptor::optional(core) } else { core }
}

// ------------------------------- Front API -------------------------------- //

/// Accumulates samples, then solves them in one pass.
#[derive(Debug, Clone, Default)]
pub struct Inference {
    samples: Vec<Value>,
    name: Option<String>,
}

impl Inference {
    pub fn new() -> Self { Self::default() }

    /// Name given to the root record, if the root turns out to be one.
    pub fn named(name: impl Into<String>) -> Self {
        Self { samples: Vec::new(), name: Some(name.into()) }
    }

    pub fn observe_value(&mut self, v: Value) {
        self.samples.push(v);
    }

    pub fn observe_json(&mut self, v: &serde_json::Value) {
        self.samples.push(Value::from(v));
    }

    pub fn len(&self) -> usize { self.samples.len() }

    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    pub fn solve(&self) -> Result<TypeDescriptor> {
        infer(&self.samples, self.name.as_deref())
    }
}

/// Infer one descriptor that every sample in `values` satisfies.
pub fn infer<'a, I>(values: I, name: Option<&str>) -> Result<TypeDescriptor>
where
    I: IntoIterator<Item = &'a Value>,
{
    let samples: Vec<&Value> = values.into_iter().collect();
    if samples.is_empty() {
        return Err(Error::NoSamples);
    }
    tracing::debug!(samples = samples.len(), name, "inferring schema");
    Ok(unify(&samples, name))
}

/// Single-sample form of [`infer`].
pub fn infer_one(value: &Value, name: Option<&str>) -> TypeDescriptor {
    unify(&[value], name)
}

/// Convenience over plain JSON documents.
pub fn infer_from_json<'a, I>(values: I, name: Option<&str>) -> Result<TypeDescriptor>
where
    I: IntoIterator<Item = &'a serde_json::Value>,
{
    let values: Vec<Value> = values.into_iter().map(Value::from).collect();
    infer(&values, name)
}

// ------------------------------- Tests ------------------------------------ //
