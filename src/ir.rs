// Structural type model produced by inference. No `Value` here.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

pub use crate::value::ScalarKind;

/// Placeholder record name when the caller supplies none.
pub const DEFAULT_RECORD_NAME: &str = "Record";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TypeDescriptor {
    Null,                           // never observed a non-null value here
    Scalar(ScalarKind),
    Optional(Box<TypeDescriptor>),  // never wraps Optional or Null
    Union(Vec<TypeDescriptor>),     // sorted, deduplicated, ≥ 2, no nested unions
    Sequence(Box<TypeDescriptor>),
    Record(Record),
}

/// A mapping-shaped type. `name` is documentation only: equality, ordering and
/// hashing look at `fields` alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    /// Keyed by the raw source key, sorted.
    pub fields: BTreeMap<String, TypeDescriptor>,
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for Record {}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fields.cmp(&other.fields)
    }
}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fields.hash(state);
    }
}

impl TypeDescriptor {
    pub fn scalar(kind: ScalarKind) -> Self {
        TypeDescriptor::Scalar(kind)
    }

    pub fn sequence(element: TypeDescriptor) -> Self {
        TypeDescriptor::Sequence(Box::new(element))
    }

    pub fn record(name: impl Into<String>, fields: BTreeMap<String, TypeDescriptor>) -> Self {
        TypeDescriptor::Record(Record { name: name.into(), fields })
    }

    /// Mark as possibly null. Collapses `Optional(Optional(_))`; `Null` stays `Null`.
    pub fn optional(inner: TypeDescriptor) -> Self {
        match inner {
            TypeDescriptor::Null => TypeDescriptor::Null,
            t @ TypeDescriptor::Optional(_) => t,
            t => TypeDescriptor::Optional(Box::new(t)),
        }
    }

    /// Build the canonical union of `alternatives`.
    ///
    /// Nested unions are flattened, `Optional` and `Null` alternatives are hoisted into
    /// a single outer `Optional`, duplicates are dropped and the survivors sorted.
    /// Zero alternatives yield `Null`, one yields itself.
    pub fn union<I>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = TypeDescriptor>,
    {
        let mut nullable = false;
        let mut arms: Vec<TypeDescriptor> = Vec::new();
        let mut stack: Vec<TypeDescriptor> = alternatives.into_iter().collect();
        while let Some(t) = stack.pop() {
            match t {
                TypeDescriptor::Null => nullable = true,
                TypeDescriptor::Optional(inner) => {
                    nullable = true;
                    stack.push(*inner);
                }
                TypeDescriptor::Union(xs) => stack.extend(xs),
                other => arms.push(other),
            }
        }
        // equal arms may differ in record names; keep the smallest so the result
        // does not depend on input order
        arms.sort_by(|a, b| a.cmp(b).then_with(|| a.record_names().cmp(&b.record_names())));
        arms.dedup();

        let core = match arms.len() {
            0 => TypeDescriptor::Null,
            1 => arms.remove(0),
            _ => TypeDescriptor::Union(arms),
        };
        if nullable { TypeDescriptor::optional(core) } else { core }
    }

    /// Record names in a fixed pre-order walk. Equal descriptors walk alike.
    fn record_names(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(t) = stack.pop() {
            match t {
                TypeDescriptor::Null | TypeDescriptor::Scalar(_) => {}
                TypeDescriptor::Optional(inner) | TypeDescriptor::Sequence(inner) => stack.push(&**inner),
                TypeDescriptor::Union(xs) => stack.extend(xs.iter().rev()),
                TypeDescriptor::Record(r) => {
                    out.push(r.name.as_str());
                    stack.extend(r.fields.values().rev());
                }
            }
        }
        out
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, TypeDescriptor::Optional(_))
    }

    /// Drop one `Optional` layer if present.
    pub fn non_null(&self) -> &TypeDescriptor {
        match self {
            TypeDescriptor::Optional(inner) => inner,
            t => t,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            TypeDescriptor::Record(r) => Some(r),
            _ => None,
        }
    }
}
