use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;

use crate::ir::{TypeDescriptor, DEFAULT_RECORD_NAME};
use crate::naming;
use crate::value::Value;

static NULL: Value = Value::Null;

/// Merge mapping samples key-wise into one record.
///
/// Every key seen in any sample becomes a field. A sample lacking the key counts as
/// an explicit `Null` for that field, which is what makes the field optional.
pub(super) fn unify_mappings(
    mappings: &[&IndexMap<String, Value>],
    name: Option<&str>,
) -> TypeDescriptor {
    let keys: BTreeSet<&str> = mappings
        .iter()
        .flat_map(|m| m.keys().map(String::as_str))
        .collect();

    let mut fields = BTreeMap::new();
    for key in keys {
        let column: Vec<&Value> = mappings.iter().map(|m| m.get(key).unwrap_or(&NULL)).collect();
        let field_name = naming::type_ident(key);
        fields.insert(key.to_string(), super::unify(&column, Some(field_name.as_str())));
    }

    let name = name.unwrap_or(DEFAULT_RECORD_NAME);
    tracing::trace!(record = name, fields = fields.len(), samples = mappings.len(), "unified record");
    TypeDescriptor::record(name, fields)
}
