//! Synthetic samples conforming to a rendered schema.
//!
//! Used to check that a schema is stable under one round trip: render, generate
//! conforming samples, infer again, render again. Inference depends only on the set
//! of samples seen at each position, so one representative per alternative is enough.
use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::error::Result;
use crate::inference;
use crate::schema::{render_schema, Schema, SchemaType};
use crate::value::{Scalar, Value};

pub fn samples_from_schema(schema: &Schema) -> Vec<Value> {
    let mut out = match &schema.any_of {
        Some(arms) => arms.iter().flat_map(samples_from_schema).collect(),
        None => typed_samples(schema),
    };
    if schema.nullable || out.is_empty() {
        out.push(Value::Null);
    }
    out
}

fn typed_samples(schema: &Schema) -> Vec<Value> {
    let Some(t) = schema.type_ else { return Vec::new() };
    match t {
        SchemaType::Null => vec![Value::Null],
        SchemaType::Boolean => vec![Value::Scalar(Scalar::Bool(true))],
        SchemaType::Integer => vec![Value::Scalar(Scalar::Int(0))],
        SchemaType::Number => vec![Value::Scalar(Scalar::Float(OrderedFloat(0.5)))],
        SchemaType::String => vec![Value::string("")],
        SchemaType::Array => {
            let items = schema.items.as_deref().map(samples_from_schema).unwrap_or_default();
            vec![Value::Sequence(items)]
        }
        SchemaType::Object => object_samples(schema),
    }
}

/// Enough mappings that every property sees each of its own samples at least once.
fn object_samples(schema: &Schema) -> Vec<Value> {
    let columns: Vec<(&String, Vec<Value>)> = schema
        .properties
        .iter()
        .flatten()
        .map(|(k, s)| (k, samples_from_schema(s)))
        .collect();
    let rows = columns.iter().map(|(_, c)| c.len()).max().unwrap_or(0).max(1);

    (0..rows)
        .map(|i| {
            let row: IndexMap<String, Value> = columns
                .iter()
                .map(|(k, c)| (k.to_string(), c[i % c.len()].clone()))
                .collect();
            Value::Mapping(row)
        })
        .collect()
}

/// Name the root was inferred with: its own title, or the title of its object arm
/// when the root is a union.
fn root_title(schema: &Schema) -> Option<&str> {
    schema.title.as_deref().or_else(|| {
        schema
            .any_of
            .iter()
            .flatten()
            .find_map(|arm| arm.title.as_deref())
    })
}

/// Render → synthesize → infer → render. A stable schema comes back unchanged.
pub fn rerender(schema: &Schema) -> Result<Schema> {
    let samples = samples_from_schema(schema);
    let t = inference::infer(&samples, root_title(schema))?;
    Ok(render_schema(&t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer_from_json;
    use serde_json::json;

    fn assert_stable(samples: &[serde_json::Value], name: Option<&str>) {
        let schema = render_schema(&infer_from_json(samples, name).unwrap());
        let again = rerender(&schema).unwrap();
        assert_eq!(again, schema, "schema changed after a round trip");
    }

    #[test]
    fn scalars_and_nulls_are_stable() {
        assert_stable(&[json!(null)], None);
        assert_stable(&[json!(1), json!(null)], None);
        assert_stable(&[json!(1), json!("x"), json!(true), json!(0.25)], None);
    }

    #[test]
    fn sequences_are_stable() {
        assert_stable(&[json!([]), json!([])], None);
        assert_stable(&[json!([1, "x", null]), json!([[2]])], None);
        assert_stable(&[json!([{"a": 1}, {"b": [true]}])], None);
    }

    #[test]
    fn records_are_stable() {
        assert_stable(
            &[
                json!({"@name": "r1", "source-zone": {"member": "trust"}, "to": ["a", "b"]}),
                json!({"@name": "r2", "source-zone": {"member": ["x", "y"]}, "disabled": "yes"}),
                json!({"@name": "r3", "log": null}),
            ],
            Some("Entry"),
        );
    }

    #[test]
    fn unions_of_shapes_are_stable() {
        assert_stable(&[json!({"a": 1}), json!([1]), json!("s"), json!(null)], Some("Mixed"));
    }

    #[test]
    fn object_rows_cover_every_property_sample() {
        let schema = render_schema(&infer_from_json(&[json!({"a": 1}), json!({"a": "x", "b": null})], None).unwrap());
        let rows = samples_from_schema(&schema);
        // "a" has two alternatives, "b" is null only
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| matches!(r, Value::Mapping(m) if m.len() == 2)));
    }
}
