//! Structural schema inference for semi-structured tree data.
//!
//! Feed one or many samples (normalized XML documents, or plain JSON) and get one
//! `TypeDescriptor` every sample satisfies: nullable positions become `Optional`,
//! mixed shapes become `Union`, repeated children become `Sequence`, and mappings
//! become named `Record`s. Descriptors render to a JSON-Schema-style document.
//!
//! ```
//! use xml_osi::{infer_xml, render_schema};
//!
//! let t = infer_xml(r#"<entry name="a"><member>x</member><member>y</member></entry>"#).unwrap();
//! let schema = render_schema(&t);
//! assert_eq!(schema.title.as_deref(), Some("Entry"));
//! ```
pub mod error;
pub mod value;
pub mod ir;
pub mod naming;
pub mod inference;
pub mod normalize;
pub mod schema;
pub mod synth;
pub mod jq_exec;
mod path_de;

pub use error::{Error, Result};
pub use inference::{infer, infer_from_json, infer_one, Inference};
pub use ir::{Record, ScalarKind, TypeDescriptor};
pub use normalize::{normalize_xml, NormalizeOptions};
pub use schema::{render_schema, Schema, SchemaType, DEFAULT_INDENT};
pub use value::{Scalar, Shape, Value};

/// Normalize an XML document and infer the type of its root element, named after
/// the root tag.
pub fn infer_xml(xml: &str) -> Result<TypeDescriptor> {
    infer_xml_with(xml, &NormalizeOptions::default())
}

pub fn infer_xml_with(xml: &str, opts: &NormalizeOptions) -> Result<TypeDescriptor> {
    let doc = normalize_xml(xml, opts)?;
    let (tag, root) = normalize::split_root(doc).ok_or(Error::NoRootElement)?;
    let name = naming::type_ident(&tag);
    Ok(infer_one(&root, Some(name.as_str())))
}

/// XML in, pretty schema JSON out.
pub fn xml_to_json_schema(xml: &str, indent: usize) -> Result<String> {
    render_schema(&infer_xml(xml)?).to_json_string(indent)
}

/// Schema JSON text for a single JSON sample.
pub fn json_schema(value: &serde_json::Value, name: Option<&str>, indent: usize) -> Result<String> {
    let t = infer_one(&Value::from(value), name);
    render_schema(&t).to_json_string(indent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn infer_xml_names_the_root_after_its_tag() {
        let xml = r#"
            <security-rules>
                <entry name="allow-web"><from><member>trust</member></from><action>allow</action></entry>
                <entry name="deny-all"><from><member>any</member><member>dmz</member></from></entry>
            </security-rules>"#;
        let t = infer_xml(xml).unwrap();
        let root = t.as_record().unwrap();
        assert_eq!(root.name, "SecurityRules");

        let TypeDescriptor::Sequence(entry) = &root.fields["entry"] else { panic!("entry list") };
        let entry = entry.as_record().unwrap();
        assert_eq!(entry.fields["@name"], TypeDescriptor::scalar(ScalarKind::String));
        assert_eq!(entry.fields["action"], TypeDescriptor::optional(TypeDescriptor::scalar(ScalarKind::String)));

        let from = entry.fields["from"].as_record().unwrap();
        assert_eq!(from.name, "From");
        assert_eq!(
            from.fields["member"],
            TypeDescriptor::union([
                TypeDescriptor::scalar(ScalarKind::String),
                TypeDescriptor::sequence(TypeDescriptor::scalar(ScalarKind::String)),
            ])
        );
    }

    #[test]
    fn xml_to_json_schema_renders_text() {
        let text = xml_to_json_schema(r#"<address name="h1"><ip-netmask>10.0.0.1</ip-netmask></address>"#, 2).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            v,
            json!({
                "type": "object",
                "title": "Address",
                "properties": {
                    "ip_netmask": {"type": "string"},
                    "name": {"type": "string"}
                },
                "required": ["ip_netmask", "name"]
            })
        );
    }

    #[test]
    fn json_schema_for_a_single_sample() {
        let text = json_schema(&json!({"test": 5}), None, DEFAULT_INDENT).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["properties"]["test"], json!({"type": "integer"}));
        assert_eq!(v["title"], "Record");
    }

    #[test]
    fn empty_root_element_is_null() {
        assert_eq!(infer_xml("<empty/>").unwrap(), TypeDescriptor::Null);
    }
}
