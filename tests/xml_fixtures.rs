//! End-to-end inference over the XML fixtures shared with `dev-test-runner`.
use std::path::PathBuf;

use xml_osi::{infer_xml, render_schema, synth, ScalarKind, TypeDescriptor};

fn fixture(name: &str) -> String {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "dev-test-runner", "fixtures", name].iter().collect();
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

fn string() -> TypeDescriptor {
    TypeDescriptor::scalar(ScalarKind::String)
}

fn member_list() -> TypeDescriptor {
    TypeDescriptor::union([string(), TypeDescriptor::sequence(string())])
}

fn field<'a>(t: &'a TypeDescriptor, key: &str) -> &'a TypeDescriptor {
    let rec = t.non_null().as_record().unwrap_or_else(|| panic!("not a record: {t:?}"));
    rec.fields.get(key).unwrap_or_else(|| panic!("no field {key} in {}", rec.name))
}

#[test]
fn security_rules_unify_across_entries() {
    let t = infer_xml(&fixture("security_rules.xml")).unwrap();
    assert_eq!(t.as_record().unwrap().name, "Response");
    assert_eq!(field(&t, "@status"), &string());

    let rules = field(field(field(&t, "result"), "security"), "rules");
    let TypeDescriptor::Sequence(entry) = field(rules, "entry") else { panic!("entries repeat") };

    assert_eq!(field(entry, "@name"), &string());
    assert_eq!(field(entry, "action"), &string());
    assert_eq!(field(entry, "disabled"), &TypeDescriptor::optional(string()));
    assert_eq!(field(entry, "log-setting"), &TypeDescriptor::optional(string()));

    // single member → scalar, several → sequence
    assert_eq!(field(field(entry, "from"), "member"), &member_list());
    // <source/> in one entry
    let source = field(entry, "source");
    assert!(source.is_optional());
    assert_eq!(field(source, "member"), &string());
    assert_eq!(source.non_null().as_record().unwrap().name, "Source");
}

#[test]
fn addresses_have_optional_alternative_fields() {
    let t = infer_xml(&fixture("addresses.xml")).unwrap();
    let TypeDescriptor::Sequence(entry) = field(&t, "entry") else { panic!("entries repeat") };
    for key in ["ip-netmask", "fqdn", "ip-range", "description", "tag"] {
        assert!(field(entry, key).is_optional(), "{key} should be optional");
    }
    assert_eq!(field(entry, "@name"), &string());
}

#[test]
fn empty_elements_are_null_and_cdata_is_text() {
    let t = infer_xml(&fixture("system_info.xml")).unwrap();
    let system = field(field(&t, "result"), "system");
    assert_eq!(field(system, "ha-state"), &TypeDescriptor::Null);
    assert_eq!(field(system, "cdata-note"), &string());

    let schema = render_schema(&t).to_json().unwrap();
    let props = &schema["properties"]["result"]["properties"]["system"]["properties"];
    assert_eq!(props["ha_state"], serde_json::json!({"type": "null"}));
    assert_eq!(props["sw_version"], serde_json::json!({"type": "string"}));
}

#[test]
fn fixture_schemas_are_stable() {
    for name in ["security_rules.xml", "addresses.xml", "system_info.xml"] {
        let schema = render_schema(&infer_xml(&fixture(name)).unwrap());
        assert_eq!(synth::rerender(&schema).unwrap(), schema, "{name}");
    }
}

#[test]
fn tags_lowercasing_to_combining_marks_are_stable() {
    let t = infer_xml("<r><İa>x</İa><Straße>y</Straße></r>").unwrap();
    let schema = render_schema(&t);
    let props = schema.properties.as_ref().unwrap();
    assert!(props.contains_key("i_a"));
    assert!(props.contains_key("straße"));
    assert_eq!(synth::rerender(&schema).unwrap(), schema);
}
