//! jq pre-processing of JSON inputs (via `jaq`), so a sample can be carved out of a
//! larger document before inference.
use anyhow::{anyhow, Context, Result};
use jaq_core::{compile::Undefined, load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

/// Run `filter_src` over `input`; every output of the filter is one JSON value.
pub fn run_jaq(filter_src: &str, input: &Value) -> Result<Vec<Value>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader
        .load(&arena, program)
        .map_err(format_parse_errors)?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(format_undefined_errors)?;

    let inputs = RcIter::new(core::iter::empty());
    let outputs = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut out = Vec::new();
    for item in outputs {
        let v = item.map_err(|e| anyhow!("jq runtime error: {e:?}"))?;
        // Val: Display → JSON text
        let text = v.to_string();
        let json = serde_json::from_str::<Value>(&text)
            .with_context(|| format!("jq output is not JSON: {text}"))?;
        out.push(json);
    }
    Ok(out)
}

fn format_parse_errors(
    errs: Vec<(load::File<&str, ()>, load::Error<&str>)>,
) -> anyhow::Error {
    let mut s = String::new();
    for (file, err) in errs {
        s.push_str(&format!("parse error: {err:?} in `{}`\n", file.code));
    }
    anyhow!(s)
}

fn format_undefined_errors(
    errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>,
) -> anyhow::Error {
    let mut s = String::new();
    for (file, list) in errs {
        for (name, undef) in list {
            s.push_str(&format!("undefined `{name}`: {undef:?} in `{}`\n", file.code));
        }
    }
    anyhow!(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_selects_samples() {
        let doc = json!({"result": {"entry": [{"a": 1}, {"a": 2}]}});
        let out = run_jaq(".result.entry[]", &doc).unwrap();
        assert_eq!(out, vec![json!({"a": 1}), json!({"a": 2})]);
    }

    #[test]
    fn bad_filters_are_errors() {
        assert!(run_jaq(".[", &json!(null)).is_err());
    }
}
