//! Minimal CLI: XML/JSON files → (schema | descriptor | tree)
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;

use xml_osi::{naming, normalize, Inference, NormalizeOptions, Value};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer one structural schema from many XML (or JSON) documents
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and print the JSON-schema-style document
    Schema(SchemaOut),
    /// infer and print the raw type descriptor (JSON)
    Descriptor(DescriptorOut),
    /// print the normalized value tree of each input
    Tree(TreeOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// inputs are JSON documents instead of XML
    #[arg(long, default_value_t = false)]
    json: bool,

    /// JQ pre-process filter for each JSON document; every output is one sample
    #[arg(long, requires = "json")]
    jq_expr: Option<String>,

    /// keep whitespace around text content
    #[arg(long, default_value_t = false)]
    keep_whitespace: bool,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// name of the root record (defaults to the XML root tag)
    #[arg(long)]
    name: Option<String>,

    /// spaces per indentation level
    #[arg(long, default_value_t = xml_osi::DEFAULT_INDENT)]
    indent: usize,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DescriptorOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// name of the root record (defaults to the XML root tag)
    #[arg(long)]
    name: Option<String>,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TreeOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

/// One sample plus the root tag it was unwrapped from (XML only).
struct Sample {
    root_tag: Option<String>,
    value: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions { trim_text: !self.keep_whitespace, ..NormalizeOptions::default() }
    }

    /// Read and normalize every input, in parallel, keeping input order.
    fn load(&self) -> Result<Vec<Sample>> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let per_file = source_paths
            .par_iter()
            .map(|path| self.load_file(path))
            .collect::<Result<Vec<_>>>()?;
        let samples: Vec<Sample> = per_file.into_iter().flatten().collect();
        tracing::info!(files = source_paths.len(), samples = samples.len(), "inputs loaded");
        Ok(samples)
    }

    fn load_file(&self, source_path: &Path) -> Result<Vec<Sample>> {
        let source_path_str = source_path.to_string_lossy();
        let source = std::fs::read_to_string(source_path)
            .with_context(|| format!("failed to read source file ({source_path_str})"))?;

        if !self.json {
            let doc = xml_osi::normalize_xml(&source, &self.normalize_options())
                .with_context(|| format!("failed to parse XML source file ({source_path_str})"))?;
            let Some((tag, value)) = normalize::split_root(doc) else {
                bail!("no root element in ({source_path_str})");
            };
            return Ok(vec![Sample { root_tag: Some(tag), value }]);
        }

        let json_value = serde_json::from_str::<serde_json::Value>(&source)
            .with_context(|| format!("failed to parse JSON source file ({source_path_str})"))?;
        let json_values = match self.jq_expr.as_ref() {
            None => vec![json_value],
            Some(jq_expr) => xml_osi::jq_exec::run_jaq(jq_expr, &json_value).with_context(|| {
                format!("failed to apply jq expression to source file ({source_path_str})")
            })?,
        };
        Ok(json_values
            .into_iter()
            .map(|v| Sample { root_tag: None, value: Value::from(v) })
            .collect())
    }
}

fn solve(samples: Vec<Sample>, name: Option<&str>) -> Result<xml_osi::TypeDescriptor> {
    let name = match name {
        Some(n) => Some(n.to_string()),
        None => root_name(&samples),
    };
    let mut inf = match name {
        Some(n) => Inference::named(n),
        None => Inference::new(),
    };
    for sample in samples {
        inf.observe_value(sample.value);
    }
    Ok(inf.solve()?)
}

/// Root record name from the XML root tag, when all inputs agree on one.
fn root_name(samples: &[Sample]) -> Option<String> {
    let first = samples.first()?.root_tag.as_deref()?;
    if samples.iter().any(|s| s.root_tag.as_deref() != Some(first)) {
        tracing::warn!("inputs have different root elements; using the default record name");
        return None;
    }
    Some(naming::type_ident(first))
}

fn write_output(out: Option<&PathBuf>, text: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, text).with_context(|| format!("failed to write {}", out.display()))?;
        }
        None => println!("{text}"),
    }
    Ok(())
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Schema(target) => {
                let samples = target.input_settings.load()?;
                let t = solve(samples, target.name.as_deref())?;
                let schema = xml_osi::render_schema(&t);
                let schema_src = schema.to_json_string(target.indent)?;
                write_output(target.out.as_ref(), &schema_src)
            }
            Command::Descriptor(target) => {
                let samples = target.input_settings.load()?;
                let t = solve(samples, target.name.as_deref())?;
                let src = serde_json::to_string_pretty(&t)?;
                write_output(target.out.as_ref(), &src)
            }
            Command::Tree(target) => {
                for sample in target.input_settings.load()? {
                    let value = match sample.root_tag {
                        Some(tag) => serde_json::Value::Object(serde_json::Map::from_iter([
                            (tag, sample.value.to_json()),
                        ])),
                        None => sample.value.to_json(),
                    };
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern: {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
