//! Round-trip checker over XML fixtures.
//!
//! For every `*.xml` under the fixture directory (first argument, or the bundled
//! `fixtures/`): infer → render → JSON text → read back → synthesize samples →
//! infer → render, and report whether the schema came back unchanged.
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use xml_osi::{render_schema, synth, Schema, DEFAULT_INDENT};

fn check_fixture(path: &Path) -> Result<bool> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let t = xml_osi::infer_xml(&source)?;
    let schema = render_schema(&t);

    let text = schema.to_json_string(DEFAULT_INDENT)?;
    let read_back = Schema::from_json_str(&text)?;
    if read_back != schema {
        eprintln!("    schema text did not read back identically");
        return Ok(false);
    }

    let again = synth::rerender(&read_back)?;
    if again != schema {
        eprintln!("    expected:\n{text}");
        eprintln!("    got:\n{}", again.to_json_string(DEFAULT_INDENT)?);
        return Ok(false);
    }
    Ok(true)
}

fn main() -> ExitCode {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures")));
    let pattern = format!("{}/**/*.xml", dir.display());

    let paths: Vec<PathBuf> = match glob::glob(&pattern) {
        Ok(entries) => entries.filter_map(|e| e.ok()).collect(),
        Err(error) => {
            eprintln!("{} bad fixture pattern {pattern}: {error}", "error:".red().bold());
            return ExitCode::FAILURE;
        }
    };

    let mut failures = 0usize;
    for path in &paths {
        match check_fixture(path) {
            Ok(true) => eprintln!("✅ {}", path.display()),
            Ok(false) => {
                failures += 1;
                eprintln!("❌ {} {}", path.display(), "(schema changed after round trip)".red());
            }
            Err(error) => {
                failures += 1;
                eprintln!("❌ {} {error:#}", path.display());
            }
        }
    }

    eprintln!("{} fixtures, {} failed", paths.len(), failures);
    if failures == 0 && !paths.is_empty() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
