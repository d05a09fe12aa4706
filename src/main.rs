//! # conformist CLI
//!
//! Validates a JSON document against a JSON schema file.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use conformist::{SchemaValidator, ValidatorConfig};
use serde_json::Value;

/// Check a JSON document against a draft-03 style JSON schema.
///
/// Reads the document from INPUT, or from standard input when INPUT is
/// omitted. Exits non-zero when either file cannot be decoded, the schema
/// is malformed, or the document does not conform.
#[derive(Parser, Debug)]
#[command(name = "conformist", version, about)]
struct Cli {
    /// Path to the schema file.
    schema: PathBuf,

    /// Path to the document to validate (defaults to stdin).
    input: Option<PathBuf>,

    /// Treat properties without a `required` flag as optional.
    #[arg(long)]
    no_required_by_default: bool,

    /// Accept empty strings unless a schema says `blank: false`.
    #[arg(long)]
    blank_by_default: bool,

    /// Reject object keys the schema does not describe.
    #[arg(long)]
    disallow_unknown_properties: bool,

    /// Report every violation instead of stopping at the first.
    #[arg(long)]
    collect_all: bool,
}

impl Cli {
    fn config(&self) -> ValidatorConfig {
        ValidatorConfig {
            required_by_default: !self.no_required_by_default,
            blank_by_default: self.blank_by_default,
            disallow_unknown_properties: self.disallow_unknown_properties,
            raise_at_first_error: !self.collect_all,
        }
    }
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to decode {}", path.display()))
}

fn read_stdin() -> anyhow::Result<Value> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("failed to read standard input")?;
    serde_json::from_str(&text).context("failed to decode standard input")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let schema = read_json(&cli.schema)?;
    let data = match &cli.input {
        Some(path) => read_json(path)?,
        None => read_stdin()?,
    };

    tracing::info!(schema = %cli.schema.display(), "validating");

    SchemaValidator::with_config(cli.config()).validate(&data, &schema)?;

    println!("ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_library_defaults() {
        let cli = Cli::try_parse_from(["conformist", "schema.json"]).unwrap();
        assert_eq!(cli.schema, PathBuf::from("schema.json"));
        assert!(cli.input.is_none());
        assert_eq!(cli.config(), ValidatorConfig::default());
    }

    #[test]
    fn test_flags_map_to_config() {
        let cli = Cli::try_parse_from([
            "conformist",
            "schema.json",
            "doc.json",
            "--no-required-by-default",
            "--blank-by-default",
            "--disallow-unknown-properties",
            "--collect-all",
        ])
        .unwrap();

        assert_eq!(cli.input, Some(PathBuf::from("doc.json")));
        assert_eq!(
            cli.config(),
            ValidatorConfig {
                required_by_default: false,
                blank_by_default: true,
                disallow_unknown_properties: true,
                raise_at_first_error: false,
            }
        );
    }

    #[test]
    fn test_schema_argument_is_required() {
        assert!(Cli::try_parse_from(["conformist"]).is_err());
    }
}
