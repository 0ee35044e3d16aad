//! fgacov binary
//!
//! Analyzes how thoroughly a test file's check assertions exercise the
//! relations declared in an authorization model.
//!
//! # Usage
//!
//! ```bash
//! fgacov --model-file model.fga --test-file tests.yaml
//!
//! # Human-readable summary instead of JSON
//! fgacov --model-file model.fga --test-file tests.yaml --pretty
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fgacov_cli::{output, TestFile};
use fgacov_domain::coverage::analyze;
use fgacov_domain::model;

/// Analyze test coverage for authorization model relations.
#[derive(Parser, Debug)]
#[command(name = "fgacov")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the model file (DSL format)
    #[arg(long)]
    model_file: PathBuf,

    /// Path to the test file (YAML format)
    #[arg(long)]
    test_file: PathBuf,

    /// Print a human-readable summary instead of JSON
    #[arg(long)]
    pretty: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, env = "FGACOV_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let model_text = fs::read_to_string(&args.model_file)
        .with_context(|| format!("failed to read model file {}", args.model_file.display()))?;
    let model = model::parse(&model_text)
        .with_context(|| format!("failed to parse model file {}", args.model_file.display()))?;

    let test_text = fs::read_to_string(&args.test_file)
        .with_context(|| format!("failed to read test file {}", args.test_file.display()))?;
    let test_file = TestFile::parse(&test_text)
        .with_context(|| format!("failed to parse test file {}", args.test_file.display()))?;

    let assertions = test_file.check_assertions();
    info!(
        types = model.type_definitions.len(),
        assertions = assertions.len(),
        "analyzing coverage"
    );

    let report = analyze(&model, &assertions).context("failed to analyze coverage")?;

    if args.pretty {
        print!("{}", output::render_text(&report));
    } else {
        println!("{}", output::render_json(&report)?);
    }

    Ok(())
}

/// Logs go to stderr so the report on stdout stays machine-readable.
fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
