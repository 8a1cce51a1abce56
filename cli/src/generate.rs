#![deny(missing_docs)]

//! # Generate Command
//!
//! Reads an operation header description (file or stdin), derives the
//! persistence-mapping artifacts for every operation class, and writes one
//! file per class into the output directory.

use crate::error::{CliError, CliResult};
use opgen_core::{generate, load_header, GeneratorConfig, MysqlShellExecutor, Overrides};
use std::fs;
use std::io::Read;
use std::path::PathBuf;

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
#[clap(allow_missing_positional = true)]
pub struct GenerateArgs {
    /// Path to the operation header JSON, or `-` for stdin.
    #[clap(default_value = "-")]
    pub infile: String,

    /// Output directory for the generated artifacts.
    pub base_path: PathBuf,

    /// Connection string for the example data source. When omitted, artifacts
    /// are generated without embedded examples.
    #[clap(long)]
    pub db_url: Option<String>,

    /// Directory holding pre-fetched per-operation example payloads.
    #[clap(long, default_value = "build_dir/examples")]
    pub cache_dir: PathBuf,

    /// Optional JSON document replacing the built-in override tables.
    #[clap(long)]
    pub overrides: Option<PathBuf>,
}

/// Executes the generation run.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &GenerateArgs) -> CliResult<()> {
    let input = read_schema_source(&args.infile)?;
    let header = load_header(&input)?;

    let overrides = match &args.overrides {
        Some(path) => {
            let file = fs::File::open(path)?;
            Overrides::from_reader(file)?
        }
        None => Overrides::builtin(),
    };

    let mut config = GeneratorConfig::new()
        .with_overrides(overrides)
        .with_cache_dir(&args.cache_dir);
    if let Some(db_url) = &args.db_url {
        config = config.with_db_url(db_url);
    }

    let written = generate(&header, &config, &args.base_path, &MysqlShellExecutor)?;
    println!("Generated {} artifact(s) in {:?}", written.len(), args.base_path);
    Ok(())
}

/// Reads the schema document from a file path or stdin (`-`).
fn read_schema_source(infile: &str) -> CliResult<String> {
    if infile == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    let path = PathBuf::from(infile);
    if !path.exists() {
        return Err(CliError::General(format!("Schema file not found: {:?}", path)));
    }
    Ok(fs::read_to_string(path)?)
}
