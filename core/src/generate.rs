#![deny(missing_docs)]

//! # Generation Pipeline
//!
//! Drives the linear pipeline over the loaded operation header: for each
//! operation class, derive naming, compute columns and extraction rules,
//! optionally fetch a live example, render, and write one artifact file into
//! the output directory. Writes overwrite existing files; there is no
//! rollback, and a fatal schema error has already aborted before this point.

use crate::columns::columns;
use crate::config::GeneratorConfig;
use crate::error::AppResult;
use crate::example::{fetch_example, ExampleOutcome, QueryExecutor};
use crate::extractors::extractors;
use crate::naming;
use crate::render::render_operation;
use crate::schema::{OperationClass, OperationHeader};
use std::fs;
use std::path::{Path, PathBuf};

/// Renders the artifact text for a single operation class.
///
/// Pure except for the example lookup; a cold cache with a configured data
/// source issues one blocking query. Example failures never abort the class.
pub fn render_class(
    cls: &OperationClass,
    config: &GeneratorConfig,
    executor: &impl QueryExecutor,
) -> String {
    let op_name = &cls.name;

    let example = match &config.db_url {
        Some(db_url) => {
            let outcome = fetch_example(op_name, db_url, &config.cache_dir, &config.overrides, executor);
            if let ExampleOutcome::Unavailable(reason) = &outcome {
                eprintln!("Warning: no example for '{}': {}", op_name, reason);
            }
            outcome
        }
        None => ExampleOutcome::Unavailable("no data source configured".to_string()),
    };

    let mut cols = Vec::new();
    let mut rules = Vec::new();
    for prop in &cls.properties.public {
        let mapped = columns(&prop.name, &prop.type_name, op_name, &config.overrides);
        for col in &mapped {
            if col.is_fallback() {
                eprintln!(
                    "Warning: unmapped protocol type '{}' for '{}.{}', using default column",
                    prop.type_name, op_name, prop.name
                );
            }
        }
        cols.extend(mapped);
        rules.extend(extractors(&prop.name, &prop.type_name));
    }

    render_operation(
        op_name,
        &naming::class_name(op_name),
        &naming::table_name(op_name),
        &cols,
        &rules,
        example.text(),
    )
}

/// Generates one artifact per operation class into `out_dir`.
///
/// Classes are processed in input order. Returns the written paths.
pub fn generate(
    header: &OperationHeader,
    config: &GeneratorConfig,
    out_dir: &Path,
    executor: &impl QueryExecutor,
) -> AppResult<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::with_capacity(header.classes.len());
    for cls in header.classes.values() {
        let text = render_class(cls, config, executor);
        let path = out_dir.join(naming::artifact_file_name(&cls.name));
        fs::write(&path, text)?;
        println!("Generated {:?}", path);
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::schema::load_header;
    use tempfile::tempdir;

    struct UnreachableStore;

    impl QueryExecutor for UnreachableStore {
        fn run_query(&self, _db_url: &str, _query: &str) -> crate::error::AppResult<String> {
            Err(AppError::General("timed out".to_string()))
        }
    }

    const HEADER: &str = r#"{
        "classes": {
            "vote_operation": {
                "name": "vote_operation",
                "properties": {"public": [
                    {"name": "voter", "type": "account_name_type"},
                    {"name": "weight", "type": "int16_t"}
                ]}
            },
            "transfer_operation": {
                "name": "transfer_operation",
                "properties": {"public": [
                    {"name": "from", "type": "account_name_type"},
                    {"name": "amount", "type": "asset"}
                ]}
            }
        }
    }"#;

    #[test]
    fn test_generate_writes_one_artifact_per_class() {
        let dir = tempdir().unwrap();
        let header = load_header(HEADER).unwrap();
        let config = GeneratorConfig::new();

        let written = generate(&header, &config, dir.path(), &UnreachableStore).unwrap();
        assert_eq!(written.len(), 2);
        assert!(dir.path().join("vote.py").exists());
        assert!(dir.path().join("transfer.py").exists());

        let vote = fs::read_to_string(dir.path().join("vote.py")).unwrap();
        assert!(vote.contains("class VoteOperation(Base, BaseOperation):"));
        assert!(vote.contains("weight = Column(SmallInteger) # steem_type:int16_t"));
    }

    #[test]
    fn test_generate_overwrites_existing_artifacts() {
        let dir = tempdir().unwrap();
        let header = load_header(HEADER).unwrap();
        let config = GeneratorConfig::new();

        fs::write(dir.path().join("vote.py"), "stale").unwrap();
        generate(&header, &config, dir.path(), &UnreachableStore).unwrap();
        let vote = fs::read_to_string(dir.path().join("vote.py")).unwrap();
        assert!(!vote.contains("stale"));
    }

    #[test]
    fn test_unreachable_store_does_not_abort_generation() {
        let dir = tempdir().unwrap();
        let header = load_header(HEADER).unwrap();
        let config = GeneratorConfig::new().with_db_url("root@nowhere:3306");

        let written = generate(&header, &config, dir.path(), &UnreachableStore).unwrap();
        assert_eq!(written.len(), 2);
    }
}
