#![deny(missing_docs)]

//! # Example Fetcher
//!
//! Best-effort retrieval of one real historical payload per operation, used
//! purely to document the generated artifact. The fetch is the only I/O-bound
//! step of the pipeline and the only one whose failures are absorbed rather
//! than surfaced: worst case the artifact ships without an embedded example.
//!
//! Lookup order: a pre-fetched cache file, then a one-row query against the
//! operation's legacy table joined with the core block index, executed through
//! an injectable [`QueryExecutor`] (the real one shells out to `mysqlsh`).
//! The tool's stdout is not guaranteed to be clean JSON, so the decoder scans
//! for the first parseable result envelope instead of trusting the stream.

use crate::config::Overrides;
use crate::error::{AppError, AppResult};
use crate::naming;
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Core block-index table joined against for example lookups.
const BLOCKS_TABLE: &str = "sbds_core_blocks";

/// Interface for executing a query against the external data store.
///
/// Abstracted to allow mocking in tests without requiring `mysqlsh` to be
/// installed or a database to be reachable.
pub trait QueryExecutor {
    /// Runs `query` against the endpoint identified by `db_url` and returns
    /// the tool's raw stdout.
    fn run_query(&self, db_url: &str, query: &str) -> AppResult<String>;
}

/// Standard executor piping the query into `mysqlsh --json --sqlc`.
pub struct MysqlShellExecutor;

impl QueryExecutor for MysqlShellExecutor {
    fn run_query(&self, db_url: &str, query: &str) -> AppResult<String> {
        let mut child = Command::new("mysqlsh")
            .args(["--json", "--uri", db_url, "--sqlc"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(query.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(AppError::General(format!(
                "mysqlsh exited with status {}",
                output.status
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Result of one example lookup.
///
/// `Unavailable` replaces blanket exception suppression with a visible
/// reason; the renderer treats it as "no example".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExampleOutcome {
    /// A pre-fetched example was found in the cache, returned verbatim.
    CacheHit(String),
    /// A payload was fetched and extracted from the data store.
    Fetched(String),
    /// No example could be obtained; carries the reason for logging.
    Unavailable(String),
}

impl ExampleOutcome {
    /// The example text, if any was obtained.
    pub fn text(&self) -> Option<&str> {
        match self {
            ExampleOutcome::CacheHit(s) | ExampleOutcome::Fetched(s) => Some(s),
            ExampleOutcome::Unavailable(_) => None,
        }
    }
}

/// Builds the one-row example query for an operation's legacy table.
pub fn example_query(table_name: &str) -> String {
    format!(
        "SELECT {t}.block_num, transaction_num, operation_num, raw \
         FROM {t} JOIN {b} ON {t}.block_num={b}.block_num LIMIT 1;",
        t = table_name,
        b = BLOCKS_TABLE
    )
}

/// Fetches a real payload example for `op_name`, best-effort.
///
/// Never fails: connection errors, malformed JSON, empty row sets, and
/// out-of-range ordinals all collapse to [`ExampleOutcome::Unavailable`] so
/// the surrounding artifact generation always completes.
pub fn fetch_example(
    op_name: &str,
    db_url: &str,
    cache_dir: &Path,
    overrides: &Overrides,
    executor: &impl QueryExecutor,
) -> ExampleOutcome {
    if let Ok(cached) = std::fs::read_to_string(cache_dir.join(format!("{}.json", op_name))) {
        return ExampleOutcome::CacheHit(cached);
    }

    let table = naming::legacy_table_name(op_name, overrides);
    let query = example_query(&table);
    let stdout = match executor.run_query(db_url, &query) {
        Ok(out) => out,
        Err(e) => return ExampleOutcome::Unavailable(format!("query failed: {}", e)),
    };

    let Some(envelope) = parse_envelope(&stdout) else {
        return ExampleOutcome::Unavailable("no result envelope in query output".to_string());
    };

    match extract_payload(&envelope) {
        Ok(example) => ExampleOutcome::Fetched(example),
        Err(reason) => ExampleOutcome::Unavailable(reason),
    }
}

/// Locates the first parseable JSON object carrying a `rows` array in the
/// query tool's output stream.
///
/// The stream may be polluted with diagnostic lines (historically a
/// password-on-command-line warning object) before or after the envelope, so
/// we scan candidate offsets instead of matching the noise verbatim.
fn parse_envelope(stdout: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(stdout) {
        if value.get("rows").is_some() {
            return Some(value);
        }
    }
    for (idx, ch) in stdout.char_indices() {
        if ch != '{' {
            continue;
        }
        let mut stream = serde_json::Deserializer::from_str(&stdout[idx..]).into_iter::<Value>();
        if let Some(Ok(value)) = stream.next() {
            if value.get("rows").is_some() {
                return Some(value);
            }
        }
    }
    None
}

/// Extracts the operation payload addressed by the first result row.
///
/// Rows carry 1-based `transaction_num` / `operation_num` ordinals and a
/// JSON-encoded block in `raw`; the payload is the body element of
/// `transactions[t-1].operations[o-1]` (a `[type_tag, body]` tuple).
fn extract_payload(envelope: &Value) -> Result<String, String> {
    let row = envelope
        .get("rows")
        .and_then(Value::as_array)
        .and_then(|rows| rows.first())
        .ok_or_else(|| "empty result set".to_string())?;

    let transaction_num = ordinal(row, "transaction_num")?;
    let operation_num = ordinal(row, "operation_num")?;

    let raw = row
        .get("raw")
        .and_then(Value::as_str)
        .ok_or_else(|| "row is missing raw block payload".to_string())?;
    let block: Value =
        serde_json::from_str(raw).map_err(|e| format!("raw block is not valid JSON: {}", e))?;

    let operation = block
        .get("transactions")
        .and_then(Value::as_array)
        .and_then(|txs| txs.get(transaction_num - 1))
        .and_then(|tx| tx.get("operations"))
        .and_then(Value::as_array)
        .and_then(|ops| ops.get(operation_num - 1))
        .ok_or_else(|| "operation ordinals out of range".to_string())?;

    let body = operation
        .get(1)
        .ok_or_else(|| "operation tuple has no body element".to_string())?;

    serde_json::to_string_pretty(body).map_err(|e| format!("payload not serializable: {}", e))
}

/// Reads a 1-based ordinal field from a result row.
fn ordinal(row: &Value, key: &str) -> Result<usize, String> {
    let n = row
        .get(key)
        .and_then(Value::as_u64)
        .ok_or_else(|| format!("row is missing {}", key))?;
    if n == 0 {
        return Err(format!("{} is zero, expected 1-based ordinal", key));
    }
    Ok(n as usize)
}
