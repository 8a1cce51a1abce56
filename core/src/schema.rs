#![deny(missing_docs)]

//! # Schema Loader
//!
//! Parses the machine-readable operation header description into in-memory
//! entities. The input is a JSON document of the shape:
//!
//! ```json
//! { "classes": { "<op_name>": { "name": "...", "properties": { "public": [ {"name": "...", "type": "..."} ] } } } }
//! ```
//!
//! Insertion order of `classes` is preserved (via `IndexMap`) so that artifact
//! generation order is reproducible across runs. Protocol type strings are
//! carried verbatim and never validated here.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::Deserialize;
use std::io::Read;

/// The top-level operation header document.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationHeader {
    /// Operation classes keyed by operation name, in input order.
    pub classes: IndexMap<String, OperationClass>,
}

/// A single protocol operation record type.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationClass {
    /// The protocol-defined operation identifier (e.g. `transfer_operation`).
    pub name: String,
    /// The operation's declared properties.
    pub properties: PropertyBlock,
}

/// Visibility-partitioned property listing. Only public fields are mapped.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyBlock {
    /// Public fields, in declaration order.
    pub public: Vec<Property>,
}

/// One declared field of an operation.
#[derive(Debug, Clone, Deserialize)]
pub struct Property {
    /// Protocol field name (e.g. `vesting_shares`).
    pub name: String,
    /// Declared protocol type string (e.g. `asset`, `uint32_t`).
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Parses an operation header from a JSON string.
///
/// Any structural failure (absent `classes` key, a class without
/// `properties.public`, wrong value shapes) is reported as
/// [`AppError::MalformedSchema`]. This is the only fatal condition in the
/// generation pipeline.
pub fn load_header(input: &str) -> AppResult<OperationHeader> {
    serde_json::from_str(input).map_err(|e| AppError::MalformedSchema(e.to_string()))
}

/// Reads and parses an operation header from any reader (file or stdin).
pub fn read_header(mut reader: impl Read) -> AppResult<OperationHeader> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    load_header(&buf)
}
