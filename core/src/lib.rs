#![deny(missing_docs)]

//! # Opgen Core
//!
//! Core library for the operation persistence-mapping generator: turns a
//! machine-readable description of a blockchain protocol's operation record
//! types into per-operation storage artifacts (column declarations plus
//! value-extraction rules), optionally documented with a real historical
//! payload fetched from a data store.

/// Shared error types.
pub mod error;

/// Operation header parsing.
pub mod schema;

/// Override tables and run configuration.
pub mod config;

/// Field/type to storage-column mapping.
pub mod columns;

/// Field to extraction-rule mapping.
pub mod extractors;

/// Table, class, and file naming derivation.
pub mod naming;

/// Best-effort live example retrieval.
pub mod example;

/// Artifact text assembly.
pub mod render;

/// The generation pipeline and writer.
pub mod generate;

pub use columns::{columns, ColumnSpec, ColumnTag};
pub use config::{GeneratorConfig, Overrides};
pub use error::{AppError, AppResult};
pub use example::{fetch_example, ExampleOutcome, MysqlShellExecutor, QueryExecutor};
pub use extractors::{extractors, FieldRule};
pub use generate::{generate, render_class};
pub use render::render_operation;
pub use schema::{load_header, read_header, OperationClass, OperationHeader, Property, PropertyBlock};
