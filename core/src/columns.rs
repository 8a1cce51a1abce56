#![deny(missing_docs)]

//! # Type Mapper
//!
//! Maps `(field name, protocol type, operation name)` onto storage column
//! specifications. The mapping is total: every input resolves to at least one
//! column, with unrecognized protocol types degrading to a tagged default
//! text column instead of failing.
//!
//! Resolution order (first match wins):
//! 1. Override keyed by `(field, operation)`.
//! 2. Override keyed by field name alone.
//! 3. Type-based dispatch on the exact protocol type string.

use crate::config::Overrides;
use serde::{Deserialize, Serialize};

/// 16-bit class integer type aliases.
const SMALL_INT_TYPES: &[&str] = &["uint16_t", "int8_t", "int16_t"];

/// 32-bit integer type aliases.
const INT_TYPES: &[&str] = &["uint32_t", "int32_t"];

/// 64-bit integer type aliases.
const BIG_INT_TYPES: &[&str] = &["uint64_t", "int64_t"];

/// Protocol types stored as schemaless structured (JSON-capable) columns.
const STRUCTURED_TYPES: &[&str] = &[
    "vector< beneficiary_route_type>",
    "flat_set< account_name_type>",
    "price",
    "extensions_type",
    "steemit::protocol::comment_options_extensions_type",
    "authority",
    "chain_properties",
    "pow",
    "steemit::protocol::pow2_work",
    "pow2_input",
    "fc::equihash::proof",
];

/// Provenance marker rendered as a trailing comment on each declaration.
///
/// The `DefaultFallback` variant is how unmapped protocol types surface to a
/// human auditor: generation never fails on them, it tags them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnTag {
    /// Column came from a name-keyed override (`# name:<field>`).
    NameOverride(String),
    /// Column came from the type dispatch table (`# steem_type:<type>`).
    ProtocolType(String),
    /// Column came from the catch-all rule (`# steem_type:<type> -> default`).
    DefaultFallback(String),
}

/// A single storage column declaration.
///
/// Renders to one SQLAlchemy column line of the generated artifact, e.g.
/// `payout = Column(Numeric(20,6), nullable=False) # steem_type:asset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Attribute name on the generated class.
    pub name: String,
    /// Explicit storage-side name, when it differs from `name` (reserved
    /// identifiers such as `from`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_name: Option<String>,
    /// Storage type expression, e.g. `Numeric(20,6)`, `String(50)`, `JSON`.
    pub storage_type: String,
    /// Whether NULL values are accepted. Defaults to true.
    #[serde(default = "default_true")]
    pub nullable: bool,
    /// Whether the column carries an index (relational lookups).
    #[serde(default)]
    pub indexed: bool,
    /// Provenance marker for the trailing comment.
    pub tag: ColumnTag,
}

fn default_true() -> bool {
    true
}

impl ColumnSpec {
    /// Creates a nullable, unindexed column mapped from a protocol type.
    pub fn typed(name: impl Into<String>, storage_type: impl Into<String>, protocol_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            storage_name: None,
            storage_type: storage_type.into(),
            nullable: true,
            indexed: false,
            tag: ColumnTag::ProtocolType(protocol_type.into()),
        }
    }

    /// Creates a column originating from a name-keyed override.
    pub fn named(name: impl Into<String>, storage_type: impl Into<String>) -> Self {
        let name = name.into();
        let tag = ColumnTag::NameOverride(name.clone());
        Self {
            name,
            storage_name: None,
            storage_type: storage_type.into(),
            nullable: true,
            indexed: false,
            tag,
        }
    }

    /// Marks the column NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the column indexed.
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// Binds the column to an explicit storage-side name.
    pub fn bound_to(mut self, storage_name: impl Into<String>) -> Self {
        self.storage_name = Some(storage_name.into());
        self
    }

    /// True when this column was produced by the catch-all rule.
    pub fn is_fallback(&self) -> bool {
        matches!(self.tag, ColumnTag::DefaultFallback(_))
    }

    /// Renders the column as one artifact declaration line.
    pub fn render(&self) -> String {
        let mut args = Vec::new();
        if let Some(storage_name) = &self.storage_name {
            args.push(format!("'{}'", storage_name));
        }
        args.push(self.storage_type.clone());
        if !self.nullable {
            args.push("nullable=False".to_string());
        }
        if self.indexed {
            args.push("index=True".to_string());
        }
        let comment = match &self.tag {
            ColumnTag::NameOverride(field) => format!("# name:{}", field),
            ColumnTag::ProtocolType(t) => format!("# steem_type:{}", t),
            ColumnTag::DefaultFallback(t) => format!("# steem_type:{} -> default", t),
        };
        format!("{} = Column({}) {}", self.name, args.join(", "), comment)
    }
}

/// Resolves the attribute/storage naming for reserved identifiers.
///
/// `from` is a reserved word on the storage layer: the generated attribute is
/// `_from`, bound back to the public name `from`.
fn resolve_reserved(field: &str) -> (String, Option<String>) {
    if field == "from" {
        ("_from".to_string(), Some("from".to_string()))
    } else {
        (field.to_string(), None)
    }
}

/// Maps a property onto its storage columns.
///
/// Total: always returns at least one spec. One property may expand to two
/// columns (monetary `asset` values yield an amount column and a symbol
/// column).
pub fn columns(field: &str, protocol_type: &str, op_name: &str, overrides: &Overrides) -> Vec<ColumnSpec> {
    if let Some(cols) = overrides.scoped_columns(field, op_name) {
        return cols.to_vec();
    }
    if let Some(cols) = overrides.columns_for(field) {
        return cols.to_vec();
    }
    columns_by_type(field, protocol_type)
}

/// The type-based dispatch table. Exact, case-sensitive string matches.
fn columns_by_type(field: &str, protocol_type: &str) -> Vec<ColumnSpec> {
    let (name, storage_name) = resolve_reserved(field);
    let bind = |spec: ColumnSpec| match &storage_name {
        Some(public) => spec.bound_to(public.clone()),
        None => spec,
    };

    match protocol_type {
        "asset" => vec![
            bind(ColumnSpec::typed(&name, "Numeric(20,6)", protocol_type).not_null()),
            ColumnSpec::typed(format!("{}_symbol", name), "String(5)", protocol_type),
        ],
        "account_name_type" => {
            vec![bind(ColumnSpec::typed(&name, "String(50)", protocol_type).indexed())]
        }
        "public_key_type" => {
            vec![bind(ColumnSpec::typed(&name, "String(60)", protocol_type).not_null())]
        }
        "optional< public_key_type>" => {
            vec![bind(ColumnSpec::typed(&name, "String(60)", protocol_type))]
        }
        "string" => vec![bind(ColumnSpec::typed(&name, "Unicode(150)", protocol_type))],
        "bool" => vec![bind(ColumnSpec::typed(&name, "Boolean", protocol_type))],
        t if SMALL_INT_TYPES.contains(&t) => {
            vec![bind(ColumnSpec::typed(&name, "SmallInteger", protocol_type))]
        }
        t if INT_TYPES.contains(&t) => {
            vec![bind(ColumnSpec::typed(&name, "Integer", protocol_type))]
        }
        t if BIG_INT_TYPES.contains(&t) => {
            vec![bind(ColumnSpec::typed(&name, "BigInteger", protocol_type))]
        }
        "vector< authority>" | "vector< char>" => {
            vec![bind(ColumnSpec::typed(&name, "String(100)", protocol_type))]
        }
        "block_id_type" => vec![bind(ColumnSpec::typed(&name, "Integer", protocol_type))],
        t if STRUCTURED_TYPES.contains(&t) => {
            vec![bind(ColumnSpec::typed(&name, "JSON", protocol_type))]
        }
        "time_point_sec" => vec![bind(ColumnSpec::typed(&name, "DateTime", protocol_type))],
        "signed_block_header" => {
            vec![bind(ColumnSpec::typed(&name, "String(500)", protocol_type))]
        }
        _ => vec![bind(ColumnSpec {
            name,
            storage_name: None,
            storage_type: "Unicode(100)".to_string(),
            nullable: true,
            indexed: false,
            tag: ColumnTag::DefaultFallback(protocol_type.to_string()),
        })],
    }
}
