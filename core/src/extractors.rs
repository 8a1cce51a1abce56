#![deny(missing_docs)]

//! # Field Extractor Mapper
//!
//! Maps `(field name, protocol type)` onto value-extraction rules: small
//! recipes describing how a stored field's value is computed from a raw
//! operation payload. Like the column mapper, this mapping is total, but it
//! has no per-operation override tier; rules depend only on the field name
//! and protocol type.

/// One value-extraction rule, as a sum over the known extractor kinds.
///
/// `target` is the binding on the generated class; `source` is the public key
/// read from the raw JSON payload. They differ only for reserved identifiers
/// (`from` binds to `_from`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Parses a combined "amount + symbol" string into a numeric quantity.
    AssetAmount {
        /// Binding on the generated class.
        target: String,
        /// Public payload key.
        source: String,
    },
    /// Parses the unit suffix out of a combined "amount + symbol" string.
    AssetSymbol {
        /// Binding on the generated class.
        target: String,
        /// Public payload key.
        source: String,
    },
    /// Normalizes encoding/markup peculiarities of free-form comment bodies.
    CommentBody {
        /// Binding on the generated class.
        target: String,
        /// Public payload key.
        source: String,
    },
    /// Reads the payload value verbatim.
    Passthrough {
        /// Binding on the generated class.
        target: String,
        /// Public payload key.
        source: String,
    },
}

impl FieldRule {
    /// The binding on the generated class.
    pub fn target(&self) -> &str {
        match self {
            FieldRule::AssetAmount { target, .. }
            | FieldRule::AssetSymbol { target, .. }
            | FieldRule::CommentBody { target, .. }
            | FieldRule::Passthrough { target, .. } => target,
        }
    }

    /// Renders the rule as one `_fields` entry line.
    pub fn render(&self) -> String {
        match self {
            FieldRule::AssetAmount { target, source } => format!(
                "{}=lambda x: amount_field(x.get('{}'), num_func=float),",
                target, source
            ),
            FieldRule::AssetSymbol { target, source } => format!(
                "{}=lambda x: amount_symbol_field(x.get('{}')),",
                target, source
            ),
            FieldRule::CommentBody { target, source } => format!(
                "{}=lambda x: comment_body_field(x.get('{}')),",
                target, source
            ),
            FieldRule::Passthrough { target, source } => {
                format!("{}=lambda x: x.get('{}'),", target, source)
            }
        }
    }
}

/// Maps a property onto its extraction rules.
///
/// Total: always returns at least one rule. `asset` properties expand to an
/// amount rule plus a symbol rule, mirroring their two-column storage.
pub fn extractors(field: &str, protocol_type: &str) -> Vec<FieldRule> {
    if protocol_type == "asset" {
        let target = if field == "from" { "_from" } else { field };
        return vec![
            FieldRule::AssetAmount {
                target: target.to_string(),
                source: field.to_string(),
            },
            FieldRule::AssetSymbol {
                target: format!("{}_symbol", target),
                source: field.to_string(),
            },
        ];
    }
    if field == "body" {
        return vec![FieldRule::CommentBody {
            target: field.to_string(),
            source: field.to_string(),
        }];
    }
    if field == "from" {
        return vec![FieldRule::Passthrough {
            target: "_from".to_string(),
            source: "from".to_string(),
        }];
    }
    vec![FieldRule::Passthrough {
        target: field.to_string(),
        source: field.to_string(),
    }]
}
