#![deny(missing_docs)]

//! # Naming Resolver
//!
//! Derives current/legacy storage table names, generated class names, and
//! artifact file names from protocol operation names. Table naming strips the
//! `_operation` suffix, pluralizes the remainder, and prefixes a schema
//! namespace token (`sbds_op_` for the current schema, `sbds_tx_` for the
//! legacy one). Operations whose historical table name predates the naming
//! convention are resolved through the legacy override table first.

use crate::config::Overrides;
use heck::ToUpperCamelCase;

/// Current-schema table name prefix.
const CURRENT_PREFIX: &str = "sbds_op_";

/// Legacy-schema table name prefix.
const LEGACY_PREFIX: &str = "sbds_tx_";

/// Irregular and fixed-form plurals consulted before the suffix rules.
///
/// Includes domain words that are already plural (`shares`, `savings`) so the
/// suffix rules never double-pluralize them.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("child", "children"),
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("mouse", "mice"),
    ("criterion", "criteria"),
    ("datum", "data"),
    ("shares", "shares"),
    ("savings", "savings"),
    ("rights", "rights"),
    ("options", "options"),
];

/// Strips the trailing `_operation` suffix from an operation name.
pub fn short_name(op_name: &str) -> &str {
    op_name.strip_suffix("_operation").unwrap_or(op_name)
}

/// Derives the generated class name: underscore segments, title-cased and
/// concatenated (`author_reward_operation` -> `AuthorRewardOperation`).
pub fn class_name(op_name: &str) -> String {
    op_name.to_upper_camel_case()
}

/// Derives the artifact file name for an operation (`transfer_operation` ->
/// `transfer.py`).
pub fn artifact_file_name(op_name: &str) -> String {
    format!("{}.py", short_name(op_name))
}

/// Derives the current-schema table name.
pub fn table_name(op_name: &str) -> String {
    format!("{}{}", CURRENT_PREFIX, pluralize(short_name(op_name)))
}

/// Derives the legacy-schema table name, consulting the explicit override
/// table first. Never fails: the override-then-derive chain always yields a
/// name.
pub fn legacy_table_name(op_name: &str, overrides: &Overrides) -> String {
    match overrides.legacy_table(op_name) {
        Some(table) => table.to_string(),
        None => format!("{}{}", LEGACY_PREFIX, pluralize(short_name(op_name))),
    }
}

/// Pluralizes a (possibly underscore-joined) noun phrase by pluralizing its
/// final segment: irregular dictionary first, then standard suffix rules.
pub fn pluralize(phrase: &str) -> String {
    match phrase.rsplit_once('_') {
        Some((head, last)) => format!("{}_{}", head, pluralize_word(last)),
        None => pluralize_word(phrase),
    }
}

fn pluralize_word(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if let Some((_, plural)) = IRREGULAR_PLURALS.iter().find(|(w, _)| *w == word) {
        return (*plural).to_string();
    }
    if word.ends_with("ch") || word.ends_with("sh") || word.ends_with('s') || word.ends_with('x') || word.ends_with('z') {
        return format!("{}es", word);
    }
    if let Some(stem) = word.strip_suffix('y') {
        let penultimate = stem.chars().last();
        if !matches!(penultimate, Some('a' | 'e' | 'i' | 'o' | 'u') | None) {
            return format!("{}ies", stem);
        }
    }
    if let Some(stem) = word.strip_suffix("fe") {
        return format!("{}ves", stem);
    }
    if let Some(stem) = word.strip_suffix('f') {
        return format!("{}ves", stem);
    }
    format!("{}s", word)
}
