#![deny(missing_docs)]

//! # Generator Configuration
//!
//! The override tables are explicit, inspectable configuration passed into
//! the generation entry point rather than ambient global state. The built-in
//! set reproduces the historical tables (name-keyed column overrides and the
//! irregular legacy table names); an alternative set can be loaded from a
//! JSON document for deterministic testing or site-local customization.

use crate::columns::{ColumnSpec, ColumnTag};
use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;

/// Read-only override tables consulted during mapping.
///
/// Scoped (field + operation) overrides take precedence over name-keyed
/// overrides, which take precedence over type dispatch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Overrides {
    /// Column overrides keyed by field name alone.
    #[serde(default)]
    columns_by_name: IndexMap<String, Vec<ColumnSpec>>,
    /// Column overrides keyed by `"<field>,<operation>"`.
    #[serde(default)]
    columns_by_scope: IndexMap<String, Vec<ColumnSpec>>,
    /// Historical table names for operations whose legacy name does not
    /// follow the regular derivation rule.
    #[serde(default)]
    legacy_tables: IndexMap<String, String>,
}

/// Composite key for scoped overrides.
fn scope_key(field: &str, op_name: &str) -> String {
    format!("{},{}", field, op_name)
}

impl Overrides {
    /// An empty override set: every mapping falls through to type dispatch.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in override tables.
    pub fn builtin() -> Self {
        let mut overrides = Self::default();

        let json_named = ["json_metadata", "json", "posting", "owner", "active", "json_meta"];
        for field in json_named {
            overrides.insert_column_override(field, vec![ColumnSpec::named(field, "JSON")]);
        }
        for field in ["body", "memo"] {
            overrides.insert_column_override(field, vec![ColumnSpec::named(field, "UnicodeText")]);
        }
        overrides.insert_column_override(
            "from",
            vec![ColumnSpec {
                name: "_from".to_string(),
                storage_name: Some("from".to_string()),
                storage_type: "Unicode(50)".to_string(),
                nullable: true,
                indexed: true,
                tag: ColumnTag::NameOverride("from".to_string()),
            }],
        );

        let legacy = [
            ("delegate_vesting_shares_operation", "sbds_tx_delegate_vesting_shares"),
            ("decline_voting_rights_operation", "sbds_tx_decline_voting_rights"),
            ("cancel_transfer_from_savings_operation", "sbds_tx_cancel_transfer_from_savings"),
            ("transfer_from_savings_operation", "sbds_tx_transfer_from_savings"),
            ("transfer_to_savings_operation", "sbds_tx_transfer_to_savings"),
            ("set_withdraw_vesting_route_operation", "sbds_tx_withdraw_vesting_routes"),
            ("comment_options_operation", "sbds_tx_comments_options"),
        ];
        for (op, table) in legacy {
            overrides.legacy_tables.insert(op.to_string(), table.to_string());
        }

        overrides
    }

    /// Loads an override set from a JSON document.
    pub fn from_reader(mut reader: impl Read) -> AppResult<Self> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        serde_json::from_str(&buf)
            .map_err(|e| AppError::General(format!("Invalid overrides document: {}", e)))
    }

    /// Registers a column override keyed by field name.
    pub fn insert_column_override(&mut self, field: &str, cols: Vec<ColumnSpec>) {
        self.columns_by_name.insert(field.to_string(), cols);
    }

    /// Registers a column override keyed by field name and operation name.
    pub fn insert_scoped_column_override(&mut self, field: &str, op_name: &str, cols: Vec<ColumnSpec>) {
        self.columns_by_scope.insert(scope_key(field, op_name), cols);
    }

    /// Looks up a name-keyed column override.
    pub fn columns_for(&self, field: &str) -> Option<&[ColumnSpec]> {
        self.columns_by_name.get(field).map(Vec::as_slice)
    }

    /// Looks up a `(field, operation)` column override.
    pub fn scoped_columns(&self, field: &str, op_name: &str) -> Option<&[ColumnSpec]> {
        self.columns_by_scope.get(&scope_key(field, op_name)).map(Vec::as_slice)
    }

    /// Looks up an explicit legacy table name for an operation.
    pub fn legacy_table(&self, op_name: &str) -> Option<&str> {
        self.legacy_tables.get(op_name).map(String::as_str)
    }
}

/// Configuration for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Override tables, read-only for the run's duration.
    pub overrides: Overrides,
    /// Connection string for the example data source. `None` disables
    /// example fetching entirely.
    pub db_url: Option<String>,
    /// Directory holding pre-fetched per-operation example payloads.
    pub cache_dir: PathBuf,
}

impl GeneratorConfig {
    /// Creates a config with built-in overrides, no data source, and the
    /// conventional cache location.
    pub fn new() -> Self {
        Self {
            overrides: Overrides::builtin(),
            db_url: None,
            cache_dir: PathBuf::from("build_dir/examples"),
        }
    }

    /// Sets the example data-source connection string.
    pub fn with_db_url(mut self, db_url: impl Into<String>) -> Self {
        self.db_url = Some(db_url.into());
        self
    }

    /// Sets the example cache directory.
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    /// Replaces the override tables.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_name_overrides() {
        let overrides = Overrides::builtin();

        let json_meta = overrides.columns_for("json_metadata").unwrap();
        assert_eq!(json_meta[0].render(), "json_metadata = Column(JSON) # name:json_metadata");

        let body = overrides.columns_for("body").unwrap();
        assert_eq!(body[0].render(), "body = Column(UnicodeText) # name:body");

        let from = overrides.columns_for("from").unwrap();
        assert_eq!(
            from[0].render(),
            "_from = Column('from', Unicode(50), index=True) # name:from"
        );
    }

    #[test]
    fn test_builtin_legacy_tables() {
        let overrides = Overrides::builtin();
        assert_eq!(
            overrides.legacy_table("comment_options_operation"),
            Some("sbds_tx_comments_options")
        );
        assert_eq!(
            overrides.legacy_table("set_withdraw_vesting_route_operation"),
            Some("sbds_tx_withdraw_vesting_routes")
        );
        assert_eq!(overrides.legacy_table("transfer_operation"), None);
    }

    #[test]
    fn test_overrides_loadable_from_json() {
        let doc = r#"{
            "columns_by_name": {
                "payload": [
                    {"name": "payload", "storage_type": "JSON", "tag": {"name_override": "payload"}}
                ]
            },
            "legacy_tables": {
                "odd_operation": "sbds_tx_oddities"
            }
        }"#;
        let overrides = Overrides::from_reader(doc.as_bytes()).unwrap();
        assert_eq!(overrides.columns_for("payload").unwrap()[0].storage_type, "JSON");
        assert!(overrides.columns_for("payload").unwrap()[0].nullable);
        assert_eq!(overrides.legacy_table("odd_operation"), Some("sbds_tx_oddities"));
    }

    #[test]
    fn test_invalid_overrides_document() {
        let res = Overrides::from_reader("not json".as_bytes());
        assert!(matches!(res.unwrap_err(), AppError::General(_)));
    }

    #[test]
    fn test_config_builders() {
        let config = GeneratorConfig::new()
            .with_db_url("root@db:3306")
            .with_cache_dir("/tmp/examples");
        assert_eq!(config.db_url.as_deref(), Some("root@db:3306"));
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/examples"));
    }
}
