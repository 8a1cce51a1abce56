//! End-to-end pipeline scenarios: schema in, artifacts out, with a simulated
//! external query interface.

use opgen_core::error::AppResult;
use opgen_core::{generate, load_header, AppError, GeneratorConfig, QueryExecutor};
use std::fs;
use tempfile::tempdir;

struct EmptyRows;

impl QueryExecutor for EmptyRows {
    fn run_query(&self, _db_url: &str, _query: &str) -> AppResult<String> {
        Ok("{\"rows\": []}".to_string())
    }
}

struct GarbageOutput;

impl QueryExecutor for GarbageOutput {
    fn run_query(&self, _db_url: &str, _query: &str) -> AppResult<String> {
        Ok("mysqlx: [Warning] something changed in the diagnostic format".to_string())
    }
}

struct TimedOut;

impl QueryExecutor for TimedOut {
    fn run_query(&self, _db_url: &str, _query: &str) -> AppResult<String> {
        Err(AppError::General("query timed out".to_string()))
    }
}

const PRODUCER_REWARD: &str = r#"{
    "classes": {
        "producer_reward_operation": {
            "name": "producer_reward_operation",
            "properties": {
                "public": [
                    {"name": "producer", "type": "account_name_type"},
                    {"name": "vesting_shares", "type": "asset"}
                ]
            }
        }
    }
}"#;

#[test]
fn producer_reward_scenario() {
    let dir = tempdir().unwrap();
    let header = load_header(PRODUCER_REWARD).unwrap();
    let config = GeneratorConfig::new();

    let written = generate(&header, &config, dir.path(), &EmptyRows).unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].file_name().unwrap(), "producer_reward.py");

    let text = fs::read_to_string(&written[0]).unwrap();

    // short indexed string column for the account field
    assert!(text.contains("producer = Column(String(50), index=True) # steem_type:account_name_type"));
    // asset expands to a decimal amount column plus a symbol column
    assert!(text.contains("vesting_shares = Column(Numeric(20,6), nullable=False) # steem_type:asset"));
    assert!(text.contains("vesting_shares_symbol = Column(String(5)) # steem_type:asset"));
    // extraction rules: numeric amount extractor and symbol extractor
    assert!(text.contains("vesting_shares=lambda x: amount_field(x.get('vesting_shares'), num_func=float),"));
    assert!(text.contains("vesting_shares_symbol=lambda x: amount_symbol_field(x.get('vesting_shares')),"));
    // derived current table name: pluralized short name under the op prefix
    assert!(text.contains("__tablename__ = 'sbds_op_producer_rewards'"));
    assert!(text.contains("class ProducerRewardOperation(Base, BaseOperation):"));
}

#[test]
fn generation_survives_every_fetch_failure_mode() {
    let header = load_header(PRODUCER_REWARD).unwrap();
    let config = GeneratorConfig::new().with_db_url("root@db:33060");

    let dir = tempdir().unwrap();
    generate(&header, &config, &dir.path().join("garbage"), &GarbageOutput).unwrap();
    generate(&header, &config, &dir.path().join("empty"), &EmptyRows).unwrap();
    generate(&header, &config, &dir.path().join("timeout"), &TimedOut).unwrap();

    for sub in ["garbage", "empty", "timeout"] {
        let path = dir.path().join(sub).join("producer_reward.py");
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("class ProducerRewardOperation"));
    }
}

#[test]
fn cached_example_lands_in_the_artifact() {
    let dir = tempdir().unwrap();
    let cache = dir.path().join("examples");
    fs::create_dir_all(&cache).unwrap();
    fs::write(
        cache.join("producer_reward_operation.json"),
        "{\n  \"producer\": \"initminer\",\n  \"vesting_shares\": \"0.343500 VESTS\"\n}",
    )
    .unwrap();

    let header = load_header(PRODUCER_REWARD).unwrap();
    let config = GeneratorConfig::new()
        .with_db_url("root@db:33060")
        .with_cache_dir(&cache);

    let written = generate(&header, &config, &dir.path().join("out"), &TimedOut).unwrap();
    let text = fs::read_to_string(&written[0]).unwrap();
    assert!(text.contains("\"vesting_shares\": \"0.343500 VESTS\""));
}

#[test]
fn malformed_header_aborts_before_any_write() {
    let res = load_header(r#"{"no_classes_here": true}"#);
    assert!(matches!(res.unwrap_err(), AppError::MalformedSchema(_)));
}
