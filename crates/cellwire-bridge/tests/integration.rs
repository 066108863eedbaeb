//! End-to-end tests for the engine bridge, driven against the stub engine.
//!
//! The stub engine binary is built as part of this crate, so these tests run
//! anywhere `cargo test` runs - no external engine needed.

use std::path::PathBuf;
use std::time::Duration;

use cellwire_bridge::{BridgeError, EngineBridge, EngineConfig};
use cellwire_core::CellAddress;
use cellwire_protocol::{CellValue, Command};
use pretty_assertions::assert_eq;

fn stub_config() -> EngineConfig {
    EngineConfig {
        engine_path: Some(PathBuf::from(env!("CARGO_BIN_EXE_cellwire-stub-engine"))),
        extra_args: Vec::new(),
        request_timeout: Duration::from_secs(10),
    }
}

fn addr(s: &str) -> CellAddress {
    s.parse().unwrap()
}

#[tokio::test]
async fn test_set_then_get_formula() {
    let mut bridge = EngineBridge::spawn(stub_config()).unwrap();
    let b7 = addr("B7");

    let updates = bridge.set_formula(&b7, "42").await.unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates.get(&b7), Some(&CellValue::Number(42.0)));

    let formula = bridge.get_formula(&b7).await.unwrap();
    assert_eq!(formula, "42");

    bridge.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unset_cell_reads_as_empty_formula() {
    let mut bridge = EngineBridge::spawn(stub_config()).unwrap();

    let formula = bridge.get_formula(&addr("Z99")).await.unwrap();
    assert_eq!(formula, "");

    bridge.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_update_values_are_typed() {
    let mut bridge = EngineBridge::spawn(stub_config()).unwrap();

    let a1 = addr("A1");
    let updates = bridge.set_formula(&a1, "hello").await.unwrap();
    assert_eq!(updates.get(&a1), Some(&CellValue::Text("hello".to_string())));

    // the stub does not evaluate, so a formula edit reports an empty value
    let updates = bridge.set_formula(&a1, "=B7*2").await.unwrap();
    assert_eq!(updates.get(&a1), Some(&CellValue::Empty));

    let updates = bridge.set_formula(&a1, "").await.unwrap();
    assert_eq!(updates.get(&a1), Some(&CellValue::Empty));

    bridge.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_remote_error_is_propagated_verbatim() {
    let mut bridge = EngineBridge::spawn(stub_config()).unwrap();

    let err = bridge
        .call(Command::GetFormula {
            address: "not an address".to_string(),
        })
        .await
        .unwrap_err();
    match err {
        BridgeError::Engine(message) => {
            assert!(message.contains("not an address"), "message: {message}")
        }
        other => panic!("expected engine error, got {other:?}"),
    }

    // the connection survives a remote failure
    let formula = bridge.get_formula(&addr("A1")).await.unwrap();
    assert_eq!(formula, "");

    bridge.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_many_requests_stay_correlated() {
    let mut bridge = EngineBridge::spawn(stub_config()).unwrap();

    for row in 1..=10u32 {
        let address = CellAddress::from_indices(row, row).unwrap();
        let formula = format!("{row}");
        bridge.set_formula(&address, &formula).await.unwrap();
    }

    for row in 1..=10u32 {
        let address = CellAddress::from_indices(row, row).unwrap();
        let formula = bridge.get_formula(&address).await.unwrap();
        assert_eq!(formula, format!("{row}"));
    }

    bridge.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_addresses_are_canonicalized_across_the_wire() {
    let mut bridge = EngineBridge::spawn(stub_config()).unwrap();

    // "aa10" parses client-side into the canonical "AA10"
    let aa10 = addr("aa10");
    assert_eq!(aa10.to_string(), "AA10");

    let updates = bridge.set_formula(&aa10, "1").await.unwrap();
    assert_eq!(updates.get(&aa10), Some(&CellValue::Number(1.0)));

    bridge.shutdown().await.unwrap();
}

#[test]
fn test_spawn_reports_missing_engine() {
    let config = EngineConfig {
        engine_path: Some(PathBuf::from("/nonexistent/engine-binary")),
        ..EngineConfig::default()
    };

    // spawn needs a reactor even though it fails before any IO
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _guard = rt.enter();

    match EngineBridge::spawn(config) {
        Err(BridgeError::EngineNotFound(path)) => {
            assert!(path.contains("/nonexistent/engine-binary"))
        }
        other => panic!("expected engine-not-found, got {:?}", other.map(|_| ())),
    }
}
