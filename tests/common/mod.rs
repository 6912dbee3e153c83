//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use slicestore::modules::foo::{self, FooState};
use slicestore::modules::register_all;
use slicestore::store::{MutationRecord, Store, StoreOptions};
use tempfile::TempDir;

pub type RecordLog = Arc<Mutex<Vec<(MutationRecord, Value)>>>;

/// Store with every application module registered.
pub fn app_store() -> Store {
    let mut store = Store::initialize(StoreOptions::default()).expect("initialize store");
    register_all(&mut store).expect("register modules");
    store
}

/// Store whose `foo` module already holds `bars`.
pub fn store_with_bars(bars: &[&str]) -> Store {
    let mut store = app_store();
    for bar in bars {
        store
            .dispatch_mutation(foo::NAME, foo::ADD_BAR, Value::String(bar.to_string()))
            .expect("addBar");
    }
    store
}

pub fn bars(store: &Store) -> Vec<String> {
    store
        .module_state::<FooState>(foo::NAME)
        .expect("foo state")
        .bars
        .clone()
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Subscribe a recorder that keeps every (record, state) pair.
pub fn record_mutations(store: &mut Store) -> RecordLog {
    let log: RecordLog = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    store.subscribe(move |record: &MutationRecord, state: &Value| {
        sink.lock().push((record.clone(), state.clone()));
    });
    log
}

/// Write `content` to a config.toml inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, content).expect("Failed to write config");
    (temp_dir, path)
}
