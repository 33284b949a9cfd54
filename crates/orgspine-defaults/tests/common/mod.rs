//! Shared setup for the engine integration tests
//!
//! Every test builds its own facade over a fresh in-memory store, so tests
//! never share ownership or tombstone state.

#![allow(dead_code)]

use orgspine_defaults::{DefaultFacade, DefaultsOpts};
use orgspine_store_adapter_memory::StoreAdapterMemory;
use orgspine_types::data_store::DataStore;
use orgspine_types::path::DataPath;
use serde_json::Value;

pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

pub fn p(path: &str) -> DataPath {
	DataPath::parse(path)
}

pub fn names(items: &[&str]) -> Vec<Box<str>> {
	items.iter().map(|&item| item.into()).collect()
}

/// Facade in single-organization mode for `acme`
pub fn single_org_facade() -> DefaultFacade<StoreAdapterMemory> {
	setup_test_logging();
	let opts = DefaultsOpts { single_org: Some("acme".into()), ..Default::default() };
	DefaultFacade::new(StoreAdapterMemory::new(), opts)
}

/// Facade in multi-organization mode
pub fn multi_org_facade() -> DefaultFacade<StoreAdapterMemory> {
	setup_test_logging();
	DefaultFacade::new(StoreAdapterMemory::new(), DefaultsOpts::default())
}

/// Legacy-compatible facade in single-organization mode for `acme`
pub fn legacy_facade() -> DefaultFacade<StoreAdapterMemory> {
	setup_test_logging();
	let opts =
		DefaultsOpts { single_org: Some("acme".into()), legacy_compat: true, ..Default::default() };
	DefaultFacade::new(StoreAdapterMemory::new(), opts)
}

/// Reads `path` through `store` and parses it as JSON
pub fn get_json(store: &dyn DataStore, path: &str) -> Value {
	let raw = store.get(&p(path)).expect("Failed to get document");
	serde_json::from_str(&raw).expect("Failed to parse document")
}

// vim: ts=4
