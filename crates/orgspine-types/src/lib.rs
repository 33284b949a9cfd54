//! Shared types, adapter traits, and core utilities for orgspine.
//!
//! This crate contains the foundational types that are shared between the
//! default-value engine and all store adapter implementations, so adapter
//! crates never depend on the engine itself.

pub mod data_store;
pub mod error;
pub mod path;
pub mod prelude;
pub mod utils;

// vim: ts=4
