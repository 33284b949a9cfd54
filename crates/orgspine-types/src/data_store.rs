//! Adapter traits for hierarchical path-indexed stores.
//!
//! A store holds two kinds of nodes: directories, which only have children,
//! and leaves, which hold a raw (usually JSON encoded) value. The root path is
//! always a directory.
//!
//! Reads go through [`DataStore`]; writes need [`DataStoreMut`]. Each adapter
//! implementation provides its own constructor handling backend-specific
//! initialization.

use std::fmt::Debug;

use crate::prelude::*;

/// Read side of a store
pub trait DataStore: Debug + Send + Sync {
	/// Checks whether a leaf exists at `path`
	fn exists(&self, path: &DataPath) -> bool;

	/// Checks whether a directory exists at `path`
	fn exists_dir(&self, path: &DataPath) -> bool;

	/// Reads the raw value of a leaf. Fails with `Error::NotFound` if absent.
	fn get(&self, path: &DataPath) -> ClResult<Box<str>>;

	/// Lists the names of the direct children of a directory.
	/// Fails with `Error::NotFound` if `path` is not a directory.
	fn list(&self, path: &DataPath) -> ClResult<Vec<Box<str>>>;
}

/// Options for write operations
#[derive(Debug, Clone, Default)]
pub struct WriteOpts {
	/// Create missing parent directories instead of failing
	pub create_parents: bool,
	/// For `set`: create the leaf if it does not exist yet
	pub create: bool,
	/// Identity of the caller performing the write, if known
	pub requestor: Option<Box<str>>,
}

impl WriteOpts {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_create_parents(mut self) -> Self {
		self.create_parents = true;
		self
	}

	pub fn with_create(mut self) -> Self {
		self.create = true;
		self
	}

	pub fn with_requestor(mut self, requestor: impl Into<Box<str>>) -> Self {
		self.requestor = Some(requestor.into());
		self
	}
}

/// Write side of a store
pub trait DataStoreMut: DataStore {
	/// Creates the directory `path/name`.
	///
	/// Fails with `Error::NotFound` if `path` is missing (unless
	/// `opts.create_parents`), and with `Error::Conflict` if `path/name`
	/// already exists (unless `opts.create_parents`).
	fn create_dir(&mut self, path: &DataPath, name: &str, opts: &WriteOpts) -> ClResult<()>;

	/// Creates the leaf `path/name` holding `data`.
	///
	/// Fails with `Error::NotFound` if `path` is missing (unless
	/// `opts.create_parents`), and with `Error::Conflict` if `path/name`
	/// already exists.
	fn create(&mut self, path: &DataPath, name: &str, data: &str, opts: &WriteOpts)
	-> ClResult<()>;

	/// Overwrites the leaf at `path`. Missing leaves are created only with
	/// `opts.create`, otherwise the call fails with `Error::NotFound`.
	fn set(&mut self, path: &DataPath, data: &str, opts: &WriteOpts) -> ClResult<()>;

	/// Removes the leaf at `path`
	fn delete(&mut self, path: &DataPath) -> ClResult<()>;

	/// Removes the directory at `path`. A non-empty directory is only removed
	/// when `recursive` is set.
	fn delete_dir(&mut self, path: &DataPath, recursive: bool) -> ClResult<()>;

	/// Removes everything
	fn clear(&mut self) -> ClResult<()>;
}

// vim: ts=4
