//! In-memory implementation of the orgspine store traits.
//!
//! Nodes live in a `BTreeMap` keyed by path. Because path ordering is
//! lexicographic by segment, the subtree of any directory is one contiguous
//! range of the map.

#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::ops::Bound;

use tracing::debug;

use orgspine::data_store::{DataStore, DataStoreMut, WriteOpts};
use orgspine::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
	Dir,
	Leaf(Box<str>),
}

#[derive(Debug, Default)]
pub struct StoreAdapterMemory {
	nodes: BTreeMap<DataPath, Node>,
}

impl StoreAdapterMemory {
	pub fn new() -> Self {
		Self::default()
	}

	fn is_dir(&self, path: &DataPath) -> bool {
		path.is_root() || matches!(self.nodes.get(path), Some(Node::Dir))
	}

	/// Every stored node strictly below `path`
	fn descendants<'a>(
		&'a self,
		path: &'a DataPath,
	) -> impl Iterator<Item = (&'a DataPath, &'a Node)> + 'a {
		self.nodes
			.range((Bound::Excluded(path.clone()), Bound::Unbounded))
			.take_while(move |(key, _)| key.starts_with(path))
	}

	/// Creates every missing directory from the root down to `path`
	fn ensure_dirs(&mut self, path: &DataPath) -> ClResult<()> {
		for prefix in path.prefixes().skip(1) {
			match self.nodes.get(&prefix) {
				Some(Node::Dir) => {}
				Some(Node::Leaf(_)) => return Err(Error::Conflict(prefix.to_string())),
				None => {
					self.nodes.insert(prefix, Node::Dir);
				}
			}
		}
		Ok(())
	}

	/// Makes sure `path` is a directory, creating it only if allowed
	fn require_dir(&mut self, path: &DataPath, create_parents: bool) -> ClResult<()> {
		if self.is_dir(path) {
			Ok(())
		} else if create_parents {
			self.ensure_dirs(path)
		} else {
			Err(Error::NotFound)
		}
	}
}

impl DataStore for StoreAdapterMemory {
	fn exists(&self, path: &DataPath) -> bool {
		matches!(self.nodes.get(path), Some(Node::Leaf(_)))
	}

	fn exists_dir(&self, path: &DataPath) -> bool {
		self.is_dir(path)
	}

	fn get(&self, path: &DataPath) -> ClResult<Box<str>> {
		match self.nodes.get(path) {
			Some(Node::Leaf(value)) => Ok(value.clone()),
			_ => Err(Error::NotFound),
		}
	}

	fn list(&self, path: &DataPath) -> ClResult<Vec<Box<str>>> {
		if !self.is_dir(path) {
			return Err(Error::NotFound);
		}
		let depth = path.len() + 1;
		Ok(self
			.descendants(path)
			.filter(|(key, _)| key.len() == depth)
			.filter_map(|(key, _)| key.last().map(Box::from))
			.collect())
	}
}

impl DataStoreMut for StoreAdapterMemory {
	fn create_dir(&mut self, path: &DataPath, name: &str, opts: &WriteOpts) -> ClResult<()> {
		self.require_dir(path, opts.create_parents)?;
		let target = path.child(name);
		match self.nodes.get(&target) {
			Some(Node::Dir) if opts.create_parents => Ok(()),
			Some(_) => Err(Error::Conflict(target.to_string())),
			None => {
				debug!("create_dir {}", target);
				self.nodes.insert(target, Node::Dir);
				Ok(())
			}
		}
	}

	fn create(
		&mut self,
		path: &DataPath,
		name: &str,
		data: &str,
		opts: &WriteOpts,
	) -> ClResult<()> {
		self.require_dir(path, opts.create_parents)?;
		let target = path.child(name);
		if self.nodes.contains_key(&target) {
			return Err(Error::Conflict(target.to_string()));
		}
		debug!("create {}", target);
		self.nodes.insert(target, Node::Leaf(data.into()));
		Ok(())
	}

	fn set(&mut self, path: &DataPath, data: &str, opts: &WriteOpts) -> ClResult<()> {
		match self.nodes.get_mut(path) {
			Some(Node::Leaf(value)) => {
				*value = data.into();
				Ok(())
			}
			Some(Node::Dir) => Err(Error::Conflict(path.to_string())),
			None if opts.create => {
				let parent =
					path.parent().ok_or_else(|| Error::InvalidPath("cannot set root".into()))?;
				self.require_dir(&parent, opts.create_parents)?;
				debug!("set (create) {}", path);
				self.nodes.insert(path.clone(), Node::Leaf(data.into()));
				Ok(())
			}
			None => Err(Error::NotFound),
		}
	}

	fn delete(&mut self, path: &DataPath) -> ClResult<()> {
		match self.nodes.get(path) {
			Some(Node::Leaf(_)) => {
				debug!("delete {}", path);
				self.nodes.remove(path);
				Ok(())
			}
			_ => Err(Error::NotFound),
		}
	}

	fn delete_dir(&mut self, path: &DataPath, recursive: bool) -> ClResult<()> {
		if !self.is_dir(path) {
			return Err(Error::NotFound);
		}
		let doomed: Vec<DataPath> = self.descendants(path).map(|(key, _)| key.clone()).collect();
		if !doomed.is_empty() && !recursive {
			return Err(Error::Conflict(path.to_string()));
		}
		debug!("delete_dir {} ({} nodes below)", path, doomed.len());
		for key in doomed {
			self.nodes.remove(&key);
		}
		self.nodes.remove(path);
		Ok(())
	}

	fn clear(&mut self) -> ClResult<()> {
		self.nodes.clear();
		Ok(())
	}
}

// vim: ts=4
