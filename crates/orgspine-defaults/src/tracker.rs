//! Ownership and tombstone bookkeeping
//!
//! Records who created each path and which paths were explicitly deleted.
//! The root path always maps to the superusers and is never removed.

use std::collections::{HashMap, HashSet};

use crate::acl_path::is_acl_path;
use crate::prelude::*;

#[derive(Debug, Clone)]
pub struct OwnershipTracker {
	default_superusers: Vec<Box<str>>,
	creators: HashMap<DataPath, Vec<Box<str>>>,
	deleted: HashSet<DataPath>,
}

impl OwnershipTracker {
	pub fn new(superusers: Vec<Box<str>>) -> Self {
		let mut tracker = Self {
			default_superusers: superusers,
			creators: HashMap::new(),
			deleted: HashSet::new(),
		};
		tracker.clear();
		tracker
	}

	/// Forget everything except the configured superusers
	pub fn clear(&mut self) {
		self.creators.clear();
		self.creators.insert(DataPath::root(), self.default_superusers.clone());
		self.deleted.clear();
	}

	pub fn superusers(&self) -> &[Box<str>] {
		self.creators.get(&DataPath::root()).map_or(&[], Vec::as_slice)
	}

	/// Recorded creators of exactly `path`. `Some(&[])` means the path is
	/// known-created without a creator.
	pub fn creators(&self, path: &DataPath) -> Option<&[Box<str>]> {
		self.creators.get(path).map(Vec::as_slice)
	}

	/// Whether `path` itself carries a tombstone
	pub fn is_tombstoned(&self, path: &DataPath) -> bool {
		self.deleted.contains(path)
	}

	/// Whether `path` or any of its ancestors carries a tombstone
	pub fn is_deleted(&self, path: &DataPath) -> bool {
		!self.deleted.is_empty() && path.prefixes().any(|prefix| self.deleted.contains(&prefix))
	}

	/// Records that `path` now exists.
	///
	/// Every ancestor that was never created, or that sits under the deepest
	/// tombstoned prefix of `path`, is (re)established with the same creator.
	/// With `create_parents == false` only `path` itself is touched.
	pub fn created(&mut self, path: &DataPath, creator: Option<&str>, create_parents: bool) {
		let deleted_len = path
			.prefixes()
			.filter(|prefix| self.deleted.contains(prefix))
			.map(|prefix| prefix.len())
			.max();
		let record: Vec<Box<str>> = creator.map(|c| vec![c.into()]).unwrap_or_default();

		let mut current = path.clone();
		loop {
			let under_tombstone = deleted_len.is_some_and(|len| current.len() >= len);
			if !under_tombstone && self.creators.contains_key(&current) {
				break;
			}
			if current.is_root() {
				// The root keeps its superusers, only the tombstone goes
				self.deleted.remove(&current);
				break;
			}
			debug!(path = %current, creator = ?creator, "created");
			self.creators.insert(current.clone(), record.clone());
			self.deleted.remove(&current);
			if !create_parents {
				break;
			}
			match current.parent() {
				Some(parent) => current = parent,
				None => break,
			}
		}
	}

	/// Tombstones exactly `path`. ACL paths are never tombstoned since their
	/// existence follows the object they protect. Returns whether a tombstone
	/// was recorded.
	pub fn tombstone(&mut self, path: &DataPath) -> bool {
		if is_acl_path(path) {
			return false;
		}
		debug!(path = %path, "tombstoned");
		self.deleted.insert(path.clone());
		true
	}
}


// vim: ts=4
