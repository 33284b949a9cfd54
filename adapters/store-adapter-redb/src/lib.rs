//! redb-backed implementation of the orgspine store traits.
//!
//! Paths are stored under their `/`-joined key in one of two tables: leaves in
//! `docs` with their raw value, directories in `dirs` with an empty marker.
//! The root is an implicit directory and is never stored. Listing a
//! directory is a prefix range scan keeping only direct children.

#![forbid(unsafe_code)]

mod error;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use redb::{ReadableDatabase, ReadableTable, TableDefinition};
use tracing::{debug, info, warn};

use orgspine::data_store::{DataStore, DataStoreMut, WriteOpts};
use orgspine::prelude::*;

use crate::error::from_redb_error;

/// Leaf documents by key
pub const TABLE_DOCS: TableDefinition<&str, &str> = TableDefinition::new("docs");

/// Directory markers by key
pub const TABLE_DIRS: TableDefinition<&str, &str> = TableDefinition::new("dirs");

type StrTable<'txn> = redb::Table<'txn, &'static str, &'static str>;

/// Key of a path. Segments must be non-empty and free of `/`.
fn path_key(path: &DataPath) -> ClResult<String> {
	if let Some(seg) = path.segments().iter().find(|seg| seg.is_empty() || seg.contains('/')) {
		return Err(Error::InvalidPath(format!("bad segment {:?} in {}", seg, path)));
	}
	Ok(path.key_from(0))
}

/// Prefix shared by the keys of everything below `key`
fn child_prefix(key: &str) -> String {
	if key.is_empty() { String::new() } else { format!("{}/", key) }
}

fn has_key<T>(table: &T, key: &str) -> ClResult<bool>
where
	T: ReadableTable<&'static str, &'static str>,
{
	Ok(table.get(key).map_err(from_redb_error)?.is_some())
}

/// Keys strictly below `key`
fn descendant_keys<T: ReadableTable<&'static str, &'static str>>(
	table: &T,
	key: &str,
) -> ClResult<Vec<String>> {
	let prefix = child_prefix(key);
	let mut keys = Vec::new();
	for item in table.range(prefix.as_str()..).map_err(from_redb_error)? {
		let (entry, _) = item.map_err(from_redb_error)?;
		let entry = entry.value();
		if !entry.starts_with(&prefix) {
			break;
		}
		if entry.len() > prefix.len() {
			keys.push(entry.to_string());
		}
	}
	Ok(keys)
}

/// Adds the names of the direct children of `key` to `names`
fn collect_children<T: ReadableTable<&'static str, &'static str>>(
	table: &T,
	key: &str,
	names: &mut BTreeSet<String>,
) -> ClResult<()> {
	let prefix = child_prefix(key);
	for entry in descendant_keys(table, key)? {
		let rest = &entry[prefix.len()..];
		if !rest.contains('/') {
			names.insert(rest.to_string());
		}
	}
	Ok(())
}

/// Makes sure `path` is a directory, creating missing ones only if allowed
fn require_dir(
	docs: &StrTable<'_>,
	dirs: &mut StrTable<'_>,
	path: &DataPath,
	create_parents: bool,
) -> ClResult<()> {
	if path.is_root() || has_key(&*dirs, &path_key(path)?)? {
		return Ok(());
	}
	if !create_parents {
		return Err(Error::NotFound);
	}
	for prefix in path.prefixes().skip(1) {
		let key = path_key(&prefix)?;
		if has_key(&*docs, &key)? {
			return Err(Error::Conflict(prefix.to_string()));
		}
		if !has_key(&*dirs, &key)? {
			dirs.insert(key.as_str(), "").map_err(from_redb_error)?;
		}
	}
	Ok(())
}

#[derive(Debug)]
pub struct StoreAdapterRedb {
	db_path: PathBuf,
	db: redb::Database,
}

impl StoreAdapterRedb {
	/// Opens (or creates) the store file inside `storage_dir`
	pub fn new(storage_dir: impl AsRef<Path>) -> ClResult<Self> {
		std::fs::create_dir_all(storage_dir.as_ref())?;
		let db_path = storage_dir.as_ref().join("orgspine.redb");

		let db = if db_path.exists() {
			redb::Database::open(&db_path).map_err(from_redb_error)?
		} else {
			redb::Database::create(&db_path).map_err(from_redb_error)?
		};

		// Initialize tables
		let tx = db.begin_write().map_err(from_redb_error)?;
		{
			let _ = tx.open_table(TABLE_DOCS).map_err(from_redb_error)?;
			let _ = tx.open_table(TABLE_DIRS).map_err(from_redb_error)?;
		}
		tx.commit().map_err(from_redb_error)?;

		info!("opened store at {}", db_path.display());
		Ok(Self { db_path, db })
	}

	pub fn db_path(&self) -> &Path {
		&self.db_path
	}

	fn contains(
		&self,
		table: TableDefinition<'static, &'static str, &'static str>,
		path: &DataPath,
	) -> ClResult<bool> {
		let key = path_key(path)?;
		let tx = self.db.begin_read().map_err(from_redb_error)?;
		let table = tx.open_table(table).map_err(from_redb_error)?;
		has_key(&table, &key)
	}

	/// Runs `f` on both tables inside one write transaction, committing only
	/// if it succeeds
	fn write<R>(
		&self,
		f: impl FnOnce(&mut StrTable<'_>, &mut StrTable<'_>) -> ClResult<R>,
	) -> ClResult<R> {
		let tx = self.db.begin_write().map_err(from_redb_error)?;
		let res = {
			let mut docs = tx.open_table(TABLE_DOCS).map_err(from_redb_error)?;
			let mut dirs = tx.open_table(TABLE_DIRS).map_err(from_redb_error)?;
			f(&mut docs, &mut dirs)?
		};
		tx.commit().map_err(from_redb_error)?;
		Ok(res)
	}
}

impl DataStore for StoreAdapterRedb {
	fn exists(&self, path: &DataPath) -> bool {
		self.contains(TABLE_DOCS, path).unwrap_or_else(|err| {
			warn!("exists {} failed: {}", path, err);
			false
		})
	}

	fn exists_dir(&self, path: &DataPath) -> bool {
		path.is_root()
			|| self.contains(TABLE_DIRS, path).unwrap_or_else(|err| {
				warn!("exists_dir {} failed: {}", path, err);
				false
			})
	}

	fn get(&self, path: &DataPath) -> ClResult<Box<str>> {
		let key = path_key(path)?;
		let tx = self.db.begin_read().map_err(from_redb_error)?;
		let table = tx.open_table(TABLE_DOCS).map_err(from_redb_error)?;
		match table.get(key.as_str()).map_err(from_redb_error)? {
			Some(value) => Ok(value.value().into()),
			None => Err(Error::NotFound),
		}
	}

	fn list(&self, path: &DataPath) -> ClResult<Vec<Box<str>>> {
		let key = path_key(path)?;
		let tx = self.db.begin_read().map_err(from_redb_error)?;
		let dirs = tx.open_table(TABLE_DIRS).map_err(from_redb_error)?;
		if !path.is_root() && !has_key(&dirs, &key)? {
			return Err(Error::NotFound);
		}
		let docs = tx.open_table(TABLE_DOCS).map_err(from_redb_error)?;

		let mut names = BTreeSet::new();
		collect_children(&dirs, &key, &mut names)?;
		collect_children(&docs, &key, &mut names)?;
		Ok(names.into_iter().map(Into::into).collect())
	}
}

impl DataStoreMut for StoreAdapterRedb {
	fn create_dir(&mut self, path: &DataPath, name: &str, opts: &WriteOpts) -> ClResult<()> {
		let target = path.child(name);
		let key = path_key(&target)?;
		self.write(|docs, dirs| {
			require_dir(docs, dirs, path, opts.create_parents)?;
			if has_key(&*docs, &key)? {
				return Err(Error::Conflict(target.to_string()));
			}
			if has_key(&*dirs, &key)? {
				return if opts.create_parents {
					Ok(())
				} else {
					Err(Error::Conflict(target.to_string()))
				};
			}
			debug!("create_dir {}", target);
			dirs.insert(key.as_str(), "").map_err(from_redb_error)?;
			Ok(())
		})
	}

	fn create(
		&mut self,
		path: &DataPath,
		name: &str,
		data: &str,
		opts: &WriteOpts,
	) -> ClResult<()> {
		let target = path.child(name);
		let key = path_key(&target)?;
		self.write(|docs, dirs| {
			require_dir(docs, dirs, path, opts.create_parents)?;
			if has_key(&*docs, &key)? || has_key(&*dirs, &key)? {
				return Err(Error::Conflict(target.to_string()));
			}
			debug!("create {}", target);
			docs.insert(key.as_str(), data).map_err(from_redb_error)?;
			Ok(())
		})
	}

	fn set(&mut self, path: &DataPath, data: &str, opts: &WriteOpts) -> ClResult<()> {
		let parent = path.parent().ok_or_else(|| Error::InvalidPath("cannot set root".into()))?;
		let key = path_key(path)?;
		self.write(|docs, dirs| {
			if has_key(&*dirs, &key)? {
				return Err(Error::Conflict(path.to_string()));
			}
			if !has_key(&*docs, &key)? {
				if !opts.create {
					return Err(Error::NotFound);
				}
				require_dir(docs, dirs, &parent, opts.create_parents)?;
				debug!("set (create) {}", path);
			}
			docs.insert(key.as_str(), data).map_err(from_redb_error)?;
			Ok(())
		})
	}

	fn delete(&mut self, path: &DataPath) -> ClResult<()> {
		let key = path_key(path)?;
		self.write(|docs, _dirs| {
			if docs.remove(key.as_str()).map_err(from_redb_error)?.is_none() {
				return Err(Error::NotFound);
			}
			debug!("delete {}", path);
			Ok(())
		})
	}

	fn delete_dir(&mut self, path: &DataPath, recursive: bool) -> ClResult<()> {
		let key = path_key(path)?;
		self.write(|docs, dirs| {
			if !path.is_root() && !has_key(&*dirs, &key)? {
				return Err(Error::NotFound);
			}
			let doomed_docs = descendant_keys(&*docs, &key)?;
			let doomed_dirs = descendant_keys(&*dirs, &key)?;
			if !recursive && !(doomed_docs.is_empty() && doomed_dirs.is_empty()) {
				return Err(Error::Conflict(path.to_string()));
			}
			debug!("delete_dir {} ({} nodes below)", path, doomed_docs.len() + doomed_dirs.len());
			for doomed in &doomed_docs {
				docs.remove(doomed.as_str()).map_err(from_redb_error)?;
			}
			for doomed in &doomed_dirs {
				dirs.remove(doomed.as_str()).map_err(from_redb_error)?;
			}
			if !path.is_root() {
				dirs.remove(key.as_str()).map_err(from_redb_error)?;
			}
			Ok(())
		})
	}

	fn clear(&mut self) -> ClResult<()> {
		let tx = self.db.begin_write().map_err(from_redb_error)?;
		tx.delete_table(TABLE_DOCS).map_err(from_redb_error)?;
		tx.delete_table(TABLE_DIRS).map_err(from_redb_error)?;
		{
			let _ = tx.open_table(TABLE_DOCS).map_err(from_redb_error)?;
			let _ = tx.open_table(TABLE_DIRS).map_err(from_redb_error)?;
		}
		tx.commit().map_err(from_redb_error)?;
		info!("cleared store at {}", self.db_path.display());
		Ok(())
	}
}

// vim: ts=4
