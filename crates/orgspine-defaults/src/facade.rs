//! A store that reports defaults for everything not stored explicitly
//!
//! [`DefaultFacade`] wraps a real store. Reads fall back to the
//! [`DefaultCreator`] when the real store has nothing, and writes are reported
//! to the creator so ownership and deletions are tracked.

use orgspine_types::data_store::{DataStoreMut, WriteOpts};
use orgspine_types::utils::extend_unique;

use crate::config::DefaultsOpts;
use crate::creator::DefaultCreator;
use crate::prelude::*;

/// Read-only combination of a real store and the defaults computed on top of
/// it. This is the store the creator itself reads through.
#[derive(Debug)]
struct Overlay<'a, S> {
	real: &'a S,
	creator: &'a DefaultCreator,
}

impl<S: DataStore> DataStore for Overlay<'_, S> {
	fn exists(&self, path: &DataPath) -> bool {
		self.real.exists(path) || self.creator.exists(self, path)
	}

	fn exists_dir(&self, path: &DataPath) -> bool {
		self.real.exists_dir(path) || self.creator.exists(self, path)
	}

	fn get(&self, path: &DataPath) -> ClResult<Box<str>> {
		match self.real.get(path) {
			Err(Error::NotFound) => {
				let value = self.creator.get(self, path).ok_or(Error::NotFound)?;
				Ok(serde_json::to_string_pretty(&value)?.into())
			}
			res => res,
		}
	}

	fn list(&self, path: &DataPath) -> ClResult<Vec<Box<str>>> {
		let defaults = self.creator.list(self, path);
		match (self.real.list(path), defaults) {
			(Ok(mut names), Some(defaults)) => {
				extend_unique(&mut names, &defaults);
				Ok(names)
			}
			(Err(Error::NotFound), Some(defaults)) => Ok(defaults),
			(res, _) => res,
		}
	}
}

#[derive(Debug)]
pub struct DefaultFacade<S> {
	real: S,
	creator: DefaultCreator,
}

impl<S: DataStore> DefaultFacade<S> {
	pub fn new(real: S, opts: DefaultsOpts) -> Self {
		Self::with_creator(real, DefaultCreator::new(opts))
	}

	pub fn with_creator(real: S, creator: DefaultCreator) -> Self {
		Self { real, creator }
	}

	pub fn real(&self) -> &S {
		&self.real
	}

	pub fn creator(&self) -> &DefaultCreator {
		&self.creator
	}

	pub fn creator_mut(&mut self) -> &mut DefaultCreator {
		&mut self.creator
	}

	pub fn into_inner(self) -> S {
		self.real
	}

	fn view(&self) -> Overlay<'_, S> {
		Overlay { real: &self.real, creator: &self.creator }
	}

	/// Whether `path` exists by default, seen through this facade
	fn default_exists(&self, path: &DataPath) -> bool {
		self.creator.exists(&self.view(), path)
	}

	/// Tombstones `path`, returning whether it existed by default
	fn notify_deleted(&mut self, path: &DataPath) -> bool {
		let existed = self.default_exists(path);
		self.creator.tombstone(path) && existed
	}
}

impl<S: DataStore> DataStore for DefaultFacade<S> {
	fn exists(&self, path: &DataPath) -> bool {
		self.view().exists(path)
	}

	fn exists_dir(&self, path: &DataPath) -> bool {
		self.view().exists_dir(path)
	}

	fn get(&self, path: &DataPath) -> ClResult<Box<str>> {
		self.view().get(path)
	}

	fn list(&self, path: &DataPath) -> ClResult<Vec<Box<str>>> {
		self.view().list(path)
	}
}

impl<S: DataStoreMut> DataStoreMut for DefaultFacade<S> {
	fn create_dir(&mut self, path: &DataPath, name: &str, opts: &WriteOpts) -> ClResult<()> {
		let target = path.child(name);
		if !opts.create_parents && self.default_exists(&target) {
			return Err(Error::Conflict(target.to_string()));
		}
		match self.real.create_dir(path, name, opts) {
			Err(Error::NotFound) if self.default_exists(path) => {
				let opts = opts.clone().with_create_parents();
				self.real.create_dir(path, name, &opts)?;
			}
			res => res?,
		}
		self.creator.created(&target, opts.requestor.as_deref(), opts.create_parents);
		Ok(())
	}

	fn create(
		&mut self,
		path: &DataPath,
		name: &str,
		data: &str,
		opts: &WriteOpts,
	) -> ClResult<()> {
		let target = path.child(name);
		if !opts.create_parents && self.default_exists(&target) {
			return Err(Error::Conflict(target.to_string()));
		}
		match self.real.create(path, name, data, opts) {
			Err(Error::NotFound) if self.default_exists(path) => {
				let opts = opts.clone().with_create_parents();
				self.real.create(path, name, data, &opts)?;
			}
			res => res?,
		}
		self.creator.created(&target, opts.requestor.as_deref(), opts.create_parents);
		Ok(())
	}

	fn set(&mut self, path: &DataPath, data: &str, opts: &WriteOpts) -> ClResult<()> {
		match self.real.set(path, data, opts) {
			Err(Error::NotFound)
				if opts.create_parents
					|| (opts.create && path.parent().is_some_and(|p| self.default_exists(&p)))
					|| self.default_exists(path) =>
			{
				// Materialize the default in the real store
				let opts = opts.clone().with_create().with_create_parents();
				self.real.set(path, data, &opts)?;
			}
			res => res?,
		}
		if opts.create {
			self.creator.created(path, opts.requestor.as_deref(), opts.create_parents);
		}
		Ok(())
	}

	fn delete(&mut self, path: &DataPath) -> ClResult<()> {
		let existed = self.notify_deleted(path);
		match self.real.delete(path) {
			Err(Error::NotFound) if existed => Ok(()),
			res => res,
		}
	}

	fn delete_dir(&mut self, path: &DataPath, recursive: bool) -> ClResult<()> {
		let existed = self.notify_deleted(path);
		match self.real.delete_dir(path, recursive) {
			Err(Error::NotFound) if existed => Ok(()),
			res => res,
		}
	}

	fn clear(&mut self) -> ClResult<()> {
		self.creator.clear();
		self.real.clear()
	}
}

// vim: ts=4
