//! The default value synthesizer
//!
//! [`DefaultCreator`] answers what a path would hold if nothing had been
//! stored there explicitly. All reads take the store they should consult as
//! an argument. Pass the [`DefaultFacade`](crate::DefaultFacade) view rather
//! than the raw store so that defaults can build on other defaults.

use serde_json::{Value, json};

use orgspine_types::utils::{is_flag_set, parse_object};

use crate::acl_path::{is_acl_path, object_path};
use crate::classify::data_exists;
use crate::config::DefaultsOpts;
use crate::prelude::*;
use crate::tracker::OwnershipTracker;

const TOP_LEVEL: &[&str] = &["containers", "users", "organizations", "acls"];
const TOP_CONTAINERS: &[&str] = &["containers", "users", "organizations"];

fn names(items: &[&str]) -> Vec<Box<str>> {
	items.iter().map(|&item| item.into()).collect()
}

/// Reads a boolean-ish flag of a stored document. Missing documents and
/// unreadable ones count as unset.
pub(crate) fn document_flag(data: &dyn DataStore, path: &DataPath, key: &str) -> bool {
	match data.get(path).and_then(|raw| parse_object(&raw)) {
		Ok(doc) => is_flag_set(&doc, key),
		Err(err) if err.is_not_found() => false,
		Err(err) => {
			warn!(path = %path, "unreadable document: {}", err);
			false
		}
	}
}

#[derive(Debug, Clone)]
pub struct DefaultCreator {
	pub(crate) opts: DefaultsOpts,
	pub(crate) tracker: OwnershipTracker,
}

impl DefaultCreator {
	pub fn new(opts: DefaultsOpts) -> Self {
		let tracker = OwnershipTracker::new(opts.superusers.clone());
		Self { opts, tracker }
	}

	pub fn opts(&self) -> &DefaultsOpts {
		&self.opts
	}

	/// Identities owning the root, in order
	pub fn superusers(&self) -> &[Box<str>] {
		self.tracker.superusers()
	}

	/// Recorded creators of exactly `path`
	pub fn creators(&self, path: &DataPath) -> Option<&[Box<str>]> {
		self.tracker.creators(path)
	}

	/// Resets ownership and tombstones to a freshly constructed state
	pub fn clear(&mut self) {
		info!("clearing ownership and tombstones");
		self.tracker.clear();
	}

	/// Notification that `path` was created by `creator`
	pub fn created(&mut self, path: &DataPath, creator: Option<&str>, create_parents: bool) {
		self.tracker.created(path, creator, create_parents);
	}

	/// Notification that `path` is being deleted. Returns whether it existed
	/// before. ACL paths are not tracked and always report `false`.
	pub fn deleted(&mut self, data: &dyn DataStore, path: &DataPath) -> bool {
		if is_acl_path(path) {
			return false;
		}
		let existed = self.exists(data, path);
		self.tombstone(path);
		existed
	}

	pub(crate) fn tombstone(&mut self, path: &DataPath) -> bool {
		self.tracker.tombstone(path)
	}

	/// Whether `path` or one of its ancestors was deleted
	pub fn is_deleted(&self, path: &DataPath) -> bool {
		self.tracker.is_deleted(path)
	}

	/// The default document at `path`, if any
	pub fn get(&self, data: &dyn DataStore, path: &DataPath) -> Option<Value> {
		if self.is_deleted(path) {
			return None;
		}
		match (path.len(), path.seg(0)) {
			(_, Some("acls")) => {
				let object = object_path(path)?;
				if !data_exists(data, &object) {
					return None;
				}
				Some(self.default_acl(data, path, None).to_value())
			}
			(2, Some("containers")) => self.exists(data, path).then(|| json!({})),
			(2, Some("users")) => data.exists(path).then(|| json!({})),
			(2.., Some("organizations")) if data.exists_dir(&path.prefix(2)) => {
				self.get_org_default(data, path)
			}
			_ => None,
		}
	}

	/// Default child names of `path`, if it is a default directory
	pub fn list(&self, data: &dyn DataStore, path: &DataPath) -> Option<Vec<Box<str>>> {
		if self.is_deleted(path) {
			return None;
		}
		let mut children = match (path.len(), path.seg(0)) {
			(0, _) => names(TOP_LEVEL),
			(1, Some("acls")) => {
				let mut children: Vec<Box<str>> = vec!["root".into()];
				let containers = data.list(&path.child("containers")).unwrap_or_default();
				children.extend(containers.into_iter().filter(|name| &**name != "organizations"));
				children
			}
			(_, Some("acls")) => data.list(&object_path(path)?).ok()?,
			(1, Some("containers")) => names(TOP_CONTAINERS),
			(1, Some("users")) => self.superusers().to_vec(),
			(1, Some("organizations")) => self.opts.single_org.iter().cloned().collect(),
			(2.., Some("organizations")) if data.exists_dir(&path.prefix(2)) => {
				self.list_org_default(data, path)?
			}
			_ => return None,
		};
		children.retain(|name| !self.tracker.is_tombstoned(&path.child(name.clone())));
		Some(children)
	}

	/// Whether `path` exists by default, meaning its parent lists it
	pub fn exists(&self, data: &dyn DataStore, path: &DataPath) -> bool {
		let (Some(parent), Some(name)) = (path.parent(), path.last()) else {
			return true;
		};
		self.list(data, &parent).is_some_and(|siblings| siblings.iter().any(|s| &**s == name))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use orgspine_store_adapter_memory::StoreAdapterMemory;
	use orgspine_types::data_store::{DataStoreMut, WriteOpts};

	fn creator() -> DefaultCreator {
		DefaultCreator::new(DefaultsOpts { single_org: Some("acme".into()), ..Default::default() })
	}

	#[test]
	fn test_top_level_listing() {
		let store = StoreAdapterMemory::new();
		let creator = creator();
		assert_eq!(
			creator.list(&store, &DataPath::root()),
			Some(names(&["containers", "users", "organizations", "acls"]))
		);
		assert_eq!(
			creator.list(&store, &DataPath::parse("/organizations")),
			Some(names(&["acme"]))
		);
		assert_eq!(creator.list(&store, &DataPath::parse("/users")), Some(names(&["pivotal"])));
		assert_eq!(creator.list(&store, &DataPath::parse("/widgets")), None);
	}

	#[test]
	fn test_multi_org_lists_no_organizations() {
		let store = StoreAdapterMemory::new();
		let creator = DefaultCreator::new(DefaultsOpts::default());
		assert_eq!(creator.list(&store, &DataPath::parse("/organizations")), Some(Vec::new()));
		assert!(!creator.exists(&store, &DataPath::parse("/organizations/acme")));
	}

	#[test]
	fn test_exists_follows_parent_listing() {
		let store = StoreAdapterMemory::new();
		let creator = creator();
		assert!(creator.exists(&store, &DataPath::root()));
		assert!(creator.exists(&store, &DataPath::parse("/containers/users")));
		assert!(creator.exists(&store, &DataPath::parse("/users/pivotal")));
		assert!(!creator.exists(&store, &DataPath::parse("/users/alice")));
	}

	#[test]
	fn test_deleted_reports_previous_existence() {
		let store = StoreAdapterMemory::new();
		let mut creator = creator();
		let path = DataPath::parse("/containers/users");

		assert!(creator.deleted(&store, &path));
		assert!(!creator.exists(&store, &path));
		assert!(!creator.deleted(&store, &path));
		assert_eq!(creator.get(&store, &path), None);
	}

	#[test]
	fn test_document_flag() {
		let mut store = StoreAdapterMemory::new();
		let users = DataPath::parse("/organizations/acme/users");
		let opts = WriteOpts::new().with_create_parents();
		store.create(&users, "bob", r#"{"admin": true}"#, &opts).expect("Failed to create bob");
		store.create(&users, "dave", "not json", &opts).expect("Failed to create dave");

		assert!(document_flag(&store, &users.child("bob"), "admin"));
		assert!(!document_flag(&store, &users.child("dave"), "admin"));
		assert!(!document_flag(&store, &users.child("carol"), "admin"));
	}

	#[test]
	fn test_deleted_ignores_acl_paths() {
		let store = StoreAdapterMemory::new();
		let mut creator = creator();
		let path = DataPath::parse("/acls/root");

		assert!(!creator.deleted(&store, &path));
		assert!(!creator.is_deleted(&path));
	}
}

// vim: ts=4
