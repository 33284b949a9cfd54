//! Default ACL computation
//!
//! An ACL document has the five permissions of [`Permission::ALL`], each
//! listing the `actors` and `groups` it is granted to. Defaults draw actors
//! from ownership and groups either from a fixed table of well-known objects
//! or from the ACL of the object's structural container.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::acl_path::{object_path, parent_acl_data_path};
use crate::creator::{DefaultCreator, document_flag};
use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
	Create,
	Read,
	Update,
	Delete,
	Grant,
}

impl Permission {
	pub const ALL: [Permission; 5] = [
		Permission::Create,
		Permission::Read,
		Permission::Update,
		Permission::Delete,
		Permission::Grant,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Permission::Create => "create",
			Permission::Read => "read",
			Permission::Update => "update",
			Permission::Delete => "delete",
			Permission::Grant => "grant",
		}
	}
}

impl fmt::Display for Permission {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Grantees of a single permission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ace {
	pub actors: Vec<Box<str>>,
	pub groups: Vec<Box<str>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Acl {
	pub create: Ace,
	pub read: Ace,
	pub update: Ace,
	pub delete: Ace,
	pub grant: Ace,
}

fn names_value(names: &[Box<str>]) -> Value {
	Value::Array(names.iter().map(|name| Value::String(name.to_string())).collect())
}

impl Acl {
	pub fn ace(&self, perm: Permission) -> &Ace {
		match perm {
			Permission::Create => &self.create,
			Permission::Read => &self.read,
			Permission::Update => &self.update,
			Permission::Delete => &self.delete,
			Permission::Grant => &self.grant,
		}
	}

	pub fn ace_mut(&mut self, perm: Permission) -> &mut Ace {
		match perm {
			Permission::Create => &mut self.create,
			Permission::Read => &mut self.read,
			Permission::Update => &mut self.update,
			Permission::Delete => &mut self.delete,
			Permission::Grant => &mut self.grant,
		}
	}

	/// The document form, with every permission carrying both lists
	pub fn to_value(&self) -> Value {
		let mut doc = Map::new();
		for perm in Permission::ALL {
			let ace = self.ace(perm);
			let mut entry = Map::new();
			entry.insert("actors".into(), names_value(&ace.actors));
			entry.insert("groups".into(), names_value(&ace.groups));
			doc.insert(perm.as_str().into(), Value::Object(entry));
		}
		Value::Object(doc)
	}
}

/// Groups per permission, in [`Permission::ALL`] order
pub type GroupPreset = [&'static [&'static str]; 5];

const NOBODY: &[&str] = &[];
const ADMINS: &[&str] = &["admins"];
const ADMINS_USERS: &[&str] = &["admins", "users"];
const ADMINS_USERS_CLIENTS: &[&str] = &["admins", "users", "clients"];
const BILLING_ADMINS: &[&str] = &["billing-admins"];

/// Group grants of well-known objects inside an organization, keyed by the
/// path below `organizations/ORG/acls`
pub fn basic_acl_groups(key: &str) -> Option<GroupPreset> {
	let preset = match key {
		"root" | "containers/containers" | "containers/groups" => {
			[ADMINS, ADMINS_USERS, ADMINS, ADMINS, ADMINS]
		}
		"containers/cookbooks"
		| "containers/environments"
		| "containers/roles"
		| "containers/policy_groups"
		| "containers/policies"
		| "containers/cookbook_artifacts" => {
			[ADMINS_USERS, ADMINS_USERS_CLIENTS, ADMINS_USERS, ADMINS_USERS, ADMINS]
		}
		"containers/data" => [
			ADMINS_USERS_CLIENTS,
			ADMINS_USERS_CLIENTS,
			ADMINS_USERS_CLIENTS,
			ADMINS_USERS_CLIENTS,
			ADMINS,
		],
		"containers/nodes" => {
			[ADMINS_USERS_CLIENTS, ADMINS_USERS_CLIENTS, ADMINS_USERS, ADMINS_USERS, ADMINS]
		}
		"containers/clients" => [ADMINS, ADMINS_USERS, ADMINS, ADMINS_USERS, ADMINS],
		"containers/sandboxes" => [ADMINS_USERS, ADMINS, ADMINS, ADMINS, ADMINS],
		"groups/admins" | "groups/clients" | "groups/users" => [ADMINS; 5],
		"groups/billing-admins" => [NOBODY, BILLING_ADMINS, BILLING_ADMINS, NOBODY, NOBODY],
		_ => return None,
	};
	Some(preset)
}

impl DefaultCreator {
	/// Computes the default ACL stored at `acl_path`.
	///
	/// Actors always come from ownership. Groups come from `preset` when
	/// given, are empty for containers inside an organization, and are
	/// inherited from the container's ACL otherwise.
	pub(crate) fn default_acl(
		&self,
		data: &dyn DataStore,
		acl_path: &DataPath,
		preset: Option<GroupPreset>,
	) -> Acl {
		let owners = self.owners(data, acl_path);
		let inherited = match preset {
			None if acl_path.seg(0) == Some("organizations")
				&& acl_path.seg(3) == Some("containers") =>
			{
				None
			}
			None => self.container_acl(data, acl_path),
			Some(_) => None,
		};

		let mut acl = Acl::default();
		for (index, perm) in Permission::ALL.into_iter().enumerate() {
			let ace = acl.ace_mut(perm);
			ace.actors.clone_from(&owners);
			ace.groups = match (preset, &inherited) {
				(Some(preset), _) => preset[index].iter().map(|&group| group.into()).collect(),
				(None, Some(container)) => container.ace(perm).groups.clone(),
				(None, None) => Vec::new(),
			};
		}
		acl
	}

	/// The parsed ACL of the structural container, if it resolves
	fn container_acl(&self, data: &dyn DataStore, acl_path: &DataPath) -> Option<Acl> {
		let parent = parent_acl_data_path(acl_path)?;
		let raw = data.get(&parent).ok()?;
		match serde_json::from_str(&raw) {
			Ok(acl) => Some(acl),
			Err(err) => {
				warn!(path = %parent, "malformed container ACL: {}", err);
				None
			}
		}
	}

	/// Identities owning the object protected by `acl_path`
	fn owners(&self, data: &dyn DataStore, acl_path: &DataPath) -> Vec<Box<str>> {
		let Some(path) = object_path(acl_path) else {
			return Vec::new();
		};
		let creators = self.creators(&path).unwrap_or_default();
		let mut owners: Vec<Box<str>> = Vec::new();

		match (path.len(), path.seg(0), path.seg(2), path.seg(3)) {
			(4, Some("organizations"), Some("clients"), Some(name)) => {
				// Non-validator clients own themselves
				if !document_flag(data, &path, "validator") {
					owners.push(name.into());
				}
				let clients = path.prefix(3);
				owners.extend(
					creators
						.iter()
						.filter(|creator| {
							!document_flag(data, &clients.child((*creator).clone()), "validator")
						})
						.cloned(),
				);
			}
			_ => owners.extend_from_slice(creators),
		}

		// Non-default containers that are not stored yet get no superusers
		let missing_container = path.len() == 4
			&& path.seg(0) == Some("organizations")
			&& path.seg(2) == Some("containers")
			&& !self.exists(data, &path)
			&& !data.exists(&path);
		if !missing_container {
			owners.extend_from_slice(self.superusers());
		}

		owners.into_iter().unique().collect()
	}
}


// vim: ts=4
