//! Defaults below `organizations/ORG`

use itertools::Itertools;
use serde_json::{Map, Value, json};

use crate::acl::basic_acl_groups;
use crate::acl_path::object_path;
use crate::classify::data_exists;
use crate::creator::{DefaultCreator, document_flag};
use crate::prelude::*;
use crate::spine::ORG_SPINE;

/// Leaves below an organization with a fixed default document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WellKnown {
	Validator,
	LegacyAdmin,
	DefaultEnvironment,
	AdminsGroup,
	BillingAdminsGroup,
	ClientsGroup,
	UsersGroup,
}

impl WellKnown {
	fn classify(org: &str, key: &str, legacy_compat: bool) -> Option<Self> {
		match key.split_once('/')? {
			("clients", name) if name.strip_prefix(org) == Some("-validator") => {
				Some(Self::Validator)
			}
			("clients", name) if legacy_compat && name.strip_prefix(org) == Some("-webui") => {
				Some(Self::LegacyAdmin)
			}
			("users", "admin") if legacy_compat => Some(Self::LegacyAdmin),
			("environments", "_default") => Some(Self::DefaultEnvironment),
			("groups", "admins") => Some(Self::AdminsGroup),
			("groups", "billing-admins") => Some(Self::BillingAdminsGroup),
			("groups", "clients") => Some(Self::ClientsGroup),
			("groups", "users") => Some(Self::UsersGroup),
			_ => None,
		}
	}
}

fn names_value(names: impl IntoIterator<Item = Box<str>>) -> Value {
	Value::Array(names.into_iter().map(|name| Value::String(name.into())).collect())
}

impl DefaultCreator {
	/// Default document for `organizations/ORG/**`. The organization is
	/// known to exist.
	pub(crate) fn get_org_default(&self, data: &dyn DataStore, path: &DataPath) -> Option<Value> {
		if path.seg(2) == Some("acls") {
			return self.get_org_acl_default(data, path);
		}
		let org_path = path.prefix(2);
		let org = path.seg(1)?;

		if path.len() < 4 {
			return (path.seg(2) == Some("org") && path.len() == 3).then(|| json!({}));
		}

		if !self.opts.legacy_compat && path.len() == 4 && path.seg(2) == Some("users") {
			let creators = self.creators(&org_path).unwrap_or_default();
			if path.seg(3).is_some_and(|name| creators.iter().any(|c| c.as_ref() == name)) {
				return Some(json!({}));
			}
		}

		if path.seg(2) == Some("containers") && path.len() == 4 {
			return self.exists(data, path).then(|| json!({}));
		}

		let well_known = WellKnown::classify(org, &path.key_from(2), self.opts.legacy_compat)?;
		let value = match well_known {
			WellKnown::Validator => json!({ "validator": "true" }),
			WellKnown::LegacyAdmin => json!({ "admin": "true" }),
			WellKnown::DefaultEnvironment => {
				json!({ "description": "The default Chef environment" })
			}
			WellKnown::AdminsGroup => {
				let admins = ["users", "clients"]
					.into_iter()
					.flat_map(|kind| {
						let dir = org_path.child(kind);
						let names = data.list(&dir).unwrap_or_default();
						names.into_iter().filter(move |name| {
							document_flag(data, &dir.child(name.clone()), "admin")
						})
					})
					.chain(self.creators(&org_path).unwrap_or_default().iter().cloned())
					.unique();
				json!({ "actors": names_value(admins) })
			}
			WellKnown::BillingAdminsGroup => Value::Object(Map::new()),
			WellKnown::ClientsGroup => {
				let clients = data.list(&org_path.child("clients")).unwrap_or_default();
				json!({ "clients": names_value(clients) })
			}
			WellKnown::UsersGroup => {
				let users = data
					.list(&org_path.child("users"))
					.unwrap_or_default()
					.into_iter()
					.chain(self.creators(&org_path).unwrap_or_default().iter().cloned())
					.unique();
				json!({ "users": names_value(users) })
			}
		};
		Some(value)
	}

	/// Default ACL below `organizations/ORG/acls`
	fn get_org_acl_default(&self, data: &dyn DataStore, acl_path: &DataPath) -> Option<Value> {
		let object = object_path(acl_path)?;
		// A container's ACL only needs the container, not its contents
		if !data_exists(data, &object) {
			return None;
		}
		let preset = basic_acl_groups(&acl_path.key_from(3));
		Some(self.default_acl(data, acl_path, preset).to_value())
	}

	/// Default child names of `organizations/ORG/**`
	pub(crate) fn list_org_default(
		&self,
		data: &dyn DataStore,
		path: &DataPath,
	) -> Option<Vec<Box<str>>> {
		let org_path = path.prefix(2);
		if path.seg(2) == Some("acls") {
			return match path.len() {
				3 => {
					let mut names: Vec<Box<str>> = vec!["root".into()];
					names.extend(data.list(&org_path.child("containers")).unwrap_or_default());
					Some(names)
				}
				4 => data.list(&org_path.join(path.suffix(3))).ok(),
				_ => None,
			};
		}

		let mut node = &ORG_SPINE;
		for index in 2..path.len() {
			if self.tracker.is_tombstoned(&path.prefix(index + 1)) {
				return None;
			}
			node = node.child(path.seg(index)?)?;
		}
		let mut names = node.names();

		if path.len() == 3 {
			let org = path.seg(1)?;
			match path.seg(2) {
				Some("clients") => {
					names.push(format!("{}-validator", org).into());
					if self.opts.legacy_compat {
						names.push(format!("{}-webui", org).into());
					}
				}
				Some("users") if self.opts.legacy_compat => names.push("admin".into()),
				_ => {}
			}
		}
		Some(names)
	}
}


// vim: ts=4
