//! Mapping between object paths and the paths of the ACLs protecting them
//!
//! ACLs live in partitions: the top partition under `acls/` and one partition
//! per organization under `organizations/ORG/acls/`. Inside a partition the
//! object itself is addressed as `root`, and objects of a data type as
//! `TYPE/NAME`.

use crate::prelude::*;

/// Object types that carry an ACL inside an organization
pub const ORG_DATA_TYPES: &[&str] = &[
	"clients",
	"containers",
	"cookbook_artifacts",
	"cookbooks",
	"data",
	"environments",
	"groups",
	"nodes",
	"policies",
	"policy_groups",
	"roles",
	"sandboxes",
];

/// Object types that carry an ACL at the top level
pub const TOP_DATA_TYPES: &[&str] = &["containers", "organizations", "users"];

/// Whether `path` addresses an ACL document or an ACL collection
pub fn is_acl_path(path: &DataPath) -> bool {
	match path.seg(0) {
		Some("acls") => true,
		Some("organizations") => path.seg(2) == Some("acls"),
		_ => false,
	}
}

/// Length of the partition prefix an object path belongs to
fn object_partition(path: &DataPath) -> usize {
	if path.seg(0) == Some("organizations") && path.len() >= 2 { 2 } else { 0 }
}

/// Length of the partition prefix of an ACL path, up to and including `acls`
fn acl_partition(path: &DataPath) -> Option<usize> {
	match (path.seg(0), path.seg(2)) {
		(Some("acls"), _) => Some(1),
		(Some("organizations"), Some("acls")) => Some(3),
		_ => None,
	}
}

/// The path of the ACL document protecting the object at `path`
pub fn acl_data_path(path: &DataPath) -> Option<DataPath> {
	let partition = object_partition(path);
	let types = if partition == 0 { TOP_DATA_TYPES } else { ORG_DATA_TYPES };
	let base = path.prefix(partition).child("acls");

	match path.suffix(partition) {
		[] => Some(base.child("root")),
		[kind, name] if types.contains(&kind.as_ref()) => Some(base.join(&[kind, name])),
		_ => None,
	}
}

/// The path of the object protected by the ACL at `acl_path`
pub fn object_path(acl_path: &DataPath) -> Option<DataPath> {
	let partition = acl_partition(acl_path)?;
	let owner = acl_path.prefix(partition - 1);

	match acl_path.suffix(partition) {
		[] => None,
		[root] if &**root == "root" => Some(owner),
		rest => Some(owner.join(rest)),
	}
}

/// The ACL of the structural container of the object protected by
/// `acl_path`, `None` at the top of a partition
pub fn parent_acl_data_path(acl_path: &DataPath) -> Option<DataPath> {
	let partition = acl_partition(acl_path)?;
	let base = acl_path.prefix(partition);
	let rest: Vec<&str> = acl_path.suffix(partition).iter().map(AsRef::as_ref).collect();

	match rest.as_slice() {
		["containers", _] => Some(base.child("root")),
		[kind, _] => Some(base.join(&["containers", *kind])),
		[kind] if *kind != "root" => Some(base.child("root")),
		_ => None,
	}
}


// vim: ts=4
