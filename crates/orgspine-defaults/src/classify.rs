//! Shape-based directory/leaf classification

use crate::prelude::*;

/// Whether `path` denotes a directory rather than a leaf.
///
/// Decided from the path shape alone, except for organization-level
/// object collections which are directories only if a matching entry exists
/// under the organization's `containers`.
pub fn is_dir(data: &dyn DataStore, path: &DataPath) -> bool {
	match (path.len(), path.seg(0), path.seg(2)) {
		(0 | 1, _, _) => true,
		(2, Some("organizations"), _) => true,
		(2, Some("acls"), _) => path.seg(1) != Some("root"),
		(3, Some("organizations"), Some("acls")) => true,
		(3, Some("organizations"), Some(kind)) => {
			data.exists(&path.prefix(2).join(&["containers", kind]))
		}
		(4, Some("organizations"), Some("acls")) => path.seg(1) != Some("root"),
		(4, Some("organizations"), Some("cookbooks" | "data")) => true,
		_ => false,
	}
}

/// Existence in the store, checking the directory or the leaf side depending
/// on how the path classifies
pub fn data_exists(data: &dyn DataStore, path: &DataPath) -> bool {
	if is_dir(data, path) { data.exists_dir(path) } else { data.exists(path) }
}


// vim: ts=4
