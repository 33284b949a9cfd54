//! The implicit substructure of every organization

/// A node of the organization skeleton
#[derive(Debug)]
pub enum SpineNode {
	/// Named children, each with its own skeleton
	Map(&'static [(&'static str, SpineNode)]),
	/// Leaf names without further structure
	List(&'static [&'static str]),
}

const EMPTY: SpineNode = SpineNode::Map(&[]);

/// What exists below `organizations/ORG` as soon as the organization does
pub static ORG_SPINE: SpineNode = SpineNode::Map(&[
	("clients", EMPTY),
	("cookbooks", EMPTY),
	("data", EMPTY),
	("environments", SpineNode::List(&["_default"])),
	("file_store", SpineNode::Map(&[("checksums", EMPTY)])),
	("nodes", EMPTY),
	("roles", EMPTY),
	("sandboxes", EMPTY),
	("users", EMPTY),
	("org", EMPTY),
	(
		"containers",
		SpineNode::List(&[
			"clients",
			"containers",
			"cookbooks",
			"data",
			"environments",
			"groups",
			"nodes",
			"roles",
			"sandboxes",
			"policies",
			"cookbook_artifacts",
		]),
	),
	("groups", SpineNode::List(&["admins", "billing-admins", "clients", "users"])),
	("association_requests", EMPTY),
	("policies", EMPTY),
	("policy_groups", EMPTY),
	("cookbook_artifacts", EMPTY),
]);

impl SpineNode {
	pub fn child(&self, name: &str) -> Option<&'static SpineNode> {
		match self {
			Self::Map(children) => {
				children.iter().find(|(key, _)| *key == name).map(|(_, node)| node)
			}
			Self::List(_) => None,
		}
	}

	/// Child names, in skeleton order
	pub fn names(&self) -> Vec<Box<str>> {
		match self {
			Self::Map(children) => children.iter().map(|(key, _)| Box::from(*key)).collect(),
			Self::List(names) => names.iter().map(|&name| Box::from(name)).collect(),
		}
	}
}


// vim: ts=4
