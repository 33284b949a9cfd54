//! Tests for the default facade over an in-memory store

mod common;

use common::{get_json, legacy_facade, multi_org_facade, names, p, single_org_facade};
use orgspine_types::data_store::{DataStore, DataStoreMut, WriteOpts};
use orgspine_types::error::Error;
use serde_json::json;

#[test]
fn test_single_org_scenario() {
	let mut facade = single_org_facade();

	assert_eq!(
		facade.list(&p("/")).expect("Failed to list root"),
		names(&["containers", "users", "organizations", "acls"])
	);
	assert_eq!(facade.list(&p("/organizations")).expect("Failed to list orgs"), names(&["acme"]));

	facade.creator_mut().created(&p("/organizations/acme"), None, true);
	assert_eq!(
		get_json(&facade, "/organizations/acme/environments/_default"),
		json!({ "description": "The default Chef environment" })
	);
}

#[test]
fn test_validator_after_created() {
	let mut facade = single_org_facade();
	facade.creator_mut().created(&p("/organizations/acme/clients/acme-validator"), None, true);

	assert_eq!(
		get_json(&facade, "/organizations/acme/clients/acme-validator"),
		json!({ "validator": "true" })
	);
}

#[test]
fn test_multi_org_create_dir_brings_spine() {
	let mut facade = multi_org_facade();
	assert!(!facade.exists_dir(&p("/organizations/acme")));
	assert!(matches!(facade.list(&p("/organizations/acme/environments")), Err(Error::NotFound)));

	facade
		.create_dir(&p("/organizations"), "acme", &WriteOpts::new().with_requestor("alice"))
		.expect("Failed to create organization");

	assert!(facade.exists_dir(&p("/organizations/acme")));
	assert_eq!(
		facade.list(&p("/organizations/acme/environments")).expect("Failed to list"),
		names(&["_default"])
	);
	assert_eq!(
		facade.creator().creators(&p("/organizations/acme")),
		Some(&["alice".into()] as &[Box<str>])
	);
	assert_eq!(
		get_json(&facade, "/organizations/acme/groups/users"),
		json!({ "users": ["alice"] })
	);
}

#[test]
fn test_client_acl_lists_creator_and_superuser() {
	let mut facade = single_org_facade();
	facade
		.create(
			&p("/organizations/acme/clients"),
			"bob",
			r#"{"name": "bob"}"#,
			&WriteOpts::new().with_requestor("alice"),
		)
		.expect("Failed to create client");

	let acl = get_json(&facade, "/organizations/acme/acls/clients/bob");
	for perm in ["create", "read", "update", "delete", "grant"] {
		assert_eq!(acl[perm]["actors"], json!(["bob", "alice", "pivotal"]));
	}
	// Groups are inherited from the clients container
	assert_eq!(acl["create"]["groups"], json!(["admins"]));
	assert_eq!(acl["read"]["groups"], json!(["admins", "users"]));
	assert_eq!(acl["delete"]["groups"], json!(["admins", "users"]));
}

#[test]
fn test_validator_client_does_not_own_itself() {
	let mut facade = single_org_facade();
	facade
		.create(
			&p("/organizations/acme/clients"),
			"bob",
			r#"{"validator": true}"#,
			&WriteOpts::new().with_requestor("alice"),
		)
		.expect("Failed to create client");

	let acl = get_json(&facade, "/organizations/acme/acls/clients/bob");
	assert_eq!(acl["read"]["actors"], json!(["alice", "pivotal"]));
}

#[test]
fn test_validator_creator_is_not_owner() {
	let mut facade = single_org_facade();
	facade
		.create(
			&p("/organizations/acme/clients"),
			"web1",
			"{}",
			&WriteOpts::new().with_requestor("acme-validator"),
		)
		.expect("Failed to create client");

	let acl = get_json(&facade, "/organizations/acme/acls/clients/web1");
	assert_eq!(acl["grant"]["actors"], json!(["web1", "pivotal"]));
}

#[test]
fn test_container_acls() {
	let mut facade = single_org_facade();

	let nodes = get_json(&facade, "/organizations/acme/acls/containers/nodes");
	assert_eq!(nodes["read"]["actors"], json!(["pivotal"]));
	assert_eq!(nodes["create"]["groups"], json!(["admins", "users", "clients"]));
	assert_eq!(nodes["update"]["groups"], json!(["admins", "users"]));

	// Stored custom containers inherit no groups but keep the superusers
	facade
		.create(
			&p("/organizations/acme/containers"),
			"widgets",
			"{}",
			&WriteOpts::new().with_requestor("alice"),
		)
		.expect("Failed to create container");
	let widgets = get_json(&facade, "/organizations/acme/acls/containers/widgets");
	assert_eq!(widgets["read"]["actors"], json!(["alice", "pivotal"]));
	assert_eq!(widgets["read"]["groups"], json!([]));

	let acls = facade.list(&p("/organizations/acme/acls")).expect("Failed to list acls");
	assert_eq!(acls.first().map(AsRef::<str>::as_ref), Some("root"));
	assert!(acls.iter().any(|n| &**n == "widgets"));
	assert!(acls.iter().any(|n| &**n == "nodes"));
}

#[test]
fn test_node_acl_inherits_container_groups() {
	let mut facade = single_org_facade();
	facade
		.create(
			&p("/organizations/acme/nodes"),
			"web1",
			"{}",
			&WriteOpts::new().with_requestor("alice"),
		)
		.expect("Failed to create node");

	let acl = get_json(&facade, "/organizations/acme/acls/nodes/web1");
	assert_eq!(acl["read"]["actors"], json!(["alice", "pivotal"]));
	assert_eq!(acl["read"]["groups"], json!(["admins", "users", "clients"]));
	assert_eq!(acl["delete"]["groups"], json!(["admins", "users"]));
	assert_eq!(acl["grant"]["groups"], json!(["admins"]));
}

#[test]
fn test_top_level_acls() {
	let mut facade = single_org_facade();
	facade
		.create(&p("/users"), "alice", "{}", &WriteOpts::new().with_requestor("alice"))
		.expect("Failed to create user");

	assert_eq!(
		facade.list(&p("/acls")).expect("Failed to list"),
		names(&["root", "containers", "users"])
	);

	let acl = get_json(&facade, "/acls/users/alice");
	assert_eq!(acl["update"]["actors"], json!(["alice", "pivotal"]));
	assert_eq!(acl["update"]["groups"], json!([]));

	let root = get_json(&facade, "/acls/root");
	assert_eq!(root["grant"]["actors"], json!(["pivotal"]));
}

#[test]
fn test_stored_parent_acl_is_inherited() {
	let mut facade = single_org_facade();
	facade
		.create(
			&p("/organizations/acme/acls/containers"),
			"roles",
			r#"{"read": {"actors": [], "groups": ["auditors"]}}"#,
			&WriteOpts::new().with_create_parents(),
		)
		.expect("Failed to store container ACL");
	facade
		.create(&p("/organizations/acme/roles"), "base", "{}", &WriteOpts::new())
		.expect("Failed to create role");

	let acl = get_json(&facade, "/organizations/acme/acls/roles/base");
	assert_eq!(acl["read"]["groups"], json!(["auditors"]));
	assert_eq!(acl["create"]["groups"], json!([]));
}

#[test]
fn test_delete_default_hides_it() {
	let mut facade = single_org_facade();
	let env = p("/organizations/acme/environments/_default");
	assert!(facade.exists(&env));

	facade.delete(&env).expect("Deleting a default should succeed");
	assert!(!facade.exists(&env));
	assert!(matches!(facade.get(&env), Err(Error::NotFound)));
	assert!(matches!(facade.delete(&env), Err(Error::NotFound)));

	// Recreating clears the tombstone
	facade
		.create(&p("/organizations/acme/environments"), "_default", "{}", &WriteOpts::new())
		.expect("Failed to recreate environment");
	assert!(facade.exists(&env));
	assert_eq!(get_json(&facade, "/organizations/acme/environments/_default"), json!({}));
}

#[test]
fn test_delete_acl_is_not_tracked() {
	let mut facade = single_org_facade();
	let acl = p("/organizations/acme/acls/root");

	assert!(matches!(facade.delete(&acl), Err(Error::NotFound)));
	assert!(facade.exists(&acl));
	assert!(!facade.creator().is_deleted(&acl));
}

#[test]
fn test_delete_dir_recursively() {
	let mut facade = single_org_facade();
	let opts = WriteOpts::new().with_requestor("alice");
	facade
		.create(&p("/organizations/acme/nodes"), "web1", "{}", &opts)
		.expect("Failed to create node");

	facade.delete_dir(&p("/organizations/acme/nodes"), true).expect("Failed to delete nodes");
	assert!(!facade.exists(&p("/organizations/acme/nodes/web1")));
	assert!(!facade.exists_dir(&p("/organizations/acme/nodes")));

	facade
		.create(
			&p("/organizations/acme/nodes"),
			"web2",
			"{}",
			&opts.clone().with_create_parents(),
		)
		.expect("Failed to create node");
	assert!(facade.exists(&p("/organizations/acme/nodes/web2")));
	assert!(!facade.creator().is_deleted(&p("/organizations/acme/nodes")));
}

#[test]
fn test_create_conflicts_with_default() {
	let mut facade = single_org_facade();
	let res = facade.create(
		&p("/organizations/acme/environments"),
		"_default",
		"{}",
		&WriteOpts::new(),
	);
	assert!(matches!(res, Err(Error::Conflict(_))));

	let res = facade.create_dir(&p("/organizations"), "acme", &WriteOpts::new());
	assert!(matches!(res, Err(Error::Conflict(_))));
}

#[test]
fn test_set_materializes_default() {
	let mut facade = single_org_facade();
	let env = p("/organizations/acme/environments/_default");

	facade
		.set(&env, r#"{"description": "prod"}"#, &WriteOpts::new())
		.expect("Failed to overwrite default");
	assert!(facade.real().exists(&env));
	assert_eq!(
		get_json(&facade, "/organizations/acme/environments/_default"),
		json!({ "description": "prod" })
	);

	let missing = p("/organizations/acme/nodes/web9");
	assert!(matches!(facade.set(&missing, "{}", &WriteOpts::new()), Err(Error::NotFound)));

	facade
		.set(&missing, "{}", &WriteOpts::new().with_create().with_requestor("bob"))
		.expect("Failed to create via set");
	assert_eq!(facade.creator().creators(&missing), Some(&["bob".into()] as &[Box<str>]));
}

#[test]
fn test_list_merges_real_and_defaults() {
	let mut facade = single_org_facade();
	facade
		.create(&p("/organizations/acme/clients"), "ci", "{}", &WriteOpts::new())
		.expect("Failed to create client");

	assert_eq!(
		facade.list(&p("/organizations/acme/clients")).expect("Failed to list"),
		names(&["ci", "acme-validator"])
	);
	assert_eq!(
		get_json(&facade, "/organizations/acme/groups/clients"),
		json!({ "clients": ["ci", "acme-validator"] })
	);
	assert!(matches!(facade.list(&p("/organizations/acme/widgets")), Err(Error::NotFound)));
}

#[test]
fn test_legacy_compat_defaults() {
	let mut facade = legacy_facade();
	facade.creator_mut().created(&p("/organizations/acme"), Some("alice"), true);

	assert_eq!(
		facade.list(&p("/organizations/acme/clients")).expect("Failed to list"),
		names(&["acme-validator", "acme-webui"])
	);
	assert_eq!(
		facade.list(&p("/organizations/acme/users")).expect("Failed to list"),
		names(&["admin"])
	);
	assert_eq!(get_json(&facade, "/organizations/acme/users/admin"), json!({ "admin": "true" }));
	assert_eq!(
		get_json(&facade, "/organizations/acme/clients/acme-webui"),
		json!({ "admin": "true" })
	);
	assert_eq!(
		get_json(&facade, "/organizations/acme/groups/admins"),
		json!({ "actors": ["admin", "acme-webui", "alice"] })
	);
	// Org creators are not implicit members in legacy mode
	assert!(matches!(facade.get(&p("/organizations/acme/users/alice")), Err(Error::NotFound)));
}

#[test]
fn test_clear_resets_store_and_tracking() {
	let mut facade = single_org_facade();
	facade
		.create(&p("/users"), "alice", "{}", &WriteOpts::new().with_requestor("alice"))
		.expect("Failed to create user");
	facade
		.delete(&p("/organizations/acme/environments/_default"))
		.expect("Failed to delete default");

	facade.clear().expect("Failed to clear");

	assert!(!facade.exists(&p("/users/alice")));
	assert!(facade.creator().creators(&p("/users/alice")).is_none());
	assert!(facade.exists(&p("/organizations/acme/environments/_default")));
	assert_eq!(facade.creator().superusers(), &["pivotal".into()] as &[Box<str>]);
}

// vim: ts=4
