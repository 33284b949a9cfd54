//! On-demand defaults for a multi-tenant organization object tree.
//!
//! A freshly created organization implicitly has a default environment,
//! default groups, a validator client and an ACL on every object. Instead of
//! storing all of that, [`DefaultCreator`] computes it from the path shape and
//! from bookkeeping about which paths were explicitly created or deleted.
//! [`DefaultFacade`] puts the computed defaults behind the regular store
//! interface.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod acl;
pub mod acl_path;
pub mod classify;
pub mod config;
pub mod creator;
pub mod facade;
mod org;
pub mod prelude;
pub mod spine;
pub mod tracker;

pub use acl::{Ace, Acl, Permission};
pub use config::{DefaultsBuilder, DefaultsOpts};
pub use creator::DefaultCreator;
pub use facade::DefaultFacade;

// vim: ts=4
