//! Construction-time options for the default engine

use serde::Deserialize;

use crate::creator::DefaultCreator;
use crate::prelude::*;

/// Superusers used when none are configured
pub const DEFAULT_SUPERUSERS: &[&str] = &["pivotal"];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefaultsOpts {
	/// Name of the only organization in single-organization mode. In
	/// multi-organization mode (`None`) organizations are discovered through
	/// the store.
	pub single_org: Option<Box<str>>,

	/// Restore the deprecated `ORG-webui` client and `admin` user defaults
	pub legacy_compat: bool,

	/// Identities owning the root, in order
	pub superusers: Vec<Box<str>>,
}

impl Default for DefaultsOpts {
	fn default() -> Self {
		Self {
			single_org: None,
			legacy_compat: false,
			superusers: DEFAULT_SUPERUSERS.iter().map(|&s| s.into()).collect(),
		}
	}
}

fn check_name(kind: &str, name: &str) -> ClResult<()> {
	if name.is_empty() || name.contains('/') {
		return Err(Error::ConfigError(format!("invalid {} name: {:?}", kind, name)));
	}
	Ok(())
}

impl DefaultsOpts {
	/// Parse options from a JSON document, filling in defaults
	pub fn from_json(raw: &str) -> ClResult<Self> {
		let opts: Self = serde_json::from_str(raw)
			.map_err(|e| Error::ConfigError(format!("cannot parse options: {}", e)))?;
		opts.validate()?;
		Ok(opts)
	}

	pub fn validate(&self) -> ClResult<()> {
		if let Some(org) = &self.single_org {
			check_name("organization", org)?;
		}
		for superuser in &self.superusers {
			check_name("superuser", superuser)?;
		}
		Ok(())
	}
}

/// Builder for [`DefaultCreator`]
#[derive(Debug, Default)]
pub struct DefaultsBuilder {
	opts: DefaultsOpts,
}

impl DefaultsBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn single_org(&mut self, org: impl Into<Box<str>>) -> &mut Self {
		self.opts.single_org = Some(org.into());
		self
	}
	pub fn multi_org(&mut self) -> &mut Self {
		self.opts.single_org = None;
		self
	}
	pub fn legacy_compat(&mut self, legacy_compat: bool) -> &mut Self {
		self.opts.legacy_compat = legacy_compat;
		self
	}
	pub fn superusers(
		&mut self,
		superusers: impl IntoIterator<Item = impl Into<Box<str>>>,
	) -> &mut Self {
		self.opts.superusers = superusers.into_iter().map(Into::into).collect();
		self
	}

	pub fn opts(&self) -> &DefaultsOpts {
		&self.opts
	}

	pub fn build(&self) -> ClResult<DefaultCreator> {
		self.opts.validate()?;
		Ok(DefaultCreator::new(self.opts.clone()))
	}
}


// vim: ts=4
