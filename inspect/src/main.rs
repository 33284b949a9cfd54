//! Reads an orgspine store the way clients see it, defaults included.
//!
//! Usage: `orgspine-inspect <get|list|exists|acl> PATH`
//!
//! Configured through the environment:
//! - `DB_DIR`: directory of the redb store (default `./data`)
//! - `ORGSPINE_SINGLE_ORG`: organization name for single-organization mode
//! - `ORGSPINE_LEGACY_COMPAT`: `1` or `true` to enable legacy defaults
//! - `ORGSPINE_SUPERUSERS`: comma separated list of superusers

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

use std::process::ExitCode;
use std::{env, path};

use tracing::{debug, error};

use orgspine_defaults::acl_path::acl_data_path;
use orgspine_defaults::{DefaultFacade, DefaultsBuilder};
use orgspine_store_adapter_redb::StoreAdapterRedb;
use orgspine_types::data_store::DataStore;
use orgspine_types::error::{ClResult, Error};
use orgspine_types::path::DataPath;

pub struct Config {
	pub db_dir: path::PathBuf,
	pub single_org: Option<String>,
	pub legacy_compat: bool,
	pub superusers: Option<Vec<String>>,
}

impl Config {
	fn from_env() -> Self {
		Config {
			db_dir: path::PathBuf::from(env::var("DB_DIR").unwrap_or_else(|_| "./data".into())),
			single_org: env::var("ORGSPINE_SINGLE_ORG").ok().filter(|org| !org.is_empty()),
			legacy_compat: env::var("ORGSPINE_LEGACY_COMPAT")
				.is_ok_and(|v| matches!(v.as_str(), "1" | "true" | "yes")),
			superusers: env::var("ORGSPINE_SUPERUSERS").ok().map(|list| {
				list.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
			}),
		}
	}
}

enum Command {
	Get,
	List,
	Exists,
	Acl,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Option<(Command, DataPath)> {
	let cmd = match args.next()?.as_str() {
		"get" => Command::Get,
		"list" => Command::List,
		"exists" => Command::Exists,
		"acl" => Command::Acl,
		_ => return None,
	};
	let path = DataPath::parse(&args.next()?);
	if args.next().is_some() {
		return None;
	}
	Some((cmd, path))
}

fn open(config: &Config) -> ClResult<DefaultFacade<StoreAdapterRedb>> {
	let mut builder = DefaultsBuilder::new();
	match &config.single_org {
		Some(org) => builder.single_org(org.as_str()),
		None => builder.multi_org(),
	};
	builder.legacy_compat(config.legacy_compat);
	if let Some(superusers) = &config.superusers {
		builder.superusers(superusers.iter().map(String::as_str));
	}
	let creator = builder.build()?;

	let store = StoreAdapterRedb::new(&config.db_dir)?;
	debug!("using store {}", store.db_path().display());
	Ok(DefaultFacade::with_creator(store, creator))
}

fn print_document(facade: &DefaultFacade<StoreAdapterRedb>, path: &DataPath) -> ClResult<()> {
	let raw = facade.get(path)?;
	match serde_json::from_str::<serde_json::Value>(&raw) {
		Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
		Err(_) => println!("{}", raw),
	}
	Ok(())
}

fn run(cmd: &Command, path: &DataPath, config: &Config) -> ClResult<bool> {
	let facade = open(config)?;
	match cmd {
		Command::Get => print_document(&facade, path)?,
		Command::List => {
			for name in facade.list(path)? {
				println!("{}", name);
			}
		}
		Command::Exists => {
			let found = facade.exists(path) || facade.exists_dir(path);
			println!("{}", found);
			return Ok(found);
		}
		Command::Acl => {
			let acl_path = acl_data_path(path)
				.ok_or_else(|| Error::InvalidPath(format!("{} has no ACL", path)))?;
			debug!("acl of {} is {}", path, acl_path);
			print_document(&facade, &acl_path)?;
		}
	}
	Ok(true)
}

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();

	let Some((cmd, path)) = parse_args(env::args().skip(1)) else {
		eprintln!("usage: orgspine-inspect <get|list|exists|acl> PATH");
		return ExitCode::from(2);
	};
	let config = Config::from_env();

	match run(&cmd, &path, &config) {
		Ok(true) => ExitCode::SUCCESS,
		Ok(false) => ExitCode::FAILURE,
		Err(Error::NotFound) => {
			eprintln!("{}: not found", path);
			ExitCode::FAILURE
		}
		Err(err) => {
			error!("{}: {}", path, err);
			ExitCode::FAILURE
		}
	}
}


// vim: ts=4
