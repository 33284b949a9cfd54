//! Error type shared by the engine and the store adapters.
//!
//! "Not found" is an error only at the store boundary. The default engine
//! itself reports missing values as `None`.

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	Conflict(String),
	InvalidPath(String),
	Parse,
	DbError(String),
	ConfigError(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(_err: serde_json::Error) -> Self {
		Self::Parse
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::Conflict(path) => write!(f, "already exists: {}", path),
			Error::InvalidPath(msg) => write!(f, "invalid path: {}", msg),
			Error::Parse => write!(f, "parse error"),
			Error::DbError(msg) => write!(f, "database error: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

impl Error {
	pub fn is_not_found(&self) -> bool {
		matches!(self, Error::NotFound)
	}
}


// vim: ts=4
