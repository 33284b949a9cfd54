pub use crate::error::{ClResult, Error};
pub use crate::path::DataPath;

pub use tracing::{debug, error, info, warn};

// vim: ts=4
