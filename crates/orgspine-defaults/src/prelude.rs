pub use orgspine_types::data_store::DataStore;
pub use orgspine_types::error::{ClResult, Error};
pub use orgspine_types::path::DataPath;

pub use tracing::{debug, info, warn};

// vim: ts=4
