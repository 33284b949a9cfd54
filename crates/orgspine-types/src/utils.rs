//! Utility functions

use serde_json::{Map, Value};

use crate::prelude::*;

/// Parse a stored document that must be a JSON object
pub fn parse_object(raw: &str) -> ClResult<Map<String, Value>> {
	match serde_json::from_str::<Value>(raw)? {
		Value::Object(obj) => Ok(obj),
		_ => Err(Error::Parse),
	}
}

/// Whether a document flag is set.
///
/// Stored documents are loose about flag types (`true`, `"true"`), so any
/// present value other than `null` and `false` counts as set.
pub fn is_flag_set(doc: &Map<String, Value>, key: &str) -> bool {
	!matches!(doc.get(key), None | Some(Value::Null | Value::Bool(false)))
}

/// Append `item` unless it is already present
pub fn push_unique(list: &mut Vec<Box<str>>, item: &str) {
	if !list.iter().any(|i| &**i == item) {
		list.push(item.into());
	}
}

/// Append every item of `items` that is not yet present, keeping first
/// appearance order
pub fn extend_unique<S: AsRef<str>>(list: &mut Vec<Box<str>>, items: &[S]) {
	for item in items {
		push_unique(list, item.as_ref());
	}
}


// vim: ts=4
