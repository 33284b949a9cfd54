//! Segment-addressed paths into the object tree.
//!
//! A path is an ordered list of segments such as
//! `["organizations", "acme", "clients", "web1"]`. Equality is structural and
//! ordering is lexicographic by segment, so every descendant of a path sorts
//! directly after it.

use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DataPath(Vec<Box<str>>);

impl DataPath {
	/// The empty path
	pub fn root() -> Self {
		Self(Vec::new())
	}

	pub fn new<I, S>(segments: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Box<str>>,
	{
		Self(segments.into_iter().map(Into::into).collect())
	}

	/// Parse a `/`-separated path. Empty segments are dropped, so `/`, `` and
	/// `//` all denote the root.
	pub fn parse(path: &str) -> Self {
		Self(path.split('/').filter(|s| !s.is_empty()).map(Into::into).collect())
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_root(&self) -> bool {
		self.0.is_empty()
	}

	pub fn segments(&self) -> &[Box<str>] {
		&self.0
	}

	/// Segment at `index`, `None` when out of range
	pub fn seg(&self, index: usize) -> Option<&str> {
		self.0.get(index).map(|seg| &**seg)
	}

	pub fn last(&self) -> Option<&str> {
		self.0.last().map(|seg| &**seg)
	}

	/// The first `len` segments (the whole path if it is shorter)
	pub fn prefix(&self, len: usize) -> DataPath {
		Self(self.0.iter().take(len).cloned().collect())
	}

	/// Segments from `start` on, empty if `start` is past the end
	pub fn suffix(&self, start: usize) -> &[Box<str>] {
		self.0.get(start..).unwrap_or_default()
	}

	pub fn parent(&self) -> Option<DataPath> {
		if self.0.is_empty() { None } else { Some(self.prefix(self.0.len() - 1)) }
	}

	pub fn child(&self, name: impl Into<Box<str>>) -> DataPath {
		let mut segments = self.0.clone();
		segments.push(name.into());
		Self(segments)
	}

	pub fn join<S: AsRef<str>>(&self, names: &[S]) -> DataPath {
		let mut segments = self.0.clone();
		segments.extend(names.iter().map(|name| Box::from(name.as_ref())));
		Self(segments)
	}

	pub fn starts_with(&self, other: &DataPath) -> bool {
		self.0.starts_with(&other.0)
	}

	/// Every prefix of this path from the root down to the path itself
	pub fn prefixes(&self) -> impl Iterator<Item = DataPath> + '_ {
		(0..=self.0.len()).map(|len| self.prefix(len))
	}

	/// The suffix below `start` joined with `/`, e.g. `containers/nodes`
	pub fn key_from(&self, start: usize) -> String {
		self.suffix(start).join("/")
	}
}

impl fmt::Display for DataPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "/{}", self.0.join("/"))
	}
}

impl<const N: usize> From<[&str; N]> for DataPath {
	fn from(segments: [&str; N]) -> Self {
		Self::new(segments)
	}
}

impl From<&[&str]> for DataPath {
	fn from(segments: &[&str]) -> Self {
		Self::new(segments.iter().copied())
	}
}

impl From<Vec<Box<str>>> for DataPath {
	fn from(segments: Vec<Box<str>>) -> Self {
		Self(segments)
	}
}


// vim: ts=4
