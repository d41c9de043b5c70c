use core::iter::FromIterator;
use indexmap::IndexMap;

/// An insertion-ordered map with string keys.
///
/// Inserting an existing key replaces its value in place, so the key keeps its original position.
/// Iteration order is the order in which mutations derived from the map are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map<V>(IndexMap<String, V>);

impl<V> Default for Map<V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<V> Map<V> {
	#[must_use]
	pub fn new() -> Self {
		Self(IndexMap::new())
	}

	/// Returns the replaced value, if any.
	pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
		self.0.insert(key.into(), value)
	}

	/// Builder form of [`insert`](`Map::insert`).
	#[must_use]
	pub fn with(mut self, key: impl Into<String>, value: impl Into<V>) -> Self {
		self.insert(key, value.into());
		self
	}

	#[must_use]
	pub fn get(&self, key: &str) -> Option<&V> {
		self.0.get(key)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value))
	}
}

impl<V> IntoIterator for Map<V> {
	type Item = (String, V);
	type IntoIter = indexmap::map::IntoIter<String, V>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Map<V> {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(iter.into_iter().map(|(key, value)| (key.into(), value)).collect())
	}
}

impl<K: Into<String>, V> Extend<(K, V)> for Map<V> {
	fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
		self.0.extend(iter.into_iter().map(|(key, value)| (key.into(), value)));
	}
}
