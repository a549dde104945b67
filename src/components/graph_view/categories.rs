//! Category to color registry built during load.

use std::collections::HashMap;

/// Categories in first-seen order with their declared color.
///
/// Only the loader mutates the registry. Once handed to the session it is
/// read-only, so no category can appear without a new load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryRegistry {
	entries: Vec<(String, String)>,
	lookup: HashMap<String, usize>,
}

impl CategoryRegistry {
	/// Register `category` unless it was seen before. The first color wins.
	pub(super) fn register(&mut self, category: &str, color: &str) -> bool {
		if self.lookup.contains_key(category) {
			return false;
		}
		self.lookup.insert(category.to_string(), self.entries.len());
		self.entries.push((category.to_string(), color.to_string()));
		true
	}

	pub fn color_of(&self, category: &str) -> Option<&str> {
		self.lookup
			.get(category)
			.map(|&i| self.entries[i].1.as_str())
	}

	pub fn contains(&self, category: &str) -> bool {
		self.lookup.contains_key(category)
	}

	/// Categories in the order they were first encountered.
	pub fn in_load_order(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries.iter().map(|(c, col)| (c.as_str(), col.as_str()))
	}

	/// Categories sorted alphabetically, for the filter list.
	pub fn sorted_for_display(&self) -> Vec<(String, String)> {
		let mut sorted = self.entries.clone();
		sorted.sort_by(|a, b| a.0.cmp(&b.0));
		sorted
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
