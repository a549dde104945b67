//! Category visibility and label search.

use std::collections::HashSet;

use super::appearance::NodeAppearance;
use super::categories::CategoryRegistry;
use super::model::Node;
use super::theme::Theme;

/// Which categories are shown and what the search box contains.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
	visible: HashSet<String>,
	search: String,
	search_lower: String,
}

impl FilterState {
	/// Every registered category visible, empty search.
	pub fn all_visible(registry: &CategoryRegistry) -> Self {
		Self {
			visible: registry
				.in_load_order()
				.map(|(category, _)| category.to_string())
				.collect(),
			..Self::default()
		}
	}

	/// Show or hide a category. Unknown categories are ignored.
	pub fn set_category_visible(
		&mut self,
		registry: &CategoryRegistry,
		category: &str,
		visible: bool,
	) {
		if !registry.contains(category) {
			return;
		}
		if visible {
			self.visible.insert(category.to_string());
		} else {
			self.visible.remove(category);
		}
	}

	pub fn is_category_visible(&self, category: &str) -> bool {
		self.visible.contains(category)
	}

	pub fn visible_count(&self) -> usize {
		self.visible.len()
	}

	pub fn set_search(&mut self, query: impl Into<String>) {
		self.search = query.into();
		self.search_lower = self.search.to_lowercase();
	}

	pub fn search(&self) -> &str {
		&self.search
	}

	/// Case-insensitive substring match. An empty query matches everything.
	pub fn matches_search(&self, label: &str) -> bool {
		self.search_lower.is_empty() || label.to_lowercase().contains(&self.search_lower)
	}
}

/// Hide nodes of invisible categories; dim visible nodes missing the search.
///
/// Category hiding short-circuits: a hidden node is never search-dimmed.
pub fn reduce_node(
	node: &Node,
	filter: &FilterState,
	appearance: NodeAppearance,
	theme: &Theme,
) -> NodeAppearance {
	if !filter.is_category_visible(&node.category) {
		return NodeAppearance {
			hidden: true,
			..appearance
		};
	}
	if !filter.matches_search(&node.label) {
		return appearance.dim(theme);
	}
	appearance
}
