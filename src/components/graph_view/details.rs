//! Read-only details view of a single node.

use super::model::GraphModel;

/// Shown when a node has no file or an incomplete line range.
pub const PLACEHOLDER: &str = "-";

/// Snapshot of one node's attributes and live degree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeDetails {
	pub key: String,
	pub label: String,
	pub category: String,
	pub file: String,
	pub lines: String,
	pub outgoing: usize,
	pub incoming: usize,
}

impl NodeDetails {
	/// Read `key` from the model. `None` if the node does not exist.
	pub fn read(model: &GraphModel, key: &str) -> Option<Self> {
		let node = model.node_by_key(key)?;
		let lines = match (node.start_line, node.end_line) {
			(Some(start), Some(end)) => format!("{start}-{end}"),
			_ => PLACEHOLDER.to_string(),
		};
		Some(Self {
			key: node.key.clone(),
			label: node.label.clone(),
			category: node.category.clone(),
			file: node.file.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
			lines,
			outgoing: model.out_degree(key),
			incoming: model.in_degree(key),
		})
	}
}

/// Which node, if any, the details panel is showing.
///
/// Only the key is kept; [`DetailsPanel::details`] reads the model on every
/// call so the counts always reflect the current topology.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetailsPanel {
	key: Option<String>,
}

impl DetailsPanel {
	pub fn show(&mut self, key: impl Into<String>) {
		self.key = Some(key.into());
	}

	pub fn hide(&mut self) {
		self.key = None;
	}

	pub fn is_open(&self) -> bool {
		self.key.is_some()
	}

	pub fn details(&self, model: &GraphModel) -> Option<NodeDetails> {
		self.key.as_deref().and_then(|key| NodeDetails::read(model, key))
	}
}
