//! Per-frame visual attributes of nodes and edges.
//!
//! Reducers in [`filter`](super::filter) and [`highlight`](super::highlight)
//! take an appearance and return an adjusted one. The renderer starts from
//! [`NodeAppearance::base`] / [`EdgeAppearance::base`] and applies them in a
//! fixed order.

use super::model::{Edge, GraphModel, Node, NodeIdx};
use super::theme::Theme;

/// How a single node should be drawn this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeAppearance {
	/// Excluded from drawing and hit testing.
	pub hidden: bool,
	/// CSS fill color.
	pub color: String,
	/// Label to draw; `None` blanks it.
	pub label: Option<String>,
	/// Size multiplier.
	pub size: f64,
	/// Drawn muted.
	pub dimmed: bool,
	/// Drawn on top with a ring.
	pub emphasized: bool,
}

impl NodeAppearance {
	/// Default look of a node: its category color and label.
	pub fn base(model: &GraphModel, idx: NodeIdx, node: &Node) -> Self {
		Self {
			hidden: false,
			color: node.color.clone(),
			label: Some(node.label.clone()),
			size: model.size_of(idx),
			dimmed: false,
			emphasized: false,
		}
	}

	/// Muted color, blank label.
	pub(super) fn dim(mut self, theme: &Theme) -> Self {
		self.color = theme.node.muted_color.to_css();
		self.label = None;
		self.dimmed = true;
		self
	}
}

/// How a single edge should be drawn this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeAppearance {
	pub hidden: bool,
	/// CSS stroke color.
	pub color: String,
	/// Line width multiplier.
	pub size: f64,
	/// Recolored by hover or selection.
	pub highlighted: bool,
}

impl EdgeAppearance {
	/// Default look of an edge: payload color/size or the theme's.
	pub fn base(edge: &Edge, theme: &Theme) -> Self {
		Self {
			hidden: false,
			color: edge
				.color
				.clone()
				.unwrap_or_else(|| theme.edge.color.to_css()),
			size: edge.size.unwrap_or(1.0),
			highlighted: false,
		}
	}
}
