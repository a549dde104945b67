//! Hover and selection highlighting.
//!
//! Hover and selection are independent and may both be set. Hover affects
//! every node and edge (non-neighbors are dimmed, unrelated edges hidden);
//! selection only touches the selected node and its incident edges.

use super::appearance::{EdgeAppearance, NodeAppearance};
use super::model::{Edge, GraphModel, NodeIdx};
use super::theme::Theme;

/// Currently hovered and selected nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighlightState {
	hovered: Option<NodeIdx>,
	selected: Option<NodeIdx>,
}

impl HighlightState {
	/// Returns `true` if the hovered node changed.
	pub fn set_hover(&mut self, node: Option<NodeIdx>) -> bool {
		if self.hovered == node {
			return false;
		}
		self.hovered = node;
		true
	}

	pub fn set_selected(&mut self, node: Option<NodeIdx>) {
		self.selected = node;
	}

	pub fn hovered(&self) -> Option<NodeIdx> {
		self.hovered
	}

	pub fn selected(&self) -> Option<NodeIdx> {
		self.selected
	}
}

/// Emphasize the hovered node and its neighbors in either direction; dim the
/// rest and blank their labels.
pub fn reduce_node_hover(
	model: &GraphModel,
	idx: NodeIdx,
	state: &HighlightState,
	appearance: NodeAppearance,
	theme: &Theme,
) -> NodeAppearance {
	let Some(hovered) = state.hovered else {
		return appearance;
	};
	if appearance.hidden {
		return appearance;
	}
	if idx == hovered || model.are_adjacent(idx, hovered) {
		NodeAppearance {
			emphasized: true,
			..appearance
		}
	} else {
		appearance.dim(theme)
	}
}

/// Recolor and thicken edges touching the hovered node; hide all others.
pub fn reduce_edge_hover(
	edge: &Edge,
	state: &HighlightState,
	appearance: EdgeAppearance,
	theme: &Theme,
) -> EdgeAppearance {
	let Some(hovered) = state.hovered else {
		return appearance;
	};
	if edge.source == hovered || edge.target == hovered {
		highlight_edge(appearance, theme.edge.hover_color.to_css(), theme)
	} else {
		EdgeAppearance {
			hidden: true,
			..appearance
		}
	}
}

/// Force the selection color onto the selected node.
pub fn reduce_node_selection(
	idx: NodeIdx,
	state: &HighlightState,
	appearance: NodeAppearance,
	theme: &Theme,
) -> NodeAppearance {
	if state.selected != Some(idx) || appearance.hidden {
		return appearance;
	}
	NodeAppearance {
		color: theme.node.selected_color.to_css(),
		emphasized: true,
		..appearance
	}
}

/// Recolor and thicken edges touching the selected node. Visibility and all
/// other edges are left exactly as the previous steps produced them.
pub fn reduce_edge_selection(
	edge: &Edge,
	state: &HighlightState,
	appearance: EdgeAppearance,
	theme: &Theme,
) -> EdgeAppearance {
	match state.selected {
		Some(selected) if edge.source == selected || edge.target == selected => {
			highlight_edge(appearance, theme.edge.selected_color.to_css(), theme)
		}
		_ => appearance,
	}
}

fn highlight_edge(appearance: EdgeAppearance, color: String, theme: &Theme) -> EdgeAppearance {
	EdgeAppearance {
		hidden: appearance.hidden,
		color,
		size: appearance.size.max(1.0) * theme.edge.highlight_width,
		highlighted: true,
	}
}
