//! Zoom-dependent sizes for graph visuals.
//!
//! Drawing happens after the canvas transform, so every value in
//! [`ScaledValues`] is in graph units. A [`Sizing`] says how one property
//! relates to what ends up on screen at zoom level `k`.

/// How a size reacts to zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sizing {
	/// Constant on-screen size in pixels.
	Pixels(f64),
	/// Graph units, kept within `min_px..=max_px` on screen.
	Bounded { units: f64, min_px: f64, max_px: f64 },
}

impl Sizing {
	/// Graph-unit value at zoom `k`.
	pub fn at(self, k: f64) -> f64 {
		match self {
			Sizing::Pixels(px) => px / k,
			Sizing::Bounded {
				units,
				min_px,
				max_px,
			} => units.clamp(min_px / k, max_px / k),
		}
	}
}

/// Sizes and level-of-detail thresholds for nodes, edges and labels.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Radius of a node with size multiplier 1.0.
	pub node_radius: Sizing,
	pub hit_radius: Sizing,
	/// Label font size in pixels at `k >= label_min_k`.
	pub label_px: f64,
	pub label_min_k: f64,
	/// Below this zoom only emphasized nodes are labelled.
	pub label_cull_k: f64,
	pub edge_width: Sizing,
	pub arrow: Sizing,
	/// Below this zoom arrowheads are skipped.
	pub arrow_cull_k: f64,
	pub ring_width: Sizing,
	/// Gap between a node and its emphasis ring.
	pub ring_gap: Sizing,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: Sizing::Bounded {
				units: 5.0,
				min_px: 3.0,
				max_px: f64::INFINITY,
			},
			hit_radius: Sizing::Bounded {
				units: 8.0,
				min_px: 5.0,
				max_px: f64::INFINITY,
			},
			label_px: 11.0,
			label_min_k: 0.5,
			label_cull_k: 0.35,
			edge_width: Sizing::Pixels(1.0),
			arrow: Sizing::Bounded {
				units: 5.0,
				min_px: 0.0,
				max_px: 14.0,
			},
			arrow_cull_k: 0.3,
			ring_width: Sizing::Pixels(1.5),
			ring_gap: Sizing::Pixels(2.0),
		}
	}
}

/// [`ScaleConfig`] resolved for one zoom level. Computed once per frame.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub node_radius: f64,
	pub hit_radius: f64,
	/// CSS font shorthand, e.g. `"11px sans-serif"`.
	pub label_font: String,
	pub show_all_labels: bool,
	pub edge_line_width: f64,
	pub arrow_size: f64,
	pub cull_arrows: bool,
	pub ring_width: f64,
	pub ring_offset: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_px = config.label_px / k.max(config.label_min_k);
		Self {
			k,
			node_radius: config.node_radius.at(k),
			hit_radius: config.hit_radius.at(k),
			label_font: format!("{label_px}px sans-serif"),
			show_all_labels: k >= config.label_cull_k,
			edge_line_width: config.edge_width.at(k),
			arrow_size: config.arrow.at(k),
			cull_arrows: k < config.arrow_cull_k,
			ring_width: config.ring_width.at(k),
			ring_offset: config.ring_gap.at(k),
		}
	}
}
