//! Frame composition and canvas drawing.
//!
//! Every frame the full appearance of every node and edge is recomputed by
//! [`compose`], which applies the reducers in a fixed order:
//! category filter -> search dim -> hover -> selection.
//! Drawing then uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edges, then arrowheads (world space)
//! 3. Plain nodes, then emphasized nodes and their rings on top
//! 4. Labels

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::appearance::{EdgeAppearance, NodeAppearance};
use super::filter::{self, FilterState};
use super::highlight::{self, HighlightState};
use super::model::{GraphModel, Node};
use super::scale::{ScaleConfig, ScaledValues};
use super::theme::{Color, Theme};
use super::viewport::Viewport;

/// Appearance of every node and edge, indexed like the model's slices.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
	pub nodes: Vec<NodeAppearance>,
	pub edges: Vec<EdgeAppearance>,
}

impl Frame {
	pub fn visible_node_count(&self) -> usize {
		self.nodes.iter().filter(|n| !n.hidden).count()
	}
}

/// Recompute all appearances from scratch.
///
/// Hiding a node by category does not hide its edges; only an active hover
/// hides edges.
pub fn compose(
	model: &GraphModel,
	filter: &FilterState,
	highlight: &HighlightState,
	theme: &Theme,
) -> Frame {
	let nodes = model
		.nodes()
		.iter()
		.enumerate()
		.map(|(idx, node)| {
			let look = NodeAppearance::base(model, idx, node);
			let look = filter::reduce_node(node, filter, look, theme);
			let look = highlight::reduce_node_hover(model, idx, highlight, look, theme);
			highlight::reduce_node_selection(idx, highlight, look, theme)
		})
		.collect();

	let edges = model
		.edges()
		.iter()
		.map(|edge| {
			let look = EdgeAppearance::base(edge, theme);
			let look = highlight::reduce_edge_hover(edge, highlight, look, theme);
			highlight::reduce_edge_selection(edge, highlight, look, theme)
		})
		.collect();

	Frame { nodes, edges }
}

/// Draws a composed frame to the canvas.
pub fn draw(
	frame: &Frame,
	model: &GraphModel,
	viewport: &Viewport,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, viewport.transform.k);

	draw_background(viewport, ctx, theme);

	ctx.save();
	let _ = ctx.translate(viewport.transform.x, viewport.transform.y);
	let _ = ctx.scale(viewport.transform.k, viewport.transform.k);

	draw_edges(frame, model, ctx, &scale);
	draw_nodes(frame, model, ctx, &scale, theme);
	draw_labels(frame, model, ctx, &scale, theme);

	ctx.restore();

	if theme.backdrop.vignette > 0.0 {
		draw_vignette(viewport, ctx, theme);
	}
}

fn draw_background(viewport: &Viewport, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (w, h) = (viewport.width, viewport.height);
	let backdrop = &theme.backdrop;
	let glow = backdrop.glow.and_then(|glow| {
		let (cx, cy) = (w / 2.0, h / 2.0);
		let gradient = ctx
			.create_radial_gradient(cx, cy, 0.0, cx, cy, w.max(h) * 0.8)
			.ok()?;
		let _ = gradient.add_color_stop(0.0, &glow.to_css());
		let _ = gradient.add_color_stop(1.0, &backdrop.base.to_css());
		Some(gradient)
	});

	match glow {
		Some(gradient) => {
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&backdrop.base.to_css()),
	}
	ctx.fill_rect(0.0, 0.0, w, h);
}

fn draw_vignette(viewport: &Viewport, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (w, h) = (viewport.width, viewport.height);
	let Ok(gradient) = ctx.create_radial_gradient(
		w / 2.0,
		h / 2.0,
		w.min(h) * 0.3,
		w / 2.0,
		h / 2.0,
		w.max(h) * 0.7,
	) else {
		return;
	};

	let _ = gradient.add_color_stop(0.0, &Color::BLACK.with_alpha(0.0).to_css());
	let _ = gradient.add_color_stop(
		1.0,
		&Color::BLACK.with_alpha(theme.backdrop.vignette).to_css(),
	);

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, w, h);
}

fn draw_edges(
	frame: &Frame,
	model: &GraphModel,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
) {
	// Highlighted edges last so they sit on top.
	for pass_highlighted in [false, true] {
		for (edge, look) in model.edges().iter().zip(&frame.edges) {
			if look.hidden || look.highlighted != pass_highlighted {
				continue;
			}
			let (Some(n1), Some(n2)) = (model.node(edge.source), model.node(edge.target)) else {
				continue;
			};
			let target_radius = scale.node_radius * frame.nodes[edge.target].size;
			draw_edge(ctx, scale, n1, n2, target_radius, look);
		}
	}
}

fn draw_edge(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	n1: &Node,
	n2: &Node,
	target_radius: f64,
	look: &EdgeAppearance,
) {
	let (dx, dy) = (n2.x - n1.x, n2.y - n1.y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let arrow = if scale.cull_arrows { 0.0 } else { scale.arrow_size };

	ctx.set_stroke_style_str(&look.color);
	ctx.set_line_width(scale.edge_line_width * look.size);
	ctx.begin_path();
	ctx.move_to(n1.x, n1.y);
	ctx.line_to(
		n2.x - ux * (target_radius + arrow),
		n2.y - uy * (target_radius + arrow),
	);
	ctx.stroke();

	if arrow > 0.0 {
		let (tip_x, tip_y) = (n2.x - ux * target_radius, n2.y - uy * target_radius);
		let (back_x, back_y) = (tip_x - ux * arrow, tip_y - uy * arrow);
		let (px, py) = (-uy * arrow * 0.5, ux * arrow * 0.5);

		ctx.set_fill_style_str(&look.color);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_nodes(
	frame: &Frame,
	model: &GraphModel,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	for pass_emphasized in [false, true] {
		for (node, look) in model.nodes().iter().zip(&frame.nodes) {
			if look.hidden || look.emphasized != pass_emphasized {
				continue;
			}
			let radius = scale.node_radius * look.size;
			draw_node(ctx, scale, theme, node, look, radius);

			if look.emphasized {
				ctx.begin_path();
				let _ = ctx.arc(node.x, node.y, radius + scale.ring_offset, 0.0, 2.0 * PI);
				ctx.set_stroke_style_str(&theme.node.ring_color.to_css());
				ctx.set_line_width(scale.ring_width);
				ctx.stroke();
			}
		}
	}
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	node: &Node,
	look: &NodeAppearance,
	radius: f64,
) {
	let (x, y) = (node.x, node.y);

	let shading = if theme.node.shaded && !look.dimmed {
		ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
			.ok()
	} else {
		None
	};

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	match shading {
		Some(gradient) => {
			let base = Color::from_css(&look.color).unwrap_or(Color::FALLBACK);
			let _ = gradient.add_color_stop(0.0, &base.mix(Color::WHITE, 0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &base.to_css());
			let _ = gradient.add_color_stop(1.0, &base.mix(Color::BLACK, 0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&look.color),
	}
	ctx.fill();

	if let Some(outline) = theme.node.outline {
		ctx.set_stroke_style_str(&outline.color.to_css());
		ctx.set_line_width(outline.width / scale.k);
		ctx.stroke();
	}
}

fn draw_labels(
	frame: &Frame,
	model: &GraphModel,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	ctx.set_font(&scale.label_font);
	ctx.set_fill_style_str(&theme.label_color.to_css());
	for (node, look) in model.nodes().iter().zip(&frame.nodes) {
		if look.hidden || !(scale.show_all_labels || look.emphasized) {
			continue;
		}
		let Some(label) = &look.label else {
			continue;
		};
		let radius = scale.node_radius * look.size;
		let _ = ctx.fill_text(label, node.x + radius + 4.0 / scale.k, node.y + 3.0 / scale.k);
	}
}
