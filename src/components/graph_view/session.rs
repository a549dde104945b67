//! The per-load session and the command router that mutates it.
//!
//! All mutable view state lives in one [`Session`]. UI callbacks never touch
//! that state directly; they translate input into a [`Command`] and hand it to
//! [`Session::dispatch`], which applies it completely before returning.

use log::{debug, error};

use super::categories::CategoryRegistry;
use super::details::{DetailsPanel, NodeDetails};
use super::filter::FilterState;
use super::highlight::HighlightState;
use super::layout::{ForceSolver, LayoutController, LayoutSolver, LayoutStatus};
use super::error::LoadError;
use super::loader::{LoadOutcome, LoadedGraph};
use super::model::{GraphModel, NodeIdx};
use super::render::{self, Frame};
use super::scale::{ScaleConfig, ScaledValues};
use super::theme::Theme;
use super::viewport::Viewport;
use crate::config::ViewerConfig;

/// A discrete UI input, already resolved to its meaning.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
	/// Select a node and open its details.
	NodeClicked(String),
	/// Clear the selection and close the details panel.
	BackgroundClicked,
	PointerEnteredNode(String),
	PointerLeftNode,
	SearchChanged(String),
	CategoryToggled { category: String, visible: bool },
	ToggleLayout,
	ResetView,
}

/// Raw pointer input on the canvas, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
	Down { x: f64, y: f64 },
	Move { x: f64, y: f64 },
	Up { x: f64, y: f64 },
	Leave,
	Wheel { x: f64, y: f64, delta_y: f64 },
}

/// What the status banner and count displays show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
	Loading,
	/// Initialization aborted; holds the user-facing message.
	Failed(String),
	/// Valid payload without nodes.
	Empty,
	Ready { nodes: usize, edges: usize },
}

impl LoadState {
	/// Banner text, or `None` once the graph is showing.
	pub fn banner(&self) -> Option<String> {
		match self {
			LoadState::Loading => Some("Loading graph...".to_string()),
			LoadState::Failed(message) => Some(message.clone()),
			LoadState::Empty => {
				Some("No graph data found. Index the project first, then reload.".to_string())
			}
			LoadState::Ready { .. } => None,
		}
	}

	/// Node and edge counts; unset unless a graph is loaded.
	pub fn counts(&self) -> Option<(usize, usize)> {
		match self {
			LoadState::Ready { nodes, edges } => Some((*nodes, *edges)),
			_ => None,
		}
	}
}

/// Everything the view needs for one loaded graph.
pub struct Session<S: LayoutSolver = ForceSolver> {
	model: GraphModel,
	registry: CategoryRegistry,
	filter: FilterState,
	highlight: HighlightState,
	layout: LayoutController<S>,
	viewport: Viewport,
	details: DetailsPanel,
	theme: Theme,
	scale: ScaleConfig,
	/// Node under the pointer when the current press began.
	pressed: Option<NodeIdx>,
}

impl Session<ForceSolver> {
	/// Turn a load result into the banner state and, for a non-empty graph,
	/// a session whose layout is already running.
	///
	/// Errors and empty graphs produce no session, so neither a renderer nor
	/// a layout is ever constructed for them.
	pub fn open(
		result: Result<LoadOutcome, LoadError>,
		config: &ViewerConfig,
		width: f64,
		height: f64,
		now_ms: f64,
	) -> (LoadState, Option<Self>) {
		match result {
			Err(e) => {
				error!("codegraph: {}", e);
				(LoadState::Failed(e.to_string()), None)
			}
			Ok(LoadOutcome::Empty) => (LoadState::Empty, None),
			Ok(LoadOutcome::Loaded(graph)) => {
				let mut session = Self::new(graph, config, width, height);
				session.start_layout(now_ms);
				let state = LoadState::Ready {
					nodes: session.model.node_count(),
					edges: session.model.edge_count(),
				};
				(state, Some(session))
			}
		}
	}

	/// Build a session around a freshly loaded graph.
	pub fn new(graph: LoadedGraph, config: &ViewerConfig, width: f64, height: f64) -> Self {
		let layout = LayoutController::for_model(&graph.model, &config.layout);
		Self::with_layout(graph, layout, Theme::by_name(&config.theme), width, height)
	}
}

impl<S: LayoutSolver> Session<S> {
	/// Build a session with a caller-supplied layout controller.
	pub fn with_layout(
		graph: LoadedGraph,
		layout: LayoutController<S>,
		theme: Theme,
		width: f64,
		height: f64,
	) -> Self {
		let LoadedGraph { model, registry } = graph;
		Self {
			filter: FilterState::all_visible(&registry),
			model,
			registry,
			highlight: HighlightState::default(),
			layout,
			viewport: Viewport::new(width, height),
			details: DetailsPanel::default(),
			theme,
			scale: ScaleConfig::default(),
			pressed: None,
		}
	}

	pub fn model(&self) -> &GraphModel {
		&self.model
	}

	pub fn registry(&self) -> &CategoryRegistry {
		&self.registry
	}

	pub fn filter(&self) -> &FilterState {
		&self.filter
	}

	pub fn highlight(&self) -> &HighlightState {
		&self.highlight
	}

	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	pub fn scale(&self) -> &ScaleConfig {
		&self.scale
	}

	pub fn layout_status(&self) -> LayoutStatus {
		self.layout.status()
	}

	/// Details of the node the panel is showing, read live from the model.
	pub fn details(&self) -> Option<NodeDetails> {
		self.details.details(&self.model)
	}

	/// Apply one command.
	pub fn dispatch(&mut self, command: Command, now_ms: f64) {
		debug!("codegraph: {:?}", command);
		match command {
			Command::NodeClicked(key) => {
				if let Some(idx) = self.model.index_of(&key) {
					self.highlight.set_selected(Some(idx));
					self.details.show(key);
				}
			}
			Command::BackgroundClicked => {
				self.highlight.set_selected(None);
				self.details.hide();
			}
			Command::PointerEnteredNode(key) => {
				if let Some(idx) = self.model.index_of(&key) {
					self.highlight.set_hover(Some(idx));
				}
			}
			Command::PointerLeftNode => {
				self.highlight.set_hover(None);
			}
			Command::SearchChanged(query) => self.filter.set_search(query),
			Command::CategoryToggled { category, visible } => {
				self.filter
					.set_category_visible(&self.registry, &category, visible);
				self.drop_hidden_highlights();
			}
			Command::ToggleLayout => self.layout.toggle(now_ms),
			Command::ResetView => self.viewport.reset(),
		}
	}

	/// Clear hover and selection on nodes whose category was just hidden.
	fn drop_hidden_highlights(&mut self) {
		let hidden = |idx: NodeIdx| {
			self.model
				.node(idx)
				.is_some_and(|n| !self.filter.is_category_visible(&n.category))
		};
		let hover_hidden = self.highlight.hovered().is_some_and(hidden);
		let selection_hidden = self.highlight.selected().is_some_and(hidden);
		if hover_hidden {
			self.highlight.set_hover(None);
		}
		if selection_hidden {
			self.highlight.set_selected(None);
			self.details.hide();
		}
	}

	/// Translate raw pointer input into commands, hit-testing against the
	/// currently visible nodes.
	pub fn handle_pointer(&mut self, input: PointerInput, now_ms: f64) {
		match input {
			PointerInput::Down { x, y } => {
				self.pressed = self.node_at(x, y);
				if self.pressed.is_none() {
					self.viewport.begin_pan(x, y);
				}
			}
			PointerInput::Move { x, y } => {
				if self.viewport.is_panning() {
					self.viewport.pan_to(x, y);
					return;
				}
				match (self.node_at(x, y), self.highlight.hovered()) {
					(Some(idx), current) if current != Some(idx) => {
						let key = self.model.nodes()[idx].key.clone();
						self.dispatch(Command::PointerEnteredNode(key), now_ms);
					}
					(None, Some(_)) => self.dispatch(Command::PointerLeftNode, now_ms),
					_ => {}
				}
			}
			PointerInput::Up { x, y } => {
				if let Some(idx) = self.pressed.take() {
					if self.node_at(x, y) == Some(idx) {
						let key = self.model.nodes()[idx].key.clone();
						self.dispatch(Command::NodeClicked(key), now_ms);
					}
				} else if self.viewport.end_pan() {
					self.dispatch(Command::BackgroundClicked, now_ms);
				}
			}
			PointerInput::Leave => {
				self.pressed = None;
				self.viewport.end_pan();
				if self.highlight.hovered().is_some() {
					self.dispatch(Command::PointerLeftNode, now_ms);
				}
			}
			PointerInput::Wheel { x, y, delta_y } => self.viewport.zoom_at(x, y, delta_y),
		}
	}

	pub fn start_layout(&mut self, now_ms: f64) {
		self.layout.start(now_ms);
	}

	pub fn stop_layout(&mut self) {
		self.layout.stop();
	}

	/// Advance layout timers and, if running, the solver.
	pub fn tick(&mut self, now_ms: f64, dt: f32) {
		self.layout.tick(&mut self.model, now_ms, dt);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.viewport.resize(width, height);
	}

	/// Full appearance of every node and edge for the current state.
	pub fn frame(&self) -> Frame {
		render::compose(&self.model, &self.filter, &self.highlight, &self.theme)
	}

	/// Topmost node (last drawn) whose hit circle contains the screen point.
	/// Nodes hidden by category are ignored.
	pub fn node_at(&self, sx: f64, sy: f64) -> Option<NodeIdx> {
		let (gx, gy) = self.viewport.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(&self.scale, self.viewport.transform.k);
		self.model
			.nodes()
			.iter()
			.enumerate()
			.rev()
			.find(|(idx, node)| {
				if !self.filter.is_category_visible(&node.category) {
					return false;
				}
				let (dx, dy) = (node.x - gx, node.y - gy);
				(dx * dx + dy * dy).sqrt() < scale.hit_radius * self.model.size_of(*idx)
			})
			.map(|(idx, _)| idx)
	}
}
