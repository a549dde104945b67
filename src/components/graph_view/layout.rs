//! Force-directed layout lifecycle.
//!
//! [`LayoutController`] owns the running/stopped state and the large-graph
//! auto-stop timers; the actual position updates are delegated to a
//! [`LayoutSolver`]. The controller is driven cooperatively: the animation
//! loop calls [`LayoutController::tick`] once per frame with the current time,
//! so a step never blocks input handling.

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::{debug, info};

use super::model::{GraphModel, NodeIdx};
use crate::config::LayoutConfig;

/// An iterative layout algorithm that nudges node positions each step.
pub trait LayoutSolver {
	/// Advance the layout by `dt` seconds and write positions into `model`.
	fn step(&mut self, model: &mut GraphModel, dt: f32);
}

/// Pairwise repulsion and edge springs from `force_graph`, plus a pull
/// towards the origin.
pub struct ForceSolver {
	graph: ForceGraph<NodeIdx, ()>,
	gravity: f32,
}

impl ForceSolver {
	/// Seed the simulation with the model's current positions and edges.
	pub fn new(model: &GraphModel, config: &LayoutConfig) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: config.force_charge,
			force_spring: config.force_spring,
			force_max: config.force_max,
			node_speed: config.node_speed,
			damping_factor: config.damping_factor,
		});

		let sim_indices: Vec<_> = model
			.nodes()
			.iter()
			.enumerate()
			.map(|(idx, node)| {
				graph.add_node(NodeData {
					x: node.x as f32,
					y: node.y as f32,
					mass: 10.0,
					is_anchor: false,
					user_data: idx,
				})
			})
			.collect();

		for edge in model.edges() {
			graph.add_edge(
				sim_indices[edge.source],
				sim_indices[edge.target],
				EdgeData::default(),
			);
		}

		Self {
			graph,
			gravity: config.gravity,
		}
	}
}

impl LayoutSolver for ForceSolver {
	fn step(&mut self, model: &mut GraphModel, dt: f32) {
		self.graph.update(dt);

		let gravity = self.gravity.clamp(0.0, 1.0);
		if gravity > 0.0 {
			self.graph.visit_nodes_mut(|node| {
				node.data.x -= node.data.x * gravity;
				node.data.y -= node.data.y * gravity;
			});
		}

		self.graph.visit_nodes(|node| {
			model.set_position(node.data.user_data, node.x() as f64, node.y() as f64);
		});
	}
}

/// Whether the layout is currently iterating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutStatus {
	#[default]
	Stopped,
	Running,
}

impl LayoutStatus {
	pub fn is_running(self) -> bool {
		self == LayoutStatus::Running
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum AutoStopStage {
	/// First delay elapsed: if still running, schedule the forced stop.
	SettleCheck,
	/// Second delay elapsed: stop if still running.
	ForceStop,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingStop {
	due_ms: f64,
	stage: AutoStopStage,
}

/// Runs or pauses a [`LayoutSolver`] and enforces the auto-stop policy.
pub struct LayoutController<S: LayoutSolver = ForceSolver> {
	solver: S,
	status: LayoutStatus,
	node_count: usize,
	auto_stop_threshold: usize,
	settle_check_ms: f64,
	force_stop_ms: f64,
	pending: Option<PendingStop>,
}

impl LayoutController<ForceSolver> {
	/// Controller over a [`ForceSolver`] seeded from `model`.
	pub fn for_model(model: &GraphModel, config: &LayoutConfig) -> Self {
		Self::new(ForceSolver::new(model, config), model.node_count(), config)
	}
}

impl<S: LayoutSolver> LayoutController<S> {
	pub fn new(solver: S, node_count: usize, config: &LayoutConfig) -> Self {
		Self {
			solver,
			status: LayoutStatus::Stopped,
			node_count,
			auto_stop_threshold: config.auto_stop_threshold,
			settle_check_ms: config.settle_check_ms,
			force_stop_ms: config.force_stop_ms,
			pending: None,
		}
	}

	pub fn status(&self) -> LayoutStatus {
		self.status
	}

	pub fn is_running(&self) -> bool {
		self.status.is_running()
	}

	/// Begin iterating. No effect if already running.
	pub fn start(&mut self, now_ms: f64) {
		if self.is_running() {
			return;
		}
		self.status = LayoutStatus::Running;
		if self.node_count > self.auto_stop_threshold {
			self.pending = Some(PendingStop {
				due_ms: now_ms + self.settle_check_ms,
				stage: AutoStopStage::SettleCheck,
			});
			debug!(
				"codegraph: {} nodes, auto-stop check scheduled",
				self.node_count
			);
		}
		info!("codegraph: layout started");
	}

	/// Freeze positions where they are. Idempotent, and cancels any pending
	/// auto-stop.
	pub fn stop(&mut self) {
		self.pending = None;
		if self.status == LayoutStatus::Stopped {
			return;
		}
		self.status = LayoutStatus::Stopped;
		info!("codegraph: layout stopped");
	}

	pub fn toggle(&mut self, now_ms: f64) {
		if self.is_running() {
			self.stop();
		} else {
			self.start(now_ms);
		}
	}

	/// Fire due auto-stop timers, then take one solver step if running.
	pub fn tick(&mut self, model: &mut GraphModel, now_ms: f64, dt: f32) {
		self.fire_timers(now_ms);
		if self.is_running() {
			self.solver.step(model, dt);
		}
	}

	fn fire_timers(&mut self, now_ms: f64) {
		while let Some(pending) = self.pending {
			if now_ms < pending.due_ms {
				return;
			}
			self.pending = None;
			if !self.is_running() {
				return;
			}
			match pending.stage {
				AutoStopStage::SettleCheck => {
					self.pending = Some(PendingStop {
						due_ms: pending.due_ms + self.force_stop_ms,
						stage: AutoStopStage::ForceStop,
					});
				}
				AutoStopStage::ForceStop => {
					info!("codegraph: auto-stopping layout for large graph");
					self.stop();
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_view::types::{EdgeAttributes, NodeAttributes};

	#[derive(Default)]
	struct CountingSolver {
		steps: usize,
	}

	impl LayoutSolver for CountingSolver {
		fn step(&mut self, _model: &mut GraphModel, _dt: f32) {
			self.steps += 1;
		}
	}

	fn model_with(n: usize) -> GraphModel {
		let mut model = GraphModel::new();
		for i in 0..n {
			let idx = model
				.add_node(
					format!("n{i}"),
					NodeAttributes {
						category: "function".into(),
						color: "#0969da".into(),
						label: format!("n{i}"),
						file: None,
						start_line: None,
						end_line: None,
						size: None,
					},
				)
				.unwrap();
			model.set_position(idx, (i as f64) * 3.0 - 10.0, (i as f64) * -2.0 + 5.0);
		}
		model
	}

	fn controller(n: usize) -> (GraphModel, LayoutController<CountingSolver>, LayoutConfig) {
		let config = LayoutConfig::default();
		let model = model_with(n);
		let layout = LayoutController::new(CountingSolver::default(), n, &config);
		(model, layout, config)
	}

	#[test]
	fn starts_stopped_and_stop_is_idempotent() {
		let (mut model, mut layout, _) = controller(3);
		assert_eq!(layout.status(), LayoutStatus::Stopped);
		layout.stop();
		layout.stop();
		assert_eq!(layout.status(), LayoutStatus::Stopped);

		layout.tick(&mut model, 0.0, 0.016);
		assert_eq!(layout.solver.steps, 0);
	}

	#[test]
	fn steps_only_while_running() {
		let (mut model, mut layout, _) = controller(3);
		layout.start(0.0);
		layout.tick(&mut model, 16.0, 0.016);
		layout.tick(&mut model, 32.0, 0.016);
		layout.stop();
		layout.tick(&mut model, 48.0, 0.016);
		assert_eq!(layout.solver.steps, 2);
	}

	#[test]
	fn large_graph_stops_after_both_delays() {
		let (mut model, mut layout, config) = controller(150);
		layout.start(0.0);

		layout.tick(&mut model, config.settle_check_ms, 0.016);
		assert!(layout.is_running());

		let forced_at = config.settle_check_ms + config.force_stop_ms;
		layout.tick(&mut model, forced_at - 1.0, 0.016);
		assert!(layout.is_running());

		layout.tick(&mut model, forced_at, 0.016);
		assert_eq!(layout.status(), LayoutStatus::Stopped);
	}

	#[test]
	fn late_tick_fires_both_stages() {
		let (mut model, mut layout, config) = controller(150);
		layout.start(0.0);
		layout.tick(&mut model, config.settle_check_ms + config.force_stop_ms + 100.0, 0.016);
		assert!(!layout.is_running());
		assert_eq!(layout.solver.steps, 0);
	}

	#[test]
	fn manual_stop_cancels_forced_stop() {
		let (mut model, mut layout, config) = controller(150);
		layout.start(0.0);
		layout.stop();

		let restart_at = config.settle_check_ms - 1000.0;
		layout.start(restart_at);
		layout.tick(&mut model, config.settle_check_ms + config.force_stop_ms, 0.016);
		assert!(layout.is_running());

		layout.tick(
			&mut model,
			restart_at + config.settle_check_ms + config.force_stop_ms,
			0.016,
		);
		assert!(!layout.is_running());
	}

	#[test]
	fn small_graph_never_auto_stops() {
		let (mut model, mut layout, _) = controller(100);
		layout.start(0.0);
		layout.tick(&mut model, 1.0e9, 0.016);
		assert!(layout.is_running());
	}

	#[test]
	fn toggle_flips_state() {
		let (_, mut layout, _) = controller(3);
		layout.toggle(0.0);
		assert!(layout.is_running());
		layout.toggle(10.0);
		assert!(!layout.is_running());
	}

	#[test]
	fn force_solver_moves_nodes_and_freezes_on_stop() {
		let config = LayoutConfig::default();
		let mut model = model_with(4);
		model.add_edge("n0", "n1", EdgeAttributes::default());
		model.add_edge("n2", "n3", EdgeAttributes::default());
		let before: Vec<_> = model.nodes().iter().map(|n| (n.x, n.y)).collect();

		let mut layout = LayoutController::for_model(&model, &config);
		layout.start(0.0);
		for frame in 0..10 {
			layout.tick(&mut model, frame as f64 * 16.0, 0.016);
		}
		let after: Vec<_> = model.nodes().iter().map(|n| (n.x, n.y)).collect();
		assert_ne!(before, after);

		layout.stop();
		layout.tick(&mut model, 200.0, 0.016);
		let frozen: Vec<_> = model.nodes().iter().map(|n| (n.x, n.y)).collect();
		assert_eq!(after, frozen);
	}
}
