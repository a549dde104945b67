//! In-memory graph of code entities and their directed relationships.
//!
//! Nodes are strict: a duplicate key is rejected. Edges are best-effort: an
//! edge with a missing endpoint, or one that repeats an existing ordered pair,
//! is silently ignored.

use std::collections::{HashMap, HashSet};

use super::error::ModelError;
use super::types::{EdgeAttributes, NodeAttributes};

/// Index of a node inside a [`GraphModel`]. Stable for the model's lifetime.
pub type NodeIdx = usize;

/// Payload size (in pixels) that maps to a size multiplier of 1.0.
const BASE_NODE_SIZE: f64 = 8.0;

/// A node with its display metadata and current layout position.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub key: String,
	pub category: String,
	pub color: String,
	pub label: String,
	pub file: Option<String>,
	pub start_line: Option<u32>,
	pub end_line: Option<u32>,
	size_hint: Option<f64>,
	pub x: f64,
	pub y: f64,
}

/// A directed edge between two nodes of the same model.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub source: NodeIdx,
	pub target: NodeIdx,
	pub kind: Option<String>,
	pub color: Option<String>,
	pub size: Option<f64>,
}

/// Node/edge storage with O(1) degree and adjacency queries.
#[derive(Clone, Debug, Default)]
pub struct GraphModel {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	key_to_idx: HashMap<String, NodeIdx>,
	edge_pairs: HashSet<(NodeIdx, NodeIdx)>,
	out_degree: Vec<usize>,
	in_degree: Vec<usize>,
	max_degree: usize,
}

impl GraphModel {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a node at the origin. Fails if `key` is already present.
	pub fn add_node(
		&mut self,
		key: impl Into<String>,
		attributes: NodeAttributes,
	) -> Result<NodeIdx, ModelError> {
		let key = key.into();
		if self.key_to_idx.contains_key(&key) {
			return Err(ModelError::DuplicateNode(key));
		}

		let idx = self.nodes.len();
		self.nodes.push(Node {
			key: key.clone(),
			category: attributes.category,
			color: attributes.color,
			label: attributes.label,
			file: attributes.file,
			start_line: attributes.start_line,
			end_line: attributes.end_line,
			size_hint: attributes.size,
			x: 0.0,
			y: 0.0,
		});
		self.out_degree.push(0);
		self.in_degree.push(0);
		self.key_to_idx.insert(key, idx);
		Ok(idx)
	}

	/// Insert a directed edge. Returns `false` (and changes nothing) when
	/// either endpoint is unknown or the ordered pair already exists.
	pub fn add_edge(&mut self, source: &str, target: &str, attributes: EdgeAttributes) -> bool {
		let (Some(&src), Some(&tgt)) = (self.key_to_idx.get(source), self.key_to_idx.get(target))
		else {
			return false;
		};
		if !self.edge_pairs.insert((src, tgt)) {
			return false;
		}

		self.edges.push(Edge {
			source: src,
			target: tgt,
			kind: attributes.kind,
			color: attributes.color,
			size: attributes.size,
		});
		self.out_degree[src] += 1;
		self.in_degree[tgt] += 1;
		self.max_degree = self
			.max_degree
			.max(self.out_degree[src] + self.in_degree[src])
			.max(self.out_degree[tgt] + self.in_degree[tgt]);
		true
	}

	pub fn index_of(&self, key: &str) -> Option<NodeIdx> {
		self.key_to_idx.get(key).copied()
	}

	pub fn node(&self, idx: NodeIdx) -> Option<&Node> {
		self.nodes.get(idx)
	}

	pub fn node_by_key(&self, key: &str) -> Option<&Node> {
		self.index_of(key).and_then(|idx| self.nodes.get(idx))
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Number of edges leaving `key`. Zero for unknown keys.
	pub fn out_degree(&self, key: &str) -> usize {
		self.index_of(key).map_or(0, |idx| self.out_degree[idx])
	}

	/// Number of edges entering `key`. Zero for unknown keys.
	pub fn in_degree(&self, key: &str) -> usize {
		self.index_of(key).map_or(0, |idx| self.in_degree[idx])
	}

	/// Whether the directed edge `a -> b` exists.
	pub fn has_edge(&self, a: &str, b: &str) -> bool {
		match (self.index_of(a), self.index_of(b)) {
			(Some(src), Some(tgt)) => self.has_edge_idx(src, tgt),
			_ => false,
		}
	}

	pub fn has_edge_idx(&self, src: NodeIdx, tgt: NodeIdx) -> bool {
		self.edge_pairs.contains(&(src, tgt))
	}

	/// Whether `a` and `b` are connected in either direction.
	pub fn are_adjacent(&self, a: NodeIdx, b: NodeIdx) -> bool {
		self.has_edge_idx(a, b) || self.has_edge_idx(b, a)
	}

	/// Size multiplier for drawing a node (1.0 = normal).
	///
	/// Uses the payload's size hint when present, otherwise scales with the
	/// node's share of the most-connected node's degree.
	pub fn size_of(&self, idx: NodeIdx) -> f64 {
		let Some(node) = self.nodes.get(idx) else {
			return 1.0;
		};
		if let Some(hint) = node.size_hint {
			return (hint / BASE_NODE_SIZE).max(0.25);
		}
		let degree = self.out_degree[idx] + self.in_degree[idx];
		let edge_factor = (degree as f64 / self.max_degree.max(1) as f64).sqrt();
		0.8 + 0.7 * edge_factor
	}

	pub fn set_position(&mut self, idx: NodeIdx, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.x = x;
			node.y = y;
		}
	}
}
