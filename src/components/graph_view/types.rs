//! Wire format of the graph endpoint.

use serde::Deserialize;

/// Visual and source metadata for a node.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NodeAttributes {
	/// Semantic category (e.g. "function", "struct"). Open set.
	pub category: String,
	/// CSS color for the category (e.g. "#0969da").
	pub color: String,
	/// Display label.
	pub label: String,
	/// Source file path.
	#[serde(default)]
	pub file: Option<String>,
	/// First line of the entity in `file`.
	#[serde(default)]
	pub start_line: Option<u32>,
	/// Last line of the entity in `file`.
	#[serde(default)]
	pub end_line: Option<u32>,
	/// Optional size hint in pixels. Derived from degree when absent.
	#[serde(default)]
	pub size: Option<f64>,
}

/// A node record: unique key plus attributes.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NodeRecord {
	pub key: String,
	pub attributes: NodeAttributes,
}

/// Optional edge styling.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct EdgeAttributes {
	/// Relationship kind (e.g. "Direct", "Method").
	#[serde(default, alias = "relationship")]
	pub kind: Option<String>,
	#[serde(default)]
	pub color: Option<String>,
	#[serde(default)]
	pub size: Option<f64>,
}

/// A directed edge between two node keys.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EdgeRecord {
	pub source: String,
	pub target: String,
	#[serde(default)]
	pub attributes: Option<EdgeAttributes>,
}

/// Complete payload returned by the graph endpoint.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphPayload {
	pub nodes: Vec<NodeRecord>,
	pub edges: Vec<EdgeRecord>,
}
