//! Error types for loading and building the graph model.

use thiserror::Error;

/// Failure while fetching or decoding the graph payload.
///
/// Both variants abort initialization; the `Display` text is what ends up in
/// the error banner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
	/// The request could not be sent, or the server answered with a
	/// non-success status.
	#[error("Failed to load graph: {0}")]
	Network(String),

	/// The payload was not valid JSON or was missing required fields.
	#[error("Invalid graph data: {0}")]
	Parse(String),
}

impl From<serde_json::Error> for LoadError {
	fn from(err: serde_json::Error) -> Self {
		LoadError::Parse(err.to_string())
	}
}

/// Rejected mutation of a [`GraphModel`](super::model::GraphModel).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
	#[error("Duplicate node key: {0}")]
	DuplicateNode(String),
}
