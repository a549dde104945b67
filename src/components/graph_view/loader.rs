//! Fetching the graph payload and turning it into a [`GraphModel`].

use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use super::categories::CategoryRegistry;
use super::error::LoadError;
use super::model::GraphModel;
use super::types::GraphPayload;

/// Side length (world units) of the initial placement square per sqrt(node).
const PLACEMENT_SPREAD: f64 = 40.0;

/// A successfully loaded, non-empty graph.
#[derive(Clone, Debug)]
pub struct LoadedGraph {
	pub model: GraphModel,
	pub registry: CategoryRegistry,
}

/// Result of a structurally valid load.
#[derive(Clone, Debug)]
pub enum LoadOutcome {
	Loaded(LoadedGraph),
	/// The payload was valid but contained no nodes.
	Empty,
}

/// Fetch the payload from `url` and build the model.
///
/// Exactly one request is issued; there is no timeout or retry.
pub async fn load(url: &str) -> Result<LoadOutcome, LoadError> {
	let text = fetch_text(url).await?;
	parse(&text)
}

async fn fetch_text(url: &str) -> Result<String, LoadError> {
	let opts = RequestInit::new();
	opts.set_method("GET");

	let request = Request::new_with_str_and_init(url, &opts)
		.map_err(|e| LoadError::Network(format!("request error: {:?}", e)))?;
	let window = web_sys::window().ok_or_else(|| LoadError::Network("no window".into()))?;

	let resp_value = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(|e| LoadError::Network(format!("fetch error: {:?}", e)))?;
	let resp: Response = resp_value
		.dyn_into()
		.map_err(|_| LoadError::Network("response is not a Response".into()))?;

	if !resp.ok() {
		return Err(LoadError::Network(format!(
			"HTTP {} {}",
			resp.status(),
			resp.status_text()
		)));
	}

	let body = resp
		.text()
		.map_err(|e| LoadError::Network(format!("body error: {:?}", e)))?;
	let text = JsFuture::from(body)
		.await
		.map_err(|e| LoadError::Network(format!("body error: {:?}", e)))?;
	text.as_string()
		.ok_or_else(|| LoadError::Parse("response body is not text".into()))
}

/// Decode a JSON payload and build the model.
pub fn parse(json: &str) -> Result<LoadOutcome, LoadError> {
	let payload: GraphPayload = serde_json::from_str(json)?;
	Ok(build(payload))
}

/// Build the model and registry from a decoded payload.
///
/// Duplicate node keys are skipped (first occurrence wins). Edges with an
/// unknown endpoint and repeated edges are dropped by the model.
pub fn build(payload: GraphPayload) -> LoadOutcome {
	if payload.nodes.is_empty() {
		info!("codegraph: payload has no nodes");
		return LoadOutcome::Empty;
	}

	let mut model = GraphModel::new();
	let mut registry = CategoryRegistry::default();
	let total = payload.nodes.len();

	for record in payload.nodes {
		if model.index_of(&record.key).is_some() {
			warn!("codegraph: skipping duplicate node key {}", record.key);
			continue;
		}
		registry.register(&record.attributes.category, &record.attributes.color);
		let key = record.key;
		match model.add_node(key, record.attributes) {
			Ok(idx) => {
				let (x, y) = initial_position(idx, total);
				model.set_position(idx, x, y);
			}
			Err(e) => warn!("codegraph: {}", e),
		}
	}

	let payload_edges = payload.edges.len();
	for edge in payload.edges {
		let attributes = edge.attributes.unwrap_or_default();
		if !model.add_edge(&edge.source, &edge.target, attributes) {
			debug!(
				"codegraph: dropped edge {} -> {}",
				edge.source, edge.target
			);
		}
	}

	info!(
		"codegraph: loaded {} nodes, {} of {} edges, {} categories",
		model.node_count(),
		model.edge_count(),
		payload_edges,
		registry.len()
	);

	LoadOutcome::Loaded(LoadedGraph { model, registry })
}

/// Deterministic scatter so that layouts are reproducible between reloads.
fn initial_position(idx: usize, total: usize) -> (f64, f64) {
	let half = PLACEMENT_SPREAD * (total as f64).sqrt() / 2.0;
	let seed = idx as f64 + 1.0;
	(
		(pseudo_random(seed * 1.1) * 2.0 - 1.0) * half,
		(pseudo_random(seed * 2.3) * 2.0 - 1.0) * half,
	)
}

fn pseudo_random(seed: f64) -> f64 {
	let x = (seed * 12.9898 + seed * 78.233).sin() * 43758.5453;
	x - x.floor()
}
