//! Viewer configuration, optionally embedded in the host page.
//!
//! The page may carry a `<script id="viewer-config" type="application/json">`
//! element; any field left out keeps its default.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

/// Element id of the embedded configuration block.
pub const CONFIG_ELEMENT_ID: &str = "viewer-config";

/// Top-level viewer settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
	/// Endpoint returning the graph payload.
	pub data_url: String,
	/// Theme name (`"default"` or `"midnight"`).
	pub theme: String,
	pub layout: LayoutConfig,
}

impl Default for ViewerConfig {
	fn default() -> Self {
		Self {
			data_url: "/api/graph".to_string(),
			theme: "default".to_string(),
			layout: LayoutConfig::default(),
		}
	}
}

/// Force simulation parameters and the large-graph auto-stop policy.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
	/// Graphs with more nodes than this are force-stopped after the two
	/// delays below.
	pub auto_stop_threshold: usize,
	/// Delay after `start` before checking whether the layout still runs.
	pub settle_check_ms: f64,
	/// Further delay after a positive check before forcing a stop.
	pub force_stop_ms: f64,
	pub force_charge: f32,
	pub force_spring: f32,
	pub force_max: f32,
	pub node_speed: f32,
	pub damping_factor: f32,
	/// Fraction of its distance to the origin a node is pulled back per step.
	pub gravity: f32,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			auto_stop_threshold: 100,
			settle_check_ms: 5000.0,
			force_stop_ms: 5000.0,
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			gravity: 0.01,
		}
	}
}

impl ViewerConfig {
	/// Parse a JSON config block.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// Read the config from the page, falling back to defaults when the
	/// element is absent or invalid.
	pub fn from_document() -> Self {
		let Some(text) = config_text() else {
			return Self::default();
		};
		match Self::from_json(&text) {
			Ok(config) => {
				info!("codegraph: using embedded config, data_url={}", config.data_url);
				config
			}
			Err(e) => {
				warn!("codegraph: ignoring invalid viewer config: {}", e);
				Self::default()
			}
		}
	}
}

fn config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}
