//! End-to-end behavior of a loaded session: load outcomes, command routing,
//! appearance composition and the layout auto-stop.

#![allow(unused_crate_dependencies)]

use codegraph_viz::components::graph_view::{
	Command, LayoutStatus, LoadError, LoadState, PointerInput, Session, loader,
};
use codegraph_viz::config::ViewerConfig;
use serde_json::json;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;

fn sample_payload() -> String {
	json!({
		"nodes": [
			{ "key": "auth", "attributes": {
				"category": "function", "color": "#0969da", "label": "AuthHandler",
				"file": "src/auth.rs", "start_line": 10, "end_line": 42
			}},
			{ "key": "payment", "attributes": {
				"category": "struct", "color": "#8250df", "label": "PaymentService",
				"file": "src/payment.rs"
			}},
			{ "key": "logger", "attributes": {
				"category": "module", "color": "#1a7f37", "label": "Logger"
			}},
			{ "key": "config", "attributes": {
				"category": "module", "color": "#1a7f37", "label": "Config"
			}},
			{ "key": "auth", "attributes": {
				"category": "function", "color": "#0969da", "label": "Shadowed"
			}}
		],
		"edges": [
			{ "source": "auth", "target": "payment", "attributes": { "relationship": "Direct" } },
			{ "source": "auth", "target": "logger" },
			{ "source": "payment", "target": "logger" },
			{ "source": "auth", "target": "missing" },
			{ "source": "auth", "target": "payment" }
		]
	})
	.to_string()
}

fn chain_payload(n: usize) -> String {
	let nodes: Vec<_> = (0..n)
		.map(|i| {
			json!({ "key": format!("n{i}"), "attributes": {
				"category": "function", "color": "#0969da", "label": format!("fn_{i}")
			}})
		})
		.collect();
	let edges: Vec<_> = (1..n)
		.map(|i| json!({ "source": format!("n{}", i - 1), "target": format!("n{i}") }))
		.collect();
	json!({ "nodes": nodes, "edges": edges }).to_string()
}

fn open_at(json: &str, now_ms: f64) -> (LoadState, Option<Session>) {
	Session::open(loader::parse(json), &ViewerConfig::default(), WIDTH, HEIGHT, now_ms)
}

fn open_sample() -> Session {
	let (state, session) = open_at(&sample_payload(), 0.0);
	assert_eq!(state, LoadState::Ready { nodes: 4, edges: 3 });
	session.expect("non-empty graph opens a session")
}

fn idx(session: &Session, key: &str) -> usize {
	session.model().index_of(key).expect("node exists")
}

fn screen_pos(session: &Session, key: &str) -> (f64, f64) {
	let node = session.model().node_by_key(key).expect("node exists");
	let t = &session.viewport().transform;
	(t.x + node.x * t.k, t.y + node.y * t.k)
}

#[test]
fn empty_payload_opens_nothing() {
	let (state, session) = open_at(r#"{"nodes": [], "edges": []}"#, 0.0);
	assert_eq!(state, LoadState::Empty);
	assert!(session.is_none());
	assert!(state.banner().is_some_and(|b| b.contains("No graph data")));
	assert_eq!(state.counts(), None);
}

#[test]
fn network_failure_reports_reason() {
	let result = Err(LoadError::Network("HTTP 500 Internal Server Error".into()));
	let (state, session) = Session::open(result, &ViewerConfig::default(), WIDTH, HEIGHT, 0.0);
	assert!(session.is_none());
	assert_eq!(state.counts(), None);
	let LoadState::Failed(message) = &state else {
		panic!("expected failure, got {state:?}");
	};
	assert!(message.starts_with("Failed to load graph"));
	assert!(message.contains("HTTP 500"));
	assert_eq!(state.banner().as_deref(), Some(message.as_str()));
}

#[test]
fn malformed_payload_reports_parse_error() {
	let (state, session) = open_at("{ not json", 0.0);
	assert!(session.is_none());
	assert!(matches!(&state, LoadState::Failed(m) if m.contains("Invalid graph data")));
}

#[test]
fn ready_state_counts_distinct_nodes_and_kept_edges() {
	let session = open_sample();
	assert_eq!(session.model().node_count(), 4);
	assert_eq!(session.model().edge_count(), 3);
	assert_eq!(session.model().node_by_key("auth").map(|n| n.label.as_str()), Some("AuthHandler"));
	assert_eq!(session.layout_status(), LayoutStatus::Running);
	assert_eq!(session.registry().len(), 3);
}

#[test]
fn node_click_selects_and_shows_details() {
	let mut session = open_sample();
	session.dispatch(Command::NodeClicked("auth".into()), 0.0);

	assert_eq!(session.highlight().selected(), Some(idx(&session, "auth")));
	let details = session.details().expect("details open");
	assert_eq!(details.label, "AuthHandler");
	assert_eq!(details.category, "function");
	assert_eq!(details.file, "src/auth.rs");
	assert_eq!(details.lines, "10-42");
	assert_eq!(details.outgoing, 2);
	assert_eq!(details.incoming, 0);

	session.dispatch(Command::NodeClicked("payment".into()), 0.0);
	let details = session.details().expect("details open");
	assert_eq!(details.lines, "-");
	assert_eq!((details.outgoing, details.incoming), (1, 1));

	session.dispatch(Command::BackgroundClicked, 0.0);
	assert_eq!(session.highlight().selected(), None);
	assert!(session.details().is_none());
}

#[test]
fn unknown_node_click_is_ignored() {
	let mut session = open_sample();
	session.dispatch(Command::NodeClicked("nope".into()), 0.0);
	assert_eq!(session.highlight().selected(), None);
	assert!(session.details().is_none());
}

#[test]
fn hover_emphasizes_neighborhood_and_hides_other_edges() {
	let mut session = open_sample();
	session.dispatch(Command::PointerEnteredNode("logger".into()), 0.0);
	let frame = session.frame();

	for key in ["logger", "auth", "payment"] {
		let look = &frame.nodes[idx(&session, key)];
		assert!(look.emphasized, "{key} should be emphasized");
		assert!(!look.dimmed);
	}
	let config = &frame.nodes[idx(&session, "config")];
	assert!(config.dimmed);
	assert_eq!(config.label, None);

	let logger = idx(&session, "logger");
	for (edge, look) in session.model().edges().iter().zip(&frame.edges) {
		let incident = edge.source == logger || edge.target == logger;
		assert_eq!(look.hidden, !incident);
		assert_eq!(look.highlighted, incident);
	}

	session.dispatch(Command::PointerLeftNode, 0.0);
	let frame = session.frame();
	assert!(frame.nodes.iter().all(|n| !n.dimmed && !n.emphasized));
	assert!(frame.edges.iter().all(|e| !e.hidden));
}

#[test]
fn selection_without_hover_leaves_other_edges_alone() {
	let mut session = open_sample();
	session.dispatch(Command::NodeClicked("logger".into()), 0.0);
	let frame = session.frame();

	let payment_to_logger = session
		.model()
		.edges()
		.iter()
		.position(|e| e.source == idx(&session, "payment"))
		.expect("edge exists");
	let auth_to_payment = session
		.model()
		.edges()
		.iter()
		.position(|e| e.source == idx(&session, "auth") && e.target == idx(&session, "payment"))
		.expect("edge exists");

	assert!(frame.edges[payment_to_logger].highlighted);
	let untouched = &frame.edges[auth_to_payment];
	assert!(!untouched.hidden);
	assert!(!untouched.highlighted);
	assert_eq!(untouched.color, session.theme().edge.color.to_css());
	assert_eq!(untouched.size, 1.0);
}

#[test]
fn hover_keeps_selected_edges_hidden_unless_incident() {
	let mut session = open_sample();
	session.dispatch(Command::NodeClicked("auth".into()), 0.0);
	session.dispatch(Command::PointerEnteredNode("config".into()), 0.0);
	let frame = session.frame();

	// config has no edges, so everything stays hidden while it is hovered.
	let auth = idx(&session, "auth");
	assert!(frame.edges.iter().all(|e| e.hidden));

	session.dispatch(Command::PointerEnteredNode("logger".into()), 0.0);
	let frame = session.frame();
	let logger = idx(&session, "logger");
	for (edge, look) in session.model().edges().iter().zip(&frame.edges) {
		let touches_hover = edge.source == logger || edge.target == logger;
		assert_eq!(look.hidden, !touches_hover);
		if touches_hover && (edge.source == auth || edge.target == auth) {
			assert_eq!(look.color, session.theme().edge.selected_color.to_css());
		}
	}
	let selected = &frame.nodes[auth];
	assert!(selected.emphasized);
	assert_eq!(selected.color, session.theme().node.selected_color.to_css());
}

#[test]
fn search_dims_non_matching_nodes_case_insensitively() {
	let mut session = open_sample();
	session.dispatch(Command::SearchChanged("AUTH".into()), 0.0);
	let frame = session.frame();

	let auth = &frame.nodes[idx(&session, "auth")];
	assert!(!auth.dimmed);
	assert_eq!(auth.label.as_deref(), Some("AuthHandler"));
	let payment = &frame.nodes[idx(&session, "payment")];
	assert!(payment.dimmed);
	assert_eq!(payment.label, None);

	session.dispatch(Command::SearchChanged(String::new()), 0.0);
	assert!(session.frame().nodes.iter().all(|n| !n.dimmed));
}

#[test]
fn hidden_category_hides_nodes_but_not_edges() {
	let mut session = open_sample();
	session.dispatch(
		Command::CategoryToggled {
			category: "struct".into(),
			visible: false,
		},
		0.0,
	);
	let frame = session.frame();
	assert!(frame.nodes[idx(&session, "payment")].hidden);
	assert_eq!(frame.visible_node_count(), 3);
	assert!(frame.edges.iter().all(|e| !e.hidden));

	session.dispatch(Command::PointerEnteredNode("payment".into()), 0.0);
	session.dispatch(Command::NodeClicked("payment".into()), 0.0);
	let look = &session.frame().nodes[idx(&session, "payment")];
	assert!(look.hidden);
	assert!(!look.emphasized);

	session.dispatch(
		Command::CategoryToggled {
			category: "struct".into(),
			visible: true,
		},
		0.0,
	);
	assert!(!session.frame().nodes[idx(&session, "payment")].hidden);
}

#[test]
fn hiding_a_category_drops_highlights_on_its_nodes() {
	let mut session = open_sample();
	session.dispatch(Command::NodeClicked("payment".into()), 0.0);
	session.dispatch(Command::PointerEnteredNode("payment".into()), 0.0);

	session.dispatch(
		Command::CategoryToggled {
			category: "struct".into(),
			visible: false,
		},
		0.0,
	);
	assert_eq!(session.highlight().hovered(), None);
	assert_eq!(session.highlight().selected(), None);
	assert!(session.details().is_none());
	let frame = session.frame();
	assert!(frame.edges.iter().all(|e| !e.hidden));
	assert!(frame.nodes.iter().all(|n| !n.dimmed));

	session.dispatch(Command::NodeClicked("auth".into()), 0.0);
	session.dispatch(
		Command::CategoryToggled {
			category: "module".into(),
			visible: false,
		},
		0.0,
	);
	assert_eq!(session.highlight().selected(), Some(idx(&session, "auth")));
	assert!(session.details().is_some());
}

#[test]
fn hidden_nodes_are_not_hit() {
	let mut session = open_sample();
	session.stop_layout();
	let (x, y) = screen_pos(&session, "config");
	assert!(session.node_at(x, y).is_some());

	session.dispatch(
		Command::CategoryToggled {
			category: "module".into(),
			visible: false,
		},
		0.0,
	);
	let hit = session.node_at(x, y);
	assert!(hit.is_none_or(|i| session.model().nodes()[i].category != "module"));
}

#[test]
fn pointer_click_on_node_selects_it() {
	let mut session = open_sample();
	session.stop_layout();
	let (x, y) = screen_pos(&session, "auth");
	let hit = session.node_at(x, y).expect("a node under its own center");
	let hit_key = session.model().nodes()[hit].key.clone();

	session.handle_pointer(PointerInput::Move { x, y }, 0.0);
	assert_eq!(session.highlight().hovered(), Some(hit));

	session.handle_pointer(PointerInput::Down { x, y }, 0.0);
	session.handle_pointer(PointerInput::Up { x, y }, 0.0);
	assert_eq!(session.highlight().selected(), Some(hit));
	assert_eq!(session.details().map(|d| d.key), Some(hit_key));

	session.handle_pointer(PointerInput::Leave, 0.0);
	assert_eq!(session.highlight().hovered(), None);
}

#[test]
fn background_click_clears_but_pan_does_not() {
	let mut session = open_sample();
	session.stop_layout();
	session.dispatch(Command::NodeClicked("auth".into()), 0.0);

	session.handle_pointer(PointerInput::Down { x: 2.0, y: 2.0 }, 0.0);
	session.handle_pointer(PointerInput::Move { x: 60.0, y: 40.0 }, 0.0);
	session.handle_pointer(PointerInput::Up { x: 60.0, y: 40.0 }, 0.0);
	assert!(session.details().is_some());
	assert_eq!(session.viewport().transform.x, WIDTH / 2.0 + 58.0);

	session.handle_pointer(PointerInput::Down { x: 2.0, y: 2.0 }, 0.0);
	session.handle_pointer(PointerInput::Up { x: 2.0, y: 2.0 }, 0.0);
	assert!(session.details().is_none());
	assert_eq!(session.highlight().selected(), None);
}

#[test]
fn reset_view_restores_default_transform() {
	let mut session = open_sample();
	session.handle_pointer(
		PointerInput::Wheel {
			x: 100.0,
			y: 100.0,
			delta_y: -120.0,
		},
		0.0,
	);
	assert!(session.viewport().transform.k > 1.0);

	session.dispatch(Command::ResetView, 0.0);
	let t = &session.viewport().transform;
	assert_eq!((t.x, t.y, t.k), (WIDTH / 2.0, HEIGHT / 2.0, 1.0));
}

#[test]
fn toggle_layout_flips_between_running_and_stopped() {
	let mut session = open_sample();
	session.dispatch(Command::ToggleLayout, 10.0);
	assert_eq!(session.layout_status(), LayoutStatus::Stopped);
	session.dispatch(Command::ToggleLayout, 20.0);
	assert_eq!(session.layout_status(), LayoutStatus::Running);
}

#[test]
fn large_graph_layout_stops_itself() {
	let config = ViewerConfig::default();
	let (state, session) = open_at(&chain_payload(150), 0.0);
	assert_eq!(state.counts(), Some((150, 149)));
	let mut session = session.expect("session");

	session.tick(config.layout.settle_check_ms, 0.016);
	assert_eq!(session.layout_status(), LayoutStatus::Running);

	let forced_at = config.layout.settle_check_ms + config.layout.force_stop_ms;
	session.tick(forced_at, 0.016);
	assert_eq!(session.layout_status(), LayoutStatus::Stopped);
}

#[test]
fn small_graph_layout_keeps_running() {
	let (_, session) = open_at(&chain_payload(100), 0.0);
	let mut session = session.expect("session");
	session.tick(60_000.0, 0.016);
	assert_eq!(session.layout_status(), LayoutStatus::Running);
}

#[test]
fn manual_stop_cancels_pending_auto_stop() {
	let config = ViewerConfig::default();
	let (_, session) = open_at(&chain_payload(150), 0.0);
	let mut session = session.expect("session");

	session.dispatch(Command::ToggleLayout, 1000.0);
	session.dispatch(Command::ToggleLayout, 2000.0);
	session.tick(config.layout.settle_check_ms + config.layout.force_stop_ms, 0.016);
	assert_eq!(session.layout_status(), LayoutStatus::Running);

	session.tick(
		2000.0 + config.layout.settle_check_ms + config.layout.force_stop_ms,
		0.016,
	);
	assert_eq!(session.layout_status(), LayoutStatus::Stopped);
}
