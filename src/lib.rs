//! codegraph-viz: interactive visualization of a code knowledge graph.
//!
//! This crate provides a WASM-based viewer that fetches a previously computed
//! graph of code entities and relationships, lays it out with a force-directed
//! simulation and lets the user search, filter by category, hover, select and
//! inspect nodes.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, info};

pub mod components;
pub mod config;

pub use components::graph_view::{
	Command, GraphCanvas, GraphController, GraphModel, LoadError, LoadState, NodeDetails,
	Session, loader,
};
pub use config::ViewerConfig;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("codegraph: logging initialized");
}

/// Main application component.
///
/// Fetches the graph once on mount, then renders the sidebar controls next to
/// the canvas.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = ViewerConfig::from_document();
	let controller = StoredValue::new_local(GraphController::new());
	let load_state = RwSignal::new(LoadState::Loading);
	let categories = RwSignal::new(Vec::<(String, String)>::new());
	let layout_running = controller.with_value(|c| c.layout_running());
	let details = controller.with_value(|c| c.details());

	spawn_local(async move {
		let result = loader::load(&config.data_url).await;
		let state = controller.with_value(|c| {
			let state = c.open(result, &config);
			categories.set(c.categories());
			state
		});
		load_state.set(state);
	});

	let send = move |command: Command| controller.with_value(|c| c.dispatch(command));

	let count = move |pick: fn((usize, usize)) -> usize| {
		load_state.with(|s| s.counts().map(|c| pick(c).to_string()).unwrap_or_default())
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Code Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="codegraph">
			<aside class="sidebar">
				<h1>"Code Graph"</h1>

				<input
					id="search-input"
					type="search"
					placeholder="Search nodes..."
					on:input=move |ev| send(Command::SearchChanged(event_target_value(&ev)))
				/>

				<section id="category-filters" class="category-filters">
					<h2>"Categories"</h2>
					{move || {
						categories
							.get()
							.into_iter()
							.map(|(category, color)| {
								let toggled = category.clone();
								view! {
									<label class="category-filter">
										<input
											type="checkbox"
											checked=true
											on:change=move |ev| {
												send(Command::CategoryToggled {
													category: toggled.clone(),
													visible: event_target_checked(&ev),
												})
											}
										/>
										<span class="swatch" style=format!("background: {color};")></span>
										{category}
									</label>
								}
							})
							.collect_view()
					}}
				</section>

				<section class="stats">
					<span>"Nodes: "<span id="node-count">{move || count(|(nodes, _)| nodes)}</span></span>
					<span>"Edges: "<span id="edge-count">{move || count(|(_, edges)| edges)}</span></span>
				</section>

				<section class="controls">
					<button
						id="layout-toggle"
						class:active=move || layout_running.get()
						on:click=move |_| send(Command::ToggleLayout)
					>
						{move || if layout_running.get() { "Pause layout" } else { "Resume layout" }}
					</button>
					<button id="reset-view" on:click=move |_| send(Command::ResetView)>
						"Reset view"
					</button>
				</section>

				<section id="node-details" class="details" class:open=move || details.with(Option::is_some)>
					{move || {
						details
							.get()
							.map(|d| {
								view! {
									<h2 id="detail-label">{d.label}</h2>
									<dl>
										<dt>"Category"</dt>
										<dd id="detail-category">{d.category}</dd>
										<dt>"File"</dt>
										<dd id="detail-file">{d.file}</dd>
										<dt>"Lines"</dt>
										<dd id="detail-lines">{d.lines}</dd>
										<dt>"Outgoing"</dt>
										<dd id="detail-outgoing">{d.outgoing}</dd>
										<dt>"Incoming"</dt>
										<dd id="detail-incoming">{d.incoming}</dd>
									</dl>
								}
							})
					}}
				</section>
			</aside>

			<main class="graph-area">
				<GraphCanvas controller=controller />
				{move || {
					load_state
						.with(LoadState::banner)
						.map(|text| {
							let kind = load_state
								.with(|s| match s {
									LoadState::Failed(_) => "error",
									LoadState::Empty => "empty",
									_ => "loading",
								});
							view! {
								<div id="status-banner" class=format!("status-banner {kind}")>
									{text}
								</div>
							}
						})
				}}
			</main>
		</div>
	}
}
