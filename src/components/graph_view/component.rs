//! Leptos glue: the shared controller and the canvas component.
//!
//! [`GraphController`] owns the [`Session`] for the current load and is the
//! single place where UI input reaches it. Each input is applied
//! synchronously, the canvas is redrawn immediately, and the reactive mirrors
//! (layout indicator, details panel) are refreshed. An animation loop via
//! `requestAnimationFrame` advances the layout and redraws every frame; it is
//! only started once a session exists.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::details::NodeDetails;
use super::error::LoadError;
use super::loader::LoadOutcome;
use super::render;
use super::session::{Command, LoadState, PointerInput, Session};
use crate::config::ViewerConfig;

/// Fixed simulation step per animation frame, in seconds.
const FRAME_DT: f32 = 0.016;

fn now_ms() -> f64 {
	web_sys::window()
		.and_then(|w| w.performance())
		.map(|p| p.now())
		.unwrap_or(0.0)
}

#[derive(Default)]
struct ControllerInner {
	session: Option<Session>,
	canvas: Option<HtmlCanvasElement>,
	ctx: Option<CanvasRenderingContext2d>,
	animate: Option<Closure<dyn FnMut()>>,
	resize_cb: Option<Closure<dyn FnMut()>>,
}

/// Routes UI input into the session and keeps the view in sync.
#[derive(Clone)]
pub struct GraphController {
	inner: Rc<RefCell<ControllerInner>>,
	layout_running: RwSignal<bool>,
	details: RwSignal<Option<NodeDetails>>,
}

impl GraphController {
	pub fn new() -> Self {
		Self {
			inner: Rc::new(RefCell::new(ControllerInner::default())),
			layout_running: RwSignal::new(false),
			details: RwSignal::new(None),
		}
	}

	/// Reactive mirror of the layout state for the toggle indicator.
	pub fn layout_running(&self) -> RwSignal<bool> {
		self.layout_running
	}

	/// Reactive mirror of the details panel.
	pub fn details(&self) -> RwSignal<Option<NodeDetails>> {
		self.details
	}

	/// Size to build a session for: the attached canvas, else the window.
	pub fn canvas_size(&self) -> (f64, f64) {
		if let Some(canvas) = &self.inner.borrow().canvas {
			return (canvas.width() as f64, canvas.height() as f64);
		}
		web_sys::window()
			.map(|w| window_size(&w))
			.unwrap_or((800.0, 600.0))
	}

	/// Build a session from a load result and start showing it.
	///
	/// Returns what the status banner and counts should display. Failed and
	/// empty loads leave the controller without a session.
	pub fn open(&self, result: Result<LoadOutcome, LoadError>, config: &ViewerConfig) -> LoadState {
		let (width, height) = self.canvas_size();
		let (state, session) = Session::open(result, config, width, height, now_ms());
		if let Some(session) = session {
			self.install(session);
		}
		state
	}

	/// Categories for the filter list, alphabetically.
	pub fn categories(&self) -> Vec<(String, String)> {
		self.inner
			.borrow()
			.session
			.as_ref()
			.map(|s| s.registry().sorted_for_display())
			.unwrap_or_default()
	}

	/// Take ownership of a freshly loaded session, replacing any previous one.
	pub fn install(&self, session: Session) {
		self.inner.borrow_mut().session = Some(session);
		self.publish();
		self.start_loop();
	}

	/// Apply a UI command and redraw.
	pub fn dispatch(&self, command: Command) {
		{
			let mut inner = self.inner.borrow_mut();
			let Some(session) = inner.session.as_mut() else {
				debug!("codegraph: no session, ignoring {:?}", command);
				return;
			};
			session.dispatch(command, now_ms());
		}
		self.publish();
		self.redraw();
	}

	fn pointer(&self, input: PointerInput) {
		{
			let mut inner = self.inner.borrow_mut();
			let Some(session) = inner.session.as_mut() else {
				return;
			};
			session.handle_pointer(input, now_ms());
		}
		self.publish();
		self.redraw();
	}

	fn attach(&self, canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) {
		{
			let mut inner = self.inner.borrow_mut();
			if let Some(session) = inner.session.as_mut() {
				session.resize(canvas.width() as f64, canvas.height() as f64);
			}
			inner.canvas = Some(canvas);
			inner.ctx = Some(ctx);
		}
		self.start_loop();
	}

	fn publish(&self) {
		let inner = self.inner.borrow();
		let Some(session) = inner.session.as_ref() else {
			return;
		};
		let running = session.layout_status().is_running();
		if self.layout_running.get_untracked() != running {
			self.layout_running.set(running);
		}
		let details = session.details();
		if self.details.with_untracked(|d| *d != details) {
			self.details.set(details);
		}
	}

	fn redraw(&self) {
		let inner = self.inner.borrow();
		if let (Some(session), Some(ctx)) = (&inner.session, &inner.ctx) {
			let frame = session.frame();
			render::draw(
				&frame,
				session.model(),
				session.viewport(),
				ctx,
				session.scale(),
				session.theme(),
			);
		}
	}

	/// Start the animation loop once both a session and a canvas exist.
	fn start_loop(&self) {
		{
			let inner = self.inner.borrow();
			if inner.animate.is_some() || inner.session.is_none() || inner.ctx.is_none() {
				return;
			}
		}

		let controller = self.clone();
		let closure = Closure::new(move || {
			{
				let mut inner = controller.inner.borrow_mut();
				if let Some(session) = inner.session.as_mut() {
					session.tick(now_ms(), FRAME_DT);
				}
			}
			controller.publish();
			controller.redraw();
			if let Some(cb) = &controller.inner.borrow().animate {
				if let Some(window) = web_sys::window() {
					let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		});
		self.inner.borrow_mut().animate = Some(closure);

		if let (Some(window), Some(cb)) = (web_sys::window(), &self.inner.borrow().animate) {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	}
}

impl Default for GraphController {
	fn default() -> Self {
		Self::new()
	}
}

fn window_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

/// Size the canvas to its parent element (or the window) and return the size.
fn fit_to_parent(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let (w, h) = canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or_else(|| {
			web_sys::window()
				.map(|w| window_size(&w))
				.unwrap_or((800.0, 600.0))
		});
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	(w, h)
}

/// Canvas-relative pointer position.
fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Renders the graph of `controller`'s session on a canvas.
///
/// The canvas sizes itself to its parent element and follows window resizes.
#[component]
pub fn GraphCanvas(controller: StoredValue<GraphController, LocalStorage>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		fit_to_parent(&canvas);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("codegraph: canvas 2d context unavailable");
			return;
		};

		controller.with_value(|c| {
			c.attach(canvas.clone(), ctx);

			let (resized, resized_canvas) = (c.clone(), canvas.clone());
			let cb: Closure<dyn FnMut()> = Closure::new(move || {
				let (w, h) = fit_to_parent(&resized_canvas);
				if let Some(session) = resized.inner.borrow_mut().session.as_mut() {
					session.resize(w, h);
				}
				resized.redraw();
			});
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			c.inner.borrow_mut().resize_cb = Some(cb);
		});
	});

	let point = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		Some(canvas_point(&canvas, ev))
	};

	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = point(&ev) {
			controller.with_value(|c| c.pointer(PointerInput::Down { x, y }));
		}
	};
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = point(&ev) {
			controller.with_value(|c| c.pointer(PointerInput::Move { x, y }));
		}
	};
	let on_mouseup = move |ev: MouseEvent| {
		if let Some((x, y)) = point(&ev) {
			controller.with_value(|c| c.pointer(PointerInput::Up { x, y }));
		}
	};
	let on_mouseleave = move |_: MouseEvent| {
		controller.with_value(|c| c.pointer(PointerInput::Leave));
	};
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some((x, y)) = point(&ev) {
			let delta_y = ev.delta_y();
			controller.with_value(|c| c.pointer(PointerInput::Wheel { x, y, delta_y }));
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
