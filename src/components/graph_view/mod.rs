//! Interactive code graph view.
//!
//! Renders a previously computed graph of code entities on an HTML canvas:
//! - [`GraphModel`] holds nodes, directed edges and O(1) degree queries
//! - [`loader`] fetches the payload and derives the [`CategoryRegistry`]
//! - [`filter`] and [`highlight`] are pure reducers over node/edge appearance
//! - [`LayoutController`] runs a force-directed solver with a large-graph
//!   auto-stop
//! - [`Session`] owns all of the above and applies [`Command`]s from the UI
//!
//! # Example
//!
//! ```ignore
//! let result = loader::load("/api/graph").await;
//! let (state, session) = Session::open(result, &ViewerConfig::default(), 800.0, 600.0, 0.0);
//! if let Some(mut session) = session {
//!     session.dispatch(Command::SearchChanged("auth".into()), 0.0);
//!     let frame = session.frame();
//! }
//! ```

pub mod appearance;
pub mod categories;
mod component;
pub mod details;
pub mod error;
pub mod filter;
pub mod highlight;
pub mod layout;
pub mod loader;
pub mod model;
mod render;
pub mod scale;
pub mod session;
pub mod theme;
pub mod types;
pub mod viewport;

pub use categories::CategoryRegistry;
pub use component::{GraphCanvas, GraphController};
pub use details::{DetailsPanel, NodeDetails};
pub use error::{LoadError, ModelError};
pub use layout::{ForceSolver, LayoutController, LayoutSolver, LayoutStatus};
pub use loader::{LoadOutcome, LoadedGraph};
pub use model::{Edge, GraphModel, Node, NodeIdx};
pub use render::{Frame, compose};
pub use session::{Command, LoadState, PointerInput, Session};
pub use theme::Theme;
pub use types::{EdgeAttributes, EdgeRecord, GraphPayload, NodeAttributes, NodeRecord};
