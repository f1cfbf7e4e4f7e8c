//! The list-interaction state machine.
//!
//! Raw process records plus a stream of input events become a consistent,
//! renderable view:
//!
//! - [`filter`]: live query matching
//! - [`viewport`]: scroll offset clamping and the visible window
//! - [`selection`]: single selected row
//! - [`scrollbar`]: thumb geometry and drag mapping
//! - [`dispatch`]: `(state, event) -> (state', effects)`
//! - [`view`]: declarative frame description
//! - [`Controller`]: executes effects against real collaborators
//!
//! Everything except the controller is pure.

pub mod controller;
pub mod dispatch;
pub mod filter;
pub mod geometry;
pub mod scrollbar;
pub mod selection;
pub mod state;
pub mod view;
pub mod viewport;

pub use controller::{Controller, KillOutcome};
pub use dispatch::{dispatch, Effect, Event, Key};
pub use filter::{filter, filter_indices};
pub use geometry::{Geometry, Rect};
pub use scrollbar::{DragState, Thumb, Track};
pub use state::{Focus, Hover, ListState};
pub use view::{view_state, KillButtonView, RowView, ScrollbarView, SearchView, ViewState};
pub use viewport::{clamp_offset, visible_range};
