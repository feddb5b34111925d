//! # tooltip
//!
//! A hover tooltip controller: it tracks the pointer and scroll position, resolves which
//! trigger element is under the pointer, and places one floating label next to it without
//! letting it cross the viewport (or container) edges.
//!
//! ## Pipeline
//!
//! - [`tracker`]: raw signals update state and request at most one frame.
//! - [`resolve`]: the frame pass hit-tests (or takes a delegated enter/leave) and picks the
//!   active trigger.
//! - [`place`]: shows, hides and positions the label.
//! - [`gate`]: optional visibility gate keyed on a bounding container.
//!
//! The controller is generic over a [`TooltipHost`], which supplies the document. It never
//! owns trigger elements and only writes the hover marker onto them.

pub mod config;
pub mod controller;
pub mod host;
pub mod place;
pub mod resolve;
pub mod state;

mod gate;
mod tracker;

pub use config::{ConfigError, DEFAULT_LABEL_CLASS, TooltipConfig};
pub use controller::{Phase, TooltipController};
pub use host::{LabelSpec, Signal, TooltipHost};
pub use place::{Placement, PlacementInput, Side, compute_placement};
pub use resolve::resolve_at;
pub use state::{ControllerState, ControllerStats, Intent};
