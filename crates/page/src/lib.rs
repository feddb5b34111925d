//! Headless page runtime.
//!
//! [`Document`] is a DOM with layout, a scrollable viewport and the runtime services a tooltip
//! controller needs (frames, listeners, intersection observers). [`Page`] owns a document and
//! its controllers and routes input to them. The windowed demo and the integration tests both
//! drive a `Page`.

mod document;
mod page;

pub use document::{Document, LabelMetrics, Mutation};
pub use page::{ControllerId, Page, TickReport};
