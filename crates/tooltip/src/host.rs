//! The boundary between the controller and the document it is mounted into.
//!
//! The controller never owns DOM nodes. It holds `Element` handles, which behave like weak
//! references: a handle may outlive its node, and every host operation on a disconnected
//! handle must be a harmless no-op (or return an empty/zero value).

use core_types::{FrameHandle, ListenerHandle, ObserverHandle, Point, Rect, Size};
use std::fmt::Debug;

/// Structural attributes for the label element, created once per mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelSpec<'a> {
    pub id: &'a str,
    /// Opaque to the controller; passed through to the host's styling.
    pub class: &'a str,
    pub role: &'a str,
    /// Inline style keeping the label out of flow and transparent to hit-testing.
    pub style: &'a str,
}

/// A raw input signal, delivered only while the controller's listeners are attached.
#[derive(Clone, Debug, PartialEq)]
pub enum Signal<E> {
    /// Pointer moved; viewport coordinates.
    PointerMove(Point),
    /// Delegated pointer-enter on `target` (any element; resolved to its trigger).
    PointerEnter(E),
    /// Delegated pointer-leave on `target`.
    PointerLeave(E),
    /// The document scrolled.
    Scroll,
    /// The viewport changed size. The active label is placed again on the next frame.
    Resize,
}

/// Document services the controller needs.
///
/// Query methods take `&self` and must not mutate observable document state.
/// `measure` is the exception in spirit: hosts may flush pending layout to answer it.
pub trait TooltipHost {
    type Element: Clone + PartialEq + Debug;

    // --- queries -------------------------------------------------------------

    /// Topmost hit-testable element at `point` (viewport coordinates).
    fn element_from_point(&self, point: Point) -> Option<Self::Element>;

    /// Nearest element at or above `element` carrying `attr`.
    fn closest(&self, element: &Self::Element, attr: &str) -> Option<Self::Element>;

    /// First element in document order carrying `attr`.
    fn query_attr(&self, attr: &str) -> Option<Self::Element>;

    fn is_connected(&self, element: &Self::Element) -> bool;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Border box relative to the viewport.
    fn bounding_client_rect(&self, element: &Self::Element) -> Rect;

    fn scroll_offset(&self) -> Point;

    fn viewport_size(&self) -> Size;

    /// Whether the primary pointer is coarse (touch).
    fn prefers_coarse_pointer(&self) -> bool;

    // --- label ---------------------------------------------------------------

    /// Create and attach the label element. `None` if the document cannot host one.
    fn create_label(&mut self, spec: &LabelSpec<'_>) -> Option<Self::Element>;

    fn remove_element(&mut self, element: &Self::Element);

    /// Replace the element's children with `text`.
    fn set_text(&mut self, element: &Self::Element, text: &str);

    /// Rendered size. Forces layout; reads zero for elements that are not rendered.
    fn measure(&mut self, element: &Self::Element) -> Size;

    /// Position via a translation of the element's origin, in document coordinates.
    fn set_translation(&mut self, element: &Self::Element, to: Point);

    // --- markers -------------------------------------------------------------

    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    fn remove_attribute(&mut self, element: &Self::Element, name: &str);

    // --- scheduling and subscriptions ----------------------------------------

    fn request_frame(&mut self) -> FrameHandle;

    fn cancel_frame(&mut self, frame: FrameHandle);

    /// Subscribe to pointer-move, pointer-enter/leave (capture) and scroll.
    fn add_listeners(&mut self) -> ListenerHandle;

    fn remove_listeners(&mut self, listeners: ListenerHandle);

    /// Start observing `element`'s intersection with the viewport (threshold 0).
    fn observe_intersection(&mut self, element: &Self::Element) -> ObserverHandle;

    fn disconnect_observer(&mut self, observer: ObserverHandle);
}
