use crate::place::Placement;
use core_types::{FrameHandle, ListenerHandle, ObserverHandle, Point};

/// What the next frame pass should resolve against.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent<E> {
    /// Hit-test at the last pointer position.
    HitTest,
    /// A delegated enter/leave already named the trigger (or none).
    Trigger(Option<E>),
}

impl<E> Default for Intent<E> {
    fn default() -> Self {
        Intent::HitTest
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControllerStats {
    pub frames_requested: u64,
    /// Resolution passes actually run (one per delivered frame).
    pub passes: u64,
    pub shows: u64,
    pub hides: u64,
}

/// Per-controller mutable state. Created on mount, consumed on unmount.
#[derive(Clone, Debug)]
pub struct ControllerState<E> {
    /// Viewport coordinates.
    pub pointer: Point,
    pub active: Option<E>,
    pub label: Option<E>,
    pub scheduled_frame: Option<FrameHandle>,
    pub container: Option<E>,
    pub container_visible: bool,
    pub listeners: Option<ListenerHandle>,
    pub observer: Option<ObserverHandle>,
    pub intent: Intent<E>,
    /// Place the label again even if the active trigger does not change.
    pub reposition: bool,
    /// Whether the visible marker is currently set on the label.
    pub label_visible: bool,
    pub last_placement: Option<Placement>,
    pub stats: ControllerStats,
}

impl<E> ControllerState<E> {
    pub fn new() -> Self {
        Self {
            pointer: Point::ZERO,
            active: None,
            label: None,
            scheduled_frame: None,
            container: None,
            container_visible: false,
            listeners: None,
            observer: None,
            intent: Intent::HitTest,
            reposition: false,
            label_visible: false,
            last_placement: None,
            stats: ControllerStats::default(),
        }
    }
}

impl<E> Default for ControllerState<E> {
    fn default() -> Self {
        Self::new()
    }
}
