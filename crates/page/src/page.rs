use crate::document::Document;
use core_types::{Point, Size};
use html::Id;
use tooltip::{Placement, Signal, TooltipConfig, TooltipController, TooltipHost};

/// Index of a controller within its [`Page`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControllerId(usize);

/// What one [`Page::tick`] delivered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub frames: usize,
    pub intersections: usize,
}

/// One document plus the tooltip controllers mounted on it.
///
/// Signals, frames and intersection records reach a controller only through handles the
/// document still considers live, the way a browser only calls registered callbacks.
#[derive(Debug)]
pub struct Page {
    document: Document,
    controllers: Vec<TooltipController<Document>>,
    pointer: Option<Point>,
    hovered: Option<Id>,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            controllers: Vec::new(),
            pointer: None,
            hovered: None,
        }
    }

    pub fn parse(markup: &str, viewport: Size) -> Self {
        Self::new(Document::parse(markup, viewport))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn controller(&self, id: ControllerId) -> Option<&TooltipController<Document>> {
        self.controllers.get(id.0)
    }

    pub fn controllers(&self) -> impl Iterator<Item = (ControllerId, &TooltipController<Document>)> {
        self.controllers
            .iter()
            .enumerate()
            .map(|(i, c)| (ControllerId(i), c))
    }

    /// Create and mount a controller.
    pub fn mount(&mut self, config: TooltipConfig) -> ControllerId {
        let mut controller = TooltipController::new(config);
        controller.mount(&mut self.document);
        self.controllers.push(controller);
        ControllerId(self.controllers.len() - 1)
    }

    /// Mount an existing controller again after [`Page::unmount`].
    pub fn remount(&mut self, id: ControllerId) {
        if let Some(c) = self.controllers.get_mut(id.0) {
            c.mount(&mut self.document);
        }
    }

    pub fn unmount(&mut self, id: ControllerId) {
        if let Some(c) = self.controllers.get_mut(id.0) {
            c.unmount(&mut self.document);
        }
    }

    pub fn unmount_all(&mut self) {
        for c in &mut self.controllers {
            c.unmount(&mut self.document);
        }
    }

    /// Activate `trigger` directly, bypassing resolution.
    pub fn show(&mut self, id: ControllerId, trigger: Id) {
        if let Some(c) = self.controllers.get_mut(id.0) {
            c.show(&mut self.document, trigger);
        }
    }

    pub fn hide(&mut self, id: ControllerId) {
        if let Some(c) = self.controllers.get_mut(id.0) {
            c.hide(&mut self.document);
        }
    }

    fn dispatch(&mut self, signal: Signal<Id>) {
        for c in &mut self.controllers {
            if c.listeners().is_some_and(|l| self.document.has_listeners(l)) {
                c.handle_signal(&mut self.document, signal.clone());
            }
        }
    }

    /// Raw pointer-move, viewport coordinates.
    pub fn pointer_move(&mut self, to: Point) {
        self.pointer = Some(to);
        self.dispatch(Signal::PointerMove(to));
    }

    pub fn pointer_enter(&mut self, target: Id) {
        if self.document.is_connected(&target) {
            self.dispatch(Signal::PointerEnter(target));
        }
    }

    pub fn pointer_leave(&mut self, target: Id) {
        if self.document.is_connected(&target) {
            self.dispatch(Signal::PointerLeave(target));
        }
    }

    /// Move the pointer the way a browser reports it: leave the element it was over, enter the
    /// new one, then the move itself.
    pub fn pointer_move_to(&mut self, to: Point) {
        let over = self.document.hit(to);
        if over != self.hovered {
            if let Some(prev) = self.hovered.take() {
                self.pointer_leave(prev);
            }
            if let Some(next) = over {
                self.pointer_enter(next);
            }
            self.hovered = over;
        }
        self.pointer_move(to);
    }

    /// The pointer left the window.
    pub fn pointer_exit(&mut self) {
        if let Some(prev) = self.hovered.take() {
            self.pointer_leave(prev);
        }
    }

    pub fn scroll_to(&mut self, to: Point) {
        if self.document.scroll_to(to) {
            self.dispatch(Signal::Scroll);
        }
    }

    pub fn scroll_by(&mut self, dx: f32, dy: f32) {
        let s = self.document.scroll();
        self.scroll_to(Point::new(s.x + dx, s.y + dy));
    }

    pub fn resize(&mut self, viewport: Size) {
        let changed = self.document.viewport() != viewport;
        let clamped = self.document.resize(viewport);
        if changed || clamped {
            self.dispatch(Signal::Resize);
        }
    }

    /// Re-resolve the trigger under the last pointer position right away.
    pub fn refresh(&mut self, id: ControllerId) {
        if let Some(c) = self.controllers.get_mut(id.0) {
            c.refresh(&mut self.document);
        }
    }

    /// Place the label for `trigger` again without changing which trigger is active.
    pub fn position(&mut self, id: ControllerId, trigger: Id) -> Option<Placement> {
        self.controllers
            .get_mut(id.0)?
            .position(&mut self.document, &trigger)
    }

    /// One animation frame: run due frame callbacks, then deliver intersection records.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();

        for frame in self.document.take_frames() {
            let owner = self
                .controllers
                .iter_mut()
                .find(|c| c.pending_frame() == Some(frame));
            if let Some(c) = owner {
                c.on_frame(&mut self.document, frame);
                report.frames += 1;
            }
        }

        for (observer, visible) in self.document.take_intersection_records() {
            let owner = self
                .controllers
                .iter_mut()
                .find(|c| c.observer() == Some(observer));
            if let Some(c) = owner {
                c.on_intersection(&mut self.document, observer, visible);
                report.intersections += 1;
            }
        }

        if report != TickReport::default() {
            log::trace!(target: "page.document", "tick {report:?}");
        }
        report
    }
}
