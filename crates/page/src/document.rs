use core_types::{FrameHandle, HandleSeq, ListenerHandle, ObserverHandle, Point, Rect, Size};
use html::dom_utils::{
    append_child, closest_with_attr, find_first_with_attr, find_first_with_attr_value,
    find_node_by_id, find_node_by_id_mut, get_attr, max_node_id, remove_attr, remove_node,
    set_attr, set_text_content,
};
use html::{Id, Node, parse_document, parse_inline_style};
use layout::{FixedAdvanceMeasurer, LayoutBox, TextMeasurer, hit_test, layout_document};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use tooltip::{LabelSpec, TooltipHost};

/// Chrome the document adds around label text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelMetrics {
    pub padding: f32,
    pub font_px: f32,
}

impl Default for LabelMetrics {
    fn default() -> Self {
        // text-xs with a little breathing room
        Self {
            padding: 6.0,
            font_px: 12.0,
        }
    }
}

/// Observable writes, in order. Tests use this to check what the controller touched.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    SetAttribute { node: Id, name: String, value: String },
    RemoveAttribute { node: Id, name: String },
    SetText { node: Id, text: String },
    Translate { node: Id, to: Point },
    Insert { node: Id },
    Remove { node: Id },
}

#[derive(Clone, Copy, Debug)]
struct Observation {
    target: Id,
    last: Option<bool>,
}

/// A headless document: DOM, layout, viewport and the runtime services a tooltip controller
/// subscribes to. Nothing here knows about controllers; [`crate::Page`] does the routing.
pub struct Document {
    root: Node,
    next_id: u32,
    layout: LayoutBox,
    measurer: Box<dyn TextMeasurer>,
    label_metrics: LabelMetrics,
    viewport: Size,
    scroll: Point,
    coarse_pointer: bool,
    translations: HashMap<Id, Point>,
    handles: HandleSeq,
    frames: VecDeque<FrameHandle>,
    listeners: BTreeSet<ListenerHandle>,
    observers: BTreeMap<ObserverHandle, Observation>,
    mutations: Vec<Mutation>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("viewport", &self.viewport)
            .field("scroll", &self.scroll)
            .field("frames", &self.frames.len())
            .field("listeners", &self.listeners.len())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

fn stamp_ids(node: &mut Node, next: &mut u32) {
    if node.id() == Id(0) {
        node.set_id(Id(*next));
        *next = next.wrapping_add(1);
    }
    if let Some(children) = node.children_mut() {
        for c in children {
            stamp_ids(c, next);
        }
    }
}

impl Document {
    pub fn new(root: Node, viewport: Size) -> Self {
        Self::with_measurer(root, viewport, Box::new(FixedAdvanceMeasurer::default()))
    }

    pub fn parse(markup: &str, viewport: Size) -> Self {
        Self::new(parse_document(markup), viewport)
    }

    pub fn with_measurer(root: Node, viewport: Size, measurer: Box<dyn TextMeasurer>) -> Self {
        let next_id = max_node_id(&root).0.saturating_add(1).max(1);
        let layout = layout_document(&root, viewport.width, measurer.as_ref());
        let mut doc = Self {
            root,
            next_id,
            layout,
            measurer,
            label_metrics: LabelMetrics::default(),
            viewport,
            scroll: Point::ZERO,
            coarse_pointer: false,
            translations: HashMap::new(),
            handles: HandleSeq::new(),
            frames: VecDeque::new(),
            listeners: BTreeSet::new(),
            observers: BTreeMap::new(),
            mutations: Vec::new(),
        };
        doc.relayout();
        doc
    }

    pub fn set_measurer(&mut self, measurer: Box<dyn TextMeasurer>) {
        self.measurer = measurer;
        self.relayout();
    }

    /// Applies to labels created after the call.
    pub fn set_label_metrics(&mut self, metrics: LabelMetrics) {
        self.label_metrics = metrics;
    }

    pub fn set_coarse_pointer(&mut self, coarse: bool) {
        self.coarse_pointer = coarse;
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn layout(&self) -> &LayoutBox {
        &self.layout
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn scroll(&self) -> Point {
        self.scroll
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        find_node_by_id(&self.root, id)
    }

    /// Element with the given `id` attribute.
    pub fn element_by_id(&self, html_id: &str) -> Option<Id> {
        find_first_with_attr_value(&self.root, "id", html_id)
    }

    pub fn get_attribute(&self, id: Id, name: &str) -> Option<&str> {
        self.node(id).and_then(|n| get_attr(n, name))
    }

    pub fn has_attribute(&self, id: Id, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    /// All elements carrying `name`, in document order.
    pub fn elements_with_attribute(&self, name: &str) -> Vec<Id> {
        fn walk(node: &Node, name: &str, out: &mut Vec<Id>) {
            if get_attr(node, name).is_some() {
                out.push(node.id());
            }
            node.children().iter().for_each(|c| walk(c, name, out));
        }
        let mut out = Vec::new();
        walk(&self.root, name, &mut out);
        out
    }

    pub fn translation(&self, id: Id) -> Option<Point> {
        self.translations.get(&id).copied()
    }

    /// Border box in document coordinates, translation included.
    pub fn element_rect(&self, id: Id) -> Option<Rect> {
        let b = self.layout.find(id)?;
        let t = self.translation(id).unwrap_or(Point::ZERO);
        Some(b.rect.translate(t.x, t.y))
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.mutations)
    }

    // --- viewport ------------------------------------------------------------

    /// Resize the viewport. Returns `true` if the scroll offset had to be clamped.
    pub fn resize(&mut self, viewport: Size) -> bool {
        self.viewport = viewport;
        let before = self.scroll;
        self.relayout();
        self.scroll != before
    }

    /// Scroll to `to` (clamped). Returns `true` if the offset changed.
    pub fn scroll_to(&mut self, to: Point) -> bool {
        let clamped = self.clamp_scroll(to);
        if clamped == self.scroll {
            return false;
        }
        self.scroll = clamped;
        true
    }

    fn clamp_scroll(&self, p: Point) -> Point {
        let max_x = (self.layout.content_right() - self.viewport.width).max(0.0);
        let max_y = (self.layout.content_bottom() - self.viewport.height).max(0.0);
        let clamp = |v: f32, max: f32| if v.is_finite() { v.clamp(0.0, max) } else { 0.0 };
        Point::new(clamp(p.x, max_x), clamp(p.y, max_y))
    }

    fn relayout(&mut self) {
        self.layout = layout_document(&self.root, self.viewport.width, self.measurer.as_ref());
        self.scroll = self.clamp_scroll(self.scroll);
    }

    // --- mutation --------------------------------------------------------------

    /// Detach `id` and its subtree. Handles to detached nodes stay valid but disconnected.
    pub fn remove(&mut self, id: Id) -> bool {
        if remove_node(&mut self.root, id).is_none() {
            return false;
        }
        self.translations.remove(&id);
        self.mutations.push(Mutation::Remove { node: id });
        self.relayout();
        true
    }

    pub fn append(&mut self, parent: Id, mut child: Node) -> Option<Id> {
        stamp_ids(&mut child, &mut self.next_id);
        let id = child.id();
        if !append_child(&mut self.root, parent, child) {
            return None;
        }
        self.mutations.push(Mutation::Insert { node: id });
        self.relayout();
        Some(id)
    }

    // --- runtime services ------------------------------------------------------

    /// Frame handles requested so far. Handles requested while these run go to the next batch.
    pub fn take_frames(&mut self) -> Vec<FrameHandle> {
        self.frames.drain(..).collect()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn has_listeners(&self, listeners: ListenerHandle) -> bool {
        self.listeners.contains(&listeners)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Threshold-0 visibility: any area shared with the viewport.
    pub fn is_in_viewport(&self, id: Id) -> bool {
        let viewport = Rect::new(
            self.scroll.x,
            self.scroll.y,
            self.viewport.width,
            self.viewport.height,
        );
        self.element_rect(id).is_some_and(|r| r.overlaps(&viewport))
    }

    /// Intersection records for observers whose target changed visibility since the last
    /// delivery. The first check of a new observer always produces a record.
    pub fn take_intersection_records(&mut self) -> Vec<(ObserverHandle, bool)> {
        let current: Vec<(ObserverHandle, bool)> = self
            .observers
            .iter()
            .map(|(h, o)| (*h, self.is_in_viewport(o.target)))
            .collect();
        let mut records = Vec::new();
        for (handle, visible) in current {
            let Some(obs) = self.observers.get_mut(&handle) else {
                continue;
            };
            if obs.last != Some(visible) {
                obs.last = Some(visible);
                log::debug!(
                    target: "page.document",
                    "observer {} target {:?} visible={visible}",
                    handle.as_raw(),
                    obs.target
                );
                records.push((handle, visible));
            }
        }
        records
    }

    /// Topmost hit-testable element under a viewport point.
    pub fn hit(&self, point: Point) -> Option<Id> {
        let doc = Point::new(point.x + self.scroll.x, point.y + self.scroll.y);
        hit_test(&self.layout, doc).map(|h| h.node_id)
    }
}

impl TooltipHost for Document {
    type Element = Id;

    fn element_from_point(&self, point: Point) -> Option<Id> {
        self.hit(point)
    }

    fn closest(&self, element: &Id, attr: &str) -> Option<Id> {
        closest_with_attr(&self.root, *element, attr)
    }

    fn query_attr(&self, attr: &str) -> Option<Id> {
        find_first_with_attr(&self.root, attr)
    }

    fn is_connected(&self, element: &Id) -> bool {
        self.node(*element).is_some()
    }

    fn attribute(&self, element: &Id, name: &str) -> Option<String> {
        self.get_attribute(*element, name).map(str::to_string)
    }

    fn bounding_client_rect(&self, element: &Id) -> Rect {
        self.element_rect(*element)
            .map(|r| r.translate(-self.scroll.x, -self.scroll.y))
            .unwrap_or(Rect::ZERO)
    }

    fn scroll_offset(&self) -> Point {
        self.scroll
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn prefers_coarse_pointer(&self) -> bool {
        self.coarse_pointer
    }

    fn create_label(&mut self, spec: &LabelSpec<'_>) -> Option<Id> {
        let m = self.label_metrics;
        let style = format!(
            "{}padding:{}px;font-size:{}px;",
            spec.style, m.padding, m.font_px
        );
        let mut label = Node::element("div");
        for (name, value) in [
            ("id", spec.id),
            ("class", spec.class),
            ("role", spec.role),
            ("aria-hidden", "true"),
            ("style", style.as_str()),
        ] {
            set_attr(&mut label, name, value);
        }
        if let Node::Element { style: parsed, .. } = &mut label {
            *parsed = parse_inline_style(&style);
        }
        let id = self.append(self.root.id(), label)?;
        log::debug!(target: "page.document", "created label {id:?}");
        Some(id)
    }

    fn remove_element(&mut self, element: &Id) {
        if self.remove(*element) {
            log::debug!(target: "page.document", "removed {element:?}");
        }
    }

    fn set_text(&mut self, element: &Id, text: &str) {
        if !set_text_content(&mut self.root, *element, text) {
            return;
        }
        if let Some(children) = find_node_by_id_mut(&mut self.root, *element).and_then(Node::children_mut) {
            for c in children {
                stamp_ids(c, &mut self.next_id);
            }
        }
        self.mutations.push(Mutation::SetText {
            node: *element,
            text: text.to_string(),
        });
        self.relayout();
    }

    /// Elements without rendered content (no box, or a box with no children) measure zero.
    fn measure(&mut self, element: &Id) -> Size {
        match self.layout.find(*element) {
            Some(b) if !b.children.is_empty() => Size::new(b.rect.width, b.rect.height),
            _ => Size::ZERO,
        }
    }

    fn set_translation(&mut self, element: &Id, to: Point) {
        if !self.is_connected(element) {
            return;
        }
        self.translations.insert(*element, to);
        self.mutations.push(Mutation::Translate { node: *element, to });
    }

    fn set_attribute(&mut self, element: &Id, name: &str, value: &str) {
        let Some(node) = find_node_by_id_mut(&mut self.root, *element) else {
            return;
        };
        if set_attr(node, name, value) {
            self.mutations.push(Mutation::SetAttribute {
                node: *element,
                name: name.to_string(),
                value: value.to_string(),
            });
        }
    }

    fn remove_attribute(&mut self, element: &Id, name: &str) {
        let Some(node) = find_node_by_id_mut(&mut self.root, *element) else {
            return;
        };
        if remove_attr(node, name) {
            self.mutations.push(Mutation::RemoveAttribute {
                node: *element,
                name: name.to_string(),
            });
        }
    }

    fn request_frame(&mut self) -> FrameHandle {
        let frame = FrameHandle::from_raw(self.handles.next_raw());
        self.frames.push_back(frame);
        frame
    }

    fn cancel_frame(&mut self, frame: FrameHandle) {
        self.frames.retain(|f| *f != frame);
    }

    fn add_listeners(&mut self) -> ListenerHandle {
        let listeners = ListenerHandle::from_raw(self.handles.next_raw());
        self.listeners.insert(listeners);
        log::trace!(target: "page.document", "listeners {} attached", listeners.as_raw());
        listeners
    }

    fn remove_listeners(&mut self, listeners: ListenerHandle) {
        if self.listeners.remove(&listeners) {
            log::trace!(target: "page.document", "listeners {} detached", listeners.as_raw());
        }
    }

    fn observe_intersection(&mut self, element: &Id) -> ObserverHandle {
        let observer = ObserverHandle::from_raw(self.handles.next_raw());
        self.observers.insert(
            observer,
            Observation {
                target: *element,
                last: None,
            },
        );
        observer
    }

    fn disconnect_observer(&mut self, observer: ObserverHandle) {
        self.observers.remove(&observer);
    }
}
