use core_types::Rect;
use html::{Id, Node, dom_utils::is_non_rendering_element};

pub mod hit_test;
pub mod text;

pub use hit_test::{HitResult, hit_test};
pub use text::{FixedAdvanceMeasurer, TextMeasurer};

const DEFAULT_FONT_PX: f32 = 16.0;

/// What kind of layout box this is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoxKind {
    /// The document itself; never a hit-test target.
    Viewport,
    Block,
    /// `display: flex`: children laid out left to right.
    Row,
    Text,
}

/// A node in the layout tree, in *document coordinates*.
#[derive(Clone, Debug)]
pub struct LayoutBox {
    pub node_id: Id,
    pub kind: BoxKind,
    pub rect: Rect,
    /// Resolved `pointer-events` (inherited).
    pub pointer_events: bool,
    /// `position: absolute | fixed` boxes are laid out against the document origin and do not
    /// take space in their parent.
    pub out_of_flow: bool,
    /// Resolved `font-size` in px (inherited).
    pub font_px: f32,
    pub children: Vec<LayoutBox>,
}

impl LayoutBox {
    pub fn find(&self, id: Id) -> Option<&LayoutBox> {
        if self.node_id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Height of the scrollable content, out-of-flow boxes included.
    pub fn content_bottom(&self) -> f32 {
        self.children
            .iter()
            .map(LayoutBox::content_bottom)
            .fold(self.rect.bottom(), f32::max)
    }

    pub fn content_right(&self) -> f32 {
        self.children
            .iter()
            .map(LayoutBox::content_right)
            .fold(self.rect.right(), f32::max)
    }
}

#[derive(Clone, Copy)]
struct Inherited {
    font_px: f32,
    pointer_events: bool,
}

/// Parse a CSS length in px. Bare numbers are accepted as px.
pub fn parse_px(value: &str) -> Option<f32> {
    let v = value.trim();
    let v = v.strip_suffix("px").unwrap_or(v).trim();
    v.parse::<f32>().ok().filter(|px| px.is_finite())
}

fn style_px(node: &Node, property: &str) -> Option<f32> {
    node.style_value(property).and_then(parse_px)
}

fn is_hidden(node: &Node) -> bool {
    matches!(node, Node::Comment { .. })
        || is_non_rendering_element(node)
        || node
            .style_value("display")
            .is_some_and(|d| d.eq_ignore_ascii_case("none"))
}

fn is_out_of_flow(node: &Node) -> bool {
    node.style_value("position")
        .is_some_and(|p| p.eq_ignore_ascii_case("absolute") || p.eq_ignore_ascii_case("fixed"))
}

fn is_row(node: &Node) -> bool {
    node.style_value("display")
        .is_some_and(|d| d.eq_ignore_ascii_case("flex") || d.eq_ignore_ascii_case("inline-flex"))
}

fn inherit(node: &Node, parent: Inherited) -> Inherited {
    let pointer_events = match node.style_value("pointer-events") {
        Some(v) if v.eq_ignore_ascii_case("none") => false,
        Some(v) if v.eq_ignore_ascii_case("auto") => true,
        _ => parent.pointer_events,
    };
    Inherited {
        font_px: style_px(node, "font-size").unwrap_or(parent.font_px),
        pointer_events,
    }
}

/// Shrink-to-fit width: explicit width, else the widest line of content plus padding.
fn natural_width(node: &Node, inh: Inherited, measurer: &dyn TextMeasurer) -> f32 {
    match node {
        Node::Text { text, .. } => measurer.measure(text.trim(), inh.font_px),
        Node::Element { .. } => {
            if let Some(w) = style_px(node, "width") {
                return w;
            }
            let inh = inherit(node, inh);
            let pad = style_px(node, "padding").unwrap_or(0.0);
            let flow = node
                .children()
                .iter()
                .filter(|c| !is_hidden(c) && !is_out_of_flow(c));
            let content = if is_row(node) {
                let gap = style_px(node, "gap").unwrap_or(0.0);
                let (sum, n) = flow.fold((0.0, 0usize), |(sum, n), c| {
                    (sum + natural_width(c, inh, measurer), n + 1)
                });
                sum + gap * n.saturating_sub(1) as f32
            } else {
                flow.map(|c| natural_width(c, inh, measurer))
                    .fold(0.0, f32::max)
            };
            content + pad * 2.0
        }
        _ => 0.0,
    }
}

/// Lay out a document for a viewport of `viewport_width` px.
pub fn layout_document(root: &Node, viewport_width: f32, measurer: &dyn TextMeasurer) -> LayoutBox {
    let inh = Inherited {
        font_px: DEFAULT_FONT_PX,
        pointer_events: true,
    };
    let mut out_of_flow = Vec::new();
    let mut children = Vec::new();
    let mut cursor_y = 0.0;
    for child in root.children() {
        if is_out_of_flow(child) {
            if let Some(b) = layout_node(child, 0.0, 0.0, viewport_width, inh, measurer, &mut out_of_flow) {
                out_of_flow.push(LayoutBox {
                    out_of_flow: true,
                    ..b
                });
            }
            continue;
        }
        if let Some(b) = layout_node(child, 0.0, cursor_y, viewport_width, inh, measurer, &mut out_of_flow) {
            cursor_y = b.rect.bottom();
            children.push(b);
        }
    }
    children.append(&mut out_of_flow);
    LayoutBox {
        node_id: root.id(),
        kind: BoxKind::Viewport,
        rect: Rect::new(0.0, 0.0, viewport_width, cursor_y),
        pointer_events: false,
        out_of_flow: false,
        font_px: inh.font_px,
        children,
    }
}

/// Returns the in-flow box for `node`. Out-of-flow descendants are hoisted into
/// `out_of_flow` so they paint and hit-test above the flow.
fn layout_node(
    node: &Node,
    x: f32,
    y: f32,
    available_width: f32,
    parent: Inherited,
    measurer: &dyn TextMeasurer,
    out_of_flow: &mut Vec<LayoutBox>,
) -> Option<LayoutBox> {
    if is_hidden(node) {
        return None;
    }

    if let Node::Text { id, text } = node {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let width = measurer.measure(text, parent.font_px).min(available_width.max(0.0));
        return Some(LayoutBox {
            node_id: *id,
            kind: BoxKind::Text,
            rect: Rect::new(x, y, width, measurer.line_height(parent.font_px)),
            pointer_events: parent.pointer_events,
            out_of_flow: false,
            font_px: parent.font_px,
            children: Vec::new(),
        });
    }

    let inh = inherit(node, parent);
    let positioned = is_out_of_flow(node);
    let (x, y) = if positioned {
        (
            style_px(node, "left").unwrap_or(0.0),
            style_px(node, "top").unwrap_or(0.0),
        )
    } else {
        (x, y)
    };
    let width = match style_px(node, "width") {
        Some(w) => w,
        None if positioned => natural_width(node, parent, measurer),
        None => available_width,
    }
    .max(0.0);
    let pad = style_px(node, "padding").unwrap_or(0.0);
    let gap = style_px(node, "gap").unwrap_or(0.0);
    let row = is_row(node);

    let content_x = x + pad;
    let content_y = y + pad;
    let content_w = (width - pad * 2.0).max(0.0);

    let mut children = Vec::new();
    let mut cursor_x = content_x;
    let mut cursor_y = content_y;
    let mut row_height: f32 = 0.0;
    for child in node.children() {
        if is_out_of_flow(child) {
            if let Some(b) = layout_node(child, 0.0, 0.0, content_w, inh, measurer, out_of_flow) {
                out_of_flow.push(LayoutBox {
                    out_of_flow: true,
                    ..b
                });
            }
            continue;
        }
        if row {
            let child_w = natural_width(child, inh, measurer);
            if let Some(b) = layout_node(child, cursor_x, content_y, child_w, inh, measurer, out_of_flow) {
                cursor_x = b.rect.right() + gap;
                row_height = row_height.max(b.rect.height);
                children.push(b);
            }
        } else if let Some(b) = layout_node(child, content_x, cursor_y, content_w, inh, measurer, out_of_flow) {
            cursor_y = b.rect.bottom();
            children.push(b);
        }
    }

    let content_h = if row { row_height } else { cursor_y - content_y };
    let height = style_px(node, "height").unwrap_or(content_h + pad * 2.0).max(0.0);

    Some(LayoutBox {
        node_id: node.id(),
        kind: if row { BoxKind::Row } else { BoxKind::Block },
        rect: Rect::new(x, y, width, height),
        pointer_events: inh.pointer_events,
        out_of_flow: false,
        font_px: inh.font_px,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::parse_document;

    fn layout(markup: &str, width: f32) -> LayoutBox {
        let dom = parse_document(markup);
        layout_document(&dom, width, &FixedAdvanceMeasurer { advance_em: 0.5 })
    }

    #[test]
    fn parse_px_accepts_suffix_and_bare_numbers() {
        assert_eq!(parse_px("12px"), Some(12.0));
        assert_eq!(parse_px(" 7.5 "), Some(7.5));
        assert_eq!(parse_px("3em"), None);
        assert_eq!(parse_px("NaN"), None);
    }

    #[test]
    fn blocks_stack_vertically() {
        let root = layout(
            r#"<div style="height:100px"></div><div style="height:50px"></div>"#,
            800.0,
        );
        assert_eq!(root.children[0].rect, Rect::new(0.0, 0.0, 800.0, 100.0));
        assert_eq!(root.children[1].rect, Rect::new(0.0, 100.0, 800.0, 50.0));
        assert_eq!(root.rect.height, 150.0);
    }

    #[test]
    fn flex_row_places_children_left_to_right_with_gap() {
        let root = layout(
            r#"<div style="display:flex;gap:4px;padding:10px">
                 <div style="width:40px;height:40px"></div>
                 <div style="width:40px;height:30px"></div>
               </div>"#,
            800.0,
        );
        let row = &root.children[0];
        assert_eq!(row.kind, BoxKind::Row);
        assert_eq!(row.children[0].rect, Rect::new(10.0, 10.0, 40.0, 40.0));
        assert_eq!(row.children[1].rect, Rect::new(54.0, 10.0, 40.0, 30.0));
        assert_eq!(row.rect.height, 60.0);
    }

    #[test]
    fn absolute_box_shrinks_to_text_and_leaves_flow() {
        let root = layout(
            r#"<div style="height:20px"></div>
               <div style="position:absolute;pointer-events:none;padding:2px;font-size:10px">abcd</div>
               <div style="height:20px"></div>"#,
            800.0,
        );
        // flow: two blocks, then the hoisted label
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.children[1].rect.y, 20.0);
        let label = &root.children[2];
        assert!(label.out_of_flow);
        assert!(!label.pointer_events);
        assert_eq!(label.rect, Rect::new(0.0, 0.0, 24.0, 16.0));
    }

    #[test]
    fn display_none_and_comments_produce_no_boxes() {
        let root = layout(
            r#"<!-- c --><div style="display:none;height:10px"></div><head></head>"#,
            100.0,
        );
        assert!(root.children.is_empty());
    }

    #[test]
    fn content_bottom_includes_tall_descendants() {
        let root = layout(
            r#"<div style="height:10px"><div style="height:300px"></div></div>"#,
            100.0,
        );
        assert_eq!(root.rect.height, 10.0);
        assert_eq!(root.content_bottom(), 300.0);
    }
}
