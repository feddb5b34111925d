mod color;

pub use color::parse_color;

use egui::{Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, Vec2};
use html::dom_utils::{get_attr, has_attr, text_content};
use layout::{BoxKind, LayoutBox};
use page::Document;

/// gray-950 at 90%
const LABEL_FILL: Color32 = Color32::from_rgba_premultiplied(3, 6, 16, 230);
const LABEL_TEXT: Color32 = Color32::WHITE;
const DEFAULT_TEXT: Color32 = Color32::from_rgb(17, 24, 39);

#[derive(Clone, Copy)]
pub struct PaintArgs<'a> {
    pub painter: &'a Painter,
    /// Screen position of the document origin (already offset by the scroll position).
    pub origin: Pos2,
    /// Marker that reveals a tooltip label; labels without it are not painted.
    pub visible_attr: &'a str,
}

pub fn paint_page(doc: &Document, args: PaintArgs<'_>) {
    paint_layout_box(doc, doc.layout(), Vec2::ZERO, DEFAULT_TEXT, args);
}

fn paint_layout_box(
    doc: &Document,
    layout: &LayoutBox,
    offset: Vec2,
    color: Color32,
    args: PaintArgs<'_>,
) {
    let Some(node) = doc.node(layout.node_id) else {
        return;
    };
    let offset = match doc.translation(layout.node_id) {
        Some(t) => offset + Vec2::new(t.x, t.y),
        None => offset,
    };
    let rect = Rect::from_min_size(
        args.origin + offset + Vec2::new(layout.rect.x, layout.rect.y),
        Vec2::new(layout.rect.width, layout.rect.height),
    );

    if layout.kind == BoxKind::Text {
        args.painter.text(
            rect.min,
            Align2::LEFT_TOP,
            text_content(node).trim(),
            FontId::proportional(layout.font_px),
            color,
        );
        return;
    }

    let is_label = get_attr(node, "role") == Some("tooltip");
    let color = if is_label {
        if !has_attr(node, args.visible_attr) {
            return;
        }
        let radius = (rect.height() / 2.0).clamp(0.0, u8::MAX as f32) as u8;
        args.painter
            .rect_filled(rect, CornerRadius::same(radius), LABEL_FILL);
        LABEL_TEXT
    } else {
        let background = node
            .style_value("background")
            .or_else(|| node.style_value("background-color"))
            .and_then(parse_color);
        if let Some(bg) = background.filter(|c| c.a() > 0) {
            args.painter.rect_filled(rect, 0.0, bg);
        }
        node.style_value("color").and_then(parse_color).unwrap_or(color)
    };

    for child in &layout.children {
        paint_layout_box(doc, child, offset, color, args);
    }
}
