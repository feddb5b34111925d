use crate::EguiTextMeasurer;
use crate::paint::{PaintArgs, paint_page};
use core_types::{Point, Size};
use egui::{Pos2, Sense, Ui, Vec2};
use page::Page;

/// Per-window bookkeeping that outlives a single egui pass.
#[derive(Debug, Default)]
pub struct ViewportState {
    measurer_installed: bool,
    last_size: Option<Size>,
    last_pointer: Option<Pos2>,
}

#[derive(Clone, Copy, Debug)]
pub struct ViewportConfig<'a> {
    pub visible_attr: &'a str,
    /// Multiplier applied to egui's scroll delta.
    pub scroll_speed: f32,
}

impl Default for ViewportConfig<'_> {
    fn default() -> Self {
        Self {
            visible_attr: "data-show",
            scroll_speed: 1.0,
        }
    }
}

/// Draw `page` into the remaining space of `ui` and feed it this pass's pointer and wheel input.
///
/// The page owns scrolling, so no egui `ScrollArea` is involved: wheel deltas go straight to
/// [`Page::scroll_by`] and the document is painted at `-scroll`.
pub fn page_viewport(ui: &mut Ui, page: &mut Page, state: &mut ViewportState, config: ViewportConfig<'_>) {
    if !state.measurer_installed {
        page.document_mut()
            .set_measurer(Box::new(EguiTextMeasurer::new(ui.ctx())));
        state.measurer_installed = true;
    }

    let (content_rect, resp) = ui.allocate_exact_size(ui.available_size(), Sense::hover());

    let size = Size::new(content_rect.width(), content_rect.height());
    if state.last_size != Some(size) {
        page.resize(size);
        state.last_size = Some(size);
    }

    match resp.hover_pos() {
        Some(pos) if state.last_pointer != Some(pos) => {
            let local = pos - content_rect.min;
            page.pointer_move_to(Point::new(local.x, local.y));
            state.last_pointer = Some(pos);
        }
        Some(_) => {}
        None => {
            if state.last_pointer.take().is_some() {
                page.pointer_exit();
            }
        }
    }

    if resp.hovered() {
        let delta = ui.input(|i| i.smooth_scroll_delta) * config.scroll_speed;
        if delta != Vec2::ZERO {
            page.scroll_by(-delta.x, -delta.y);
        }
    }

    let scroll = page.document().scroll();
    let painter = ui.painter_at(content_rect);
    paint_page(
        page.document(),
        PaintArgs {
            painter: &painter,
            origin: content_rect.min - Vec2::new(scroll.x, scroll.y),
            visible_attr: config.visible_attr,
        },
    );
}
