use std::cell::RefCell;
use std::collections::HashMap;

use egui::{Color32, Context, FontId};
use layout::TextMeasurer;

/// `egui`-backed adapter for measuring text during layout.
///
/// Only valid inside an egui pass: egui has no fonts before the first one.
pub struct EguiTextMeasurer {
    ctx: Context,
    space_width_cache: RefCell<HashMap<u32, f32>>,
}

impl EguiTextMeasurer {
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            space_width_cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    fn width(&self, text: String, font_id: FontId) -> f32 {
        // color does not affect metrics
        self.ctx
            .fonts(|f| f.layout_no_wrap(text, font_id, Color32::WHITE).rect.width())
    }

    fn space_width(&self, font_px: f32) -> f32 {
        let key = font_px.round().max(0.0) as u32;
        if let Some(w) = self.space_width_cache.borrow().get(&key).copied() {
            return w;
        }

        let font_id = FontId::proportional(font_px);
        // egui trims a lone ASCII space; NBSP keeps its advance
        let w_nbsp = self.width("\u{00A0}".to_owned(), font_id.clone());
        let w = if w_nbsp.is_finite() && w_nbsp > 0.0 {
            w_nbsp
        } else {
            let with = self.width("x\u{00A0}x".to_owned(), font_id.clone());
            let without = self.width("xx".to_owned(), font_id);
            let w = (with - without).max(0.0);
            if w.is_finite() && w > 0.0 { w } else { (font_px * 0.33).max(1.0) }
        };

        self.space_width_cache.borrow_mut().insert(key, w);
        w
    }
}

impl TextMeasurer for EguiTextMeasurer {
    fn measure(&self, text: &str, font_px: f32) -> f32 {
        if text == " " {
            return self.space_width(font_px);
        }
        self.width(text.to_owned(), FontId::proportional(font_px))
    }
}
