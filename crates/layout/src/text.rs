/// Layout depends on this without knowing about egui, wgpu, etc.
pub trait TextMeasurer {
    /// Width of `text` in CSS px at `font_px`.
    fn measure(&self, text: &str, font_px: f32) -> f32;

    /// Line height in CSS px at `font_px`.
    fn line_height(&self, font_px: f32) -> f32 {
        font_px * 1.2
    }
}

/// Deterministic measurer: every char advances by `advance_em * font_px`.
/// Used by the headless runtime and tests, where no font system exists.
#[derive(Clone, Copy, Debug)]
pub struct FixedAdvanceMeasurer {
    pub advance_em: f32,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self { advance_em: 0.6 }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, font_px: f32) -> f32 {
        text.chars().count() as f32 * self.advance_em * font_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_advance_counts_chars_not_bytes() {
        let m = FixedAdvanceMeasurer { advance_em: 0.5 };
        assert_eq!(m.measure("abcd", 10.0), 20.0);
        assert_eq!(m.measure("é", 10.0), 5.0);
        assert_eq!(m.line_height(10.0), 12.0);
    }
}
