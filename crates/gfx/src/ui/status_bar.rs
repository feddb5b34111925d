use egui::{Context, RichText, TopBottomPanel, Ui};
use page::Page;
use tooltip::TooltipHost;

#[derive(Debug, Clone, Copy)]
pub struct StatusBarConfig {
    pub height: f32,
}

impl Default for StatusBarConfig {
    fn default() -> Self {
        Self { height: 24.0 }
    }
}

pub fn status_bar(ctx: &Context, page: &Page) {
    status_bar_with_config(ctx, page, StatusBarConfig::default());
}

pub fn status_bar_with_config(ctx: &Context, page: &Page, config: StatusBarConfig) {
    TopBottomPanel::bottom("hovertip_status")
        .exact_height(config.height.max(1.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| controller_summary(ui, page));
        });
}

/// One entry per controller: its phase, the active trigger's content and pass counters.
pub fn controller_summary(ui: &mut Ui, page: &Page) {
    let doc = page.document();
    let scroll = doc.scroll();
    ui.label(RichText::new(format!("scroll {:.0},{:.0}", scroll.x, scroll.y)).monospace());

    for (id, controller) in page.controllers() {
        ui.separator();
        let content_attr = &controller.config().content_attr;
        let active = controller
            .active()
            .map(|t| doc.attribute(t, content_attr).unwrap_or_else(|| "(no content)".into()))
            .unwrap_or_else(|| "-".into());
        let stats = controller.stats();
        ui.label(
            RichText::new(format!(
                "{id:?} {:?} active={active} passes={} shows={} hides={}",
                controller.phase(),
                stats.passes,
                stats.shows,
                stats.hides
            ))
            .monospace(),
        );
    }
}
