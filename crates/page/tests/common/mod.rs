#![allow(dead_code)]

use core_types::{Point, Size};
use html::{Id, parse_document};
use layout::FixedAdvanceMeasurer;
use page::{ControllerId, Document, LabelMetrics, Mutation, Page};
use std::collections::BTreeSet;
use tooltip::TooltipConfig;

pub const VIEWPORT: Size = Size::new(1024.0, 768.0);

/// Color-swatch page. With the test metrics every label character is 5px wide and labels are
/// 12px tall, so "Sixteen chars!!!" measures exactly 80px.
pub const SWATCHES: &str = r#"
    <div id="header" style="height:80px;padding:40px">
      <div id="logo" data-tooltip-trigger data-tooltip-content="Home" style="width:30px;height:30px"></div>
    </div>
    <section id="swatches" data-tooltip-container style="height:600px;padding:20px">
      <div id="row" style="display:flex;gap:8px">
        <div id="red" data-tooltip-trigger data-tooltip-content="Red 500" style="width:40px;height:40px">
          <span id="red-dot" style="width:10px;height:10px"></span>
        </div>
        <div id="green" data-tooltip-trigger data-tooltip-content="Green 500" style="width:40px;height:40px"></div>
        <div id="blank" data-tooltip-trigger style="width:40px;height:40px"></div>
        <div id="hint" data-hint data-hint-content="Hint" style="width:40px;height:40px"></div>
      </div>
    </section>
    <div id="edge" data-tooltip-trigger data-tooltip-content="Sixteen chars!!!"
         style="position:absolute;left:1000px;top:300px;width:20px;height:20px"></div>
    <div id="left-edge" data-tooltip-trigger data-tooltip-content="Sixteen chars!!!"
         style="position:absolute;left:0px;top:400px;width:10px;height:10px"></div>
    <div id="spacer" style="height:3000px"></div>
"#;

pub fn page_from(markup: &str) -> Page {
    let mut doc = Document::with_measurer(
        parse_document(markup),
        VIEWPORT,
        Box::new(FixedAdvanceMeasurer { advance_em: 0.5 }),
    );
    doc.set_label_metrics(LabelMetrics {
        padding: 0.0,
        font_px: 10.0,
    });
    Page::new(doc)
}

pub fn swatches() -> Page {
    page_from(SWATCHES)
}

/// Mount and deliver the first intersection record, so a visible container opens the gate.
pub fn mounted(config: TooltipConfig) -> (Page, ControllerId) {
    let mut page = swatches();
    let id = page.mount(config);
    page.tick();
    (page, id)
}

pub fn el(page: &Page, html_id: &str) -> Id {
    page.document()
        .element_by_id(html_id)
        .unwrap_or_else(|| panic!("no element #{html_id}"))
}

/// Viewport-relative center of an element.
pub fn center(page: &Page, html_id: &str) -> Point {
    let r = page.document().element_rect(el(page, html_id)).expect("laid out");
    let s = page.document().scroll();
    Point::new(r.x + r.width / 2.0 - s.x, r.y + r.height / 2.0 - s.y)
}

pub fn hover(page: &mut Page, html_id: &str) {
    let p = center(page, html_id);
    page.pointer_move_to(p);
    page.tick();
}

pub fn active(page: &Page, id: ControllerId) -> Option<Id> {
    page.controller(id).and_then(|c| c.active().copied())
}

pub fn label(page: &Page, id: ControllerId) -> Id {
    *page.controller(id).and_then(|c| c.label()).expect("label")
}

pub fn label_shown(page: &Page, id: ControllerId) -> bool {
    let Some(label) = page.controller(id).and_then(|c| c.label()) else {
        return false;
    };
    page.document().has_attribute(*label, "data-show")
}

pub fn label_text(page: &Page, id: ControllerId) -> String {
    let node = page.document().node(label(page, id)).expect("label connected");
    html::dom_utils::text_content(node)
}

/// Replays the mutation log and returns the largest number of elements that carried
/// `attr` at any one time.
pub fn max_concurrent(mutations: &[Mutation], attr: &str) -> usize {
    let mut carrying = BTreeSet::new();
    let mut max = 0;
    for m in mutations {
        match m {
            Mutation::SetAttribute { node, name, .. } if name == attr => {
                carrying.insert(*node);
            }
            Mutation::RemoveAttribute { node, name } if name == attr => {
                carrying.remove(node);
            }
            Mutation::Remove { node } => {
                carrying.remove(node);
            }
            _ => {}
        }
        max = max.max(carrying.len());
    }
    max
}

pub fn touches(mutations: &[Mutation], target: Id) -> bool {
    mutations.iter().any(|m| match m {
        Mutation::SetAttribute { node, .. }
        | Mutation::RemoveAttribute { node, .. }
        | Mutation::SetText { node, .. }
        | Mutation::Translate { node, .. }
        | Mutation::Insert { node }
        | Mutation::Remove { node } => *node == target,
    })
}
