mod common;

use common::*;
use core_types::Point;
use page::Mutation;
use tooltip::{Side, TooltipConfig};

#[test]
fn label_near_right_edge_is_clamped_inside_viewport() {
    let (mut page, c) = mounted(TooltipConfig::default());
    hover(&mut page, "edge");

    let placement = page.controller(c).unwrap().last_placement().unwrap();
    // 1024 - 6 - 80, not the unclamped 1010 - 40
    assert_eq!(placement.left, 938.0);
    assert_eq!(placement.top, 276.0);
    assert_eq!(placement.side, Side::Above);

    let rect = page.document().element_rect(label(&page, c)).unwrap();
    assert_eq!(rect.x, 938.0);
    assert_eq!(rect.width, 80.0);
    assert!(rect.right() <= 1024.0 - 6.0);
    assert_eq!(label_text(&page, c), "Sixteen chars!!!");
    assert!(label_shown(&page, c));
}

#[test]
fn label_near_left_edge_is_clamped_inside_viewport() {
    let (mut page, c) = mounted(TooltipConfig::default());
    hover(&mut page, "left-edge");
    let placement = page.controller(c).unwrap().last_placement().unwrap();
    assert_eq!(placement.left, 6.0);
}

#[test]
fn label_is_centered_over_trigger_when_room_allows() {
    let (mut page, c) = mounted(TooltipConfig::default());
    hover(&mut page, "red");

    // "Red 500" is 35px wide, red spans x 20..60
    let placement = page.controller(c).unwrap().last_placement().unwrap();
    assert_eq!(placement.left, 22.5);
    assert_eq!(placement.top, 76.0);
    assert_eq!(placement.side, Side::Above);
}

#[test]
fn label_flips_below_trigger_under_fixed_header() {
    let config = TooltipConfig {
        margin_top: 86.0,
        ..TooltipConfig::default()
    };
    let (mut page, c) = mounted(config);

    // logo top 40: 40 - 24 = 16 is inside the reserved 86px
    hover(&mut page, "logo");
    let placement = page.controller(c).unwrap().last_placement().unwrap();
    assert_eq!(placement.side, Side::Below);
    assert_eq!(placement.top, 40.0 + 30.0 + 8.0);

    hover(&mut page, "edge");
    let placement = page.controller(c).unwrap().last_placement().unwrap();
    assert_eq!(placement.side, Side::Above);
    assert_eq!(placement.top, 276.0);
}

#[test]
fn placement_is_anchored_in_document_coordinates() {
    let (mut page, c) = mounted(TooltipConfig::default());
    page.scroll_to(Point::new(0.0, 200.0));
    page.tick();
    hover(&mut page, "edge");

    let placement = page.controller(c).unwrap().last_placement().unwrap();
    assert_eq!(placement.top, 276.0);
    assert_eq!(placement.left, 938.0);
}

#[test]
fn trigger_without_content_activates_without_revealing_label() {
    let (mut page, c) = mounted(TooltipConfig::default());
    hover(&mut page, "blank");

    let blank = el(&page, "blank");
    assert_eq!(active(&page, c), Some(blank));
    assert_eq!(page.document().get_attribute(blank, "data-vhover"), Some("true"));
    assert!(!label_shown(&page, c));

    hover(&mut page, "red");
    assert!(label_shown(&page, c));
    assert_eq!(label_text(&page, c), "Red 500");
    assert!(!page.document().has_attribute(blank, "data-vhover"));
}

#[test]
fn position_follows_scroll_without_changing_activation() {
    let config = TooltipConfig {
        margin_top: 86.0,
        ..TooltipConfig::default()
    };
    let (mut page, c) = mounted(config);
    hover(&mut page, "edge");
    let edge = el(&page, "edge");
    let tip = label(&page, c);
    assert_eq!(page.document().translation(tip), Some(Point::new(938.0, 276.0)));

    // edge now sits 50px below the viewport top, inside the reserved 86px
    page.document_mut().scroll_to(Point::new(0.0, 250.0));
    page.document_mut().take_mutations();
    let placement = page.position(c, edge).unwrap();

    assert_eq!(placement.side, Side::Below);
    assert_eq!(placement.top, 300.0 + 20.0 + 8.0);
    assert_eq!(page.document().translation(tip), Some(Point::new(938.0, 328.0)));
    assert_eq!(active(&page, c), Some(edge));
    assert!(label_shown(&page, c));
    let marker_writes = page.document().mutations().iter().any(|m| {
        matches!(
            m,
            Mutation::SetAttribute { name, .. } | Mutation::RemoveAttribute { name, .. }
                if name == "data-show" || name == "data-vhover"
        )
    });
    assert!(!marker_writes);
}

#[test]
fn position_without_content_leaves_label_untouched() {
    let (mut page, c) = mounted(TooltipConfig::default());
    hover(&mut page, "red");
    let placement = page.controller(c).unwrap().last_placement();
    page.document_mut().take_mutations();

    assert_eq!(page.position(c, el(&page, "blank")), None);
    assert!(page.document().mutations().is_empty());
    assert_eq!(page.controller(c).unwrap().last_placement(), placement);
    assert_eq!(active(&page, c), Some(el(&page, "red")));
}

const NARROW: &str = r#"
    <section data-tooltip-container style="width:300px;height:200px;padding:10px">
      <div style="display:flex">
        <div style="width:260px;height:20px"></div>
        <div id="t" data-tooltip-trigger data-tooltip-content="Sixteen chars!!!" style="width:20px;height:20px"></div>
      </div>
    </section>
"#;

fn narrow_left(clamp_to_container: bool) -> f32 {
    let mut page = page_from(NARROW);
    let c = page.mount(TooltipConfig {
        clamp_to_container,
        ..TooltipConfig::default()
    });
    page.tick();
    hover(&mut page, "t");
    page.controller(c).unwrap().last_placement().unwrap().left
}

#[test]
fn container_bounds_narrow_the_clamp_range() {
    // t is centered at 280, the container ends at 300
    assert_eq!(narrow_left(true), 300.0 - 6.0 - 80.0);
}

#[test]
fn container_clamp_can_be_disabled() {
    assert_eq!(narrow_left(false), 240.0);
}
