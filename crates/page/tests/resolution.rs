mod common;

use common::*;
use core_types::{Point, Size};
use tooltip::{TooltipConfig, TooltipHost};

#[test]
fn rapid_pointer_moves_coalesce_into_one_pass() {
    let (mut page, c) = mounted(TooltipConfig::default());
    let before = page.controller(c).unwrap().stats();

    let target = center(&page, "green");
    for i in 0..10 {
        page.pointer_move(Point::new(target.x - 90.0 + i as f32 * 10.0, target.y));
    }
    assert_eq!(page.document().pending_frames(), 1);

    let report = page.tick();
    assert_eq!(report.frames, 1);

    let stats = page.controller(c).unwrap().stats();
    assert_eq!(stats.passes - before.passes, 1);
    assert_eq!(stats.frames_requested - before.frames_requested, 1);
    // last recorded position wins
    assert_eq!(active(&page, c), Some(el(&page, "green")));
}

#[test]
fn showing_the_active_trigger_again_changes_nothing() {
    let (mut page, c) = mounted(TooltipConfig::default());
    let red = el(&page, "red");
    page.show(c, red);
    let placement = page.controller(c).unwrap().last_placement();
    page.document_mut().take_mutations();

    page.show(c, red);
    assert!(page.document().mutations().is_empty());
    assert_eq!(page.controller(c).unwrap().last_placement(), placement);
    assert_eq!(page.controller(c).unwrap().stats().shows, 1);
    assert_eq!(page.document().elements_with_attribute("data-vhover"), vec![red]);
}

#[test]
fn at_most_one_trigger_is_marked_hovered() {
    let (mut page, c) = mounted(TooltipConfig::default());
    page.document_mut().take_mutations();

    for name in ["red", "green", "blank", "edge", "red", "logo"] {
        let id = el(&page, name);
        page.show(c, id);
    }
    for name in ["green", "left-edge", "blank", "red"] {
        hover(&mut page, name);
    }

    let mutations = page.document().mutations();
    assert_eq!(max_concurrent(mutations, "data-vhover"), 1);
    assert_eq!(
        page.document().elements_with_attribute("data-vhover"),
        vec![el(&page, "red")]
    );
}

#[test]
fn moving_off_every_trigger_hides_the_label() {
    let (mut page, c) = mounted(TooltipConfig::default());
    hover(&mut page, "red");
    assert!(label_shown(&page, c));

    // gap between red and green belongs to the row
    page.pointer_move_to(Point::new(64.0, 120.0));
    page.tick();
    assert_eq!(active(&page, c), None);
    assert!(!label_shown(&page, c));
    assert!(page.document().elements_with_attribute("data-vhover").is_empty());
}

#[test]
fn scrolling_a_trigger_out_from_under_the_pointer_hides_it() {
    let (mut page, c) = mounted(TooltipConfig::default());
    hover(&mut page, "red");

    page.scroll_by(0.0, 100.0);
    assert_eq!(page.document().pending_frames(), 1);
    page.tick();
    assert_eq!(active(&page, c), None);
}

#[test]
fn removed_active_trigger_is_dropped_without_writes() {
    let (mut page, c) = mounted(TooltipConfig::default());
    let red = el(&page, "red");
    let at = center(&page, "red");
    hover(&mut page, "red");
    assert_eq!(active(&page, c), Some(red));

    page.document_mut().remove(red);
    page.document_mut().take_mutations();
    page.pointer_move(at);
    page.tick();

    assert!(!touches(page.document().mutations(), red));
    // green slid into red's place
    assert_eq!(active(&page, c), Some(el(&page, "green")));
    assert_eq!(label_text(&page, c), "Green 500");
}

#[test]
fn delegated_enter_and_leave_through_a_descendant() {
    let (mut page, c) = mounted(TooltipConfig::default());
    let dot = el(&page, "red-dot");

    page.pointer_enter(dot);
    page.tick();
    assert_eq!(active(&page, c), Some(el(&page, "red")));
    assert!(label_shown(&page, c));

    page.pointer_leave(dot);
    page.tick();
    assert_eq!(active(&page, c), None);
    assert!(!label_shown(&page, c));
}

#[test]
fn leaving_the_previous_trigger_does_not_undo_entering_the_next() {
    let (mut page, c) = mounted(TooltipConfig::default());
    let (red, green) = (el(&page, "red"), el(&page, "green"));
    page.show(c, red);

    page.pointer_enter(green);
    page.pointer_leave(red);
    page.tick();
    assert_eq!(active(&page, c), Some(green));
}

#[test]
fn scroll_falls_back_to_hit_testing() {
    let (mut page, c) = mounted(TooltipConfig::default());
    page.pointer_move(center(&page, "red"));
    page.pointer_enter(el(&page, "green"));
    page.scroll_by(0.0, 10.0);
    page.tick();
    // red is still under the pointer after a 10px scroll
    assert_eq!(active(&page, c), Some(el(&page, "red")));
}

#[test]
fn both_paths_converge_on_the_same_state() {
    let (mut hit_page, a) = mounted(TooltipConfig::default());
    hit_page.pointer_move(center(&hit_page, "green"));
    hit_page.tick();

    let (mut delegated_page, b) = mounted(TooltipConfig::default());
    delegated_page.pointer_enter(el(&delegated_page, "green"));
    delegated_page.tick();

    assert_eq!(active(&hit_page, a), active(&delegated_page, b));
    assert_eq!(
        hit_page.controller(a).unwrap().last_placement(),
        delegated_page.controller(b).unwrap().last_placement()
    );
    assert_eq!(label_shown(&hit_page, a), label_shown(&delegated_page, b));
}

#[test]
fn resolve_reports_trigger_under_last_pointer() {
    let (mut page, c) = mounted(TooltipConfig::default());
    page.pointer_move(center(&page, "red-dot"));
    let controller = page.controller(c).unwrap();
    assert_eq!(controller.resolve(page.document()), Some(el(&page, "red")));
    assert_eq!(
        page.document().element_from_point(center(&page, "red-dot")),
        Some(el(&page, "red-dot"))
    );
}

#[test]
fn refresh_resolves_against_the_last_pointer_without_a_frame() {
    let (mut page, c) = mounted(TooltipConfig::default());
    hover(&mut page, "red");
    let red = el(&page, "red");
    let passes = page.controller(c).unwrap().stats().passes;

    // no signal reaches the controller for a document-side removal
    page.document_mut().remove(red);
    page.refresh(c);

    assert_eq!(page.document().pending_frames(), 0);
    assert_eq!(page.controller(c).unwrap().stats().passes, passes + 1);
    assert_eq!(active(&page, c), Some(el(&page, "green")));
    assert_eq!(label_text(&page, c), "Green 500");
    assert!(label_shown(&page, c));
}

#[test]
fn resizing_the_viewport_places_the_active_label_again() {
    let (mut page, c) = mounted(TooltipConfig::default());
    hover(&mut page, "edge");
    let edge = el(&page, "edge");
    let before = page.controller(c).unwrap().stats();
    assert_eq!(page.controller(c).unwrap().last_placement().unwrap().left, 938.0);

    page.resize(Size::new(900.0, 768.0));
    assert_eq!(page.document().pending_frames(), 1);
    page.document_mut().take_mutations();
    page.tick();

    let placement = page.controller(c).unwrap().last_placement().unwrap();
    assert_eq!(placement.left, 900.0 - 6.0 - 80.0);
    assert_eq!(placement.top, 276.0);
    assert_eq!(page.document().translation(label(&page, c)), Some(Point::new(814.0, 276.0)));
    assert_eq!(active(&page, c), Some(edge));
    assert!(label_shown(&page, c));
    // same trigger: no marker churn
    assert_eq!(page.controller(c).unwrap().stats().shows, before.shows);
    assert_eq!(max_concurrent(page.document().mutations(), "data-vhover"), 0);
    assert_eq!(max_concurrent(page.document().mutations(), "data-show"), 0);
}

#[test]
fn resizing_to_the_same_size_signals_nothing() {
    let (mut page, _) = mounted(TooltipConfig::default());
    hover(&mut page, "edge");
    page.resize(VIEWPORT);
    assert_eq!(page.document().pending_frames(), 0);
}
