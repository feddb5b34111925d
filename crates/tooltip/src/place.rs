//! Label placement and the show/hide transitions.
//!
//! All placement math is in document coordinates (viewport + scroll offset), so a label placed
//! mid-scroll stays anchored to its trigger.

use crate::config::TooltipConfig;
use crate::host::TooltipHost;
use crate::state::ControllerState;
use core_types::{Point, Rect, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Above,
    Below,
}

/// Label origin in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub left: f32,
    pub top: f32,
    pub side: Side,
}

/// Geometry snapshot taken inside a frame pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementInput {
    /// Trigger border box, viewport-relative.
    pub trigger: Rect,
    pub label: Size,
    pub scroll: Point,
    pub viewport: Size,
    /// Bounding container, viewport-relative, when container clamping applies.
    pub container: Option<Rect>,
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

/// Sizes read from the host may be zero (not yet rendered), negative or NaN.
fn extent(v: f32) -> f32 {
    finite_or_zero(v).max(0.0)
}

/// Horizontal range `[lo, hi]` the label's edges must stay within.
fn horizontal_bounds(input: &PlacementInput, config: &TooltipConfig) -> (f32, f32) {
    let sx = finite_or_zero(input.scroll.x);
    let pad = config.padding_x;
    let lo = sx + pad;
    let hi = sx + extent(input.viewport.width) - pad;

    let Some(c) = input.container else {
        return (lo, hi);
    };
    let c_lo = finite_or_zero(c.left()) + sx + pad;
    let c_hi = finite_or_zero(c.right()) + sx - pad;
    let (lo_both, hi_both) = (lo.max(c_lo), hi.min(c_hi));
    if lo_both <= hi_both {
        (lo_both, hi_both)
    } else {
        (lo, hi)
    }
}

/// Center the label over the trigger, clamp it into the padded bounds and prefer placing it
/// above, flipping below when it would intrude on the reserved top margin.
///
/// When the label is wider than the bounds the left edge wins.
pub fn compute_placement(input: &PlacementInput, config: &TooltipConfig) -> Placement {
    let sx = finite_or_zero(input.scroll.x);
    let sy = finite_or_zero(input.scroll.y);
    let w = extent(input.label.width);
    let trigger = Rect::new(
        finite_or_zero(input.trigger.x),
        finite_or_zero(input.trigger.y),
        extent(input.trigger.width),
        extent(input.trigger.height),
    );

    let (lo, hi) = horizontal_bounds(input, config);
    let centered = trigger.center_x() + sx - w / 2.0;
    let left = centered.min(hi - w).max(lo);

    let above = trigger.top() + sy - config.offset;
    // the reserved margin, or padding_y when that is larger
    let (top, side) = if above < sy + config.margin_top.max(config.padding_y) {
        (trigger.bottom() + sy + config.gap_below, Side::Below)
    } else {
        (above, Side::Above)
    };

    Placement { left, top, side }
}

/// Write the trigger's content into the label and move it. `None` when the trigger has no
/// content (the label must then stay hidden) or there is no label.
pub(crate) fn position<H: TooltipHost>(
    state: &mut ControllerState<H::Element>,
    host: &mut H,
    config: &TooltipConfig,
    trigger: &H::Element,
) -> Option<Placement> {
    let label = state.label.clone()?;
    let content = host
        .attribute(trigger, &config.content_attr)
        .filter(|c| !c.is_empty())?;

    // text first: the label's width depends on it
    host.set_text(&label, &content);

    let container = state
        .container
        .as_ref()
        .filter(|_| config.clamp_to_container)
        .map(|c| host.bounding_client_rect(c));
    let input = PlacementInput {
        trigger: host.bounding_client_rect(trigger),
        label: host.measure(&label),
        scroll: host.scroll_offset(),
        viewport: host.viewport_size(),
        container,
    };
    let placement = compute_placement(&input, config);
    log::trace!(target: "tooltip.place", "{content:?} -> {placement:?} from {input:?}");

    host.set_translation(&label, Point::new(placement.left, placement.top));
    state.last_placement = Some(placement);
    Some(placement)
}

/// Make `trigger` the active trigger and reveal the label. No-op if it already is, or while
/// the container is off-screen.
pub(crate) fn show<H: TooltipHost>(
    state: &mut ControllerState<H::Element>,
    host: &mut H,
    config: &TooltipConfig,
    trigger: H::Element,
) {
    if state.active.as_ref() == Some(&trigger) || !state.container_visible {
        return;
    }

    hide(state, host, config);
    host.set_attribute(&trigger, &config.hover_attr, "true");
    state.active = Some(trigger.clone());
    state.stats.shows += 1;

    let Some(label) = state.label.clone() else {
        return;
    };
    if position(state, host, config, &trigger).is_none() {
        log::debug!(target: "tooltip.place", "trigger {trigger:?} has no content; label stays hidden");
        return;
    }
    // Flush layout at the new content and position so the reveal does not jump.
    let _ = host.measure(&label);
    host.set_attribute(&label, &config.visible_attr, "");
    state.label_visible = true;
}

/// Clear the active trigger and conceal the label. Safe when nothing is active.
pub(crate) fn hide<H: TooltipHost>(
    state: &mut ControllerState<H::Element>,
    host: &mut H,
    config: &TooltipConfig,
) {
    if let Some(prev) = state.active.take() {
        if host.is_connected(&prev) {
            host.remove_attribute(&prev, &config.hover_attr);
        }
        state.stats.hides += 1;
    }
    if state.label_visible {
        if let Some(label) = &state.label {
            host.remove_attribute(label, &config.visible_attr);
        }
        state.label_visible = false;
    }
}
