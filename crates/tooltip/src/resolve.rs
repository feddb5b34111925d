use crate::config::TooltipConfig;
use crate::host::TooltipHost;
use crate::place;
use crate::state::{ControllerState, Intent};
use core_types::{FrameHandle, Point};

/// The trigger under `point` (viewport coordinates), walking up from the topmost element.
pub fn resolve_at<H: TooltipHost>(host: &H, config: &TooltipConfig, point: Point) -> Option<H::Element> {
    let hit = host.element_from_point(point)?;
    host.closest(&hit, &config.trigger_attr)
}

/// Frame callback. Frames other than the one this state is waiting on are ignored.
pub(crate) fn run_frame<H: TooltipHost>(
    state: &mut ControllerState<H::Element>,
    host: &mut H,
    config: &TooltipConfig,
    frame: FrameHandle,
) {
    if state.scheduled_frame != Some(frame) {
        log::trace!(target: "tooltip.resolve", "ignoring foreign frame {}", frame.as_raw());
        return;
    }
    state.scheduled_frame = None;
    let intent = std::mem::take(&mut state.intent);
    resolve_pass(state, host, config, intent);
}

pub(crate) fn resolve_pass<H: TooltipHost>(
    state: &mut ControllerState<H::Element>,
    host: &mut H,
    config: &TooltipConfig,
    intent: Intent<H::Element>,
) {
    state.stats.passes += 1;
    let reposition = std::mem::take(&mut state.reposition);

    if let Some(active) = &state.active
        && !host.is_connected(active)
    {
        log::debug!(target: "tooltip.resolve", "active trigger {active:?} left the document");
        state.active = None;
        place::hide(state, host, config);
    }

    if !state.container_visible {
        place::hide(state, host, config);
        return;
    }

    let target = match intent {
        Intent::Trigger(trigger) => trigger.filter(|t| host.is_connected(t)),
        Intent::HitTest => resolve_at(host, config, state.pointer),
    };
    log::trace!(target: "tooltip.resolve", "pass {} resolved {target:?}", state.stats.passes);

    match target {
        Some(trigger) if state.active.as_ref() == Some(&trigger) => {
            // markers stay as they are; only the geometry is refreshed
            if reposition && state.label_visible {
                let _ = place::position(state, host, config, &trigger);
            }
        }
        Some(trigger) => place::show(state, host, config, trigger),
        None => place::hide(state, host, config),
    }
}
