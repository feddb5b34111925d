//! Raw signal handling. Handlers only write state and request a frame; all measurement and
//! DOM writes happen in the frame pass.

use crate::config::TooltipConfig;
use crate::host::{Signal, TooltipHost};
use crate::state::{ControllerState, Intent};

pub(crate) fn on_signal<H: TooltipHost>(
    state: &mut ControllerState<H::Element>,
    host: &mut H,
    config: &TooltipConfig,
    signal: Signal<H::Element>,
) {
    match signal {
        Signal::PointerMove(p) => {
            state.pointer = p;
        }
        Signal::Scroll => {
            // enter/leave do not fire reliably while scrolling; trust the hit test instead
            state.intent = Intent::HitTest;
        }
        Signal::Resize => {
            state.intent = Intent::HitTest;
            state.reposition = true;
        }
        Signal::PointerEnter(target) => {
            let Some(trigger) = host.closest(&target, &config.trigger_attr) else {
                return;
            };
            state.intent = Intent::Trigger(Some(trigger));
        }
        Signal::PointerLeave(target) => {
            let Some(trigger) = host.closest(&target, &config.trigger_attr) else {
                return;
            };
            let current = match &state.intent {
                Intent::Trigger(desired) => desired.as_ref(),
                Intent::HitTest => state.active.as_ref(),
            };
            if current != Some(&trigger) {
                return;
            }
            state.intent = Intent::Trigger(None);
        }
    }
    schedule_frame(state, host);
}

/// Request a frame unless one is already pending.
pub(crate) fn schedule_frame<H: TooltipHost>(
    state: &mut ControllerState<H::Element>,
    host: &mut H,
) {
    if state.scheduled_frame.is_some() {
        return;
    }
    let frame = host.request_frame();
    log::trace!(target: "tooltip.tracker", "requested frame {}", frame.as_raw());
    state.scheduled_frame = Some(frame);
    state.stats.frames_requested += 1;
}
