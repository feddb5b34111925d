use crate::config::TooltipConfig;
use crate::host::TooltipHost;
use crate::place;
use crate::state::{ControllerState, Intent};

/// Find the bounding container and start observing it. Without one the gate is open and the
/// listeners attach immediately.
pub(crate) fn setup<H: TooltipHost>(
    state: &mut ControllerState<H::Element>,
    host: &mut H,
    config: &TooltipConfig,
) {
    let container = config.container_attr().and_then(|attr| host.query_attr(attr));
    match container {
        Some(container) => {
            let observer = host.observe_intersection(&container);
            log::debug!(
                target: "tooltip.gate",
                "observing container {container:?} ({})",
                observer.as_raw()
            );
            state.container = Some(container);
            state.observer = Some(observer);
            state.container_visible = false;
        }
        None => {
            if let Some(attr) = config.container_attr() {
                log::debug!(
                    target: "tooltip.gate",
                    "no [{attr}] element found; tooltips stay enabled everywhere"
                );
            }
            state.container_visible = true;
            attach_listeners(state, host);
        }
    }
}

pub(crate) fn on_intersection<H: TooltipHost>(
    state: &mut ControllerState<H::Element>,
    host: &mut H,
    config: &TooltipConfig,
    visible: bool,
) {
    let was_visible = state.container_visible;
    state.container_visible = visible;

    if visible && !was_visible {
        log::debug!(target: "tooltip.gate", "container entered the viewport");
        attach_listeners(state, host);
    } else if !visible && was_visible {
        log::debug!(target: "tooltip.gate", "container left the viewport");
        detach_listeners(state, host);
        place::hide(state, host, config);
    }
}

pub(crate) fn attach_listeners<H: TooltipHost>(state: &mut ControllerState<H::Element>, host: &mut H) {
    if state.listeners.is_none() {
        state.listeners = Some(host.add_listeners());
    }
}

pub(crate) fn detach_listeners<H: TooltipHost>(state: &mut ControllerState<H::Element>, host: &mut H) {
    if let Some(listeners) = state.listeners.take() {
        host.remove_listeners(listeners);
    }
    state.intent = Intent::HitTest;
    state.reposition = false;
}
