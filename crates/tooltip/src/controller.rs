use crate::config::TooltipConfig;
use crate::gate;
use crate::host::{LabelSpec, Signal, TooltipHost};
use crate::place::{self, Placement};
use crate::resolve;
use crate::state::{ControllerState, ControllerStats, Intent};
use crate::tracker;
use core_types::{FrameHandle, ListenerHandle, ObserverHandle};

const LABEL_ROLE: &str = "tooltip";
const LABEL_STYLE: &str = "position:absolute;pointer-events:none;";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Unmounted,
    /// Mounted on a coarse-pointer device with `disable_on_touch`; nothing was created.
    Inert,
    Mounted,
}

/// One tooltip controller. Any number may be mounted on the same host; each owns its label,
/// listeners, observer and frame request.
///
/// The host is passed into every call rather than stored, so the caller decides how the
/// document and its controllers are owned.
#[derive(Debug)]
pub struct TooltipController<H: TooltipHost> {
    config: TooltipConfig,
    phase: Phase,
    state: Option<ControllerState<H::Element>>,
}

impl<H: TooltipHost> TooltipController<H> {
    pub fn new(config: TooltipConfig) -> Self {
        Self {
            config,
            phase: Phase::Unmounted,
            state: None,
        }
    }

    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> Option<&ControllerState<H::Element>> {
        self.state.as_ref()
    }

    pub fn active(&self) -> Option<&H::Element> {
        self.state.as_ref()?.active.as_ref()
    }

    pub fn label(&self) -> Option<&H::Element> {
        self.state.as_ref()?.label.as_ref()
    }

    pub fn listeners(&self) -> Option<ListenerHandle> {
        self.state.as_ref()?.listeners
    }

    pub fn observer(&self) -> Option<ObserverHandle> {
        self.state.as_ref()?.observer
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.state.as_ref()?.scheduled_frame
    }

    pub fn last_placement(&self) -> Option<Placement> {
        self.state.as_ref()?.last_placement
    }

    pub fn stats(&self) -> ControllerStats {
        self.state.as_ref().map(|s| s.stats).unwrap_or_default()
    }

    pub fn mount(&mut self, host: &mut H) {
        if self.phase != Phase::Unmounted {
            log::warn!(target: "tooltip.controller", "mount called twice; ignoring");
            return;
        }
        if self.config.disable_on_touch && host.prefers_coarse_pointer() {
            log::debug!(target: "tooltip.controller", "coarse pointer; controller stays inert");
            self.phase = Phase::Inert;
            return;
        }

        let mut state = ControllerState::new();
        let spec = LabelSpec {
            id: &self.config.label_id,
            class: &self.config.label_class,
            role: LABEL_ROLE,
            style: LABEL_STYLE,
        };
        state.label = host.create_label(&spec);
        if state.label.is_none() {
            log::warn!(target: "tooltip.controller", "host could not create a label element");
        }
        // Own the state before any subscription so unmount can release everything.
        self.phase = Phase::Mounted;
        let state = self.state.insert(state);
        gate::setup(state, host, &self.config);
        log::debug!(
            target: "tooltip.controller",
            "mounted (listeners {:?}, observer {:?})",
            state.listeners,
            state.observer
        );
    }

    /// Release everything mount created. Idempotent, and safe on an inert or never-mounted
    /// controller.
    pub fn unmount(&mut self, host: &mut H) {
        self.phase = Phase::Unmounted;
        let Some(mut state) = self.state.take() else {
            return;
        };
        gate::detach_listeners(&mut state, host);
        if let Some(frame) = state.scheduled_frame.take() {
            host.cancel_frame(frame);
        }
        if let Some(observer) = state.observer.take() {
            host.disconnect_observer(observer);
        }
        place::hide(&mut state, host, &self.config);
        if let Some(label) = state.label.take() {
            host.remove_element(&label);
        }
        log::debug!(target: "tooltip.controller", "unmounted after {:?}", state.stats);
    }

    /// Raw signal entry point. Ignored unless listeners are attached.
    pub fn handle_signal(&mut self, host: &mut H, signal: Signal<H::Element>) {
        let Some(state) = self.state.as_mut().filter(|s| s.listeners.is_some()) else {
            return;
        };
        tracker::on_signal(state, host, &self.config, signal);
    }

    pub fn on_frame(&mut self, host: &mut H, frame: FrameHandle) {
        if let Some(state) = self.state.as_mut() {
            resolve::run_frame(state, host, &self.config, frame);
        }
    }

    pub fn on_intersection(&mut self, host: &mut H, observer: ObserverHandle, visible: bool) {
        let Some(state) = self.state.as_mut().filter(|s| s.observer == Some(observer)) else {
            return;
        };
        gate::on_intersection(state, host, &self.config, visible);
    }

    /// Run a resolution pass immediately against the last pointer position, as the frame
    /// callback would.
    pub fn refresh(&mut self, host: &mut H) {
        if let Some(state) = self.state.as_mut() {
            resolve::resolve_pass(state, host, &self.config, Intent::HitTest);
        }
    }

    /// The trigger under the last known pointer position.
    pub fn resolve(&self, host: &H) -> Option<H::Element> {
        let state = self.state.as_ref()?;
        resolve::resolve_at(host, &self.config, state.pointer)
    }

    pub fn show(&mut self, host: &mut H, trigger: H::Element) {
        if let Some(state) = self.state.as_mut() {
            place::show(state, host, &self.config, trigger);
        }
    }

    pub fn hide(&mut self, host: &mut H) {
        if let Some(state) = self.state.as_mut() {
            place::hide(state, host, &self.config);
        }
    }

    /// Reposition the label for `trigger` without changing which trigger is active.
    pub fn position(&mut self, host: &mut H, trigger: &H::Element) -> Option<Placement> {
        let state = self.state.as_mut()?;
        place::position(state, host, &self.config, trigger)
    }
}
