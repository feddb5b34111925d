use gfx::{Renderer, ViewportConfig, ViewportState, page_viewport, ui::status_bar};
use page::Page;
use std::sync::Arc;
use std::{thread, time::Duration};
use winit::{
    application::ApplicationHandler,
    error::EventLoopError,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

/// ~60Hz
const FRAME: Duration = Duration::from_millis(16);

enum UserEvent {
    Tick,
}

#[derive(Clone, Debug)]
pub struct PlatformConfig {
    pub title: String,
    /// Attribute that reveals a tooltip label; must match the mounted controllers.
    pub visible_attr: String,
    pub show_status_bar: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "hovertip".into(),
            visible_attr: "data-show".into(),
            show_status_bar: true,
        }
    }
}

/// Open a window showing `page` and run until it is closed. Controllers are unmounted on exit.
pub fn run(page: Page, config: PlatformConfig) -> Result<(), EventLoopError> {
    let event_loop = EventLoop::<UserEvent>::with_user_event().build()?;
    let proxy = event_loop.create_proxy();

    let mut app = PlatformApp {
        config,
        page,
        viewport: ViewportState::default(),
        window: None,
        renderer: None,
        proxy: Some(proxy),
        ticker_started: false,
    };
    let result = event_loop.run_app(&mut app);
    app.page.unmount_all();
    result
}

struct PlatformApp {
    config: PlatformConfig,
    page: Page,
    viewport: ViewportState,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    proxy: Option<EventLoopProxy<UserEvent>>,
    ticker_started: bool,
}

impl PlatformApp {
    fn start_ticker(&mut self) {
        if self.ticker_started {
            return;
        }
        self.ticker_started = true;

        if let Some(proxy) = self.proxy.take() {
            thread::spawn(move || {
                loop {
                    if proxy.send_event(UserEvent::Tick).is_err() {
                        break;
                    }
                    thread::sleep(FRAME);
                }
            });
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(renderer)) = (self.window.as_ref(), self.renderer.as_mut()) else {
            return;
        };
        let page = &mut self.page;
        let viewport = &mut self.viewport;
        let config = &self.config;

        renderer.render(window, |ctx| {
            if config.show_status_bar {
                status_bar(ctx, page);
            }
            egui::CentralPanel::default()
                .frame(egui::Frame::NONE)
                .show(ctx, |ui| {
                    page_viewport(
                        ui,
                        page,
                        viewport,
                        ViewportConfig {
                            visible_attr: &config.visible_attr,
                            ..ViewportConfig::default()
                        },
                    );
                });
        });
    }
}

/// egui asked for a repaint, and the event is not itself a redraw or the end of the window.
fn wants_redraw(event: &WindowEvent, egui_repaint: bool) -> bool {
    egui_repaint
        && !matches!(
            event,
            WindowEvent::RedrawRequested | WindowEvent::CloseRequested | WindowEvent::Destroyed
        )
}

impl ApplicationHandler<UserEvent> for PlatformApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attributes = Window::default_attributes().with_title(self.config.title.as_str());
            let window = match event_loop.create_window(attributes) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!(target: "platform", "cannot create window: {e}");
                    event_loop.exit();
                    return;
                }
            };
            self.window = Some(window);
        }

        if self.renderer.is_none()
            && let Some(window) = self.window.as_ref()
        {
            match Renderer::new(Arc::clone(window)) {
                Ok(r) => self.renderer = Some(r),
                Err(e) => {
                    log::error!(target: "platform", "{e}");
                    event_loop.exit();
                    return;
                }
            }
        }

        self.start_ticker();
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::Tick => {
                // Frame callbacks and intersection records, then repaint what they changed.
                self.page.tick();
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(window), Some(renderer)) = (self.window.as_ref(), self.renderer.as_mut()) {
            let repaint = renderer.on_window_event(window, &event);
            if wants_redraw(&event, repaint) {
                window.request_redraw();
            }
        }
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}
