mod status_bar;

pub use status_bar::{StatusBarConfig, controller_summary, status_bar, status_bar_with_config};
