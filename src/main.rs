use core_types::Size;
use mimalloc::MiMalloc;
use page::Page;
use platform::PlatformConfig;
use std::process::ExitCode;
use tooltip::{ConfigError, TooltipConfig};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEMO_PAGE: &str = include_str!("../demo/swatches.html");
const INITIAL_VIEWPORT: Size = Size::new(1024.0, 768.0);

fn load_config() -> Result<TooltipConfig, ConfigError> {
    match std::env::var_os("HOVERTIP_CONFIG") {
        Some(path) => {
            log::info!("loading tooltip config from {}", path.to_string_lossy());
            TooltipConfig::from_toml_file(path)
        }
        None => Ok(TooltipConfig::default()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut page = Page::parse(DEMO_PAGE, INITIAL_VIEWPORT);
    let platform_config = PlatformConfig {
        visible_attr: config.visible_attr.clone(),
        ..PlatformConfig::default()
    };
    page.mount(config);

    match platform::run(page, platform_config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("event loop failed: {e}");
            ExitCode::FAILURE
        }
    }
}
