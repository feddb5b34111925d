use serde::Deserialize;
use std::fmt;
use std::path::Path;

pub const DEFAULT_LABEL_CLASS: &str = "pointer-events-none absolute z-10 top-0 left-0 rounded-full border border-gray-950 bg-gray-950/90 py-0.5 pr-2 pb-1 pl-3 text-center font-mono text-xs/6 font-medium whitespace-nowrap text-white opacity-0 inset-ring inset-ring-white/10 data-[show]:opacity-100 data-[show]:transition-opacity data-[show]:duration-200 data-[show]:delay-100";

/// Controller configuration. Every field is optional in TOML.
///
/// ```toml
/// offset = 24.0
/// padding_x = 6.0
/// margin_top = 86.0        # fixed header
/// disable_on_touch = false
/// container_attr = ""      # no visibility gate
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TooltipConfig {
    /// Distance from the trigger's top edge to the label's top edge when placed above.
    pub offset: f32,
    /// Horizontal clamp padding from the viewport (and container) edges.
    pub padding_x: f32,
    /// Minimum clearance from the viewport top for an above-placement; a larger `margin_top`
    /// takes over.
    pub padding_y: f32,
    /// Gap between the trigger's bottom edge and the label when flipped below.
    pub gap_below: f32,
    /// Space reserved at the top of the viewport for fixed chrome.
    pub margin_top: f32,
    /// Leave the controller inert on coarse-pointer devices.
    pub disable_on_touch: bool,
    /// Also clamp horizontally to the bounding container, when one exists.
    pub clamp_to_container: bool,

    pub label_id: String,
    pub label_class: String,

    pub trigger_attr: String,
    pub content_attr: String,
    /// Empty disables the visibility gate.
    pub container_attr: String,
    pub hover_attr: String,
    pub visible_attr: String,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            offset: 24.0,
            padding_x: 6.0,
            padding_y: 6.0,
            gap_below: 8.0,
            margin_top: 0.0,
            disable_on_touch: true,
            clamp_to_container: true,
            label_id: "v-tooltip".into(),
            label_class: DEFAULT_LABEL_CLASS.into(),
            trigger_attr: "data-tooltip-trigger".into(),
            content_attr: "data-tooltip-content".into(),
            container_attr: "data-tooltip-container".into(),
            hover_attr: "data-vhover".into(),
            visible_attr: "data-show".into(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read tooltip config: {e}"),
            ConfigError::Parse(e) => write!(f, "malformed tooltip config: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid tooltip config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl TooltipConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: TooltipConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            ("offset", self.offset),
            ("padding_x", self.padding_x),
            ("padding_y", self.padding_y),
            ("gap_below", self.gap_below),
            ("margin_top", self.margin_top),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite, non-negative length (got {value})"
                )));
            }
        }

        let attrs = [
            ("trigger_attr", &self.trigger_attr),
            ("content_attr", &self.content_attr),
            ("hover_attr", &self.hover_attr),
            ("visible_attr", &self.visible_attr),
        ];
        for (name, value) in attrs {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{name} must not be empty")));
            }
        }
        if self.hover_attr == self.visible_attr {
            return Err(ConfigError::Invalid(
                "hover_attr and visible_attr must differ".into(),
            ));
        }
        Ok(())
    }

    /// Container marker, or `None` when the gate is disabled.
    pub fn container_attr(&self) -> Option<&str> {
        Some(self.container_attr.as_str()).filter(|a| !a.trim().is_empty())
    }
}
