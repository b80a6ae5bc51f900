//! The configuration as the window manager runtime consumes it.
use crate::{Behavior, Config};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tilerc_core::config::{
    FloatingLayout, Group, Keybind, Layout, MouseBinding, ScratchPad, Screen, WidgetDefaults,
};

/// Everything the runtime reads at startup and reload, with the `modkey`
/// placeholder already resolved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub keys: Vec<Keybind>,
    pub groups: Vec<Group>,
    pub scratchpads: Vec<ScratchPad>,
    pub layouts: Vec<Layout>,
    pub widget_defaults: WidgetDefaults,
    pub extension_defaults: WidgetDefaults,
    pub screens: Vec<Screen>,
    pub mouse: Vec<MouseBinding>,
    pub floating_layout: FloatingLayout,
    pub behavior: Behavior,
    /// File holding the latest battery text for `TextSource::Battery` widgets.
    pub battery_status_file: Option<PathBuf>,
}

impl From<&Config> for RuntimeConfig {
    fn from(config: &Config) -> Self {
        Self {
            keys: config.mapped_bindings(),
            groups: config.groups.clone(),
            scratchpads: config.scratchpads.clone(),
            layouts: config.layouts.clone(),
            widget_defaults: config.widget_defaults.clone(),
            extension_defaults: config.extension_defaults().clone(),
            screens: config.screens.clone(),
            mouse: config.mapped_mouse(),
            floating_layout: config.floating_layout.clone(),
            behavior: config.behavior.clone(),
            battery_status_file: config
                .battery_status_path()
                .map_err(|err| tracing::warn!("No battery status file: {err}"))
                .ok(),
        }
    }
}

/// # Errors
///
/// Errors if serialization fails.
pub fn to_json(config: &Config, pretty: bool) -> serde_json::Result<String> {
    let runtime = RuntimeConfig::from(config);
    if pretty {
        serde_json::to_string_pretty(&runtime)
    } else {
        serde_json::to_string(&runtime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilerc_core::config::Widget;

    fn config() -> Config {
        Config {
            battery_status_file: Some(PathBuf::from("/tmp/tilerc/battery")),
            ..Config::default()
        }
    }

    #[test]
    fn runtime_json_loses_nothing() {
        let config = config();
        let json = to_json(&config, false).unwrap();
        let back: RuntimeConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back, RuntimeConfig::from(&config));
        assert_eq!(back.keys.len(), config.keys.len());
        assert_eq!(back.groups, config.groups);
        assert_eq!(back.scratchpads, config.scratchpads);
        assert_eq!(back.screens, config.screens);
    }

    #[test]
    fn extension_defaults_are_exported() {
        let runtime = RuntimeConfig::from(&config());
        assert_eq!(runtime.extension_defaults, runtime.widget_defaults);
        assert_eq!(runtime.extension_defaults.fontsize, 14);

        let json = to_json(&config(), false).unwrap();
        assert!(json.contains("\"extension_defaults\":{\"font\":\"sans\""));
    }

    #[test]
    fn modkey_is_resolved() {
        let json = to_json(&config(), true).unwrap();
        assert!(!json.contains("\"modkey\""));
        assert!(json.contains("\"mod4\""));
    }

    #[test]
    fn widget_order_is_kept() {
        let runtime = RuntimeConfig::from(&config());
        let names: Vec<_> = runtime.screens[0]
            .top
            .as_ref()
            .unwrap()
            .widgets
            .iter()
            .map(Widget::name)
            .collect();
        assert_eq!(
            names,
            [
                "GroupBox",
                "Spacer",
                "CurrentLayout",
                "Spacer",
                "Systray",
                "Spacer",
                "Clock",
                "Spacer",
                "Chord",
                "PulseVolume",
                "TextBox",
                "Backlight",
                "TextBox",
                "TextBox",
            ]
        );
    }
}
