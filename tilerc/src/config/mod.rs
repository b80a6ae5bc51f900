//! `tilerc` general configuration

mod checks;
mod default;

pub use checks::CheckError;

use crate::utils::file_handler::{load_config_file, load_from_path};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tilerc_core::config::{
    FloatingLayout, Group, Keybind, Layout, MouseBinding, ScratchPad, Screen, WidgetDefaults,
};
use tilerc_core::{AutostartConfig, BatteryConfig};
use xdg::BaseDirectories;

const BATTERY_FILE: &str = "battery";

/// What happens when a window asks to be activated.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FocusOnActivation {
    /// Focus it only if it is on the current group, mark it urgent otherwise.
    #[default]
    Smart,
    Focus,
    Urgent,
    Never,
}

/// Scalar switches handed to the runtime unchanged.
#[allow(clippy::struct_excessive_bools)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Behavior {
    pub follow_mouse_focus: bool,
    pub bring_front_click: bool,
    pub floats_kept_above: bool,
    pub cursor_warp: bool,
    pub auto_fullscreen: bool,
    pub focus_on_window_activation: FocusOnActivation,
    pub reconfigure_screens: bool,
    // let fullscreen programs minimize themselves when they lose focus
    pub auto_minimize: bool,
    pub wl_xcursor_theme: Option<String>,
    pub wl_xcursor_size: u32,
    /// Name reported to clients; some java toolkits only work with a known one.
    pub wmname: String,
}

/// General configuration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub modkey: String,
    pub terminal: String,
    pub keys: Vec<Keybind>,
    pub groups: Vec<Group>,
    pub scratchpads: Vec<ScratchPad>,
    pub layouts: Vec<Layout>,
    pub widget_defaults: WidgetDefaults,
    /// Defaults for launcher-style extensions, a copy of `widget_defaults` when unset.
    pub extension_defaults: Option<WidgetDefaults>,
    pub screens: Vec<Screen>,
    pub mouse: Vec<MouseBinding>,
    pub floating_layout: FloatingLayout,
    pub behavior: Behavior,
    pub battery: BatteryConfig,
    pub autostart: AutostartConfig,
    /// Where the session daemon writes the latest battery text, under the runtime dir when unset.
    pub battery_status_file: Option<PathBuf>,
    pub log_level: String,
}

#[must_use]
pub fn load() -> Config {
    load_config_file()
        .map_err(|err| eprintln!("ERROR LOADING CONFIG: {err:?}"))
        .unwrap_or_default()
}

/// Like [`load`], reading `path` instead of the default location when given.
#[must_use]
pub fn load_from(path: Option<&Path>) -> Config {
    match path {
        Some(path) => load_from_path(path)
            .map_err(|err| eprintln!("ERROR LOADING CONFIG: {err:?}"))
            .unwrap_or_default(),
        None => load(),
    }
}

impl Config {
    /// Key bindings with the `modkey` placeholder replaced by [`Config::modkey`].
    pub fn mapped_bindings(&self) -> Vec<Keybind> {
        self.keys
            .iter()
            .map(|keybind| keybind.mapped(&self.modkey))
            .collect()
    }

    pub fn mapped_mouse(&self) -> Vec<MouseBinding> {
        self.mouse
            .iter()
            .map(|binding| binding.mapped(&self.modkey))
            .collect()
    }

    pub fn extension_defaults(&self) -> &WidgetDefaults {
        self.extension_defaults
            .as_ref()
            .unwrap_or(&self.widget_defaults)
    }

    pub fn scratchpad(&self, name: &str) -> Option<&ScratchPad> {
        self.scratchpads.iter().find(|pad| pad.name == name)
    }

    /// Names of all groups, scratchpads included.
    pub fn group_names(&self) -> Vec<&str> {
        self.groups
            .iter()
            .map(|group| group.name.as_str())
            .chain(self.scratchpads.iter().map(|pad| pad.name.as_str()))
            .collect()
    }

    /// Resolves [`Config::battery_status_file`].
    ///
    /// # Errors
    ///
    /// Will error if no path is configured and there is no usable runtime directory.
    pub fn battery_status_path(&self) -> anyhow::Result<PathBuf> {
        match &self.battery_status_file {
            Some(path) => Ok(absolute_path(path)),
            None => Ok(BaseDirectories::with_prefix("tilerc")?.place_runtime_file(BATTERY_FILE)?),
        }
    }
}

impl tilerc_core::Config for Config {
    fn battery(&self) -> &BatteryConfig {
        &self.battery
    }

    fn autostart(&self) -> &AutostartConfig {
        &self.autostart
    }
}

#[must_use]
pub fn is_program_in_path(program: &str) -> bool {
    if let Ok(path) = env::var("PATH") {
        for p in path.split(':') {
            let p_str = format!("{p}/{program}");
            if fs::metadata(p_str).is_ok() {
                return true;
            }
        }
    }
    false
}

fn absolute_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(&*raw).map_or_else(|_| path.to_path_buf(), |p| PathBuf::from(p.into_owned()))
}
