mod float_rule;
mod group;
mod keybind;
mod layout;
mod mouse;
mod scratchpad;
mod widget;

use crate::{AutostartConfig, BatteryConfig};
pub use float_rule::{FloatRule, FloatingLayout};
pub use group::{groups_from_chars, Group, GroupName};
pub use keybind::{Backend, Keybind, Modifier, MODKEY};
pub use layout::{Layout, MonadParams};
pub use mouse::MouseBinding;
pub use scratchpad::{DropDown, ScratchPad, ScratchPadName};
pub use widget::{
    Bar, HighlightMethod, MouseButton, NameTransform, Screen, SpacerLength, TextSource, Widget,
    WidgetDefaults,
};

/// What a [`crate::Session`] needs from a loaded configuration.
pub trait Config {
    fn battery(&self) -> &BatteryConfig;

    fn autostart(&self) -> &AutostartConfig;
}

#[cfg(test)]
#[allow(clippy::module_name_repetitions)]
pub struct TestConfig {
    pub battery: BatteryConfig,
    pub autostart: AutostartConfig,
}

#[cfg(test)]
impl Config for TestConfig {
    fn battery(&self) -> &BatteryConfig {
        &self.battery
    }

    fn autostart(&self) -> &AutostartConfig {
        &self.autostart
    }
}
