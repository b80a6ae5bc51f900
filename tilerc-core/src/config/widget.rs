//! Status bar and widget records. Widgets are drawn in list order by the runtime.
use crate::models::Color;
use crate::Command;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WidgetDefaults {
    pub font: String,
    pub fontsize: u32,
    pub padding: u32,
}

impl Default for WidgetDefaults {
    fn default() -> Self {
        Self {
            font: "sans".to_owned(),
            fontsize: 12,
            padding: 3,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Screen {
    #[serde(default)]
    pub top: Option<Bar>,
    #[serde(default)]
    pub bottom: Option<Bar>,
}

impl Screen {
    pub fn bars(&self) -> impl Iterator<Item = &Bar> {
        self.top.iter().chain(self.bottom.iter())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Bar {
    /// Height in pixels.
    pub size: u32,
    #[serde(default)]
    pub background: Option<Color>,
    pub widgets: Vec<Widget>,
}

impl Bar {
    /// Number of widgets whose text comes from the battery reader.
    pub fn battery_slots(&self) -> usize {
        self.widgets
            .iter()
            .filter(|widget| {
                matches!(
                    widget,
                    Widget::TextBox {
                        text: TextSource::Battery,
                        ..
                    }
                )
            })
            .count()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightMethod {
    Border,
    Block,
    Text,
    Line,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacerLength {
    Fixed(u32),
    /// Take up all remaining space.
    Stretch,
}

/// Where a text box gets its text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    Static(String),
    /// Latest value published by the battery reader.
    Battery,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameTransform {
    #[default]
    Identity,
    Uppercase,
    Lowercase,
}

impl NameTransform {
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Identity => name.to_owned(),
            Self::Uppercase => name.to_uppercase(),
            Self::Lowercase => name.to_lowercase(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MouseButton {
    Button1,
    Button2,
    Button3,
    Button4,
    Button5,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Widget {
    GroupBox {
        #[serde(default)]
        background: Option<Color>,
        highlight_method: HighlightMethod,
        inactive: Color,
        active: Color,
        block_highlight_text_color: Color,
        borderwidth: u32,
    },
    Spacer {
        length: SpacerLength,
        #[serde(default)]
        background: Option<Color>,
    },
    CurrentLayout {
        #[serde(default)]
        max_chars: Option<u32>,
        #[serde(default)]
        scroll: bool,
        #[serde(default)]
        width: Option<u32>,
    },
    Systray,
    Clock {
        /// strftime format.
        format: String,
        #[serde(default)]
        fontsize: Option<u32>,
        #[serde(default)]
        foreground: Option<Color>,
        #[serde(default)]
        background: Option<Color>,
    },
    /// Shows the active key chord.
    Chord {
        /// Chord name to (background, foreground).
        chords_colors: BTreeMap<String, (Color, Color)>,
        #[serde(default)]
        name_transform: NameTransform,
    },
    PulseVolume {
        #[serde(default)]
        background: Option<Color>,
        #[serde(default)]
        foreground: Option<Color>,
        #[serde(default)]
        emoji: bool,
        #[serde(default)]
        emoji_list: Vec<String>,
        unmute_format: String,
        mute_format: String,
        #[serde(default)]
        mouse_callbacks: BTreeMap<MouseButton, Command>,
    },
    TextBox {
        text: TextSource,
        #[serde(default)]
        background: Option<Color>,
        #[serde(default)]
        foreground: Option<Color>,
        #[serde(default)]
        padding: Option<u32>,
    },
    Backlight {
        #[serde(default)]
        background: Option<Color>,
        #[serde(default)]
        foreground: Option<Color>,
        fmt: String,
        /// Directory name under `/sys/class/backlight`.
        backlight_name: String,
        /// Seconds between reads.
        update_interval: f32,
    },
}

impl Widget {
    pub fn name(&self) -> &'static str {
        match self {
            Self::GroupBox { .. } => "GroupBox",
            Self::Spacer { .. } => "Spacer",
            Self::CurrentLayout { .. } => "CurrentLayout",
            Self::Systray => "Systray",
            Self::Clock { .. } => "Clock",
            Self::Chord { .. } => "Chord",
            Self::PulseVolume { .. } => "PulseVolume",
            Self::TextBox { .. } => "TextBox",
            Self::Backlight { .. } => "Backlight",
        }
    }

    /// Commands fired by clicks on this widget.
    pub fn commands(&self) -> Vec<&Command> {
        match self {
            Self::PulseVolume {
                mouse_callbacks, ..
            } => mouse_callbacks.values().collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_battery_slots() {
        let bar = Bar {
            size: 24,
            background: None,
            widgets: vec![
                Widget::Systray,
                Widget::TextBox {
                    text: TextSource::Battery,
                    background: None,
                    foreground: None,
                    padding: Some(3),
                },
                Widget::TextBox {
                    text: TextSource::Static("|".to_owned()),
                    background: None,
                    foreground: None,
                    padding: None,
                },
            ],
        };
        assert_eq!(bar.battery_slots(), 1);
    }

    #[test]
    fn name_transform() {
        assert_eq!(NameTransform::Uppercase.apply("launch"), "LAUNCH");
        assert_eq!(NameTransform::Identity.apply("launch"), "launch");
    }
}
