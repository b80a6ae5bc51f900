use crate::models::Color;
use serde::{Deserialize, Serialize};

/// Layout algorithms the runtime provides, with their parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Layout {
    /// Main pane on top, remaining windows stacked below it.
    MonadWide(MonadParams),
    /// Focused window covers the whole screen.
    Max,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MonadParams {
    /// Share of the screen given to the main pane.
    pub ratio: f32,
    pub border_focus: Color,
    pub border_normal: Color,
    pub border_width: u32,
    pub margin: u32,
}

impl Default for MonadParams {
    fn default() -> Self {
        Self {
            ratio: 0.5,
            border_focus: Color::rgb(0xFF, 0x00, 0x00),
            border_normal: Color::rgb(0x00, 0x00, 0x00),
            border_width: 2,
            margin: 0,
        }
    }
}

impl Layout {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MonadWide(_) => "monadwide",
            Self::Max => "max",
        }
    }

    pub fn params(&self) -> Option<&MonadParams> {
        match self {
            Self::MonadWide(params) => Some(params),
            Self::Max => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_params_take_defaults() {
        let layout: Layout = ron::from_str("MonadWide((ratio: 0.7, margin: 6))").unwrap();
        let params = layout.params().unwrap();
        assert!((params.ratio - 0.7).abs() < f32::EPSILON);
        assert_eq!(params.margin, 6);
        assert_eq!(params.border_width, 2);
        assert_eq!(layout.name(), "monadwide");
    }
}
