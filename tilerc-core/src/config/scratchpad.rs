use crate::models::{Rect, Size};
use serde::{Deserialize, Serialize};

/// A hidden group whose dropdown windows are toggled by key bindings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScratchPad {
    pub name: ScratchPadName,
    pub dropdowns: Vec<DropDown>,
}

impl ScratchPad {
    pub fn dropdown(&self, name: &str) -> Option<&DropDown> {
        self.dropdowns.iter().find(|dropdown| dropdown.name == name)
    }
}

/// A floating window started on first toggle and shown or hidden afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DropDown {
    pub name: String,
    /// Command line started on first toggle.
    pub value: String,
    // fraction of screen width, 0.1 when unset
    pub x: Option<Size>,
    // fraction of screen height, 0.0 when unset
    pub y: Option<Size>,
    // fraction of screen width, 0.8 when unset
    pub width: Option<Size>,
    // fraction of screen height, 0.35 when unset
    pub height: Option<Size>,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Hide the dropdown when it loses focus.
    #[serde(default = "default_true")]
    pub on_focus_lost_hide: bool,
}

const fn default_opacity() -> f32 {
    0.9
}

const fn default_true() -> bool {
    true
}

impl DropDown {
    /// Size and position of the dropdown on a screen.
    pub fn geometry(&self, screen: &Rect) -> Rect {
        Rect {
            x: screen.x + sane_dimension(self.x, 0.1, screen.w),
            y: screen.y + sane_dimension(self.y, 0.0, screen.h),
            w: sane_dimension(self.width, 0.8, screen.w),
            h: sane_dimension(self.height, 0.35, screen.h),
        }
    }

    /// Whether the configured geometry stays on screen and the opacity is usable.
    pub fn is_sane(&self, screen: &Rect) -> bool {
        let within = |size: Option<Size>, whole: i32| {
            size.map_or(true, |s| (0.0..=1.0).contains(&s.as_ratio(whole)))
        };
        within(self.x, screen.w)
            && within(self.y, screen.h)
            && within(self.width, screen.w)
            && within(self.height, screen.h)
            && (0.0..=1.0).contains(&self.opacity)
            && screen.contains(&self.geometry(screen))
    }
}

/// Newtype used as the name for a scratchpad, can be seen as some sort of symbol in languages like
/// Lisp/Scheme/...
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(from = "String")]
#[serde(into = "String")]
pub struct ScratchPadName(String);

impl ScratchPadName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ScratchPadName {
    fn from(other: String) -> Self {
        Self(other)
    }
}

impl From<ScratchPadName> for String {
    fn from(other: ScratchPadName) -> Self {
        other.0
    }
}

impl From<&str> for ScratchPadName {
    fn from(other: &str) -> Self {
        Self(other.to_string())
    }
}

impl PartialEq<&str> for ScratchPadName {
    fn eq(&self, other: &&str) -> bool {
        &self.0.as_str() == other
    }
}

impl std::fmt::Display for ScratchPadName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn sane_dimension(config_value: Option<Size>, default_ratio: f32, max_pixel: i32) -> i32 {
    match config_value {
        Some(size @ Size::Ratio(r)) if (0.0..=1.0).contains(&r) => size.into_absolute(max_pixel),
        Some(Size::Pixel(pixel)) if (0..=max_pixel).contains(&pixel) => pixel,
        _ => Size::Ratio(default_ratio).into_absolute(max_pixel),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminal() -> DropDown {
        DropDown {
            name: "terminal".to_owned(),
            value: "st".to_owned(),
            x: Some(Size::Ratio(0.002)),
            y: Some(Size::Ratio(0.003)),
            width: Some(Size::Ratio(0.996)),
            height: Some(Size::Ratio(0.99)),
            opacity: 0.92,
            on_focus_lost_hide: false,
        }
    }

    #[test]
    fn geometry_from_fractions() {
        let screen = Rect::new(0, 0, 1000, 1000);
        assert_eq!(terminal().geometry(&screen), Rect::new(2, 3, 996, 990));
    }

    #[test]
    fn geometry_is_offset_by_screen() {
        let screen = Rect::new(1000, 0, 1000, 1000);
        assert_eq!(terminal().geometry(&screen).x, 1002);
    }

    #[test]
    fn unset_dimensions_fall_back() {
        let dropdown = DropDown {
            x: None,
            y: None,
            width: None,
            height: Some(Size::Ratio(4.0)),
            ..terminal()
        };
        let screen = Rect::new(0, 0, 1000, 1000);
        assert_eq!(dropdown.geometry(&screen), Rect::new(100, 0, 800, 350));
    }

    #[test]
    fn sanity_rejects_offscreen_geometry() {
        let screen = Rect::new(0, 0, 1920, 1080);
        assert!(terminal().is_sane(&screen));

        let offscreen = DropDown {
            x: Some(Size::Ratio(0.5)),
            ..terminal()
        };
        assert!(!offscreen.is_sane(&screen));

        let opaque = DropDown {
            opacity: 1.5,
            ..terminal()
        };
        assert!(!opaque.is_sane(&screen));
    }

    #[test]
    fn missing_flags_take_defaults() {
        let dropdown: DropDown =
            ron::from_str(r#"(name: "t", value: "st", x: None, y: None, width: None, height: None)"#)
                .unwrap();
        assert!(dropdown.on_focus_lost_hide);
        assert!((dropdown.opacity - 0.9).abs() < f32::EPSILON);
    }
}
