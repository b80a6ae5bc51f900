use serde::{Deserialize, Serialize};

/// Helper enum to represent a size which can be
/// an absolute pixel value or a fraction of the screen
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Copy)]
#[serde(untagged)]
pub enum Size {
    Pixel(i32),
    Ratio(f32),
}

impl Size {
    /// Turn the size into an absolute value, the pixel value
    /// will be returned as is, the ratio value will be
    /// multiplied by the provided `whole` to calculate
    /// the absolute value
    #[must_use]
    pub fn into_absolute(self, whole: i32) -> i32 {
        match self {
            Size::Pixel(x) => x,
            Size::Ratio(x) => (whole as f32 * x).round() as i32,
        }
    }

    /// The fraction of `whole` this size covers.
    #[must_use]
    pub fn as_ratio(self, whole: i32) -> f32 {
        match self {
            Size::Pixel(x) if whole != 0 => x as f32 / whole as f32,
            Size::Pixel(_) => 0.0,
            Size::Ratio(x) => x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_scaled_and_rounded() {
        assert_eq!(Size::Ratio(0.996).into_absolute(1920), 1912);
        assert_eq!(Size::Ratio(0.002).into_absolute(1920), 4);
        assert_eq!(Size::Pixel(300).into_absolute(1920), 300);
    }

    #[test]
    fn pixel_as_ratio() {
        assert!((Size::Pixel(960).as_ratio(1920) - 0.5).abs() < f32::EPSILON);
        assert!(Size::Pixel(10).as_ratio(0).abs() < f32::EPSILON);
    }
}
