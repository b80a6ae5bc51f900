use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A `#RRGGBB` or `#RRGGBBAA` color as the runtime expects it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: Option<u8>,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color `{0}`, expected #RRGGBB or #RRGGBBAA")]
pub struct ColorError(String);

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: None,
        }
    }

    pub const fn transparent() -> Self {
        Self {
            red: 0,
            green: 0,
            blue: 0,
            alpha: Some(0),
        }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorError(s.to_owned());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self {
            red: channel(0)?,
            green: channel(2)?,
            blue: channel(4)?,
            alpha: if hex.len() == 8 { Some(channel(6)?) } else { None },
        })
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)?;
        if let Some(alpha) = self.alpha {
            write!(f, "{alpha:02X}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_and_rgba() {
        assert_eq!("#67608B".parse(), Ok(Color::rgb(0x67, 0x60, 0x8B)));
        assert_eq!("#00000000".parse(), Ok(Color::transparent()));
        assert_eq!("#ffffff".parse::<Color>().map(|c| c.to_string()).as_deref(), Ok("#FFFFFF"));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!("67608B".parse::<Color>().is_err());
        assert!("#6760".parse::<Color>().is_err());
        assert!("#GG608B".parse::<Color>().is_err());
        assert!("#ÿÿÿ".parse::<Color>().is_err());
    }
}
