//! Value types shared by the configuration records.
mod color;
mod rect;
mod size;

pub use color::{Color, ColorError};
pub use rect::Rect;
pub use size::Size;
