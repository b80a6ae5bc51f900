//! Configuration loading, validation and export for `tilerc`.
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]
mod config;
pub mod export;
pub mod utils;

pub use config::*;
