//! Typed session configuration records and the session-side logic of `tilerc`.
// We deny clippy pedantic lints, primarily to keep code as correct as possible.
// The window manager runtime does the real work; this crate only describes it
// and runs the few helpers a session needs.
#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
pub mod autostart;
mod command;
pub mod config;
pub mod errors;
pub mod models;
mod session;
pub mod status;
pub mod utils;

pub use autostart::{Autostart, AutostartConfig, Launcher, ProcessSpec, SystemLauncher};
pub use command::Command;
pub use config::Config;
pub use session::Session;
pub use status::{BatteryConfig, BatteryMonitor, BatteryRefresh};
pub use utils::child_process;
