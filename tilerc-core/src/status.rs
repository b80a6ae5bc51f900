//! Status values shown by the bar that `tilerc` computes itself.
mod battery;
mod monitor;

pub use battery::{parse_capacity, read_capacity, BatteryConfig, BatteryRefresh, ERROR, NOT_AVAILABLE};
pub use monitor::BatteryMonitor;
