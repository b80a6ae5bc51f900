//! Various shared functions that `tilerc` uses.
pub mod child_process;
