use crate::errors::{Result, TileError};
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Shown when the status output has no capacity line.
pub const NOT_AVAILABLE: &str = "N/A";
/// Shown when the status command cannot be run or fails.
pub const ERROR: &str = "Error";

/// When the battery text is read.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatteryRefresh {
    /// Read once per configuration load, the value stays frozen until a reload.
    #[default]
    Once,
    /// Read again every `secs` seconds.
    Every { secs: u64 },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct BatteryConfig {
    /// Status command and its arguments.
    pub command: Vec<String>,
    /// Label of the line holding the capacity, as in `Capacity = 87 [%]`.
    pub label: String,
    pub timeout_secs: u64,
    pub refresh: BatteryRefresh,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            command: vec!["sudo".to_owned(), "tlp-stat".to_owned(), "-b".to_owned()],
            label: "Capacity".to_owned(),
            timeout_secs: 5,
            refresh: BatteryRefresh::Once,
        }
    }
}

impl BatteryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Finds the first line holding `label` and `=` and returns the value between
/// the `=` and the following `[`, with a percent sign appended.
pub fn parse_capacity(output: &str, label: &str) -> Option<String> {
    let line = output
        .lines()
        .find(|line| line.contains(label) && line.contains('='))?;
    let after_eq = line.split('=').nth(1).unwrap_or_default().trim();
    let value = after_eq.split('[').next().unwrap_or_default().trim();
    Some(format!("{value}%"))
}

/// Runs the status command and returns the display text.
///
/// Every failure collapses to [`ERROR`], a missing capacity line to [`NOT_AVAILABLE`].
pub async fn read_capacity(config: &BatteryConfig) -> String {
    match query(config).await {
        Ok(output) => {
            parse_capacity(&output, &config.label).unwrap_or_else(|| NOT_AVAILABLE.to_owned())
        }
        Err(err) => {
            tracing::debug!("Battery status unavailable: {err}");
            ERROR.to_owned()
        }
    }
}

async fn query(config: &BatteryConfig) -> Result<String> {
    let (program, args) = config.command.split_first().ok_or(TileError::EmptyCommand)?;
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .output();
    let output = tokio::time::timeout(config.timeout(), output)
        .await
        .map_err(|_| TileError::Timeout(config.command.join(" ")))??;
    if !output.status.success() {
        return Err(TileError::CommandFailed {
            command: config.command.join(" "),
            status: output.status,
        });
    }
    Ok(String::from_utf8(output.stdout)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TLP_OUTPUT: &str = "\
--- TLP 1.6.1 --------------------------------------------

+++ Battery Care
Plugin: thinkpad

+++ ThinkPad Battery Status: BAT0 (Main / Internal)
/sys/class/power_supply/BAT0/energy_full_design             =  57020 [mWh]
/sys/class/power_supply/BAT0/energy_now                     =  43890 [mWh]
/sys/class/power_supply/BAT0/status                         = Discharging

Charge                                                      =   87.0 [%]
Capacity                                                    =   87 [%]
";

    fn shell(script: &str) -> BatteryConfig {
        BatteryConfig {
            command: vec!["sh".to_owned(), "-c".to_owned(), script.to_owned()],
            ..BatteryConfig::default()
        }
    }

    #[test]
    fn parses_labeled_line() {
        assert_eq!(parse_capacity("Capacity = 87 [%]", "Capacity").as_deref(), Some("87%"));
        assert_eq!(parse_capacity(TLP_OUTPUT, "Capacity").as_deref(), Some("87%"));
    }

    #[test]
    fn first_matching_line_wins() {
        let output = "Capacity = 80 [%]\nCapacity = 70 [%]";
        assert_eq!(parse_capacity(output, "Capacity").as_deref(), Some("80%"));
    }

    #[test]
    fn line_needs_label_and_assignment() {
        assert_eq!(parse_capacity("Capacity: 87 [%]", "Capacity"), None);
        assert_eq!(parse_capacity("Charge = 87 [%]", "Capacity"), None);
        assert_eq!(parse_capacity("", "Capacity"), None);
    }

    #[test]
    fn value_without_bracket_is_kept_whole() {
        assert_eq!(parse_capacity("Capacity = 91", "Capacity").as_deref(), Some("91%"));
    }

    #[tokio::test]
    async fn reads_from_command() {
        let config = shell("echo 'Capacity                = 87 [%]'");
        assert_eq!(read_capacity(&config).await, "87%");
    }

    #[tokio::test]
    async fn missing_line_is_not_available() {
        let config = shell("echo 'Charge = 87 [%]'");
        assert_eq!(read_capacity(&config).await, NOT_AVAILABLE);
    }

    #[tokio::test]
    async fn non_zero_exit_is_error() {
        let config = shell("echo 'Capacity = 87 [%]'; exit 1");
        assert_eq!(read_capacity(&config).await, ERROR);
    }

    #[tokio::test]
    async fn timeout_is_error() {
        let mut config = shell("sleep 5; echo 'Capacity = 87 [%]'");
        config.timeout_secs = 1;
        assert_eq!(read_capacity(&config).await, ERROR);
    }

    #[tokio::test]
    async fn absent_command_is_error() {
        let config = BatteryConfig {
            command: vec!["tilerc-no-such-status-command".to_owned()],
            ..BatteryConfig::default()
        };
        assert_eq!(read_capacity(&config).await, ERROR);

        let empty = BatteryConfig {
            command: Vec::new(),
            ..BatteryConfig::default()
        };
        assert_eq!(read_capacity(&empty).await, ERROR);
    }
}
