use crate::autostart::{Autostart, Launcher, OnceMarker};
use crate::status::BatteryMonitor;
use crate::Config;
use tokio::sync::watch;

/// One login session: autostart on first start, battery reads per configuration load.
///
/// `start` and `reload` spawn tasks and must be called inside a tokio runtime.
pub struct Session<C: Config, L: Launcher> {
    config: C,
    launcher: L,
    autostart: Autostart,
    battery: Option<BatteryMonitor>,
}

impl<C: Config, L: Launcher> Session<C, L> {
    pub fn new(config: C, launcher: L, marker: OnceMarker) -> Self {
        Self {
            config,
            launcher,
            autostart: Autostart::new(marker),
            battery: None,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// First startup. Returns whether the autostart sequence ran.
    pub fn start(&mut self) -> bool {
        let fired = self
            .autostart
            .run(self.config.autostart(), &mut self.launcher);
        self.restart_battery();
        fired
    }

    /// Swaps in a freshly loaded configuration. Autostart is never run again.
    pub fn reload(&mut self, config: C) {
        tracing::info!("Reloading configuration");
        self.config = config;
        self.restart_battery();
    }

    /// Follows the battery text of the current configuration load.
    pub fn subscribe_battery(&self) -> Option<watch::Receiver<Option<String>>> {
        self.battery.as_ref().map(BatteryMonitor::subscribe)
    }

    pub fn reap_children(&mut self) {
        self.launcher.reap();
    }

    fn restart_battery(&mut self) {
        // the old monitor stops reading once dropped
        self.battery = Some(BatteryMonitor::spawn(self.config.battery().clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autostart::tests::{four_helpers, RecordingLauncher};
    use crate::config::TestConfig;
    use crate::status::BatteryConfig;

    fn config(script: &str) -> TestConfig {
        TestConfig {
            battery: BatteryConfig {
                command: vec!["sh".to_owned(), "-c".to_owned(), script.to_owned()],
                ..BatteryConfig::default()
            },
            autostart: four_helpers(),
        }
    }

    #[tokio::test]
    async fn reload_does_not_rerun_autostart() {
        let mut session = Session::new(
            config("echo 'Capacity = 50 [%]'"),
            RecordingLauncher::default(),
            OnceMarker::in_memory(),
        );
        assert!(session.start());
        session.reload(config("echo 'Capacity = 50 [%]'"));
        session.reload(config("echo 'Capacity = 50 [%]'"));

        assert_eq!(session.launcher().blocking.len(), 1);
        assert_eq!(session.launcher().detached.len(), 4);
    }

    #[tokio::test]
    async fn reload_reads_battery_again() {
        let mut session = Session::new(
            config("echo 'Capacity = 50 [%]'"),
            RecordingLauncher::default(),
            OnceMarker::in_memory(),
        );
        assert!(session.subscribe_battery().is_none());
        session.start();
        let mut rx = session.subscribe_battery().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_deref(), Some("50%"));

        session.reload(config("echo 'Capacity = 49 [%]'"));
        let mut rx = session.subscribe_battery().unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_deref(), Some("49%"));
    }
}
