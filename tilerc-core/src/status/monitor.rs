use super::battery::{read_capacity, BatteryConfig, BatteryRefresh};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Owns the battery reads for one configuration load and publishes the latest text.
///
/// The published value is `None` until the first read finishes.
/// Must be created inside a tokio runtime. Dropping it stops any further reads.
#[derive(Debug)]
pub struct BatteryMonitor {
    rx: watch::Receiver<Option<String>>,
    handle: JoinHandle<()>,
}

impl BatteryMonitor {
    pub fn spawn(config: BatteryConfig) -> Self {
        let (tx, rx) = watch::channel(None);
        let handle = tokio::spawn(async move {
            match config.refresh {
                BatteryRefresh::Once => {
                    let text = read_capacity(&config).await;
                    tracing::debug!("Battery: {text}");
                    tx.send_replace(Some(text));
                }
                BatteryRefresh::Every { secs } => {
                    let mut ticker = interval(Duration::from_secs(secs.max(1)));
                    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    loop {
                        ticker.tick().await;
                        let text = read_capacity(&config).await;
                        tracing::trace!("Battery: {text}");
                        if tx.send(Some(text)).is_err() {
                            break;
                        }
                    }
                }
            }
        });
        Self { rx, handle }
    }

    /// Latest published text, `None` before the first read is done.
    pub fn current(&self) -> Option<String> {
        self.rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.rx.clone()
    }

    /// Whether no further reads will happen.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for BatteryMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{ERROR, NOT_AVAILABLE};
    use std::time::Duration;

    fn shell(script: &str, refresh: BatteryRefresh) -> BatteryConfig {
        BatteryConfig {
            command: vec!["sh".to_owned(), "-c".to_owned(), script.to_owned()],
            refresh,
            ..BatteryConfig::default()
        }
    }

    #[tokio::test]
    async fn once_reads_a_single_time() {
        let monitor = BatteryMonitor::spawn(shell("echo 'Capacity = 87 [%]'", BatteryRefresh::Once));
        let mut rx = monitor.subscribe();
        assert_eq!(monitor.current(), None);
        rx.changed().await.unwrap();
        assert_eq!(monitor.current().as_deref(), Some("87%"));

        tokio::time::timeout(Duration::from_secs(2), async {
            while !monitor.is_finished() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn every_reads_again() {
        let dir = tempfile::tempdir().unwrap();
        let counter = dir.path().join("count");
        std::fs::write(&counter, "0").unwrap();
        let script = format!(
            "n=$(cat {0}); echo $((n + 1)) > {0}; echo \"Capacity = $n [%]\"",
            counter.display()
        );
        let monitor = BatteryMonitor::spawn(shell(&script, BatteryRefresh::Every { secs: 1 }));
        let mut rx = monitor.subscribe();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_deref(), Some("0%"));
        tokio::time::timeout(Duration::from_secs(5), rx.changed())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rx.borrow_and_update().as_deref(), Some("1%"));
        assert!(!monitor.is_finished());
    }

    #[tokio::test]
    async fn failure_is_published_as_error() {
        let monitor = BatteryMonitor::spawn(shell("exit 2", BatteryRefresh::Once));
        let mut rx = monitor.subscribe();
        rx.changed().await.unwrap();
        assert_eq!(monitor.current().as_deref(), Some(ERROR));
    }

    #[tokio::test]
    async fn missing_label_is_not_confused_with_pending() {
        let monitor = BatteryMonitor::spawn(shell("sleep 0.2; echo 'Charge = 87'", BatteryRefresh::Once));
        let mut rx = monitor.subscribe();
        assert_eq!(monitor.current(), None);
        rx.changed().await.unwrap();
        assert_eq!(monitor.current().as_deref(), Some(NOT_AVAILABLE));
    }
}
