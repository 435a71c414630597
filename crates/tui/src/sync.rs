//! Keeps a surface's view of the alert state in step with the proxy.
//!
//! A [`StatusPoller`] fetches the authoritative state on a fixed interval and
//! publishes it into a [`StateMirror`]. Surfaces subscribe to the mirror; they
//! only see a value when it actually changes. Fetch failures are logged and
//! leave the mirrored state alone.

use crate::proxy_client::ProxyClient;
use alert_control_streamlabs::types::AlertState;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub trait StatusSource: Send + Sync + 'static {
    fn fetch_status(&self) -> impl Future<Output = anyhow::Result<AlertState>> + Send;
}

impl StatusSource for ProxyClient {
    async fn fetch_status(&self) -> anyhow::Result<AlertState> {
        Ok(self.status().await?)
    }
}

/// Last-write-wins cell for the alert state, starting at `normal`.
#[derive(Clone)]
pub struct StateMirror {
    tx: Arc<watch::Sender<AlertState>>,
}

impl Default for StateMirror {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(AlertState::Normal);
        Self { tx: Arc::new(tx) }
    }
}

impl StateMirror {
    pub fn current(&self) -> AlertState {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<AlertState> {
        self.tx.subscribe()
    }

    /// Returns true if subscribers were notified.
    pub fn publish(&self, state: AlertState) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == state {
                return false;
            }
            *current = state;
            true
        })
    }
}

/// Background poll loop. Dropping it stops polling.
pub struct StatusPoller {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl StatusPoller {
    pub fn spawn<S: StatusSource>(source: S, interval: Duration, mirror: StateMirror) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                match source.fetch_status().await {
                    Ok(state) => {
                        if mirror.publish(state) {
                            debug!(%state, "Alert state changed");
                        }
                    }
                    Err(e) => warn!("Error fetching alert status: {e:#}"),
                }
            }
            debug!("Status poller stopped");
        });
        Self { cancel, handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::time::{sleep, timeout};

    #[derive(Clone, Default)]
    struct FakeSource {
        state: Arc<Mutex<Option<AlertState>>>,
        calls: Arc<AtomicUsize>,
    }

    impl FakeSource {
        fn set(&self, state: Option<AlertState>) {
            *self.state.lock().unwrap() = state;
        }
    }

    impl StatusSource for FakeSource {
        async fn fetch_status(&self) -> anyhow::Result<AlertState> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let state = *self.state.lock().unwrap();
            state.ok_or_else(|| anyhow!("proxy unavailable"))
        }
    }

    const CYCLE: Duration = Duration::from_secs(2);

    #[tokio::test(start_paused = true)]
    async fn remote_write_is_reflected_within_one_cycle() {
        let source = FakeSource::default();
        source.set(Some(AlertState::Normal));
        let mirror = StateMirror::default();
        let mut rx = mirror.subscribe();

        let _poller = StatusPoller::spawn(source.clone(), CYCLE, mirror.clone());
        sleep(Duration::from_millis(10)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        source.set(Some(AlertState::Mute));
        timeout(CYCLE, rx.changed())
            .await
            .expect("state not reflected within one cycle")
            .unwrap();
        assert_eq!(*rx.borrow_and_update(), AlertState::Mute);
    }

    #[tokio::test(start_paused = true)]
    async fn failures_leave_state_unchanged() {
        let source = FakeSource::default();
        let mirror = StateMirror::default();
        let mut rx = mirror.subscribe();

        let _poller = StatusPoller::spawn(source.clone(), CYCLE, mirror.clone());
        sleep(CYCLE * 3).await;
        assert!(source.calls.load(Ordering::SeqCst) >= 3);
        assert_eq!(mirror.current(), AlertState::Normal);
        assert!(!rx.has_changed().unwrap());

        source.set(Some(AlertState::Suppress));
        timeout(CYCLE * 2, rx.changed()).await.unwrap().unwrap();
        assert_eq!(mirror.current(), AlertState::Suppress);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_poller_stops_polling() {
        let source = FakeSource::default();
        source.set(Some(AlertState::Normal));
        let poller = StatusPoller::spawn(source.clone(), CYCLE, StateMirror::default());
        sleep(Duration::from_millis(10)).await;
        assert!(poller.is_running());

        drop(poller);
        sleep(Duration::from_millis(10)).await;
        let calls = source.calls.load(Ordering::SeqCst);
        sleep(CYCLE * 5).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), calls);
    }

    #[test]
    fn publish_reports_only_changes() {
        let mirror = StateMirror::default();
        assert!(!mirror.publish(AlertState::Normal));
        assert!(mirror.publish(AlertState::Mute));
        assert!(!mirror.publish(AlertState::Mute));
    }
}
