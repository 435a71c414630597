use crate::config::ProxyConfig;
use alert_control_streamlabs::api::StreamlabsApi;
use alert_control_streamlabs::types::{AlertCommand, AlertState};
use std::sync::Arc;
use tokio::sync::watch;

/// In-memory, authoritative alert state. Each successful upstream command is
/// published to every subscriber; last write wins.
#[derive(Clone)]
pub struct AlertBroadcast {
    tx: Arc<watch::Sender<AlertState>>,
}

impl Default for AlertBroadcast {
    fn default() -> Self {
        Self::new(AlertState::Normal)
    }
}

impl AlertBroadcast {
    pub fn new(initial: AlertState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn current(&self) -> AlertState {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<AlertState> {
        self.tx.subscribe()
    }

    /// Advances the state for a command that succeeded upstream and returns
    /// the new value. Subscribers are only woken on an actual change.
    pub fn apply(&self, command: AlertCommand) -> AlertState {
        let mut next = AlertState::Normal;
        self.tx.send_if_modified(|state| {
            next = state.after(command);
            if next == *state {
                return false;
            }
            *state = next;
            true
        });
        next
    }
}

#[derive(Clone)]
pub struct AppState {
    pub api: StreamlabsApi,
    pub alerts: AlertBroadcast,
}

impl AppState {
    pub fn new(config: &ProxyConfig) -> Self {
        Self {
            api: StreamlabsApi::with_bases(&config.api_v1_base, &config.api_v2_base),
            alerts: AlertBroadcast::default(),
        }
    }
}
