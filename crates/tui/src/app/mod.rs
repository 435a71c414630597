use crate::keybinds::Keybinds;
use crate::onboarding::{LoginState, LoginStatus};
use crate::proxy_client::ProxyClient;
use crate::sync::{StateMirror, StatusPoller};
use crate::ui::layout::{centered_rect, LayoutState};
use crate::ui::panel::PanelType;
use crate::Config;
use alert_control_streamlabs::auth::{Session, SessionStore};
use alert_control_streamlabs::types::{AlertState, StreamlabsUser};
use anyhow::Result;
use chrono::{DateTime, Local};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::Frame;
use std::future::Future;
use tokio::sync::{mpsc, watch};

mod actions;
mod effects;
mod input;
mod render;
mod state;
mod types;

pub use state::App;
pub use types::{AlertAction, AppAsyncEvent, Surface};

impl App {
    pub(super) fn report_error(&mut self, context: &str, error: impl std::fmt::Display) {
        let message = format!("{context}: {}", Self::redact_sensitive(&error.to_string()));
        self.last_error = Some(message.clone());
        tracing::warn!("{message}");
    }

    pub(super) fn clear_error(&mut self) {
        self.last_error = None;
    }

    fn redact_sensitive(input: &str) -> String {
        const MARKER: &str = "Bearer ";
        let mut output = String::with_capacity(input.len());
        let mut rest = input;
        while let Some(idx) = rest.find(MARKER) {
            output.push_str(&rest[..idx]);
            output.push_str("Bearer [REDACTED]");
            let after = &rest[idx + MARKER.len()..];
            let token_len = after.find(char::is_whitespace).unwrap_or(after.len());
            rest = &after[token_len..];
        }
        output.push_str(rest);
        output
    }

    pub(super) fn spawn_app_task<F>(&self, future: F)
    where
        F: Future<Output = AppAsyncEvent> + Send + 'static,
    {
        if let Some(tx) = self.app_async_tx.clone() {
            tokio::spawn(async move {
                let event = future.await;
                let _ = tx.send(event);
            });
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_authenticated)
    }
}
