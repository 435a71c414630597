use super::*;

impl App {
    /// Flips mute or suppress based on the state currently shown. Only one
    /// command is in flight at a time.
    pub(super) fn toggle(&mut self, action: AlertAction) {
        if self.busy {
            return;
        }

        let Some(session) = self.session.clone() else {
            self.report_error(&format!("Cannot {}", action.label()), "No token found");
            return;
        };

        let target = match action {
            AlertAction::Mute => self.alert_state.mute_target(),
            AlertAction::Suppress => self.alert_state.suppress_target(),
        };
        self.busy = true;

        let proxy = self.proxy.clone();
        self.spawn_app_task(async move {
            let result = match action {
                AlertAction::Mute => proxy.set_mute(&session, target).await,
                AlertAction::Suppress => proxy.set_suppress(&session, target).await,
            };

            match result {
                Ok(response) if response.success => match proxy.status().await {
                    Ok(status) => AppAsyncEvent::CommandFinished {
                        action,
                        status: Some(status),
                        error: None,
                    },
                    Err(e) => AppAsyncEvent::CommandFinished {
                        action,
                        status: None,
                        error: Some(format!("status refresh failed: {e}")),
                    },
                },
                Ok(response) => AppAsyncEvent::CommandFinished {
                    action,
                    status: None,
                    error: Some(format!("backend refused: {}", response.details)),
                },
                Err(e) => AppAsyncEvent::CommandFinished {
                    action,
                    status: None,
                    error: Some(format!("{} ({e})", e.user_message())),
                },
            }
        });
    }

    pub(super) fn refresh_status(&mut self) {
        let proxy = self.proxy.clone();
        self.spawn_app_task(async move {
            match proxy.status().await {
                Ok(status) => AppAsyncEvent::StatusRefreshed {
                    status: Some(status),
                    error: None,
                },
                Err(e) => AppAsyncEvent::StatusRefreshed {
                    status: None,
                    error: Some(e.to_string()),
                },
            }
        });
    }

    pub(super) fn logout(&mut self) {
        if let Err(e) = self.session_store.clear() {
            self.report_error("Failed to remove session", e);
        }
        self.session = None;
        self.user = None;
        self.busy = false;
        self.show_login();
    }

    pub(super) fn open_display(&mut self) {
        self.surface = Surface::Display;
        self.start_polling();
    }

    pub(super) fn close_display(&mut self) {
        if self.display_only {
            self.should_quit = true;
            return;
        }
        self.surface = Surface::Control;
        self.start_polling();
    }
}
