use super::*;
use alert_control_streamlabs::auth::exchange_code;

impl App {
    pub fn init(&mut self) {
        match self.session_store.load() {
            Ok(session) => self.session = session.filter(Session::is_authenticated),
            Err(e) => self.report_error("Failed to load session", e),
        }

        match self.surface {
            Surface::Display => self.start_polling(),
            Surface::Control if self.session.is_some() => self.enter_control(),
            Surface::Control => self.show_login(),
        }
    }

    pub(super) fn show_login(&mut self) {
        self.poller = None;
        self.surface = Surface::Control;
        self.login = Some(LoginState::new(&self.config.oauth_credentials()));
    }

    pub(super) fn enter_control(&mut self) {
        self.login = None;
        self.surface = Surface::Control;
        self.start_polling();
        self.load_user_info();
    }

    /// (Re)starts the poller at the interval of the current surface. The
    /// previous poller is dropped, which stops it.
    pub(super) fn start_polling(&mut self) {
        let interval = match self.surface {
            Surface::Control => self.config.sync.control_interval(),
            Surface::Display => self.config.sync.display_interval(),
        };
        self.poller = None;
        self.poller = Some(StatusPoller::spawn(
            self.proxy.clone(),
            interval,
            self.mirror.clone(),
        ));
        tracing::debug!(?interval, surface = ?self.surface, "Polling alert status");
    }

    fn load_user_info(&mut self) {
        let Some(session) = self.session.clone() else {
            return;
        };
        let proxy = self.proxy.clone();
        self.spawn_app_task(async move {
            match proxy.user_info(&session).await {
                Ok(user) => AppAsyncEvent::UserInfoLoaded {
                    user: Some(user),
                    error: None,
                },
                Err(e) => AppAsyncEvent::UserInfoLoaded {
                    user: None,
                    error: Some(e.to_string()),
                },
            }
        });
    }

    pub(super) fn complete_oauth(&mut self, code: String) {
        let credentials = self.config.oauth_credentials();
        self.spawn_app_task(async move {
            match exchange_code(&credentials, &code).await {
                Ok(token) => AppAsyncEvent::OAuthCompleted {
                    token: Some(token),
                    error: None,
                },
                Err(e) => {
                    tracing::error!("Error exchanging code for token: {}", e);
                    AppAsyncEvent::OAuthCompleted {
                        token: None,
                        error: Some(format!("Authentication failed: {}", e.user_message())),
                    }
                }
            }
        });
    }

    /// Moves the mirrored state into the view if it changed since last look.
    fn sync_from_mirror(&mut self) {
        if self.status_rx.has_changed().unwrap_or(false) {
            self.alert_state = *self.status_rx.borrow_and_update();
            self.last_change = Some(Local::now());
        }
    }

    pub fn process_async_events(&mut self) {
        let mut async_events = Vec::new();
        if let Some(ref mut rx) = self.app_async_rx {
            while let Ok(event) = rx.try_recv() {
                async_events.push(event);
            }
        }

        for event in async_events {
            match event {
                AppAsyncEvent::CommandFinished {
                    action,
                    status,
                    error,
                } => {
                    self.busy = false;
                    if let Some(err) = error {
                        self.report_error(&format!("Error setting {} state", action.label()), err);
                    } else if let Some(status) = status {
                        self.mirror.publish(status);
                        self.clear_error();
                    }
                }
                AppAsyncEvent::StatusRefreshed { status, error } => {
                    if let Some(err) = error {
                        self.report_error("Error fetching alert status", err);
                    } else if let Some(status) = status {
                        self.mirror.publish(status);
                        self.clear_error();
                    }
                }
                AppAsyncEvent::OAuthCompleted { token, error } => {
                    if let Some(err) = error {
                        self.report_error("Authentication failed", &err);
                        if let Some(ref mut login) = self.login {
                            login.exchange_failed(err);
                        }
                    } else if let Some(token) = token {
                        let session = Session::new(token);
                        if let Err(e) = self.session_store.save(&session) {
                            self.report_error("Failed to persist session", &e);
                            if let Some(ref mut login) = self.login {
                                login.exchange_failed(format!("Could not save session: {e}"));
                            }
                        } else {
                            tracing::info!("Logged in");
                            self.session = Some(session);
                            self.clear_error();
                            self.enter_control();
                        }
                    }
                }
                AppAsyncEvent::UserInfoLoaded { user, error } => {
                    if let Some(err) = error {
                        self.report_error("Failed to fetch user info", err);
                    } else {
                        self.user = user;
                    }
                }
            }
        }

        self.sync_from_mirror();
    }
}
