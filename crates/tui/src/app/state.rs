use super::*;

pub struct App {
    pub should_quit: bool,
    pub config: Config,
    pub surface: Surface,
    /// Started as `display`; leaving the display view quits.
    pub display_only: bool,
    pub session_store: SessionStore,
    pub session: Option<Session>,
    pub login: Option<LoginState>,
    pub proxy: ProxyClient,
    pub alert_state: AlertState,
    pub user: Option<StreamlabsUser>,
    pub busy: bool,
    pub show_help: bool,
    pub keybinds: Keybinds,
    pub layout: LayoutState,
    pub last_error: Option<String>,
    pub last_change: Option<DateTime<Local>>,
    pub mirror: StateMirror,
    pub status_rx: watch::Receiver<AlertState>,
    pub poller: Option<StatusPoller>,
    pub app_async_tx: Option<mpsc::UnboundedSender<AppAsyncEvent>>,
    pub app_async_rx: Option<mpsc::UnboundedReceiver<AppAsyncEvent>>,
}

impl App {
    pub fn new(config: Config, session_store: SessionStore, surface: Surface) -> Self {
        let (app_async_tx, app_async_rx) = mpsc::unbounded_channel();
        let mirror = StateMirror::default();
        let status_rx = mirror.subscribe();
        let proxy = ProxyClient::new(config.proxy.base_url.clone());

        Self {
            should_quit: false,
            config,
            surface,
            display_only: surface == Surface::Display,
            session_store,
            session: None,
            login: None,
            proxy,
            alert_state: AlertState::Normal,
            user: None,
            busy: false,
            show_help: false,
            keybinds: Keybinds,
            layout: LayoutState::default(),
            last_error: None,
            last_change: None,
            mirror,
            status_rx,
            poller: None,
            app_async_tx: Some(app_async_tx),
            app_async_rx: Some(app_async_rx),
        }
    }
}
