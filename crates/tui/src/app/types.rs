use alert_control_streamlabs::types::{AlertState, StreamlabsUser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Control,
    Display,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertAction {
    Mute,
    Suppress,
}

impl AlertAction {
    pub fn label(&self) -> &'static str {
        match self {
            AlertAction::Mute => "mute",
            AlertAction::Suppress => "suppress",
        }
    }
}

pub enum AppAsyncEvent {
    CommandFinished {
        action: AlertAction,
        status: Option<AlertState>,
        error: Option<String>,
    },
    StatusRefreshed {
        status: Option<AlertState>,
        error: Option<String>,
    },
    OAuthCompleted {
        token: Option<String>,
        error: Option<String>,
    },
    UserInfoLoaded {
        user: Option<StreamlabsUser>,
        error: Option<String>,
    },
}
