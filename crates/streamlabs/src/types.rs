use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertState {
    #[default]
    Normal,
    Mute,
    Suppress,
}

impl AlertState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertState::Normal => "normal",
            AlertState::Mute => "mute",
            AlertState::Suppress => "suppress",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlertState::Normal => "ON",
            AlertState::Mute => "MUTED",
            AlertState::Suppress => "SUPPRESSED",
        }
    }

    /// State after `command` succeeded upstream. Undoing a mode that is not
    /// active leaves the state alone.
    pub fn after(self, command: AlertCommand) -> AlertState {
        match (command, self) {
            (AlertCommand::MuteVolume, _) => AlertState::Mute,
            (AlertCommand::PauseQueue, _) => AlertState::Suppress,
            (AlertCommand::UnmuteVolume, AlertState::Mute) => AlertState::Normal,
            (AlertCommand::UnpauseQueue, AlertState::Suppress) => AlertState::Normal,
            (_, current) => current,
        }
    }

    /// Target for the mute toggle: mute unless already muted.
    pub fn mute_target(&self) -> bool {
        *self != AlertState::Mute
    }

    /// Target for the suppress toggle: suppress unless already suppressed.
    pub fn suppress_target(&self) -> bool {
        *self != AlertState::Suppress
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertCommand {
    MuteVolume,
    UnmuteVolume,
    PauseQueue,
    UnpauseQueue,
}

impl AlertCommand {
    pub fn for_mute(mute: bool) -> Self {
        if mute {
            AlertCommand::MuteVolume
        } else {
            AlertCommand::UnmuteVolume
        }
    }

    pub fn for_suppress(suppress: bool) -> Self {
        if suppress {
            AlertCommand::PauseQueue
        } else {
            AlertCommand::UnpauseQueue
        }
    }

    /// Path below the v2 API base.
    pub fn path(&self) -> &'static str {
        match self {
            AlertCommand::MuteVolume => "/alerts/mute_volume",
            AlertCommand::UnmuteVolume => "/alerts/unmute_volume",
            AlertCommand::PauseQueue => "/alerts/pause_queue",
            AlertCommand::UnpauseQueue => "/alerts/unpause_queue",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: AlertState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(default)]
    pub details: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetMuteRequest {
    pub mute: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetSuppressRequest {
    pub suppress: bool,
}

/// The `streamlabs` object of the user-info response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamlabsUser {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StreamlabsUser {
    pub fn display_name(&self) -> String {
        self.display_name
            .clone()
            .or_else(|| self.id.map(|id| format!("user {id}")))
            .unwrap_or_else(|| "unknown user".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_serialize_lowercase() {
        let body = serde_json::to_string(&StatusResponse {
            status: AlertState::Suppress,
        })
        .unwrap();
        assert_eq!(body, r#"{"status":"suppress"}"#);

        let parsed: StatusResponse = serde_json::from_str(r#"{"status":"mute"}"#).unwrap();
        assert_eq!(parsed.status, AlertState::Mute);
    }

    #[test]
    fn enabling_a_mode_replaces_the_other() {
        assert_eq!(AlertState::Suppress.after(AlertCommand::MuteVolume), AlertState::Mute);
        assert_eq!(AlertState::Mute.after(AlertCommand::PauseQueue), AlertState::Suppress);
    }

    #[test]
    fn disabling_an_inactive_mode_is_a_no_op() {
        assert_eq!(
            AlertState::Suppress.after(AlertCommand::UnmuteVolume),
            AlertState::Suppress
        );
        assert_eq!(AlertState::Mute.after(AlertCommand::UnpauseQueue), AlertState::Mute);
        assert_eq!(AlertState::Mute.after(AlertCommand::UnmuteVolume), AlertState::Normal);
        assert_eq!(
            AlertState::Suppress.after(AlertCommand::UnpauseQueue),
            AlertState::Normal
        );
    }

    #[test]
    fn toggle_targets_flip_only_the_active_mode() {
        assert!(AlertState::Normal.mute_target());
        assert!(!AlertState::Mute.mute_target());
        assert!(AlertState::Mute.suppress_target());
        assert!(!AlertState::Suppress.suppress_target());
    }

    #[test]
    fn commands_map_to_upstream_paths() {
        assert_eq!(AlertCommand::for_mute(true).path(), "/alerts/mute_volume");
        assert_eq!(AlertCommand::for_mute(false).path(), "/alerts/unmute_volume");
        assert_eq!(AlertCommand::for_suppress(true).path(), "/alerts/pause_queue");
        assert_eq!(AlertCommand::for_suppress(false).path(), "/alerts/unpause_queue");
    }

    #[test]
    fn user_display_name_falls_back_to_id() {
        let user: StreamlabsUser =
            serde_json::from_value(serde_json::json!({"id": 42, "primary": "twitch"})).unwrap();
        assert_eq!(user.display_name(), "user 42");
        assert_eq!(user.extra.get("primary").and_then(|v| v.as_str()), Some("twitch"));
    }
}
