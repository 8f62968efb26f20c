use chrono::{DateTime, Local, Utc};
use serde::Serialize;

/// Client model of the current attendance period.
///
/// The start timestamp only exists on the `Active` variant, so "started_at
/// is present iff the session is active" holds by construction. The value
/// always comes from the server status response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Session {
    #[default]
    Inactive,
    Active { started_at: DateTime<Utc> },
}

impl Session {
    pub fn is_active(&self) -> bool {
        matches!(self, Session::Active { .. })
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Session::Active { started_at } => Some(*started_at),
            Session::Inactive => None,
        }
    }

    /// Start time in local time, `--:--` when not working.
    pub fn start_time_str(&self) -> String {
        self.started_at()
            .map(|t| t.with_timezone(&Local).format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string())
    }
}
