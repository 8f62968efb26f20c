use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Where the work session takes place.
/// Only `Office` requires a location fix at check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkType {
    Office, // OFFICE
    Remote, // REMOTE
    Field,  // FIELD
}

impl WorkType {
    /// Wire code sent to the server
    pub fn code(&self) -> &'static str {
        match self {
            WorkType::Office => "OFFICE",
            WorkType::Remote => "REMOTE",
            WorkType::Field => "FIELD",
        }
    }

    /// Helper: convert input code from CLI or config (any case, short forms allowed)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "OFFICE" | "O" => Some(WorkType::Office),
            "REMOTE" | "R" => Some(WorkType::Remote),
            "FIELD" | "F" => Some(WorkType::Field),
            _ => None,
        }
    }

    pub fn requires_location(&self) -> bool {
        matches!(self, WorkType::Office)
    }
}
