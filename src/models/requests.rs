//! Wire types exchanged with the attendance server.

use super::{location::Fix, session::Session, work_type::WorkType};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /attendance/check-in`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub work_type: WorkType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    pub skip_lunch: bool,
}

impl CheckInRequest {
    pub fn new(work_type: WorkType, fix: Option<Fix>, skip_lunch: bool) -> Self {
        Self {
            work_type,
            lat: fix.map(|f| f.latitude),
            lon: fix.map(|f| f.longitude),
            skip_lunch,
        }
    }
}

/// Body of `POST /attendance/check-out`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutRequest {
    pub skip_lunch: bool,
    pub is_early_checkout_confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl CheckOutRequest {
    /// First, tentative attempt.
    pub fn tentative(skip_lunch: bool) -> Self {
        Self {
            skip_lunch,
            is_early_checkout_confirmed: false,
            memo: None,
        }
    }

    /// Override of an early-checkout rejection, justification attached.
    pub fn confirmed(skip_lunch: bool, memo: impl Into<String>) -> Self {
        Self {
            skip_lunch,
            is_early_checkout_confirmed: true,
            memo: Some(memo.into()),
        }
    }
}

/// Body of `GET /attendance/status`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    #[serde(default)]
    pub is_working: bool,
    #[serde(default)]
    pub start_time: Option<String>,
}

impl StatusResponse {
    /// Normalize into a `Session`.
    ///
    /// Returns `None` when the server claims an active session without a
    /// parseable start time: the client never makes one up.
    pub fn to_session(&self) -> Option<Session> {
        if !self.is_working {
            return Some(Session::Inactive);
        }

        let started_at = parse_start_time(self.start_time.as_deref()?)?;
        Some(Session::Active { started_at })
    }
}

/// ISO 8601 timestamp; without an offset it is read as local time.
fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
