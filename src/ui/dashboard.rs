//! Terminal rendering of the session state machine.

use crate::core::machine::{SessionMachine, UiState};
use crate::models::session::Session;
use crate::utils::colors::{RESET, YELLOW, color_for_activity, colorize_optional};
use crate::utils::time::{mins2readable, minutes_since};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

/// One line describing the session, e.g.
/// `Working since 09:00 (2024-01-01T09:00:00Z), 01h 30m elapsed`.
pub fn session_line(session: &Session) -> String {
    match session.started_at() {
        Some(start) => format!(
            "Working since {} ({}), {} elapsed",
            session.start_time_str(),
            start.to_rfc3339_opts(SecondsFormat::Secs, true),
            mins2readable(minutes_since(start, Utc::now()))
        ),
        None => format!(
            "Not checked in (start {})",
            colorize_optional(&session.start_time_str())
        ),
    }
}

/// Print the current state. Errors are left to the caller.
pub fn render(machine: &SessionMachine) {
    let active = machine.session().is_active();
    let color = color_for_activity(active);

    match machine.ui() {
        UiState::Loading => println!("⏳ Loading…"),
        UiState::Working => println!("{color}🔥 {}{RESET}", session_line(machine.session())),
        UiState::Idle => println!("{color}💤 {}{RESET}", session_line(machine.session())),
        UiState::Error(_) => {}
    }
}

/// Early-checkout dialog
pub fn render_dialog(machine: &SessionMachine) {
    let dialog = machine.dialog();
    if let Some(prompt) = dialog.prompt() {
        println!("{YELLOW}⚠️  {prompt}{RESET}");
    }
    if let Some(notice) = dialog.notice() {
        println!("{YELLOW}   {notice}{RESET}");
    }
}

/// Machine readable snapshot for `status --json`
pub fn to_json(machine: &SessionMachine) -> serde_json::Value {
    json!({
        "ui": machine.ui(),
        "session": machine.session(),
    })
}
