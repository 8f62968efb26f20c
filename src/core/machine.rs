//! Session state machine.
//!
//! Owns the `UiState`, the last `Session` resolved from the server and the
//! early-checkout confirmation dialog. Operations never set these fields
//! directly: they go through the methods below, and every change of
//! `Phase` goes through `transition`, so at most one operation is in flight.

use crate::errors::{AppError, AppResult};
use crate::models::session::Session;
use serde::Serialize;

/// What the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum UiState {
    Idle,
    Working,
    Loading,
    Error(String),
}

impl UiState {
    pub fn is_error(&self) -> bool {
        matches!(self, UiState::Error(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Refresh,
    CheckIn,
    CheckOut,
    ConfirmCheckOut,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Refresh => "refresh",
            Operation::CheckIn => "check-in",
            Operation::CheckOut => "check-out",
            Operation::ConfirmCheckOut => "confirm-check-out",
        }
    }
}

/// Busy state of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Submitting(Operation),
    ConfirmationPending,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Ready => "ready",
            Phase::Submitting(_) => "submitting",
            Phase::ConfirmationPending => "confirmation pending",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Begin(Operation),
    Settled,
    PolicyRejected,
    ConfirmFailed,
    Cancel,
    Expired,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Begin(op) => op.name(),
            Event::Settled => "settle",
            Event::PolicyRejected => "policy rejection",
            Event::ConfirmFailed => "confirmation failure",
            Event::Cancel => "cancel",
            Event::Expired => "session expiry",
        }
    }
}

/// Transition table.
///
/// ```text
/// Ready               --Begin(Refresh|CheckIn|CheckOut)--> Submitting(op)
/// Submitting(_)       --Settled | Expired--------------> Ready
/// Submitting(CheckOut)--PolicyRejected-----------------> ConfirmationPending
/// ConfirmationPending --Begin(ConfirmCheckOut)---------> Submitting(ConfirmCheckOut)
/// ConfirmationPending --Cancel-------------------------> Ready
/// Submitting(ConfirmCheckOut) --ConfirmFailed----------> ConfirmationPending
/// ```
pub fn transition(from: Phase, event: Event) -> AppResult<Phase> {
    use Operation::*;

    let next = match (from, event) {
        (Phase::Ready, Event::Begin(op @ (Refresh | CheckIn | CheckOut))) => Phase::Submitting(op),
        (Phase::Submitting(_), Event::Settled | Event::Expired) => Phase::Ready,
        (Phase::Submitting(CheckOut), Event::PolicyRejected) => Phase::ConfirmationPending,
        (Phase::ConfirmationPending, Event::Begin(ConfirmCheckOut)) => {
            Phase::Submitting(ConfirmCheckOut)
        }
        (Phase::ConfirmationPending, Event::Cancel) => Phase::Ready,
        (Phase::Submitting(ConfirmCheckOut), Event::ConfirmFailed) => Phase::ConfirmationPending,
        _ => {
            return Err(AppError::IllegalTransition {
                from: from.name(),
                event: event.name(),
            });
        }
    };

    Ok(next)
}

/// Early-checkout confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open {
        prompt: String,
        notice: Option<String>,
    },
    Submitting {
        prompt: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct ConfirmationDialog {
    state: DialogState,
    justification: String,
    skip_lunch: bool,
}

impl ConfirmationDialog {
    pub fn state(&self) -> &DialogState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, DialogState::Closed)
    }

    /// Server supplied reason, while the dialog exists.
    pub fn prompt(&self) -> Option<&str> {
        match &self.state {
            DialogState::Open { prompt, .. } | DialogState::Submitting { prompt } => Some(prompt),
            DialogState::Closed => None,
        }
    }

    /// Inline message under the justification field.
    pub fn notice(&self) -> Option<&str> {
        match &self.state {
            DialogState::Open { notice, .. } => notice.as_deref(),
            _ => None,
        }
    }

    pub fn justification(&self) -> &str {
        &self.justification
    }

    /// Controls are disabled while the confirmed check-out is in flight.
    pub fn controls_enabled(&self) -> bool {
        matches!(self.state, DialogState::Open { .. })
    }

    fn close(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone)]
pub struct SessionMachine {
    ui: UiState,
    session: Session,
    phase: Phase,
    dialog: ConfirmationDialog,
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionMachine {
    /// Nothing is known until the first status refresh.
    pub fn new() -> Self {
        Self {
            ui: UiState::Loading,
            session: Session::Inactive,
            phase: Phase::Ready,
            dialog: ConfirmationDialog::default(),
        }
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn dialog(&self) -> &ConfirmationDialog {
        &self.dialog
    }

    /// UI state matching the last resolved session, without banner.
    fn settled_ui(&self) -> UiState {
        if self.session.is_active() {
            UiState::Working
        } else {
            UiState::Idle
        }
    }

    fn apply(&mut self, event: Event) -> AppResult<()> {
        self.phase = transition(self.phase, event)?;
        Ok(())
    }

    /// Start a user operation. Check-in needs a closed session, check-out an open one.
    pub(crate) fn begin(&mut self, op: Operation) -> AppResult<()> {
        match op {
            Operation::CheckIn if self.session.is_active() => {
                return Err(AppError::OperationRejected(
                    "already checked in".to_string(),
                ));
            }
            Operation::CheckOut if !self.session.is_active() => {
                return Err(AppError::OperationRejected("not checked in".to_string()));
            }
            _ => {}
        }

        self.apply(Event::Begin(op))?;

        // a new attempt clears the previous error banner
        if matches!(op, Operation::CheckIn | Operation::CheckOut) && self.ui.is_error() {
            self.ui = self.settled_ui();
        }
        Ok(())
    }

    pub(crate) fn set_loading(&mut self) {
        self.ui = UiState::Loading;
    }

    /// Authoritative session from the server.
    pub(crate) fn resolved(&mut self, session: Session) {
        self.session = session;
        self.ui = self.settled_ui();
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.ui = UiState::Error(message.into());
    }

    pub(crate) fn settle(&mut self) -> AppResult<()> {
        self.apply(Event::Settled)
    }

    /// 401 somewhere in the current operation: drop the dialog and go back
    /// to the last known state.
    pub(crate) fn expired(&mut self) -> AppResult<()> {
        self.apply(Event::Expired)?;
        self.dialog.close();
        if self.ui == UiState::Loading {
            self.ui = self.settled_ui();
        }
        Ok(())
    }

    pub(crate) fn open_confirmation(&mut self, prompt: String, skip_lunch: bool) -> AppResult<()> {
        self.apply(Event::PolicyRejected)?;
        self.dialog = ConfirmationDialog {
            state: DialogState::Open {
                prompt,
                notice: None,
            },
            justification: String::new(),
            skip_lunch,
        };
        // the dialog reports this, not an error banner
        self.ui = self.settled_ui();
        Ok(())
    }

    /// Local validation message; the dialog must be open and idle.
    pub(crate) fn reject_justification(&mut self, notice: &str) -> AppResult<()> {
        match &mut self.dialog.state {
            DialogState::Open { notice: n, .. } if self.phase == Phase::ConfirmationPending => {
                *n = Some(notice.to_string());
                Ok(())
            }
            _ => Err(AppError::IllegalTransition {
                from: self.phase.name(),
                event: "justification",
            }),
        }
    }

    /// Returns the skip-lunch choice of the first check-out attempt.
    pub(crate) fn begin_confirmation(&mut self, justification: &str) -> AppResult<bool> {
        self.apply(Event::Begin(Operation::ConfirmCheckOut))?;

        let prompt = self.dialog.prompt().unwrap_or_default().to_string();
        self.dialog.state = DialogState::Submitting { prompt };
        self.dialog.justification = justification.to_string();
        Ok(self.dialog.skip_lunch)
    }

    pub(crate) fn confirmation_failed(&mut self, notice: &str) -> AppResult<()> {
        self.apply(Event::ConfirmFailed)?;

        let prompt = self.dialog.prompt().unwrap_or_default().to_string();
        self.dialog.state = DialogState::Open {
            prompt,
            notice: Some(notice.to_string()),
        };
        Ok(())
    }

    /// Successful confirmed check-out: dialog closed, justification cleared.
    /// The phase stays `Submitting` until the follow-up refresh settles.
    pub(crate) fn confirmation_accepted(&mut self) {
        self.dialog.close();
    }

    pub(crate) fn cancel_confirmation(&mut self) -> AppResult<()> {
        self.apply(Event::Cancel)?;
        self.dialog.close();
        Ok(())
    }
}
