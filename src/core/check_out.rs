use super::attendance::{Attendance, Flow};
use super::machine::Operation;
use crate::errors::AppResult;
use crate::models::requests::CheckOutRequest;
use crate::remote::{Authority, RemoteError, RemoteResult};
use tracing::{info, warn};

pub const CHECK_OUT_FAILED: &str = "check-out failed";

/// Shown when the server flags an early check-out without saying why.
pub const EARLY_CHECKOUT_PROMPT: &str = "early check-out requires a justification";

/// Result of a tentative check-out, classified once at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutOutcome {
    Ok,
    /// Early-checkout policy: ask the user for a justification.
    PolicyRejected(String),
    /// Anything else; the message is ready for display.
    Failed(String),
    Expired,
}

impl CheckOutOutcome {
    pub fn classify(result: RemoteResult<()>) -> Self {
        match result {
            Ok(()) => CheckOutOutcome::Ok,
            Err(RemoteError::Expired) => CheckOutOutcome::Expired,
            Err(RemoteError::Rejected { body, .. }) if body.is_early_checkout() => {
                CheckOutOutcome::PolicyRejected(body.display_message(EARLY_CHECKOUT_PROMPT))
            }
            Err(RemoteError::Rejected { body, .. }) => {
                CheckOutOutcome::Failed(body.display_message(CHECK_OUT_FAILED))
            }
            Err(RemoteError::Transport(_)) => CheckOutOutcome::Failed(CHECK_OUT_FAILED.to_string()),
        }
    }
}

impl<A: Authority> Attendance<A> {
    /// End the current work session.
    ///
    /// An early-checkout rejection is not an error: it opens the
    /// confirmation dialog and the UI keeps showing `Working`.
    pub fn check_out(&mut self, skip_lunch: bool) -> AppResult<Flow> {
        self.machine.begin(Operation::CheckOut)?;

        let req = CheckOutRequest::tentative(skip_lunch);
        match CheckOutOutcome::classify(self.authority.check_out(&self.ctx, &req)) {
            CheckOutOutcome::Ok => {
                info!(skip_lunch, "checked out");
                let flow = self.resolve_status();
                self.finish(flow)
            }
            CheckOutOutcome::PolicyRejected(prompt) => {
                info!("early check-out needs confirmation");
                self.machine.open_confirmation(prompt, skip_lunch)?;
                Ok(Flow::Continue)
            }
            CheckOutOutcome::Failed(message) => {
                warn!(%message, "check-out failed");
                self.machine.fail(message);
                self.finish(Flow::Continue)
            }
            CheckOutOutcome::Expired => {
                let flow = self.expire();
                self.finish(flow)
            }
        }
    }
}
