use super::attendance::{Attendance, Flow};
use crate::errors::AppResult;
use crate::models::requests::CheckOutRequest;
use crate::remote::{Authority, RemoteError};
use tracing::{info, warn};

pub const JUSTIFICATION_REQUIRED: &str = "please enter a reason for the early check-out";
pub const SUBMISSION_FAILED: &str = "submission failed";

impl<A: Authority> Attendance<A> {
    /// Resubmit the check-out with the override flag and the justification.
    ///
    /// The justification is sent as typed. Blank ones stay in the dialog
    /// without contacting the server. Any failure of the resubmission stays
    /// in the dialog as well, including a second early-checkout rejection.
    pub fn confirm(&mut self, justification: &str) -> AppResult<Flow> {
        if justification.trim().is_empty() {
            self.machine.reject_justification(JUSTIFICATION_REQUIRED)?;
            return Ok(Flow::Continue);
        }

        let skip_lunch = self.machine.begin_confirmation(justification)?;
        let req = CheckOutRequest::confirmed(skip_lunch, justification);

        match self.authority.check_out(&self.ctx, &req) {
            Ok(()) => {
                info!(skip_lunch, "early check-out confirmed");
                self.machine.confirmation_accepted();
                let flow = self.resolve_status();
                self.finish(flow)
            }
            Err(RemoteError::Expired) => {
                let flow = self.expire();
                self.finish(flow)
            }
            Err(e) => {
                warn!(error = %e, "confirmed check-out failed");
                self.machine.confirmation_failed(SUBMISSION_FAILED)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Close the dialog without checking out.
    pub fn cancel_confirmation(&mut self) -> AppResult<()> {
        self.machine.cancel_confirmation()?;
        info!("early check-out cancelled");
        Ok(())
    }
}
