use super::attendance::{Attendance, Flow};
use super::machine::Operation;
use crate::errors::AppResult;
use crate::location::{FixOptions, LocationError, acquire_fix};
use crate::models::requests::CheckInRequest;
use crate::models::work_type::WorkType;
use crate::remote::failure::FailureBody;
use crate::remote::{Authority, RemoteError};
use tracing::{info, warn};

pub const CHECK_IN_FAILED: &str = "check-in failed";
pub const LOCATION_REQUIRED: &str = "location permission required";

/// Why a check-in did not go through (session expiry aside).
#[derive(Debug, Clone, PartialEq)]
pub enum CheckInFailure {
    LocationDenied,
    LocationTimeout,
    ValidationFailed(FailureBody),
    TransportFailed,
}

impl CheckInFailure {
    /// Message for the error banner.
    /// Location problems keep their own wording, distinct from the generic fallback.
    pub fn message(&self) -> String {
        match self {
            CheckInFailure::LocationDenied => LOCATION_REQUIRED.to_string(),
            CheckInFailure::LocationTimeout => {
                format!("{LOCATION_REQUIRED} (no location fix in time)")
            }
            CheckInFailure::ValidationFailed(body) => body.display_message(CHECK_IN_FAILED),
            CheckInFailure::TransportFailed => CHECK_IN_FAILED.to_string(),
        }
    }
}

impl From<LocationError> for CheckInFailure {
    fn from(e: LocationError) -> Self {
        match e {
            LocationError::Denied => CheckInFailure::LocationDenied,
            LocationError::Timeout(_) => CheckInFailure::LocationTimeout,
        }
    }
}

impl<A: Authority> Attendance<A> {
    /// Start a work session.
    ///
    /// Office check-ins take a location fix first; without one nothing is
    /// sent. On success the start time is taken from a fresh status query.
    pub fn check_in(&mut self, work_type: WorkType, skip_lunch: bool) -> AppResult<Flow> {
        self.machine.begin(Operation::CheckIn)?;

        let flow = match self.submit_check_in(work_type, skip_lunch) {
            Ok(flow) => flow,
            Err(failure) => {
                let message = failure.message();
                warn!(work_type = work_type.code(), %message, "check-in failed");
                self.machine.fail(message);
                Flow::Continue
            }
        };

        self.finish(flow)
    }

    fn submit_check_in(
        &mut self,
        work_type: WorkType,
        skip_lunch: bool,
    ) -> Result<Flow, CheckInFailure> {
        let fix = if work_type.requires_location() {
            let opts = FixOptions {
                high_accuracy: true,
                timeout: self.location_timeout,
            };
            Some(acquire_fix(self.locator.clone(), opts)?)
        } else {
            None
        };

        let req = CheckInRequest::new(work_type, fix, skip_lunch);

        match self.authority.check_in(&self.ctx, &req) {
            Ok(()) => {
                info!(work_type = work_type.code(), skip_lunch, "checked in");
                Ok(self.resolve_status())
            }
            Err(RemoteError::Expired) => Ok(self.expire()),
            Err(RemoteError::Rejected { body, .. }) => Err(CheckInFailure::ValidationFailed(body)),
            Err(RemoteError::Transport(_)) => Err(CheckInFailure::TransportFailed),
        }
    }
}
