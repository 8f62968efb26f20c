use super::attendance::{Attendance, Flow};
use super::machine::Operation;
use crate::errors::AppResult;
use crate::remote::{Authority, RemoteError};
use tracing::{debug, warn};

/// Fixed message: status failures never show server payloads.
pub const STATUS_UNAVAILABLE: &str = "failed to load status";

impl<A: Authority> Attendance<A> {
    /// Ask the server for the current session.
    ///
    /// On success the machine shows `Working` or `Idle`; on failure
    /// `Error(STATUS_UNAVAILABLE)` and the last known session is kept.
    pub fn refresh(&mut self) -> AppResult<Flow> {
        self.machine.begin(Operation::Refresh)?;
        let flow = self.resolve_status();
        self.finish(flow)
    }

    /// Status query used at the end of every mutating operation.
    /// The only place a session start time is ever set.
    pub(super) fn resolve_status(&mut self) -> Flow {
        self.machine.set_loading();

        match self.authority.status(&self.ctx) {
            Ok(resp) => match resp.to_session() {
                Some(session) => {
                    debug!(active = session.is_active(), "status resolved");
                    self.machine.resolved(session);
                    Flow::Continue
                }
                None => {
                    warn!("status reports an active session without a valid start time");
                    self.machine.fail(STATUS_UNAVAILABLE);
                    Flow::Continue
                }
            },
            Err(RemoteError::Expired) => self.expire(),
            Err(e) => {
                warn!(error = %e, "status query failed");
                self.machine.fail(STATUS_UNAVAILABLE);
                Flow::Continue
            }
        }
    }
}
