use super::machine::SessionMachine;
use crate::auth::SessionContext;
use crate::errors::AppResult;
use crate::location::{LOCATION_TIMEOUT, LocationProvider, NoLocation};
use crate::remote::Authority;
use std::sync::Arc;
use std::time::Duration;

/// How an operation ended, beyond what the state machine shows.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The server answered 401. The context no longer carries a credential;
    /// the caller should send the user back to login.
    SessionExpired,
}

/// Attendance dashboard: the session state machine wired to the server and
/// to a location source.
///
/// The operations live next to their rules: `refresh` (resolver.rs),
/// `check_in` (check_in.rs), `check_out` (check_out.rs), `confirm` and
/// `cancel_confirmation` (confirmation.rs).
pub struct Attendance<A: Authority> {
    pub(super) authority: A,
    pub(super) locator: Arc<dyn LocationProvider>,
    pub(super) ctx: SessionContext,
    pub(super) machine: SessionMachine,
    pub(super) location_timeout: Duration,
}

impl<A: Authority> Attendance<A> {
    pub fn new(authority: A, ctx: SessionContext) -> Self {
        Self {
            authority,
            locator: Arc::new(NoLocation),
            ctx,
            machine: SessionMachine::new(),
            location_timeout: LOCATION_TIMEOUT,
        }
    }

    pub fn with_locator(mut self, locator: Arc<dyn LocationProvider>) -> Self {
        self.locator = locator;
        self
    }

    /// Override the location deadline (tests use a short one).
    pub fn with_location_timeout(mut self, timeout: Duration) -> Self {
        self.location_timeout = timeout;
        self
    }

    pub fn location_timeout(&self) -> Duration {
        self.location_timeout
    }

    pub fn machine(&self) -> &SessionMachine {
        &self.machine
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub(super) fn expire(&mut self) -> Flow {
        self.ctx.expire();
        Flow::SessionExpired
    }

    /// Close the current `Submitting` phase according to how it ended.
    pub(super) fn finish(&mut self, flow: Flow) -> AppResult<Flow> {
        match flow {
            Flow::Continue => self.machine.settle()?,
            Flow::SessionExpired => self.machine.expired()?,
        }
        Ok(flow)
    }
}
