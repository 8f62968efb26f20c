//! Location fix acquisition for office check-ins.

pub mod providers;

use crate::models::location::Fix;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub use providers::{CommandLocation, FixedLocation, NoLocation};

/// Deadline applied to the single fix taken before an office check-in.
pub const LOCATION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("location permission denied")]
    Denied,

    #[error("no location fix within {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
}

/// Source of location fixes. Implementations may block, but should give up
/// on their own once `opts.timeout` has passed.
pub trait LocationProvider: Send + Sync {
    fn locate(&self, opts: FixOptions) -> Result<Fix, LocationError>;
}

/// Take one fix, giving up after `opts.timeout`.
///
/// The provider runs on its own thread; on timeout its result is dropped.
pub fn acquire_fix(
    provider: Arc<dyn LocationProvider>,
    opts: FixOptions,
) -> Result<Fix, LocationError> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let _ = tx.send(provider.locate(opts));
    });

    match rx.recv_timeout(opts.timeout) {
        Ok(Ok(fix)) => {
            debug!(lat = fix.latitude, lon = fix.longitude, "location fix acquired");
            Ok(fix)
        }
        Ok(Err(e)) => {
            warn!(error = %e, "location fix failed");
            Err(e)
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            warn!(timeout = ?opts.timeout, "location fix timed out");
            Err(LocationError::Timeout(opts.timeout))
        }
        // provider thread panicked before answering
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(LocationError::Denied),
    }
}
