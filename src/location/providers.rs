use super::{FixOptions, LocationError, LocationProvider};
use crate::models::location::Fix;
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::warn;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Always answers with the same coordinates (config file or `--lat/--lon`).
pub struct FixedLocation {
    fix: Fix,
}

impl FixedLocation {
    pub fn new(fix: Fix) -> Self {
        Self { fix }
    }
}

impl LocationProvider for FixedLocation {
    fn locate(&self, _opts: FixOptions) -> Result<Fix, LocationError> {
        Ok(self.fix)
    }
}

/// No location source configured: behaves like a denied permission.
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn locate(&self, _opts: FixOptions) -> Result<Fix, LocationError> {
        Err(LocationError::Denied)
    }
}

/// Runs an external program that prints `lat,lon` on stdout.
///
/// The command line is split on whitespace; `RATTENDANCE_HIGH_ACCURACY=1`
/// is exported to it when a precise fix is requested. A non-zero exit or
/// unparsable output counts as a denial. A program still running at the
/// deadline is killed.
pub struct CommandLocation {
    command: String,
}

impl CommandLocation {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn wait_with_deadline(
        &self,
        child: &mut Child,
        timeout: Duration,
    ) -> Result<(), LocationError> {
        let start = Instant::now();

        loop {
            match child.try_wait() {
                Ok(Some(status)) if status.success() => return Ok(()),
                Ok(Some(status)) => {
                    warn!(command = %self.command, %status, "location command failed");
                    return Err(LocationError::Denied);
                }
                Ok(None) => {
                    if start.elapsed() >= timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        warn!(command = %self.command, ?timeout, "location command killed");
                        return Err(LocationError::Timeout(timeout));
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    warn!(command = %self.command, error = %e, "location command lost");
                    let _ = child.kill();
                    return Err(LocationError::Denied);
                }
            }
        }
    }
}

impl LocationProvider for CommandLocation {
    fn locate(&self, opts: FixOptions) -> Result<Fix, LocationError> {
        let mut parts = self.command.split_whitespace();
        let program = parts.next().ok_or(LocationError::Denied)?;

        let mut child = Command::new(program)
            .args(parts)
            .env(
                "RATTENDANCE_HIGH_ACCURACY",
                if opts.high_accuracy { "1" } else { "0" },
            )
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                warn!(command = %self.command, error = %e, "location command could not run");
                LocationError::Denied
            })?;

        self.wait_with_deadline(&mut child, opts.timeout)?;

        let mut stdout = String::new();
        if let Some(mut out) = child.stdout.take() {
            out.read_to_string(&mut stdout).map_err(|e| {
                warn!(command = %self.command, error = %e, "location command output unreadable");
                LocationError::Denied
            })?;
        }

        Fix::parse(stdout.trim()).map_err(|e| {
            warn!(command = %self.command, error = %e, "location command printed no fix");
            LocationError::Denied
        })
    }
}
