//! Helpers shared by the commands that talk to the attendance server.

use crate::auth::CredentialStore;
use crate::config::Config;
use crate::core::{Attendance, Flow, UiState};
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::models::location::Fix;
use crate::remote::HttpAuthority;
use crate::ui::dashboard;
use crate::ui::messages::warning;

/// Wire the state machine to the configured server, credential and location source.
pub fn connect(cfg: &Config, cli_fix: Option<Fix>) -> AppResult<Attendance<HttpAuthority>> {
    let authority = HttpAuthority::new(&cfg.server_url, cfg.request_timeout())?;
    let ctx = CredentialStore::default_location().context()?;
    let locator = cfg.location_provider(cli_fix)?;

    Ok(Attendance::new(authority, ctx).with_locator(locator))
}

/// Turn the final state of an operation into output, audit row and exit status.
pub fn conclude(
    att: &Attendance<HttpAuthority>,
    flow: Flow,
    cfg: &Config,
    operation: &str,
    done: &str,
) -> AppResult<()> {
    if flow == Flow::SessionExpired {
        // back to the "login screen": forget the credential
        if let Err(e) = CredentialStore::default_location().clear() {
            warning(format!("Failed to remove stored credential: {}", e));
        }
        audit(&cfg.database, "expired", operation, "session expired, credential removed");
        return Err(AppError::SessionExpired);
    }

    match att.machine().ui() {
        UiState::Error(message) => {
            audit(&cfg.database, "error", operation, message);
            Err(AppError::OperationFailed(message.clone()))
        }
        _ => {
            audit(&cfg.database, operation, "", done);
            dashboard::render(att.machine());
            Ok(())
        }
    }
}
