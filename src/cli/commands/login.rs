use crate::auth::CredentialStore;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

/// Store the bearer token (development login: the token is issued elsewhere).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Login { token } = cmd {
        if token.trim().is_empty() {
            return Err(AppError::Config("empty token".to_string()));
        }

        let store = CredentialStore::default_location();
        store.save(token)?;

        audit(&cfg.database, "login", "", "credential stored");
        success(format!("Credential stored in {}", store.path().display()));
    }

    Ok(())
}
