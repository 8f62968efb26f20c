use super::common::{conclude, connect};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::UiState;
use crate::errors::{AppError, AppResult};
use crate::ui::dashboard;

/// Show the session as the server sees it.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { json } = cmd {
        let mut att = connect(cfg, None)?;
        let flow = att.refresh()?;

        if *json && !att.context().is_expired() {
            println!("{}", serde_json::to_string_pretty(&dashboard::to_json(att.machine()))?);
            return match att.machine().ui() {
                UiState::Error(message) => Err(AppError::OperationFailed(message.clone())),
                _ => Ok(()),
            };
        }

        conclude(&att, flow, cfg, "status", "status refreshed")?;
    }

    Ok(())
}
