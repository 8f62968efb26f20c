use super::common::{conclude, connect};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::location::Fix;

/// Start a work session.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::CheckIn {
        work_type,
        skip_lunch,
        lat,
        lon,
    } = cmd
    {
        //
        // 1. Resolve work type (default from config) and explicit coordinates
        //
        let work_type = match work_type {
            Some(w) => *w,
            None => cfg.work_type()?,
        };

        let cli_fix = match (lat, lon) {
            (Some(lat), Some(lon)) => Some(Fix::new(*lat, *lon)?),
            _ => None,
        };

        //
        // 2. Sync with the server first: never check in on stale state
        //
        let mut att = connect(cfg, cli_fix)?;
        let flow = att.refresh()?;
        if att.context().is_expired() || att.machine().ui().is_error() {
            return conclude(&att, flow, cfg, "check-in", "");
        }

        //
        // 3. Execute
        //
        let flow = att.check_in(work_type, *skip_lunch)?;

        conclude(
            &att,
            flow,
            cfg,
            "check-in",
            &format!("checked in ({})", work_type.code()),
        )?;
    }

    Ok(())
}
