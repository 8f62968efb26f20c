use super::common::{conclude, connect};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{Attendance, Flow};
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::remote::HttpAuthority;
use crate::ui::dashboard::render_dialog;
use crate::ui::messages::{info, warning};
use crate::ui::prompt::read_justification;

/// End the current work session, confirming an early check-out if asked to.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::CheckOut { skip_lunch, memo } = cmd {
        let mut att = connect(cfg, None)?;
        let flow = att.refresh()?;
        if att.context().is_expired() || att.machine().ui().is_error() {
            return conclude(&att, flow, cfg, "check-out", "");
        }

        let mut flow = att.check_out(*skip_lunch)?;

        if flow == Flow::Continue && att.machine().dialog().is_open() {
            flow = run_confirmation(&mut att, memo.as_deref(), cfg)?;
        }

        conclude(&att, flow, cfg, "check-out", "checked out")?;
    }

    Ok(())
}

/// Drive the confirmation dialog until it closes.
///
/// With `--memo` there is a single attempt; otherwise the justification is
/// read from stdin until it is accepted or input ends.
fn run_confirmation(
    att: &mut Attendance<HttpAuthority>,
    memo: Option<&str>,
    cfg: &Config,
) -> AppResult<Flow> {
    render_dialog(att.machine());

    if let Some(memo) = memo {
        let flow = att.confirm(memo)?;
        if flow == Flow::Continue && att.machine().dialog().is_open() {
            render_dialog(att.machine());
            return cancel(att, cfg);
        }
        if flow == Flow::Continue {
            audit(&cfg.database, "confirm", "early check-out", memo.trim());
        }
        return Ok(flow);
    }

    loop {
        let Some(line) = read_justification()? else {
            return cancel(att, cfg);
        };

        let flow = att.confirm(&line)?;
        if flow == Flow::SessionExpired || !att.machine().dialog().is_open() {
            if flow == Flow::Continue {
                audit(&cfg.database, "confirm", "early check-out", line.trim());
            }
            return Ok(flow);
        }

        render_dialog(att.machine());
    }
}

fn cancel(att: &mut Attendance<HttpAuthority>, cfg: &Config) -> AppResult<Flow> {
    att.cancel_confirmation()?;
    warning("Early check-out not confirmed, you are still checked in.");
    info("Run `rattendance check-out --memo \"<reason>\"` to confirm it.");
    audit(&cfg.database, "confirm", "early check-out", "cancelled");
    Err(AppError::OperationRejected(
        "early check-out not confirmed".to_string(),
    ))
}
