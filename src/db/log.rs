use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use chrono::Local;
use rusqlite::Connection;
use rusqlite::params;

/// Write an audit line into the `log` table.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

/// Non-blocking variant used by commands: the audit trail never makes a
/// command fail, it only warns.
pub fn audit(database: &str, operation: &str, target: &str, message: &str) {
    let res = DbPool::open(database).and_then(|pool| ttlog(&pool.conn, operation, target, message));

    if let Err(e) = res {
        warning(format!("Failed to write internal log: {}", e));
    }
}
