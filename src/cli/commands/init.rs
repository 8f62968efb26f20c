use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite audit database
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    //
    // 1️⃣ CONFIGURATION
    //
    let path = cfg.init_all(cli.test)?;

    println!("⚙️  Initializing rAttendance…");
    println!("📄 Config file : {}", path.display());
    println!("🌐 Server      : {}", cfg.server_url);
    println!("🗄️  Database    : {}", cfg.database);

    //
    // 2️⃣ AUDIT DATABASE (table created on open)
    //
    let pool = DbPool::open(&cfg.database)?;

    //
    // 3️⃣ LOG INTERNO (non bloccante)
    //
    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", cfg.database),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    success("rAttendance initialization completed!");
    Ok(())
}
