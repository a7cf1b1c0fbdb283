use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    println!("⚙️  Initializing rWorklog…");

    let cfg = Config::init_all(cli.db.clone(), cli.test)?;

    let pool = open_db(&cfg.database)?;

    if let Err(e) = ttlog(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", cfg.database),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    success("🎉 rWorklog initialization completed!");
    Ok(())
}
