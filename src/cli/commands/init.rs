use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::GroupRegistry;
use crate::db::initialize::init_db;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// Creates the config directory, writes the configuration file (skipped in
/// test mode), creates the database schema and the default working group.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing workhours…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", db_path);

    let mut pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;
    let group = GroupRegistry::ensure_default_group(&mut pool)?;

    audit_quiet(
        &pool.conn,
        "init",
        &db_path,
        &format!("Database initialized, default group '{}'", group.name),
    );

    println!("✅ Database initialized at {}", db_path);
    println!("🎉 workhours initialization completed!");
    Ok(())
}
