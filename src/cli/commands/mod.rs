pub mod config;
pub mod db;
pub mod export;
pub mod group;
pub mod init;
pub mod log;
pub mod round;
pub mod serve;
pub mod stats;
pub mod status;

use crate::config::Config;
use crate::core::registry::{GroupRegistry, parse_group_id};
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::WorkingGroup;

/// Open the configured database, apply migrations and make sure a working
/// group exists.
pub(crate) fn open_store(cfg: &Config) -> AppResult<DbPool> {
    let mut pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    GroupRegistry::ensure_default_group(&mut pool)?;
    Ok(pool)
}

/// `--group ID` when given (it must exist), the first group by name otherwise.
pub(crate) fn selected_group(pool: &mut DbPool, group: Option<&str>) -> AppResult<WorkingGroup> {
    match group {
        Some(raw) => {
            let id = parse_group_id(raw)?;
            GroupRegistry::get_group(pool, id)
        }
        None => GroupRegistry::resolve_group(pool, None),
    }
}
