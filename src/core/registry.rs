//! Working group registry: CRUD over named groups plus the default-group
//! bootstrap.

use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::{groups, rounds};
use crate::errors::{AppError, AppResult};
use crate::models::WorkingGroup;
use tracing::{info, warn};

pub const DEFAULT_GROUP_NAME: &str = "General";

pub struct GroupRegistry;

/// Trimmed, non-empty group name.
pub fn validate_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidName);
    }
    Ok(trimmed.to_string())
}

/// `?group_id=` style parsing. Empty input is "not given", garbage is an
/// error the caller may choose to ignore.
pub fn parse_group_id(raw: &str) -> AppResult<i64> {
    raw.trim()
        .parse::<u32>()
        .map(i64::from)
        .map_err(|_| AppError::InvalidGroupId(raw.to_string()))
}

impl GroupRegistry {
    pub fn list_groups(pool: &DbPool) -> AppResult<Vec<WorkingGroup>> {
        groups::list_groups(&pool.conn)
    }

    pub fn get_group(pool: &DbPool, id: i64) -> AppResult<WorkingGroup> {
        groups::find_group(&pool.conn, id)?.ok_or(AppError::GroupNotFound(id))
    }

    /// Create "General" when no group exists and hand every round without a
    /// group over to the oldest group. Safe to call on every startup.
    pub fn ensure_default_group(pool: &mut DbPool) -> AppResult<WorkingGroup> {
        let tx = pool.conn.transaction()?;

        let group = match groups::first_group_by_id(&tx)? {
            Some(g) => g,
            None => {
                let g = groups::insert_group(&tx, DEFAULT_GROUP_NAME)?;
                audit_quiet(&tx, "group_add", &g.name, "Created default working group");
                info!(group_id = g.id, "created default working group '{}'", g.name);
                g
            }
        };

        let attached = rounds::backfill_orphan_rounds(&tx, group.id)?;
        if attached > 0 {
            audit_quiet(
                &tx,
                "backfill",
                &group.name,
                &format!("Attached {attached} round(s) without working group"),
            );
            warn!(
                group = %group.name,
                attached,
                "attached rounds without working group"
            );
        }

        tx.commit()?;
        Ok(group)
    }

    pub fn create_group(pool: &mut DbPool, name: &str) -> AppResult<WorkingGroup> {
        let name = validate_name(name)?;

        if groups::find_group_by_name(&pool.conn, &name)?.is_some() {
            return Err(AppError::DuplicateName(name));
        }

        let group = groups::insert_group(&pool.conn, &name)?;
        audit_quiet(&pool.conn, "group_add", &group.name, "Created working group");
        info!(group_id = group.id, "created working group '{}'", group.name);
        Ok(group)
    }

    pub fn rename_group(pool: &mut DbPool, id: i64, name: &str) -> AppResult<WorkingGroup> {
        let name = validate_name(name)?;
        let current = Self::get_group(pool, id)?;

        if let Some(other) = groups::find_group_by_name(&pool.conn, &name)?
            && other.id != id
        {
            return Err(AppError::DuplicateName(name));
        }

        let group = groups::rename_group(&pool.conn, id, &name)?;
        audit_quiet(
            &pool.conn,
            "group_rename",
            &group.name,
            &format!("Renamed from '{}'", current.name),
        );
        info!(group_id = id, from = %current.name, to = %group.name, "renamed working group");
        Ok(group)
    }

    /// Refuses to remove the last group or a group that still owns rounds.
    pub fn delete_group(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let tx = pool.conn.transaction()?;

        let group = groups::find_group(&tx, id)?.ok_or(AppError::GroupNotFound(id))?;

        if groups::count_groups(&tx)? <= 1 {
            return Err(AppError::LastGroup);
        }

        let owned = rounds::count_rounds_for_group(&tx, id)?;
        if owned > 0 {
            return Err(AppError::GroupHasRounds(owned));
        }

        groups::delete_group(&tx, id)?;
        audit_quiet(&tx, "group_del", &group.name, "Deleted working group");
        tx.commit()?;

        info!(group_id = id, "deleted working group '{}'", group.name);
        Ok(())
    }

    /// The requested group when it exists, otherwise the first group by name.
    /// Bootstraps the default group on an empty database.
    pub fn resolve_group(pool: &mut DbPool, requested: Option<i64>) -> AppResult<WorkingGroup> {
        if let Some(id) = requested
            && let Some(group) = groups::find_group(&pool.conn, id)?
        {
            return Ok(group);
        }

        match groups::list_groups(&pool.conn)?.into_iter().next() {
            Some(first) => Ok(first),
            None => Self::ensure_default_group(pool),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed_and_must_not_be_blank() {
        assert_eq!(validate_name("  Eng ").unwrap(), "Eng");
        assert!(matches!(validate_name("   "), Err(AppError::InvalidName)));
        assert!(matches!(validate_name(""), Err(AppError::InvalidName)));
    }

    #[test]
    fn group_ids_are_unsigned_integers() {
        assert_eq!(parse_group_id("42").unwrap(), 42);
        assert_eq!(parse_group_id(" 7 ").unwrap(), 7);
        assert!(matches!(
            parse_group_id("-1"),
            Err(AppError::InvalidGroupId(_))
        ));
        assert!(matches!(
            parse_group_id("abc"),
            Err(AppError::InvalidGroupId(_))
        ));
    }
}
