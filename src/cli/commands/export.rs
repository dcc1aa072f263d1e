use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::core::registry::parse_group_id;
use crate::errors::AppResult;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        group,
        force,
    } = cmd
    {
        let group = group.as_deref().map(parse_group_id).transpose()?;
        let pool = open_store(cfg)?;
        ExportLogic::export(&pool, *format, Path::new(file), group, *force)?;
    }
    Ok(())
}
