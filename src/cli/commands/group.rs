use crate::cli::commands::open_store;
use crate::cli::parser::{Commands, GroupAction};
use crate::config::Config;
use crate::core::registry::{GroupRegistry, parse_group_id};
use crate::core::status;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::table::{Column, Table};
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Group { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_store(cfg)?;

    match action {
        GroupAction::List => {
            let overviews = status::group_overviews(&mut pool, &Local::now())?;

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Name"),
                Column::right("Total"),
                Column::left("Rounds"),
            ]);
            for g in overviews {
                table.add_row(vec![
                    g.id.to_string(),
                    g.name,
                    g.total_formatted,
                    if g.has_rounds { "yes" } else { "no" }.to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        GroupAction::Add { name } => {
            let g = GroupRegistry::create_group(&mut pool, name)?;
            success(format!("Working group '{}' created with id {}.", g.name, g.id));
        }

        GroupAction::Rename { id, name } => {
            let id = parse_group_id(id)?;
            let g = GroupRegistry::rename_group(&mut pool, id, name)?;
            success(format!("Working group #{} renamed to '{}'.", g.id, g.name));
        }

        GroupAction::Del { id } => {
            let id = parse_group_id(id)?;
            GroupRegistry::delete_group(&mut pool, id)?;
            success(format!("Working group #{id} has been deleted."));
        }
    }

    Ok(())
}
