use crate::cli::commands::{open_store, selected_group};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::RoundLifecycle;
use crate::core::registry::{GroupRegistry, parse_group_id};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::formatting::{format_duration, format_timestamp};
use chrono::Utc;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Start { group } => {
            let mut pool = open_store(cfg)?;
            let g = selected_group(&mut pool, group.as_deref())?;

            let round = RoundLifecycle::start(&mut pool, g.id)?;
            success(format!(
                "Round #{} started for '{}' at {}",
                round.id,
                g.display_name(),
                format_timestamp(&round.start_time)
            ));
        }

        Commands::Stop { group } => {
            let mut pool = open_store(cfg)?;
            let g = selected_group(&mut pool, group.as_deref())?;

            let round = RoundLifecycle::stop(&mut pool, g.id)?;
            success(format!(
                "Round #{} stopped for '{}' after {}",
                round.id,
                g.display_name(),
                format_duration(round.elapsed_seconds(Utc::now()))
            ));
        }

        Commands::Reset { group, yes } => {
            let mut pool = open_store(cfg)?;
            let id = parse_group_id(group)?;
            let g = GroupRegistry::get_group(&pool, id)?;

            let prompt = format!(
                "Delete ALL rounds of '{}'? This action is irreversible.",
                g.display_name()
            );
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            let deleted = RoundLifecycle::reset(&mut pool, id)?;
            success(format!(
                "{deleted} round(s) of '{}' have been deleted.",
                g.display_name()
            ));
        }

        _ => {}
    }

    Ok(())
}
