use crate::cli::commands::{open_store, selected_group};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::status;
use crate::errors::AppResult;
use crate::utils::colors::{RESET, color_for_running, colorize_optional};
use crate::utils::formatting::bold;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { group } = cmd {
        let mut pool = open_store(cfg)?;
        let g = selected_group(&mut pool, group.as_deref())?;
        let ctx = status::build_status_context(&mut pool, Some(g.id), &Local::now())?;
        let s = &ctx.state;

        let state = if s.is_running { "RUNNING" } else { "IDLE" };
        println!(
            "{} #{}  {}{}{}",
            bold(&s.group_name),
            s.group_id,
            color_for_running(s.is_running),
            state,
            RESET
        );
        if let Some(id) = s.current_round_id {
            println!("Current round : #{id}");
        }
        println!("Last start    : {}", colorize_optional(&s.last_start_str));
        println!("Last stop     : {}", colorize_optional(&s.last_stop_str));
        println!("Today         : {}", colorize_optional(&s.total_today_formatted));
        println!("Overall       : {}", colorize_optional(&s.total_overall_formatted));
        println!();
        println!("All groups    : {}", ctx.all_groups_total_formatted);
    }

    Ok(())
}
