use crate::cli::commands::{open_store, selected_group};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::status;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::table::{Column, Table};
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { group } = cmd {
        let mut pool = open_store(cfg)?;
        let g = selected_group(&mut pool, group.as_deref())?;
        let view = status::build_stats_view(&mut pool, Some(g.id), &Local::now())?;

        header(format!("Daily summary: {}", view.selected_group_name));
        if view.daily_summaries.is_empty() {
            info("No completed rounds yet.");
        } else {
            let mut days = Table::new(vec![
                Column::left("Date"),
                Column::right("Rounds"),
                Column::right("Total"),
            ]);
            for d in &view.daily_summaries {
                days.add_row(vec![
                    d.date_display.clone(),
                    d.round_count.to_string(),
                    d.total_formatted.clone(),
                ]);
            }
            print!("{}", days.render());
        }
        println!();
        println!("Today   : {}", view.selected_group_today_formatted);
        println!("Overall : {}", view.selected_group_total_formatted);
        println!();

        header("Working groups");
        let mut totals = Table::new(vec![Column::left("Group"), Column::right("Total")]);
        for t in &view.group_totals {
            totals.add_row(vec![t.group_name.clone(), t.total_formatted.clone()]);
        }
        totals.add_row(vec![
            "All groups".to_string(),
            view.all_groups_total_formatted.clone(),
        ]);
        print!("{}", totals.render());
    }

    Ok(())
}
