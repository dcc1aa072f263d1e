use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::http;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { addr } = cmd {
        let addr = addr.clone().unwrap_or_else(|| cfg.server_addr.clone());
        let pool = open_store(cfg)?;

        info(format!("Serving {} on http://{}", cfg.database, addr));

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        runtime.block_on(http::serve(pool, &addr))?;
    }

    Ok(())
}
