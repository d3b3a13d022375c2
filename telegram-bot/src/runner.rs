//! Entry point: init logging, validate config, build components and the handler chain, run the REPL.

use anyhow::Result;
use dbot_core::init_tracing;
use dbot_telegram::run_repl;
use tracing::{info, instrument, warn};

use super::components::{build_bot_components, build_handler_chain};
use super::config::BotConfig;

/// Runs the bot until the process is interrupted.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        history_path = %config.base.history_path.display(),
        max_turns = config.base.history_max_turns,
        "Initializing bot"
    );

    let components = build_bot_components(&config)?;
    let handler_chain = build_handler_chain(&config, &components.services);

    info!(handlers = handler_chain.len(), "Bot started successfully");

    run_repl(components.teloxide_bot, handler_chain).await?;

    // Final flush; every append already persisted.
    if let Err(e) = components.services.history.persist() {
        warn!(error = %e, "Failed to persist history on shutdown");
    }
    Ok(())
}
