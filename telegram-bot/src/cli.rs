//! Command line: `dbot run` starts polling, `dbot check` only loads and validates the configuration.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "dbot", version, about = "Relays Telegram messages to an LLM")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start long polling.
    Run(RunArgs),
    /// Load the configuration from the environment, validate it and exit.
    Check(RunArgs),
}

#[derive(clap::Args, Debug, Default)]
pub struct RunArgs {
    /// Bot token; takes precedence over TELEGRAM_BOT_TOKEN.
    #[arg(short, long)]
    pub token: Option<String>,
    /// History file; takes precedence over HISTORY_PATH.
    #[arg(long)]
    pub history: Option<PathBuf>,
}

impl RunArgs {
    /// Environment configuration with the command line overrides applied.
    pub fn load_config(self) -> Result<BotConfig> {
        let mut config = BotConfig::load(self.token)?;
        if let Some(path) = self.history {
            config.base.history_path = path;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(argv: &[&str]) -> RunArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Run(args) => args,
            Commands::Check(_) => panic!("expected run"),
        }
    }

    #[test]
    fn test_run_accepts_token_and_history() {
        let args = run_args(&["dbot", "run", "-t", "abc", "--history", "/tmp/h.json"]);
        assert_eq!(args.token.as_deref(), Some("abc"));
        assert_eq!(args.history, Some(PathBuf::from("/tmp/h.json")));
    }

    #[test]
    fn test_run_without_flags() {
        let args = run_args(&["dbot", "run"]);
        assert!(args.token.is_none());
        assert!(args.history.is_none());
    }

    #[test]
    fn test_check_subcommand() {
        let cli = Cli::try_parse_from(["dbot", "check", "--token", "x"]).unwrap();
        assert!(matches!(cli.command, Commands::Check(RunArgs { token: Some(_), .. })));
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["dbot", "serve"]).is_err());
    }
}
