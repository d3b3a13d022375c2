use clap::Parser;
use telegram_bot::{run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Variables already set in the environment win over .env.
    dotenvy::dotenv().ok();

    match Cli::parse().command {
        Commands::Run(args) => run_bot(args.load_config()?).await,
        Commands::Check(args) => {
            let config = args.load_config()?;
            config.validate()?;
            println!(
                "Configuration OK (model {}, history {}, voice {})",
                config.llm.chat_model,
                config.base.history_path.display(),
                if config.voice.enabled { "on" } else { "off" }
            );
            Ok(())
        }
    }
}
