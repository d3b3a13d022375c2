use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use deploy_webhook::{router, AppState, DEFAULT_DEPLOY_COMMAND};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "deploy-webhook")]
#[command(about = "GitHub push webhook that redeploys the bot")]
#[command(version)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "WEBHOOK_PORT", default_value = "3000")]
    port: u16,

    /// Address to bind to
    #[arg(short, long, env = "WEBHOOK_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// Shared secret configured on the GitHub webhook
    #[arg(short, long, env = "WEBHOOK_SECRET", hide_env_values = true)]
    secret: String,

    /// Branch whose pushes trigger a deploy
    #[arg(long, env = "WEBHOOK_BRANCH", default_value = "main")]
    branch: String,

    /// Shell command run on a matching push
    #[arg(long, env = "DEPLOY_COMMAND", default_value = DEFAULT_DEPLOY_COMMAND)]
    deploy_command: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deploy_webhook=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if cli.secret.trim().is_empty() {
        anyhow::bail!("WEBHOOK_SECRET is empty");
    }

    let state = AppState::new(&cli.secret, cli.branch.clone(), cli.deploy_command);
    let app = router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", cli.bind, cli.port).parse()?;
    info!(branch = %cli.branch, "Webhook listener started on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutting down");
}
