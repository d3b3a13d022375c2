//! # Deploy webhook
//!
//! Listens for GitHub push events. A push to the configured branch with a valid
//! `X-Hub-Signature-256` runs the deploy command; everything else is rejected or ignored.
//!
//! Routes:
//! - `POST /webhook` – signature check, event/branch filter, deploy
//! - `GET /health` – liveness

mod deploy;
mod error;
mod signature;

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub use deploy::{run_deploy, DEFAULT_DEPLOY_COMMAND};
pub use error::WebhookError;
pub use signature::{sign, verify_signature};

pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";
pub const EVENT_HEADER: &str = "x-github-event";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Shared secret configured on the GitHub webhook
    pub secret: Arc<[u8]>,
    /// Only pushes to this branch deploy
    pub branch: String,
    /// Shell command run on a matching push
    pub deploy_command: String,
    /// One deploy at a time
    deploy_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(secret: &str, branch: impl Into<String>, deploy_command: impl Into<String>) -> Self {
        Self {
            secret: Arc::from(secret.as_bytes()),
            branch: branch.into(),
            deploy_command: deploy_command.into(),
            deploy_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// Subset of the push payload we look at.
#[derive(Debug, Deserialize)]
struct PushEvent {
    #[serde(rename = "ref")]
    git_ref: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(handle_webhook))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, WebhookError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .ok_or(WebhookError::MissingSignature)?
        .to_str()
        .map_err(|_| WebhookError::InvalidSignature)?;

    if !verify_signature(&state.secret, &body, signature) {
        warn!(signature = %signature, "Bad signature");
        return Err(WebhookError::InvalidSignature);
    }

    let event = headers
        .get(EVENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if event != "push" {
        info!(event = %event, "Ignored event");
        return Ok("Ignored event");
    }

    let push: PushEvent = serde_json::from_slice(&body)?;
    let branch = push
        .git_ref
        .strip_prefix("refs/heads/")
        .unwrap_or(&push.git_ref);
    if branch != state.branch {
        info!(branch = %branch, "Ignored branch");
        return Ok("Ignored branch");
    }

    info!(branch = %branch, "Push received, deploying");
    let _guard = state.deploy_lock.lock().await;
    run_deploy(&state.deploy_command).await?;
    Ok("OK")
}
