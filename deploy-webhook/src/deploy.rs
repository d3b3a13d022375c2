//! Runs the deploy command through `sh -c`.

use tokio::process::Command;
use tracing::{error, info};

use crate::error::WebhookError;

/// Default command: pull the bot's checkout and restart it under pm2.
pub const DEFAULT_DEPLOY_COMMAND: &str =
    "cd /root/clan-agent && git pull origin main && pm2 restart clan-agent --update-env";

/// Runs `command` to completion. A non-zero exit is a [`WebhookError::DeployFailed`].
pub async fn run_deploy(command: &str) -> Result<(), WebhookError> {
    info!(command = %command, "Running deploy command");

    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .output()
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to spawn deploy command");
            WebhookError::DeployFailed(e.to_string())
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        error!(status = %output.status, stderr = %stderr.trim(), "Deploy failed");
        return Err(WebhookError::DeployFailed(format!(
            "exit {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    info!(stdout = %stdout.trim(), "Deploy succeeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_command() {
        assert!(run_deploy("true").await.is_ok());
    }

    #[tokio::test]
    async fn test_failing_command() {
        let err = run_deploy("echo boom >&2; exit 3").await.unwrap_err();
        match err {
            WebhookError::DeployFailed(detail) => assert!(detail.contains("boom")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
