//! Voice transcoding through an external `ffmpeg` process.

use std::path::Path;

use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::{MediaError, Result};

/// Sample rate expected by the transcription model.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Converts `input` (e.g. Telegram's ogg/opus voice note) to 16 kHz mono wav at `output`,
/// overwriting it, using the given ffmpeg binary.
#[instrument]
pub async fn transcode_with(ffmpeg: &str, input: &Path, output: &Path) -> Result<()> {
    let out = Command::new(ffmpeg)
        .arg("-y")
        .arg("-i")
        .arg(input)
        .args(["-ar", &TARGET_SAMPLE_RATE.to_string(), "-ac", "1"])
        .arg(output)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| MediaError::Transcode(format!("failed to run {}: {}", ffmpeg, e)))?;

    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        let tail: Vec<&str> = stderr.lines().rev().take(3).collect();
        let tail: Vec<&str> = tail.into_iter().rev().collect();
        return Err(MediaError::Transcode(format!(
            "{} exited with {}: {}",
            ffmpeg,
            out.status,
            tail.join(" | ")
        )));
    }

    debug!(output = %output.display(), "Transcoded voice to wav");
    Ok(())
}
