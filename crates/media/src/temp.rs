//! Staging files for downloaded media.

use std::path::Path;

use tempfile::{Builder, TempPath};
use tracing::warn;

use crate::error::Result;

/// Creates an empty, uniquely named file `<dir>/<file_id>-XXXXXX<.ext>`.
///
/// The random part keeps two events carrying the same file id from sharing a path. Characters
/// outside `[A-Za-z0-9_-]` in the id become `_`.
pub fn temp_path(dir: &Path, file_id: &str, extension: Option<&str>) -> Result<TempPath> {
    let stem: String = file_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let suffix = match extension.map(|e| e.trim_start_matches('.')).filter(|e| !e.is_empty()) {
        Some(ext) => format!(".{}", ext),
        None => String::new(),
    };
    let file = Builder::new()
        .prefix(&format!("{}-", stem))
        .suffix(&suffix)
        .tempfile_in(dir)?;
    Ok(file.into_temp_path())
}

/// Extension of a user-supplied file name, if any.
pub fn extension_of(file_name: &str) -> Option<&str> {
    Path::new(file_name).extension().and_then(|e| e.to_str())
}

/// Deletes staged files, logging (not returning) failures other than "not found".
pub fn remove_quietly(paths: impl IntoIterator<Item = TempPath>) {
    for path in paths {
        let shown = path.display().to_string();
        if let Err(e) = path.close() {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %shown, error = %e, "Failed to remove temp file");
            }
        }
    }
}
