// Detects a checked out KB by the project marker file it leaves behind.
//
// Synchronizer implementations use this for workspace_already_initialized: a KB directory
// counts as initialized when it holds at least one file with the marker extension,
// compared case-insensitively. A directory that is missing or cannot be read is treated
// as not initialized, so the next sync falls back to a checkout.

use std::path::Path;

use tokio::fs;
use tracing::warn;

pub const DEFAULT_MARKER_EXTENSION: &str = "gxw";

#[derive(Debug, Clone)]
pub struct MarkerFileProbe {
    extension: String,
}

impl Default for MarkerFileProbe {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_EXTENSION)
    }
}

impl MarkerFileProbe {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into().trim_start_matches('.').to_string(),
        }
    }

    pub async fn is_initialized(&self, kb_directory: &Path) -> bool {
        has_marker_file(kb_directory, &self.extension).await
    }
}

pub async fn has_marker_file(directory: &Path, extension: &str) -> bool {
    let mut entries = match fs::read_dir(directory).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return false,
        Err(e) => {
            warn!(directory = %directory.display(), error = %e, "Cannot inspect KB directory");
            return false;
        }
    };

    loop {
        match entries.next_entry().await {
            Ok(Some(entry)) => {
                let matches = entry
                    .path()
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case(extension));
                if matches && entry.file_type().await.is_ok_and(|t| t.is_file()) {
                    return true;
                }
            }
            Ok(None) => return false,
            Err(e) => {
                warn!(directory = %directory.display(), error = %e, "Cannot inspect KB directory");
                return false;
            }
        }
    }
}
