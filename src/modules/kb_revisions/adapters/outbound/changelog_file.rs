// Writes the changelog document where the changelog renderer expects it.
//
// Responsibilities
// - Always leave a complete document behind: write to a temporary sibling, then rename.

use crate::modules::kb_revisions::core::changelog::Changelog;
use std::path::Path;
use tokio::fs;
use tracing::debug;

pub async fn write_changelog(path: &Path, changelog: &Changelog) -> std::io::Result<()> {
    let document = changelog.to_document().map_err(std::io::Error::other)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, document).await?;
    fs::rename(&temp_path, path).await?;
    debug!(
        path = %path.display(),
        entries = changelog.entries().len(),
        "Wrote changelog"
    );
    Ok(())
}
