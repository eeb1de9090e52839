//! Reading local files for multipart uploads.

use std::path::Path;

use anyhow::Context;
use globens_client::model::Upload;

/// Content type of an image, guessed from its extension.
pub fn content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Reads a file into an [`Upload`].
pub async fn read(path: &Path) -> anyhow::Result<Upload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read '{}'", path.display()))?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
        .to_owned();

    Ok(Upload::new(file_name, content_type(path), bytes))
}
