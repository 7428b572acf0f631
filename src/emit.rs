// src/emit.rs

//! Artifact output.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Write the resolved artifact to `output_path`, replacing any previous
/// content. The parent directory is created if it does not exist yet.
///
/// Fails if the destination is unwritable; in that case whatever artifact
/// was on disk before is left untouched by this call.
pub fn emit(artifact: &str, output_path: impl AsRef<Path>) -> Result<()> {
    let output_path = output_path.as_ref();

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {:?}", parent))?;
        }
    }

    fs::write(output_path, artifact)
        .with_context(|| format!("writing artifact to {:?}", output_path))?;

    info!(path = ?output_path, bytes = artifact.len(), "artifact written");
    Ok(())
}
