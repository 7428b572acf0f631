// src/manifest.rs

//! Project manifest loading.
//!
//! The only thing the build pipeline needs from the manifest is the version
//! string substituted for `@version` tokens. It is loaded once at startup
//! and passed into the [`Resolver`](crate::resolve::Resolver) explicitly.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Manifest file as read from TOML:
///
/// ```toml
/// [package]
/// version = "1.2.3"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub package: PackageSection,
}

/// `[package]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageSection {
    pub version: String,
}

/// Load the manifest at `path` and return its version string.
pub fn load_version(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading manifest at {:?}", path))?;

    let manifest: Manifest = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML manifest from {:?}", path))?;

    Ok(manifest.package.version)
}
