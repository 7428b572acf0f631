// src/errors.rs

//! Crate-wide error types.
//!
//! Most modules propagate `anyhow::Result` with context. The resolver uses
//! the structured [`StitchError`] so callers (and tests) can distinguish a
//! cyclic include from an unreadable file.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StitchError {
    /// A file was re-entered while it was still being resolved.
    ///
    /// The chain lists the in-progress files from the resolution root down
    /// to the re-entered path.
    #[error("cyclic include: {}", display_chain(.chain))]
    CyclicInclude { chain: Vec<PathBuf> },

    /// A source or include target could not be read.
    #[error("reading {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn display_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

pub use anyhow::Result;
