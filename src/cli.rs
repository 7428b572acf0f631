// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `stitch`.
///
/// The defaults mirror the classic fixed layout: resolve `src/index.lua`,
/// write `dist/bundle.lua`, watch `src/`, read the version from
/// `bundle.toml`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stitch",
    version,
    about = "Inline @include directives into one artifact and rebuild on file changes.",
    long_about = None
)]
pub struct CliArgs {
    /// Entry source file; the root of resolution.
    #[arg(long, value_name = "PATH", default_value = "src/index.lua")]
    pub entry: String,

    /// Output path for the resolved artifact.
    #[arg(long, value_name = "PATH", default_value = "dist/bundle.lua")]
    pub out: String,

    /// Directory subtree to watch for changes.
    #[arg(long, value_name = "DIR", default_value = "src")]
    pub watch_dir: String,

    /// Manifest file the `@version` string is read from (TOML).
    #[arg(long, value_name = "PATH", default_value = "bundle.toml")]
    pub manifest: String,

    /// Build once and exit, no watching.
    #[arg(long)]
    pub once: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STITCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
