// src/lib.rs

pub mod build;
pub mod cli;
pub mod emit;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod manifest;
pub mod resolve;
pub mod watch;

use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::info;

use crate::build::BuildContext;
use crate::cli::CliArgs;
use crate::engine::{RebuildSlot, Runtime, RuntimeEvent, RuntimeOptions, TriggerReason};
use crate::resolve::Resolver;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - manifest loading (the `@version` string)
/// - rebuild slot + runtime
/// - builder loop
/// - (optional) file watcher
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let version = manifest::load_version(&args.manifest)?;
    info!(version = %version, manifest = %args.manifest, "loaded project version");

    let ctx = BuildContext {
        entry: PathBuf::from(&args.entry),
        out: PathBuf::from(&args.out),
        resolver: Resolver::new(version),
    };

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    // Background builder.
    let build_tx = build::spawn_builder(ctx, rt_tx.clone());

    // Optional file watcher (disabled in --once mode).
    let _watcher_handle = if !args.once {
        Some(watch::spawn_watcher(
            PathBuf::from(&args.watch_dir),
            rt_tx.clone(),
        )?)
    } else {
        None
    };

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    // Seed the initial build so the artifact is fresh before the first edit.
    rt_tx
        .send(RuntimeEvent::BuildTriggered {
            reason: TriggerReason::Startup,
        })
        .await?;

    let options = RuntimeOptions {
        exit_when_idle: args.once,
    };

    let runtime = Runtime::new(RebuildSlot::new(), options, rt_rx, build_tx);
    runtime.run().await
}
