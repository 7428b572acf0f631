// src/build.rs

//! Background build loop.
//!
//! This module owns the "builder": a loop that consumes [`BuildRequest`]s
//! from the runtime, runs resolve + emit for the fixed entry file, and
//! reports a `BuildFinished` event back. Resolution is synchronous file I/O,
//! so each build runs on the blocking thread pool.
//!
//! Requests are handled one at a time; together with the runtime's rebuild
//! slot this guarantees builds never overlap.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::emit;
use crate::engine::{BuildOutcome, RuntimeEvent, TriggerReason};
use crate::resolve::Resolver;

/// One rebuild of the entry file, requested by the runtime.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub reason: TriggerReason,
}

/// Everything a build needs: where to start, where to write, and the
/// resolver carrying the injected version string.
#[derive(Debug)]
pub struct BuildContext {
    pub entry: PathBuf,
    pub out: PathBuf,
    pub resolver: Resolver,
}

/// Spawn the background builder loop.
///
/// The returned `mpsc::Sender<BuildRequest>` is what the runtime uses as
/// `build_tx` in `engine::Runtime`. Each request is fully processed before
/// the next one is picked up.
pub fn spawn_builder(
    ctx: BuildContext,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> mpsc::Sender<BuildRequest> {
    let (tx, mut rx) = mpsc::channel::<BuildRequest>(32);
    let ctx = Arc::new(ctx);

    tokio::spawn(async move {
        info!("builder loop started");
        while let Some(request) = rx.recv().await {
            let outcome = run_build(Arc::clone(&ctx), request).await;
            if runtime_tx
                .send(RuntimeEvent::BuildFinished { outcome })
                .await
                .is_err()
            {
                // Runtime gone; no point keeping the builder alive.
                break;
            }
        }
        debug!("builder loop finished (channel closed)");
    });

    tx
}

/// Run one full resolve + emit cycle on the blocking thread pool.
///
/// All errors are logged here and folded into [`BuildOutcome::Failed`]; a
/// failed build never writes a partial artifact.
async fn run_build(ctx: Arc<BuildContext>, request: BuildRequest) -> BuildOutcome {
    info!(reason = ?request.reason, entry = ?ctx.entry, "starting build");

    let result = tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        let artifact = ctx.resolver.resolve(&ctx.entry)?;
        emit::emit(&artifact, &ctx.out)
    })
    .await;

    match result {
        Ok(Ok(())) => BuildOutcome::Success,
        Ok(Err(err)) => {
            error!(error = %err, "build failed");
            BuildOutcome::Failed
        }
        Err(err) => {
            error!(error = %err, "build task panicked");
            BuildOutcome::Failed
        }
    }
}
