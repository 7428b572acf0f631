// src/engine/runtime.rs

use anyhow::{anyhow, Result};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::build::BuildRequest;
use crate::engine::queue::RebuildSlot;

/// Why a build was triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerReason {
    /// Initial build at process startup (and the only build in `--once` mode).
    Startup,
    /// A filesystem event under the watched subtree.
    FileChange { path: std::path::PathBuf },
    /// A trigger that arrived during a build and was held in the rebuild slot.
    Queued,
}

/// Result of one build attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Success,
    /// The build failed; the error was already logged by the builder. The
    /// previous artifact on disk is untouched.
    Failed,
}

/// Events sent into the runtime from the watcher, the builder, or external
/// signals.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    BuildTriggered { reason: TriggerReason },
    BuildFinished { outcome: BuildOutcome },
    ShutdownRequested,
}

/// Options that influence how the runtime behaves.
#[derive(Debug, Clone, Default)]
pub struct RuntimeOptions {
    /// If true, exit as soon as no build is in flight and nothing is queued.
    /// In watch mode this should be `false`.
    pub exit_when_idle: bool,
}

/// The main orchestration runtime.
///
/// Responsibilities:
/// - Consume `RuntimeEvent`s from the watcher, builder, and ctrl-c handler.
/// - Apply rebuild-slot semantics so at most one build runs at a time.
/// - Send `BuildRequest`s to the builder when a build should start.
pub struct Runtime {
    slot: RebuildSlot,
    options: RuntimeOptions,

    /// Unified event stream from all producers.
    events_rx: mpsc::Receiver<RuntimeEvent>,

    /// Channel to the builder loop.
    build_tx: mpsc::Sender<BuildRequest>,

    /// Outcome of the most recent build, used to pick the exit status in
    /// `--once` mode.
    last_outcome: Option<BuildOutcome>,
}

impl Runtime {
    pub fn new(
        slot: RebuildSlot,
        options: RuntimeOptions,
        events_rx: mpsc::Receiver<RuntimeEvent>,
        build_tx: mpsc::Sender<BuildRequest>,
    ) -> Self {
        Self {
            slot,
            options,
            events_rx,
            build_tx,
            last_outcome: None,
        }
    }

    /// Main event loop. Runs until shutdown is requested, or until idle in
    /// `--once` mode.
    pub async fn run(mut self) -> Result<()> {
        info!("stitch runtime started");

        while let Some(event) = self.events_rx.recv().await {
            debug!(?event, "runtime received event");

            let keep_running = match event {
                RuntimeEvent::BuildTriggered { reason } => self.handle_trigger(reason).await?,
                RuntimeEvent::BuildFinished { outcome } => {
                    self.handle_build_finished(outcome).await?
                }
                RuntimeEvent::ShutdownRequested => {
                    info!("shutdown requested, stopping runtime");
                    false
                }
            };

            if !keep_running {
                break;
            }
        }

        info!("stitch runtime exiting");

        if self.options.exit_when_idle && self.last_outcome == Some(BuildOutcome::Failed) {
            return Err(anyhow!("build failed"));
        }
        Ok(())
    }

    /// Handle a rebuild trigger (startup seed or file change).
    async fn handle_trigger(&mut self, reason: TriggerReason) -> Result<bool> {
        info!(?reason, "rebuild triggered");

        if self.slot.on_trigger() {
            self.send_build_request(reason).await?;
        }

        Ok(true)
    }

    /// Handle completion of a build attempt.
    ///
    /// A failed build only affects that attempt: the runtime logs it and
    /// keeps watching. If triggers arrived during the build, one follow-up
    /// build starts now.
    async fn handle_build_finished(&mut self, outcome: BuildOutcome) -> Result<bool> {
        match outcome {
            BuildOutcome::Success => info!("build finished"),
            BuildOutcome::Failed => {
                warn!("build failed; previous artifact left in place");
            }
        }
        self.last_outcome = Some(outcome);

        if self.slot.on_build_finished() {
            self.send_build_request(TriggerReason::Queued).await?;
        }

        if self.options.exit_when_idle && !self.slot.is_building() {
            info!("runtime idle and exit_when_idle=true, stopping");
            return Ok(false);
        }

        Ok(true)
    }

    async fn send_build_request(&mut self, reason: TriggerReason) -> Result<()> {
        debug!(?reason, "dispatching build request");
        if let Err(err) = self.build_tx.send(BuildRequest { reason }).await {
            error!(error = %err, "failed to send request to builder");
            // If the builder channel is closed there is nothing useful left
            // to do; bubble up so higher layers can decide.
            return Err(err.into());
        }
        Ok(())
    }
}
