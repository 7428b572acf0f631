use std::error::Error;
use std::path::PathBuf;

use stitch::build::BuildRequest;
use stitch::engine::{
    BuildOutcome, RebuildSlot, Runtime, RuntimeEvent, RuntimeOptions, TriggerReason,
};
use tokio::sync::mpsc;

type TestResult = Result<(), Box<dyn Error>>;

fn harness(
    options: RuntimeOptions,
) -> (
    mpsc::Sender<RuntimeEvent>,
    mpsc::Receiver<BuildRequest>,
    tokio::task::JoinHandle<anyhow::Result<()>>,
) {
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);
    let (build_tx, build_rx) = mpsc::channel::<BuildRequest>(32);

    let runtime = Runtime::new(RebuildSlot::new(), options, rt_rx, build_tx);
    let handle = tokio::spawn(runtime.run());

    (rt_tx, build_rx, handle)
}

fn change(path: &str) -> RuntimeEvent {
    RuntimeEvent::BuildTriggered {
        reason: TriggerReason::FileChange {
            path: PathBuf::from(path),
        },
    }
}

#[tokio::test]
async fn triggers_during_a_build_coalesce_into_one_follow_up() -> TestResult {
    let (rt_tx, mut build_rx, handle) = harness(RuntimeOptions::default());

    rt_tx
        .send(RuntimeEvent::BuildTriggered {
            reason: TriggerReason::Startup,
        })
        .await?;

    let first = build_rx.recv().await.ok_or("builder channel closed")?;
    assert_eq!(first.reason, TriggerReason::Startup);

    // A burst of changes while the first build is still "running".
    rt_tx.send(change("src/a.lua")).await?;
    rt_tx.send(change("src/b.lua")).await?;
    rt_tx.send(change("src/c.lua")).await?;

    rt_tx
        .send(RuntimeEvent::BuildFinished {
            outcome: BuildOutcome::Success,
        })
        .await?;

    // Exactly one follow-up build, not three.
    let follow_up = build_rx.recv().await.ok_or("builder channel closed")?;
    assert_eq!(follow_up.reason, TriggerReason::Queued);

    rt_tx
        .send(RuntimeEvent::BuildFinished {
            outcome: BuildOutcome::Success,
        })
        .await?;
    rt_tx.send(RuntimeEvent::ShutdownRequested).await?;

    handle.await??;

    // No further requests were dispatched before the runtime stopped.
    assert!(build_rx.try_recv().is_err());
    Ok(())
}

#[tokio::test]
async fn trigger_after_an_idle_build_starts_a_fresh_one() -> TestResult {
    let (rt_tx, mut build_rx, handle) = harness(RuntimeOptions::default());

    rt_tx.send(change("src/a.lua")).await?;
    build_rx.recv().await.ok_or("builder channel closed")?;
    rt_tx
        .send(RuntimeEvent::BuildFinished {
            outcome: BuildOutcome::Success,
        })
        .await?;

    // Nothing was queued, so the next change starts a new build directly.
    rt_tx.send(change("src/a.lua")).await?;
    let second = build_rx.recv().await.ok_or("builder channel closed")?;
    assert!(matches!(second.reason, TriggerReason::FileChange { .. }));

    rt_tx
        .send(RuntimeEvent::BuildFinished {
            outcome: BuildOutcome::Success,
        })
        .await?;
    rt_tx.send(RuntimeEvent::ShutdownRequested).await?;
    handle.await??;
    Ok(())
}

#[tokio::test]
async fn failed_build_keeps_the_watch_loop_alive() -> TestResult {
    let (rt_tx, mut build_rx, handle) = harness(RuntimeOptions::default());

    rt_tx.send(change("src/a.lua")).await?;
    build_rx.recv().await.ok_or("builder channel closed")?;
    rt_tx
        .send(RuntimeEvent::BuildFinished {
            outcome: BuildOutcome::Failed,
        })
        .await?;

    // The runtime is still alive and accepts the next trigger.
    rt_tx.send(change("src/a.lua")).await?;
    build_rx.recv().await.ok_or("builder channel closed")?;

    rt_tx
        .send(RuntimeEvent::BuildFinished {
            outcome: BuildOutcome::Success,
        })
        .await?;
    rt_tx.send(RuntimeEvent::ShutdownRequested).await?;
    handle.await??;
    Ok(())
}

#[tokio::test]
async fn once_mode_exits_after_a_successful_build() -> TestResult {
    let (rt_tx, mut build_rx, handle) = harness(RuntimeOptions {
        exit_when_idle: true,
    });

    rt_tx
        .send(RuntimeEvent::BuildTriggered {
            reason: TriggerReason::Startup,
        })
        .await?;
    build_rx.recv().await.ok_or("builder channel closed")?;
    rt_tx
        .send(RuntimeEvent::BuildFinished {
            outcome: BuildOutcome::Success,
        })
        .await?;

    // No shutdown event needed; the runtime stops on its own.
    handle.await??;
    Ok(())
}

#[tokio::test]
async fn once_mode_reports_a_failed_build() -> TestResult {
    let (rt_tx, mut build_rx, handle) = harness(RuntimeOptions {
        exit_when_idle: true,
    });

    rt_tx
        .send(RuntimeEvent::BuildTriggered {
            reason: TriggerReason::Startup,
        })
        .await?;
    build_rx.recv().await.ok_or("builder channel closed")?;
    rt_tx
        .send(RuntimeEvent::BuildFinished {
            outcome: BuildOutcome::Failed,
        })
        .await?;

    let result = handle.await?;
    assert!(result.is_err());
    Ok(())
}
