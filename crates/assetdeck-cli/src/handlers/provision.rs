//! Provision command handler.
//!
//! Selects the requested assets, runs the workflow engine and renders its
//! events until the run ends. Ctrl-C asks the engine to cancel; the engine
//! refuses once the run is past its first checkpoint.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::warn;

use assetdeck_core::{
    AssetKey, ChannelEmitter, TokioScheduler, WorkflowEngine, WorkflowEvent, WorkflowKind,
};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::WorkflowProgress;

pub async fn execute(ctx: &CliContext, keys: Vec<AssetKey>, endpoint: bool) -> Result<()> {
    let kind = if endpoint {
        WorkflowKind::CreateEndpoint
    } else {
        WorkflowKind::ConfigurePlayground
    };

    let selection = Arc::new(ctx.selection_store());
    selection.select_all(keys);

    let (_, missing) = selection.resolve(&selection.snapshot());
    for err in &missing {
        eprintln!("⚠ {err}; skipping");
    }

    let (emitter, events) = ChannelEmitter::new();
    let engine = WorkflowEngine::new(
        selection,
        Arc::new(TokioScheduler::current()),
        Arc::new(emitter),
        ctx.settings.clone(),
    );

    engine.start(kind).map_err(CliError::from)?;
    let outcome = follow(&engine, events).await;

    match outcome {
        Some(WorkflowEvent::Completed { persisted, .. }) => {
            if persisted.is_empty() {
                println!("Everything selected was already provisioned.");
            } else {
                let keys: Vec<String> = persisted.iter().map(ToString::to_string).collect();
                println!("✓ Recorded {}", keys.join(", "));
            }
            Ok(())
        }
        Some(WorkflowEvent::Cancelled { .. }) => {
            println!("Provisioning cancelled; nothing was recorded.");
            Ok(())
        }
        _ => Err(CliError::Core("workflow ended without a result".into()).into()),
    }
}

/// Render events until a terminal one arrives, forwarding Ctrl-C to the engine.
async fn follow(
    engine: &WorkflowEngine,
    mut events: UnboundedReceiver<WorkflowEvent>,
) -> Option<WorkflowEvent> {
    let progress = WorkflowProgress::new();
    let mut interrupts_open = true;

    loop {
        tokio::select! {
            event = events.recv() => {
                let event = event?;
                if progress.apply(&event) {
                    return Some(event);
                }
            }
            signal = tokio::signal::ctrl_c(), if interrupts_open => {
                if signal.is_err() {
                    interrupts_open = false;
                    continue;
                }
                if let Err(err) = engine.cancel() {
                    warn!("{err}");
                    eprintln!("{err}; waiting for the run to finish");
                }
            }
        }
    }
}
