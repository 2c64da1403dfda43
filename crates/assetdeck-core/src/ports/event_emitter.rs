//! Event emitter trait for workflow progress broadcasting.
//!
//! Implementations handle transport details (channels, terminal rendering, etc.).

use tokio::sync::mpsc;

use crate::events::WorkflowEvent;

/// Trait for emitting workflow events.
///
/// This abstraction keeps event plumbing consistent and prevents channel
/// types from becoming part of the engine's API surface.
///
/// # Implementations
///
/// - `NoopEmitter` - For tests and contexts that don't need events
/// - `ChannelEmitter` - Forwards events to an unbounded tokio channel
pub trait WorkflowEventEmitter: Send + Sync {
    /// Emit a workflow event. Must not block.
    ///
    /// Called with the engine's state lock held, so implementations must not
    /// call back into the engine (`state`, `cancel`, `start`). Forward the
    /// event and react to it elsewhere, as `ChannelEmitter` does.
    fn emit(&self, event: WorkflowEvent);

    /// Clone this emitter into a boxed trait object.
    fn clone_box(&self) -> Box<dyn WorkflowEventEmitter>;
}

/// A no-op event emitter.
#[derive(Debug, Clone, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    pub const fn new() -> Self {
        Self
    }
}

impl WorkflowEventEmitter for NoopEmitter {
    fn emit(&self, _event: WorkflowEvent) {}

    fn clone_box(&self) -> Box<dyn WorkflowEventEmitter> {
        Box::new(self.clone())
    }
}

/// Emitter that forwards events into an unbounded channel.
///
/// Events sent after the receiver is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelEmitter {
    tx: mpsc::UnboundedSender<WorkflowEvent>,
}

impl ChannelEmitter {
    /// Create an emitter and the receiver that observes its events.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<WorkflowEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl WorkflowEventEmitter for ChannelEmitter {
    fn emit(&self, event: WorkflowEvent) {
        let _ = self.tx.send(event);
    }

    fn clone_box(&self) -> Box<dyn WorkflowEventEmitter> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_noop_emitter() {
        let emitter = NoopEmitter::new();
        emitter.emit(WorkflowEvent::progress(1, 33));
        let _boxed: Box<dyn WorkflowEventEmitter> = emitter.clone_box();
    }

    #[test]
    fn test_channel_emitter_forwards() {
        let (emitter, mut rx) = ChannelEmitter::new();
        let emitter: Arc<dyn WorkflowEventEmitter> = Arc::new(emitter);
        emitter.emit(WorkflowEvent::progress(1, 33));
        assert_eq!(rx.try_recv().unwrap(), WorkflowEvent::progress(1, 33));
    }

    #[test]
    fn test_channel_emitter_survives_dropped_receiver() {
        let (emitter, rx) = ChannelEmitter::new();
        drop(rx);
        emitter.emit(WorkflowEvent::Cancelled { run_id: 1 });
    }
}
