//! Command sinks: the boundary where velocity commands leave the core

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::error::{DriveError, Result};
use crate::motion::VelocityCommand;

/// Trait for anything that accepts velocity commands
///
/// Emission is fire-and-forget with last-write-wins semantics at the
/// receiver: a command stays in effect until superseded. Failures are
/// surfaced immediately and never retried.
pub trait CommandSink: Send + Sync {
    /// Emit one command
    fn emit(&self, command: VelocityCommand) -> Result<()>;

    /// Get the name of this sink
    fn name(&self) -> &str;
}

/// Sink backed by an unbounded channel
///
/// The receiving half is where the platform's motor transport attaches. Once
/// the receiver is gone the sink reports `SinkUnavailable`.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<VelocityCommand>,
}

impl ChannelSink {
    /// Create the sink and the receiver for the transport side
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<VelocityCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelSink { tx }, rx)
    }
}

impl CommandSink for ChannelSink {
    fn emit(&self, command: VelocityCommand) -> Result<()> {
        self.tx
            .send(command)
            .map_err(|_| DriveError::SinkUnavailable("command receiver dropped".to_string()))
    }

    fn name(&self) -> &str {
        "ChannelSink"
    }
}

/// Sink that only logs emissions; stands in for a transport on the bench
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl CommandSink for LogSink {
    fn emit(&self, command: VelocityCommand) -> Result<()> {
        log::info!(
            "cmd_vel: forward={:.3} lateral={:.3} angular={:.3}",
            command.forward,
            command.lateral,
            command.angular
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "LogSink"
    }
}

/// Sink that records every emission in order
///
/// Clones share the same buffer, so a copy can be handed to a sequencer
/// while the test or simulator inspects the original.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    emissions: Arc<Mutex<Vec<VelocityCommand>>>,
}

impl RecordingSink {
    /// Create an empty recorder
    pub fn new() -> Self {
        RecordingSink::default()
    }

    /// Snapshot of everything emitted so far
    pub fn emissions(&self) -> Vec<VelocityCommand> {
        self.emissions.lock().unwrap().clone()
    }
}

impl CommandSink for RecordingSink {
    fn emit(&self, command: VelocityCommand) -> Result<()> {
        self.emissions.lock().unwrap().push(command);
        Ok(())
    }

    fn name(&self) -> &str {
        "RecordingSink"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_sink_delivers_in_order() {
        let (sink, mut rx) = ChannelSink::channel();
        sink.emit(VelocityCommand::new(0.2, 0.0, 0.0)).unwrap();
        sink.emit(VelocityCommand::ZERO).unwrap();

        assert_eq!(rx.try_recv().unwrap(), VelocityCommand::new(0.2, 0.0, 0.0));
        assert_eq!(rx.try_recv().unwrap(), VelocityCommand::ZERO);
    }

    #[test]
    fn channel_sink_reports_dropped_receiver() {
        let (sink, rx) = ChannelSink::channel();
        drop(rx);

        let result = sink.emit(VelocityCommand::ZERO);
        assert!(matches!(result, Err(DriveError::SinkUnavailable(_))));
    }

    #[test]
    fn recording_sink_clones_share_the_buffer() {
        let sink = RecordingSink::new();
        let copy = sink.clone();
        copy.emit(VelocityCommand::new(0.0, 0.1, 0.0)).unwrap();

        assert_eq!(sink.emissions(), vec![VelocityCommand::new(0.0, 0.1, 0.0)]);
    }
}
