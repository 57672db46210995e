//! Command dispatcher: user intents → outbound frames
//!
//! Fire-and-forget. Commands issued while the connection is not open are
//! dropped silently, never queued.

use super::error::{ProtocolError, TransportError};
use super::protocol::{ClientMessage, FlockingParameters};
use tracing::{debug, trace, warn};

/// Where encoded commands go
pub trait CommandSink {
    fn is_open(&self) -> bool;
    fn send_text(&self, text: &str) -> Result<(), TransportError>;
}

/// Outcome of one dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Sent,
    /// Connection not open
    Dropped,
    /// Open, but the write failed
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandStats {
    pub sent: u64,
    pub dropped: u64,
    pub failed: u64,
}

#[derive(Debug, Default)]
pub struct CommandDispatcher {
    stats: CommandStats,
}

/// Encode a command as one JSON text frame
pub fn encode(msg: &ClientMessage) -> Result<String, ProtocolError> {
    serde_json::to_string(msg).map_err(|source| ProtocolError::Encode {
        kind: msg.kind(),
        source,
    })
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// `x`/`y` are already in canvas coordinates
    pub fn create_obstacle(&mut self, sink: &impl CommandSink, x: f32, y: f32) -> Dispatch {
        self.dispatch(sink, ClientMessage::CreateObstacle { x, y })
    }

    /// Always the complete set, never a delta
    pub fn update_parameters(
        &mut self,
        sink: &impl CommandSink,
        parameters: FlockingParameters,
    ) -> Dispatch {
        self.dispatch(sink, ClientMessage::UpdateParameters { parameters })
    }

    pub fn clear_obstacles(&mut self, sink: &impl CommandSink) -> Dispatch {
        self.dispatch(sink, ClientMessage::ClearObstacles)
    }

    fn dispatch(&mut self, sink: &impl CommandSink, msg: ClientMessage) -> Dispatch {
        if !sink.is_open() {
            trace!(kind = msg.kind(), "Not connected, dropping command");
            self.stats.dropped += 1;
            return Dispatch::Dropped;
        }

        let text = match encode(&msg) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Failed to encode command");
                self.stats.failed += 1;
                return Dispatch::Failed;
            }
        };

        match sink.send_text(&text) {
            Ok(()) => {
                debug!(kind = msg.kind(), "Command sent");
                self.stats.sent += 1;
                Dispatch::Sent
            }
            Err(e) => {
                warn!(error = %e, kind = msg.kind(), "Failed to send command");
                self.stats.failed += 1;
                Dispatch::Failed
            }
        }
    }

    pub fn stats(&self) -> &CommandStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        open: bool,
        fail: bool,
        frames: RefCell<Vec<String>>,
    }

    impl CommandSink for RecordingSink {
        fn is_open(&self) -> bool {
            self.open
        }

        fn send_text(&self, text: &str) -> Result<(), TransportError> {
            if self.fail {
                return Err(TransportError::Send("broken pipe".into()));
            }
            self.frames.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn closed_sink_drops_every_command() {
        let sink = RecordingSink::default();
        let mut dispatcher = CommandDispatcher::new();

        assert_eq!(dispatcher.create_obstacle(&sink, 1.0, 2.0), Dispatch::Dropped);
        assert_eq!(
            dispatcher.update_parameters(&sink, FlockingParameters::default()),
            Dispatch::Dropped
        );
        assert_eq!(dispatcher.clear_obstacles(&sink), Dispatch::Dropped);

        assert!(sink.frames.borrow().is_empty());
        assert_eq!(dispatcher.stats().dropped, 3);
    }

    #[test]
    fn open_sink_gets_one_frame_per_command() {
        let sink = RecordingSink { open: true, ..Default::default() };
        let mut dispatcher = CommandDispatcher::new();

        assert_eq!(dispatcher.create_obstacle(&sink, 100.0, 200.0), Dispatch::Sent);
        assert_eq!(dispatcher.clear_obstacles(&sink), Dispatch::Sent);

        let frames = sink.frames.borrow();
        assert_eq!(frames.len(), 2);
        let first: serde_json::Value = serde_json::from_str(&frames[0]).unwrap();
        assert_eq!(first["type"], "CreateObstacle");
        assert_eq!(first["x"], 100.0);
        assert_eq!(frames[1], r#"{"type":"ClearObstacles"}"#);
        assert_eq!(dispatcher.stats().sent, 2);
    }

    #[test]
    fn write_failure_is_counted_not_retried() {
        let sink = RecordingSink { open: true, fail: true, ..Default::default() };
        let mut dispatcher = CommandDispatcher::new();
        assert_eq!(dispatcher.clear_obstacles(&sink), Dispatch::Failed);
        assert_eq!(dispatcher.stats(), &CommandStats { sent: 0, dropped: 0, failed: 1 });
    }
}
