//! Transport channel: one duplex connection with fixed-delay reconnection
//!
//! Platform sockets (native tokio-tungstenite, browser `WebSocket`) plug in
//! through [`Connector`]. They push [`TransportEvent`]s into a single ordered
//! queue which the channel drains once per frame in [`TransportChannel::pump`].
//! Each connect bumps a generation number so events from a superseded socket
//! are dropped instead of touching the store.

use tracing::{debug, error, info, trace, warn};

use super::commands::CommandSink;
use super::config::ClientConfig;
use super::controls::ControlBinder;
use super::error::TransportError;
use super::parser::{parse_message, ParseResult};
use super::snapshot::SnapshotStore;
use crate::ws_state::WsState;

/// Identity of one connection attempt
pub type Generation = u64;

/// Something that happened on a socket
#[derive(Debug, Clone, PartialEq)]
pub enum SocketEvent {
    Opened,
    Message(String),
    Error(String),
    Closed { code: Option<u16>, reason: String },
}

/// A socket event tagged with the connection that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct TransportEvent {
    pub generation: Generation,
    pub event: SocketEvent,
}

impl TransportEvent {
    pub fn new(generation: Generation, event: SocketEvent) -> Self {
        Self { generation, event }
    }
}

/// Write half of an open socket. Dropping it abandons the connection.
pub trait Socket {
    fn send_text(&self, text: &str) -> Result<(), TransportError>;
}

/// Opens sockets and yields their events in arrival order
pub trait Connector {
    type Socket: Socket;

    /// Start connecting; progress is reported through [`Connector::poll_event`].
    fn open(&mut self, url: &str, generation: Generation) -> Result<Self::Socket, TransportError>;

    /// Next queued event, without blocking. `Error` and `Closed` may arrive in
    /// either order.
    fn poll_event(&mut self) -> Option<TransportEvent>;
}

/// Counters for the diagnostics window
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportStats {
    pub connect_attempts: u64,
    pub messages: u64,
    pub malformed: u64,
    pub ignored: u64,
    pub stale_events: u64,
}

pub struct TransportChannel<C: Connector> {
    connector: C,
    config: ClientConfig,
    state: WsState,
    generation: Generation,
    socket: Option<C::Socket>,
    stats: TransportStats,
}

impl<C: Connector> TransportChannel<C> {
    pub fn new(connector: C, config: ClientConfig) -> Self {
        Self {
            connector,
            config,
            state: WsState::Connecting,
            generation: 0,
            socket: None,
            stats: TransportStats::default(),
        }
    }

    /// Open a fresh connection, replacing whatever was there before.
    pub fn connect(&mut self, now: f64) {
        // Drop the old socket before the new one exists
        self.socket = None;
        self.generation += 1;
        self.stats.connect_attempts += 1;
        self.state = WsState::Connecting;

        info!(url = %self.config.endpoint, generation = self.generation, "Connecting to WebSocket");

        match self.connector.open(&self.config.endpoint, self.generation) {
            Ok(socket) => self.socket = Some(socket),
            Err(e) => {
                error!(error = %e, generation = self.generation, "Failed to connect");
                self.schedule_retry(now);
            }
        }
    }

    /// Run a due reconnect, then drain all queued socket events in order.
    ///
    /// Never blocks.
    pub fn pump(&mut self, now: f64, store: &mut SnapshotStore, controls: &mut ControlBinder) {
        if let WsState::Reconnecting { retry_at } = self.state {
            if now >= retry_at {
                self.connect(now);
            }
        }

        while let Some(event) = self.connector.poll_event() {
            self.handle_event(event, now, store, controls);
        }
    }

    fn handle_event(
        &mut self,
        event: TransportEvent,
        now: f64,
        store: &mut SnapshotStore,
        controls: &mut ControlBinder,
    ) {
        if event.generation != self.generation {
            trace!(
                event_generation = event.generation,
                generation = self.generation,
                "Dropping event from superseded connection"
            );
            self.stats.stale_events += 1;
            return;
        }

        match event.event {
            SocketEvent::Opened => {
                info!(generation = self.generation, "WebSocket connected");
                self.state = WsState::Connected;
            }
            SocketEvent::Message(text) => {
                self.stats.messages += 1;
                match parse_message(&text, store, now) {
                    Ok(ParseResult::Snapshot { parameters: Some(params) }) => {
                        controls.apply_server(&params);
                    }
                    Ok(ParseResult::Snapshot { parameters: None }) => {}
                    Ok(ParseResult::Ignored) => self.stats.ignored += 1,
                    Err(e) => {
                        warn!(error = %e, "Discarding malformed message");
                        self.stats.malformed += 1;
                    }
                }
            }
            SocketEvent::Error(msg) => {
                error!(error = %msg, generation = self.generation, "WebSocket error");
                // A pending retry outranks a late error from the closed socket
                if !matches!(self.state, WsState::Reconnecting { .. }) {
                    self.state = WsState::Error(msg);
                }
            }
            SocketEvent::Closed { code, reason } => {
                warn!(?code, reason = %reason, generation = self.generation, "WebSocket closed");
                self.socket = None;
                self.schedule_retry(now);
            }
        }
    }

    /// At most one pending retry at a time
    fn schedule_retry(&mut self, now: f64) {
        if matches!(self.state, WsState::Reconnecting { .. }) {
            debug!("Reconnect already scheduled");
            return;
        }
        let retry_at = now + self.config.reconnect_delay;
        debug!(retry_at, "Scheduling reconnect");
        self.state = WsState::Reconnecting { retry_at };
    }

    pub fn state(&self) -> &WsState {
        &self.state
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn stats(&self) -> &TransportStats {
        &self.stats
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl<C: Connector> CommandSink for TransportChannel<C> {
    fn is_open(&self) -> bool {
        self.state.is_connected() && self.socket.is_some()
    }

    fn send_text(&self, text: &str) -> Result<(), TransportError> {
        match (&self.socket, self.state.is_connected()) {
            (Some(socket), true) => socket.send_text(text),
            _ => Err(TransportError::NotOpen),
        }
    }
}

/// In-memory connector for tests
#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Default)]
    pub struct MockNet {
        pub opened: Vec<(String, Generation)>,
        pub sent: Vec<(Generation, String)>,
        pub events: VecDeque<TransportEvent>,
        /// Make the next `open` fail synchronously
        pub fail_next_open: bool,
    }

    impl MockNet {
        pub fn push(&mut self, generation: Generation, event: SocketEvent) {
            self.events.push_back(TransportEvent::new(generation, event));
        }
    }

    #[derive(Clone, Default)]
    pub struct MockConnector {
        pub net: Rc<RefCell<MockNet>>,
    }

    pub struct MockSocket {
        generation: Generation,
        net: Rc<RefCell<MockNet>>,
    }

    impl Socket for MockSocket {
        fn send_text(&self, text: &str) -> Result<(), TransportError> {
            self.net.borrow_mut().sent.push((self.generation, text.to_string()));
            Ok(())
        }
    }

    impl Connector for MockConnector {
        type Socket = MockSocket;

        fn open(&mut self, url: &str, generation: Generation) -> Result<MockSocket, TransportError> {
            let mut net = self.net.borrow_mut();
            if std::mem::take(&mut net.fail_next_open) {
                return Err(TransportError::Connect {
                    url: url.to_string(),
                    reason: "refused".into(),
                });
            }
            net.opened.push((url.to_string(), generation));
            Ok(MockSocket {
                generation,
                net: self.net.clone(),
            })
        }

        fn poll_event(&mut self) -> Option<TransportEvent> {
            self.net.borrow_mut().events.pop_front()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockConnector;
    use super::*;

    const EMPTY_STATE: &str = r#"{"type": "GameState", "arrows": [], "obstacles": [],
        "screen_width": 640.0, "screen_height": 480.0}"#;

    struct Harness {
        channel: TransportChannel<MockConnector>,
        connector: MockConnector,
        store: SnapshotStore,
        controls: ControlBinder,
    }

    impl Harness {
        fn new() -> Self {
            let connector = MockConnector::default();
            let channel =
                TransportChannel::new(connector.clone(), ClientConfig::new("ws://sim/ws"));
            Self {
                channel,
                connector,
                store: SnapshotStore::new(),
                controls: ControlBinder::default(),
            }
        }

        fn push(&self, generation: Generation, event: SocketEvent) {
            self.connector.net.borrow_mut().push(generation, event);
        }

        fn pump(&mut self, now: f64) {
            self.channel.pump(now, &mut self.store, &mut self.controls);
        }

        fn opened(&self) -> Vec<Generation> {
            self.connector.net.borrow().opened.iter().map(|(_, g)| *g).collect()
        }
    }

    fn closed() -> SocketEvent {
        SocketEvent::Closed { code: Some(1006), reason: String::new() }
    }

    #[test]
    fn open_event_marks_connected() {
        let mut h = Harness::new();
        h.channel.connect(0.0);
        assert_eq!(h.channel.state(), &WsState::Connecting);
        assert!(!h.channel.is_open());

        h.push(1, SocketEvent::Opened);
        h.pump(0.1);
        assert_eq!(h.channel.state(), &WsState::Connected);
        assert!(h.channel.is_open());
        assert_eq!(h.opened(), vec![1]);
    }

    #[test]
    fn close_schedules_exactly_one_retry_after_delay() {
        let mut h = Harness::new();
        h.channel.connect(0.0);
        h.push(1, SocketEvent::Opened);
        h.push(1, closed());
        h.pump(5.0);
        assert_eq!(h.channel.state(), &WsState::Reconnecting { retry_at: 6.0 });

        h.pump(5.5);
        h.pump(5.99);
        assert_eq!(h.opened(), vec![1]);

        h.pump(6.0);
        assert_eq!(h.opened(), vec![1, 2]);
        assert_eq!(h.channel.state(), &WsState::Connecting);

        h.pump(6.5);
        h.pump(10.0);
        assert_eq!(h.opened(), vec![1, 2]);
        assert_eq!(h.channel.stats().connect_attempts, 2);
    }

    #[test]
    fn error_then_close_reconnects_once() {
        let mut h = Harness::new();
        h.channel.connect(0.0);
        h.push(1, SocketEvent::Opened);
        h.push(1, SocketEvent::Error("reset".into()));
        h.pump(1.0);
        assert_eq!(h.channel.state(), &WsState::Error("reset".into()));

        h.push(1, closed());
        h.pump(1.0);
        assert!(matches!(h.channel.state(), WsState::Reconnecting { .. }));

        // A second close for the same connection does not add a second retry
        h.push(1, closed());
        h.pump(1.5);
        assert_eq!(h.channel.state(), &WsState::Reconnecting { retry_at: 2.0 });

        h.pump(2.0);
        assert_eq!(h.opened(), vec![1, 2]);
    }

    #[test]
    fn error_after_close_keeps_pending_retry() {
        let mut h = Harness::new();
        h.channel.connect(0.0);
        h.push(1, SocketEvent::Opened);
        h.push(1, closed());
        h.push(1, SocketEvent::Error("late".into()));
        h.pump(0.0);
        assert_eq!(h.channel.state(), &WsState::Reconnecting { retry_at: 1.0 });

        h.pump(1.0);
        assert_eq!(h.opened(), vec![1, 2]);
        assert_eq!(h.channel.state(), &WsState::Connecting);
    }

    #[test]
    fn synchronous_connect_failure_keeps_retrying() {
        let mut h = Harness::new();
        h.connector.net.borrow_mut().fail_next_open = true;
        h.channel.connect(0.0);
        assert_eq!(h.channel.state(), &WsState::Reconnecting { retry_at: 1.0 });

        h.connector.net.borrow_mut().fail_next_open = true;
        h.pump(1.0);
        assert_eq!(h.channel.state(), &WsState::Reconnecting { retry_at: 2.0 });

        h.pump(2.0);
        assert_eq!(h.channel.generation(), 3);
        assert_eq!(h.opened(), vec![3]);
    }

    #[test]
    fn stale_generation_events_are_ignored() {
        let mut h = Harness::new();
        h.channel.connect(0.0);
        h.channel.connect(0.0);
        h.push(1, SocketEvent::Opened);
        h.push(1, SocketEvent::Message(EMPTY_STATE.into()));
        h.push(1, closed());
        h.pump(0.5);

        assert_eq!(h.channel.state(), &WsState::Connecting);
        assert_eq!(h.store.received(), 0);
        assert_eq!(h.channel.stats().stale_events, 3);
    }

    #[test]
    fn malformed_message_is_counted_and_discarded() {
        let mut h = Harness::new();
        h.channel.connect(0.0);
        h.push(1, SocketEvent::Opened);
        h.push(1, SocketEvent::Message(EMPTY_STATE.into()));
        h.push(1, SocketEvent::Message("garbage".into()));
        h.push(1, SocketEvent::Message(r#"{"type": "Pong"}"#.into()));
        h.pump(0.1);

        assert_eq!(h.channel.state(), &WsState::Connected);
        assert_eq!(h.store.received(), 1);
        assert_eq!(h.store.current().world_width, 640.0);
        let stats = h.channel.stats();
        assert_eq!((stats.messages, stats.malformed, stats.ignored), (3, 1, 1));
    }

    #[test]
    fn send_requires_open_connection() {
        let mut h = Harness::new();
        assert_eq!(h.channel.send_text("x"), Err(TransportError::NotOpen));
        h.channel.connect(0.0);
        assert_eq!(h.channel.send_text("x"), Err(TransportError::NotOpen));
        h.push(1, SocketEvent::Opened);
        h.pump(0.0);
        assert_eq!(h.channel.send_text("x"), Ok(()));
        assert_eq!(h.connector.net.borrow().sent, vec![(1, "x".to_string())]);
    }
}
