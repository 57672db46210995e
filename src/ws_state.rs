//! Shared WebSocket connection state
//!
//! Used by the transport channel and observed by the status indicator.

/// WebSocket connection state
#[derive(Clone, Debug, PartialEq)]
pub enum WsState {
    Connecting,
    Connected,
    /// Transport reported an error; the close that follows schedules the retry
    Error(String),
    /// Closed, a reconnect is scheduled at `retry_at` (seconds)
    Reconnecting { retry_at: f64 },
}

impl WsState {
    pub fn is_connected(&self) -> bool {
        matches!(self, WsState::Connected)
    }

    /// Text for the status indicator
    pub fn label(&self) -> &'static str {
        match self {
            WsState::Connecting => "Connecting...",
            WsState::Connected => "Connected",
            WsState::Error(_) => "Connection error",
            WsState::Reconnecting { .. } => "Disconnected. Reconnecting...",
        }
    }
}
