//! Platform-agnostic core module - shared between the wasm viewer, the native window and headless mode

pub mod client;
pub mod commands;
pub mod config;
pub mod controls;
pub mod error;
pub mod geometry;
pub mod parser;
pub mod protocol;
pub mod scene;
pub mod snapshot;
pub mod transport;

pub use client::FlockClient;
pub use commands::{CommandDispatcher, CommandSink, CommandStats, Dispatch};
pub use config::ClientConfig;
pub use controls::{ControlBinder, ControlPair, ControlSource, Param};
pub use error::{ConfigError, ProtocolError, TransportError};
pub use parser::{parse_message, ParseResult};
pub use protocol::{Arrow, ClientMessage, Color, FlockingParameters, Obstacle, ServerMessage, Vec2};
pub use scene::{build_scene, DrawCommand};
pub use snapshot::{Snapshot, SnapshotStore};
pub use transport::{
    Connector, Generation, Socket, SocketEvent, TransportChannel, TransportEvent, TransportStats,
};
