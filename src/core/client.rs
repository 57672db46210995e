//! Top-level client state
//!
//! Owns the snapshot store, control binder, command dispatcher and transport
//! channel, and passes them to each other by reference. One instance per app;
//! every trigger (socket event, user input, frame tick) goes through it on one
//! thread.

use super::commands::{CommandDispatcher, CommandStats, Dispatch};
use super::config::ClientConfig;
use super::controls::{ControlBinder, ControlSource, Param};
use super::geometry::to_canvas_coords;
use super::protocol::Vec2;
use super::scene::{build_scene, DrawCommand};
use super::snapshot::{Snapshot, SnapshotStore};
use super::transport::{Connector, TransportChannel, TransportStats};
use crate::ws_state::WsState;

pub struct FlockClient<C: Connector> {
    transport: TransportChannel<C>,
    store: SnapshotStore,
    controls: ControlBinder,
    commands: CommandDispatcher,
}

impl<C: Connector> FlockClient<C> {
    pub fn new(connector: C, config: ClientConfig) -> Self {
        let store = SnapshotStore::new();
        let controls = ControlBinder::new(&store.current().parameters);
        Self {
            transport: TransportChannel::new(connector, config),
            store,
            controls,
            commands: CommandDispatcher::new(),
        }
    }

    /// Open the first connection
    pub fn start(&mut self, now: f64) {
        self.transport.connect(now);
    }

    /// Once per frame: run a due reconnect and apply queued socket events.
    pub fn tick(&mut self, now: f64) {
        self.transport.pump(now, &mut self.store, &mut self.controls);
    }

    /// Canvas click at `pointer`, with the canvas's top-left at `canvas_origin`
    /// (both in the same screen space).
    pub fn click(&mut self, pointer: Vec2, canvas_origin: Vec2) -> Dispatch {
        let p = to_canvas_coords(pointer, canvas_origin);
        self.commands.create_obstacle(&self.transport, p.x, p.y)
    }

    /// User changed one of the two controls of `param`.
    pub fn edit_parameter(&mut self, param: Param, source: ControlSource, value: f32) -> Dispatch {
        let parameters = self.controls.on_user_input(param, source, value);
        self.commands.update_parameters(&self.transport, parameters)
    }

    pub fn clear_obstacles(&mut self) -> Dispatch {
        self.commands.clear_obstacles(&self.transport)
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.store.current()
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn controls(&self) -> &ControlBinder {
        &self.controls
    }

    pub fn connection_state(&self) -> &WsState {
        self.transport.state()
    }

    pub fn transport_stats(&self) -> &TransportStats {
        self.transport.stats()
    }

    pub fn command_stats(&self) -> &CommandStats {
        self.commands.stats()
    }

    pub fn endpoint(&self) -> &str {
        &self.transport.config().endpoint
    }

    /// Draw list for the current snapshot
    pub fn scene(&self) -> Vec<DrawCommand> {
        build_scene(self.store.current())
    }
}
