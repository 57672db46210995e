//! Snapshot store - the single source of render truth
//!
//! Holds the latest authoritative simulation state received from the server.
//! Each snapshot fully replaces the previous one; nothing is merged.

use tracing::trace;

use super::protocol::{Arrow, FlockingParameters, Obstacle};

/// World size used until the first snapshot arrives
pub const DEFAULT_WORLD_WIDTH: f32 = 800.0;
pub const DEFAULT_WORLD_HEIGHT: f32 = 600.0;

/// One complete description of simulation state at an instant
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub arrows: Vec<Arrow>,
    pub obstacles: Vec<Obstacle>,
    pub world_width: f32,
    pub world_height: f32,
    pub parameters: FlockingParameters,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            arrows: Vec::new(),
            obstacles: Vec::new(),
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            parameters: FlockingParameters::default(),
        }
    }
}

/// Owns the current snapshot plus bookkeeping about how it got there
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: Snapshot,
    /// Snapshots applied since startup
    received: u64,
    /// Time (seconds) the last snapshot was applied
    last_update: Option<f64>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the current snapshot
    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// Replace the whole store contents in one step.
    ///
    /// When `parameters` is `None` the previous parameter set is kept; entities
    /// and world bounds are always taken from the new snapshot.
    pub fn replace(
        &mut self,
        arrows: Vec<Arrow>,
        obstacles: Vec<Obstacle>,
        world_width: f32,
        world_height: f32,
        parameters: Option<FlockingParameters>,
        now: f64,
    ) {
        let parameters = parameters.unwrap_or(self.current.parameters);
        self.current = Snapshot {
            arrows,
            obstacles,
            world_width,
            world_height,
            parameters,
        };
        self.received += 1;
        self.last_update = Some(now);

        trace!(
            arrows = self.current.arrows.len(),
            obstacles = self.current.obstacles.len(),
            received = self.received,
            "Snapshot replaced"
        );
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn last_update(&self) -> Option<f64> {
        self.last_update
    }
}
