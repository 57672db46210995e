//! Platform-independent draw list built from the current snapshot
//!
//! The render loop turns the snapshot into a flat list of primitives and
//! hands it to whatever painter the platform provides.

use super::geometry::{arrow_triangle, color_to_rgba8};
use super::protocol::Vec2;
use super::snapshot::Snapshot;

pub const BACKGROUND_RGBA: [u8; 4] = [0, 0, 0, 255];
pub const OBSTACLE_FILL_RGBA: [u8; 4] = [255, 255, 255, 255];
pub const OBSTACLE_STROKE_RGBA: [u8; 4] = [128, 128, 128, 255];
pub const OBSTACLE_STROKE_WIDTH: f32 = 2.0;

/// One drawing primitive, in world coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear { width: f32, height: f32, rgba: [u8; 4] },
    Circle {
        center: Vec2,
        radius: f32,
        fill: [u8; 4],
        stroke: [u8; 4],
        stroke_width: f32,
    },
    Triangle { points: [Vec2; 3], fill: [u8; 4] },
}

/// Background, then obstacles, then arrows, in snapshot order.
pub fn build_scene(snapshot: &Snapshot) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(1 + snapshot.obstacles.len() + snapshot.arrows.len());

    commands.push(DrawCommand::Clear {
        width: snapshot.world_width,
        height: snapshot.world_height,
        rgba: BACKGROUND_RGBA,
    });

    commands.extend(snapshot.obstacles.iter().map(|o| DrawCommand::Circle {
        center: o.position,
        radius: o.radius,
        fill: OBSTACLE_FILL_RGBA,
        stroke: OBSTACLE_STROKE_RGBA,
        stroke_width: OBSTACLE_STROKE_WIDTH,
    }));

    commands.extend(snapshot.arrows.iter().map(|a| DrawCommand::Triangle {
        points: arrow_triangle(a),
        fill: color_to_rgba8(&a.color),
    }));

    commands
}
