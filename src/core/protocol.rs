//! Wire types for the flocking server WebSocket protocol
//!
//! Every frame is a JSON object with a `type` discriminator.

use serde::{Deserialize, Serialize};

/// 2D position in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// RGBA color with all channels in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// A moving agent as broadcast by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub position: Vec2,
    /// Heading in radians
    pub angle: f32,
    pub size: f32,
    pub color: Color,
}

/// A static circular region agents steer around
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vec2,
    pub radius: f32,
}

/// The nine flocking tuning values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlockingParameters {
    pub max_speed: f32,
    pub obstacle_avoidance_distance: f32,
    pub obstacle_avoidance_strength: f32,
    pub separation_distance: f32,
    pub separation_strength: f32,
    pub alignment_distance: f32,
    pub alignment_strength: f32,
    pub cohesion_distance: f32,
    pub cohesion_strength: f32,
}

impl Default for FlockingParameters {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            obstacle_avoidance_distance: 100.0,
            obstacle_avoidance_strength: 0.5,
            separation_distance: 70.0,
            separation_strength: 0.3,
            alignment_distance: 120.0,
            alignment_strength: 0.25,
            cohesion_distance: 200.0,
            cohesion_strength: 0.3,
        }
    }
}

/// Server → client
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    GameState {
        arrows: Vec<Arrow>,
        obstacles: Vec<Obstacle>,
        screen_width: f32,
        screen_height: f32,
        #[serde(default)]
        parameters: Option<FlockingParameters>,
    },
    /// Any discriminator this client does not understand
    #[serde(other)]
    Unknown,
}

/// Client → server
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    CreateObstacle { x: f32, y: f32 },
    UpdateParameters { parameters: FlockingParameters },
    ClearObstacles,
}

impl ClientMessage {
    /// Discriminator string, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ClientMessage::CreateObstacle { .. } => "CreateObstacle",
            ClientMessage::UpdateParameters { .. } => "UpdateParameters",
            ClientMessage::ClearObstacles => "ClearObstacles",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn create_obstacle_wire_shape() {
        let msg = ClientMessage::CreateObstacle { x: 100.0, y: 200.0 };
        let v: Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(v, json!({"type": "CreateObstacle", "x": 100.0, "y": 200.0}));
    }

    #[test]
    fn clear_obstacles_has_no_payload() {
        let v: Value = serde_json::to_value(ClientMessage::ClearObstacles).unwrap();
        assert_eq!(v, json!({"type": "ClearObstacles"}));
    }

    #[test]
    fn update_parameters_carries_all_nine_fields() {
        let msg = ClientMessage::UpdateParameters {
            parameters: FlockingParameters::default(),
        };
        let v: Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["type"], "UpdateParameters");
        let params = v["parameters"].as_object().unwrap();
        assert_eq!(params.len(), 9);
        assert_eq!(params["max_speed"], 5.0);
        assert_eq!(params["alignment_strength"], 0.25);
    }

    #[test]
    fn unknown_discriminator_maps_to_unknown() {
        let msg: ServerMessage = serde_json::from_str(r#"{"type": "Hello"}"#).unwrap();
        assert_eq!(msg, ServerMessage::Unknown);
    }
}
