//! Inbound message parser
//!
//! Decodes server frames and applies `GameState` snapshots to the store.
//! Malformed frames never touch the store.

use super::error::ProtocolError;
use super::protocol::{FlockingParameters, ServerMessage};
use super::snapshot::SnapshotStore;
use tracing::{debug, trace};

/// What a successfully decoded frame did
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    /// A snapshot replaced the store; carries the pushed parameters, if any
    Snapshot {
        parameters: Option<FlockingParameters>,
    },
    /// Well-formed frame with a discriminator this client ignores
    Ignored,
}

/// Parse a WebSocket frame and, for `GameState`, replace the store contents.
pub fn parse_message(
    msg: &str,
    store: &mut SnapshotStore,
    now: f64,
) -> Result<ParseResult, ProtocolError> {
    trace!(len = msg.len(), "Parsing message");

    let message: ServerMessage = serde_json::from_str(msg)?;

    match message {
        ServerMessage::GameState {
            arrows,
            obstacles,
            screen_width,
            screen_height,
            parameters,
        } => {
            debug!(
                arrows = arrows.len(),
                obstacles = obstacles.len(),
                has_parameters = parameters.is_some(),
                "GameState"
            );
            store.replace(arrows, obstacles, screen_width, screen_height, parameters, now);
            Ok(ParseResult::Snapshot { parameters })
        }
        ServerMessage::Unknown => {
            trace!("Ignoring message with unknown type");
            Ok(ParseResult::Ignored)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAME_STATE: &str = r#"{
        "type": "GameState",
        "arrows": [
            {"position": {"x": 10.0, "y": 20.0}, "angle": 1.5, "size": 20.0,
             "color": {"r": 1.0, "g": 0.5, "b": 0.0, "a": 0.8}},
            {"position": {"x": 30.0, "y": 40.0}, "angle": 0.0, "size": 15.0,
             "color": {"r": 0.0, "g": 0.0, "b": 1.0, "a": 1.0}}
        ],
        "obstacles": [{"position": {"x": 100.0, "y": 100.0}, "radius": 25.0}],
        "screen_width": 1024.0,
        "screen_height": 768.0,
        "parameters": {
            "max_speed": 7.0,
            "obstacle_avoidance_distance": 90.0,
            "obstacle_avoidance_strength": 0.6,
            "separation_distance": 60.0,
            "separation_strength": 0.4,
            "alignment_distance": 110.0,
            "alignment_strength": 0.2,
            "cohesion_distance": 180.0,
            "cohesion_strength": 0.35
        }
    }"#;

    #[test]
    fn test_parse_game_state() {
        let mut store = SnapshotStore::new();
        let result = parse_message(GAME_STATE, &mut store, 3.0).unwrap();

        let snap = store.current();
        assert_eq!(snap.arrows.len(), 2);
        assert_eq!(snap.arrows[0].position.x, 10.0);
        assert_eq!(snap.arrows[0].color.a, 0.8);
        assert_eq!(snap.obstacles.len(), 1);
        assert_eq!(snap.obstacles[0].radius, 25.0);
        assert_eq!((snap.world_width, snap.world_height), (1024.0, 768.0));
        assert_eq!(snap.parameters.max_speed, 7.0);
        match result {
            ParseResult::Snapshot { parameters } => {
                assert_eq!(parameters.map(|p| p.cohesion_distance), Some(180.0))
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_parse_game_state_without_parameters() {
        let mut store = SnapshotStore::new();
        let msg = r#"{"type": "GameState", "arrows": [], "obstacles": [],
                      "screen_width": 800.0, "screen_height": 600.0}"#;
        let result = parse_message(msg, &mut store, 0.0).unwrap();
        assert_eq!(result, ParseResult::Snapshot { parameters: None });
        assert_eq!(store.received(), 1);
    }

    #[test]
    fn test_malformed_leaves_store_untouched() {
        let mut store = SnapshotStore::new();
        parse_message(GAME_STATE, &mut store, 0.0).unwrap();
        let before = store.current().clone();

        assert!(parse_message("{not json", &mut store, 1.0).is_err());
        // Right discriminator, missing fields
        assert!(parse_message(r#"{"type": "GameState", "arrows": []}"#, &mut store, 1.0).is_err());

        assert_eq!(store.current(), &before);
        assert_eq!(store.received(), 1);
    }

    #[test]
    fn test_ignore_unknown_type() {
        let mut store = SnapshotStore::new();
        let result = parse_message(r#"{"type": "Welcome", "motd": "hi"}"#, &mut store, 0.0);
        assert_eq!(result.unwrap(), ParseResult::Ignored);
        assert_eq!(store.received(), 0);
    }
}
