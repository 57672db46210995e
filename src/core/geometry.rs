//! Pure geometry helpers for drawing and input mapping

use super::protocol::{Arrow, Color, Vec2};

/// Arrow triangle in its local frame, before rotation and translation.
///
/// Index 0 is the tip, 1 and 2 span the back edge.
pub fn arrow_local_triangle(size: f32) -> [Vec2; 3] {
    let half = size / 2.0;
    let tip_length = size * 0.5;
    [
        Vec2::new(half + tip_length, 0.0),
        Vec2::new(half, -half),
        Vec2::new(half, half),
    ]
}

/// Center the arrow is drawn around (its position offset by half its size)
pub fn arrow_center(arrow: &Arrow) -> Vec2 {
    let half = arrow.size / 2.0;
    Vec2::new(arrow.position.x + half, arrow.position.y + half)
}

/// Arrow triangle in world coordinates: rotated by the heading, then moved to the center
pub fn arrow_triangle(arrow: &Arrow) -> [Vec2; 3] {
    let center = arrow_center(arrow);
    let (sin, cos) = arrow.angle.sin_cos();
    arrow_local_triangle(arrow.size).map(|p| {
        Vec2::new(
            center.x + p.x * cos - p.y * sin,
            center.y + p.x * sin + p.y * cos,
        )
    })
}

/// Scale color channels to 0..=255 (truncating, like a canvas `rgba()` string), alpha preserved.
pub fn color_to_rgba8(color: &Color) -> [u8; 4] {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).floor() as u8;
    [
        channel(color.r),
        channel(color.g),
        channel(color.b),
        (color.a.clamp(0.0, 1.0) * 255.0).round() as u8,
    ]
}

/// Translate a pointer position into the canvas's own coordinate space.
pub fn to_canvas_coords(pointer: Vec2, canvas_origin: Vec2) -> Vec2 {
    Vec2::new(pointer.x - canvas_origin.x, pointer.y - canvas_origin.y)
}
