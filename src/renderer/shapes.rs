//! Shape generation for the scene
//!
//! All output is in view space: (0, 0) is the top-left of the 400x600
//! screen. World y is shifted by the camera scroll.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::assets::SpriteKey;
use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};
use crate::sim::GameState;

/// Spacing of the background grid
const GRID_SPACING: f32 = 20.0;

/// Two triangles covering an axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Paper background with horizontal rules that scroll with the camera
fn background(camera_y: f32, out: &mut Vec<Vertex>) {
    out.extend(rect(
        Vec2::ZERO,
        Vec2::new(VIEW_WIDTH, VIEW_HEIGHT),
        colors::for_sprite(SpriteKey::Background),
    ));

    let offset = camera_y.rem_euclid(GRID_SPACING);
    let mut y = -offset;
    while y < VIEW_HEIGHT {
        out.extend(rect(Vec2::new(0.0, y), Vec2::new(VIEW_WIDTH, 1.0), colors::GRID_LINE));
        y += GRID_SPACING;
    }
}

/// Build the full frame
pub fn scene(state: &GameState) -> Vec<Vertex> {
    let camera = Vec2::new(0.0, state.camera_y);
    let mut vertices = Vec::with_capacity(6 * (state.platforms.len() + 64));

    background(state.camera_y, &mut vertices);

    let platform_color = colors::for_sprite(SpriteKey::Platform);
    for platform in &state.platforms {
        let (w, h) = SpriteKey::Platform.size();
        let min = platform.pos - Vec2::new(w, h) / 2.0 - camera;
        if min.y > VIEW_HEIGHT || min.y + h < 0.0 {
            continue;
        }
        vertices.extend(rect(min, Vec2::new(w, h), platform_color));
    }

    // Player drawn at its body; the eye marks facing direction
    let player = &state.player;
    let body_min = player.body.bounds.min - camera;
    let body_size = player.body.bounds.size;
    vertices.extend(rect(body_min, body_size, colors::for_sprite(player.texture)));

    let eye_x = if player.flip_x {
        body_min.x + body_size.x * 0.2
    } else {
        body_min.x + body_size.x * 0.7
    };
    vertices.extend(rect(
        Vec2::new(eye_x, body_min.y + body_size.y * 0.2),
        Vec2::new(6.0, 6.0),
        colors::EYE,
    ));

    vertices
}
