//! Shape generation for 2D primitives
//!
//! Everything tessellates into flat-colored triangles in logical canvas
//! coordinates; the pipeline maps them through the fitted viewport.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::consts::{GAME_HEIGHT, GAME_WIDTH, GROUND_Y};
use crate::sim::state::{EntityKind, GameState};

/// Generate vertices for an axis-aligned rectangle
pub fn rect(center: Vec2, half: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let min = center - half;
    let max = center + half;

    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn disc(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Assemble the whole frame: ground, player, then falling entities
pub fn scene(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    // Ground platform spanning the full width
    let ground_half = Vec2::new(GAME_WIDTH / 2.0, (GAME_HEIGHT - GROUND_Y) / 2.0);
    let ground_center = Vec2::new(GAME_WIDTH / 2.0, GROUND_Y + ground_half.y);
    vertices.extend(rect(ground_center, ground_half, colors::GROUND));

    // Player, red-tinted after a bomb hit
    let player_color = if state.player.hit_tint {
        colors::PLAYER_HIT
    } else {
        colors::PLAYER
    };
    vertices.extend(rect(
        state.player.pos,
        state.player.half_extent(),
        player_color,
    ));

    for entity in &state.entities {
        match entity.kind {
            EntityKind::Coin => {
                vertices.extend(disc(
                    entity.pos,
                    entity.half_extent().x,
                    colors::COIN,
                    16,
                ));
            }
            EntityKind::Bomb => {
                vertices.extend(rect(entity.pos, entity.half_extent(), colors::BOMB));
            }
        }
    }

    vertices
}
