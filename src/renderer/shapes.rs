//! Shape generation for the 2D top-down scene
//!
//! Everything is emitted as triangle lists so a caller can upload the result
//! as one vertex buffer.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::{Vertex, colors, rgba};
use crate::sim::{Entity, GameState, Marker};

/// Segments used for the marker circle
pub const CIRCLE_SEGMENTS: usize = 32;

/// Axis-aligned square centered on `center` (two triangles)
pub fn quad(center: Vec2, half: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let bl = Vertex::at(center + Vec2::new(-half.x, -half.y), color);
    let br = Vertex::at(center + Vec2::new(half.x, -half.y), color);
    let tr = Vertex::at(center + Vec2::new(half.x, half.y), color);
    let tl = Vertex::at(center + Vec2::new(-half.x, half.y), color);
    [bl, br, tr, bl, tr, tl]
}

/// Filled circle as a triangle fan unrolled into a list
pub fn circle(center: Vec2, radius: f32, segments: usize, color: [f32; 4]) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity(segments * 3);
    for i in 0..segments {
        let a0 = TAU * i as f32 / segments as f32;
        let a1 = TAU * (i + 1) as f32 / segments as f32;
        vertices.push(Vertex::at(center, color));
        vertices.push(Vertex::at(center + Vec2::new(a0.cos(), a0.sin()) * radius, color));
        vertices.push(Vertex::at(center + Vec2::new(a1.cos(), a1.sin()) * radius, color));
    }
    vertices
}

/// Falling entity as a square in its draw color
pub fn entity(e: &Entity) -> [Vertex; 6] {
    let half = e.kind.half_size();
    quad(e.pos, Vec2::splat(half), rgba(e.kind.draw_color().to_rgb()))
}

/// Marker in its current display color
pub fn marker(m: &Marker) -> Vec<Vertex> {
    circle(m.pos, m.radius, CIRCLE_SEGMENTS, rgba(m.display_color))
}

/// Whole scene, back to front: play area, falling entities, marker
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let area = Vec2::new(state.params.half_width, state.params.half_height);
    let mut vertices =
        Vec::with_capacity(6 + state.entities().len() * 6 + CIRCLE_SEGMENTS * 3);

    vertices.extend_from_slice(&quad(Vec2::ZERO, area, colors::PLAY_AREA));
    for e in state.entities() {
        vertices.extend_from_slice(&entity(e));
    }
    vertices.extend(marker(&state.marker));
    vertices
}
