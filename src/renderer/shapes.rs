//! Triangle tessellation for the two primitives the game draws
//!
//! Output is a triangle list in canvas pixels.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::Color;

/// Filled circle as a fan of `segments` wedges around `center`
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let rim = |i: u32| {
        let angle = i as f32 / segments as f32 * TAU;
        center + Vec2::from_angle(angle) * radius
    };

    (0..segments)
        .flat_map(|i| {
            [
                Vertex::at(center, color),
                Vertex::at(rim(i), color),
                Vertex::at(rim(i + 1), color),
            ]
        })
        .collect()
}

/// Segment count that keeps circles smooth without wasting triangles on specks
pub fn circle_segments(radius: f32) -> u32 {
    ((radius * 2.0) as u32).clamp(8, 48)
}

/// Axis-aligned rectangle from its top-left corner
pub fn rect(pos: Vec2, size: Vec2, color: Color) -> [Vertex; 6] {
    let far = pos + size;
    let top_right = Vec2::new(far.x, pos.y);
    let bottom_left = Vec2::new(pos.x, far.y);

    [
        Vertex::at(pos, color),
        Vertex::at(top_right, color),
        Vertex::at(bottom_left, color),
        Vertex::at(bottom_left, color),
        Vertex::at(top_right, color),
        Vertex::at(far, color),
    ]
}
