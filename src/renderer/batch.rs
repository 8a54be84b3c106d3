//! Draw-call batching
//!
//! Collects a frame's primitives as triangles so the GPU side can upload
//! them in one buffer.

use glam::Vec2;

use super::Renderer;
use super::shapes;
use super::vertex::Vertex;
use crate::{Color, Viewport};

/// One frame of triangles in canvas pixels
#[derive(Debug, Clone)]
pub struct VertexBatch {
    vertices: Vec<Vertex>,
    viewport: Viewport,
    alpha: f32,
}

impl Default for VertexBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexBatch {
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(4096),
            viewport: Viewport::new(1.0, 1.0),
            alpha: 1.0,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Viewport passed to the last `clear`
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn tint(&self, color: Color) -> Color {
        [color[0], color[1], color[2], color[3] * self.alpha]
    }
}

impl Renderer for VertexBatch {
    fn clear(&mut self, viewport: Viewport) {
        self.vertices.clear();
        self.viewport = viewport;
        self.alpha = 1.0;
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        let color = self.tint(color);
        self.vertices.extend(shapes::rect(pos, size, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let color = self.tint(color);
        let segments = shapes::circle_segments(radius);
        self.vertices.extend(shapes::circle(center, radius, color, segments));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_resets_frame() {
        let mut batch = VertexBatch::new();
        batch.clear(Viewport::new(800.0, 600.0));
        batch.fill_rect(Vec2::ZERO, Vec2::splat(10.0), [1.0; 4]);
        assert_eq!(batch.vertices().len(), 6);

        batch.set_alpha(0.5);
        batch.clear(Viewport::new(1024.0, 768.0));
        assert!(batch.vertices().is_empty());
        assert_eq!(batch.viewport(), Viewport::new(1024.0, 768.0));

        batch.fill_rect(Vec2::ZERO, Vec2::splat(10.0), [1.0; 4]);
        assert_eq!(batch.vertices()[0].color[3], 1.0);
    }

    #[test]
    fn test_alpha_scales_fills() {
        let mut batch = VertexBatch::new();
        batch.clear(Viewport::new(800.0, 600.0));
        batch.set_alpha(0.25);
        batch.fill_circle(Vec2::new(5.0, 5.0), 3.0, [0.0, 1.0, 0.0, 1.0]);
        assert!(batch.vertices().iter().all(|v| v.color == [0.0, 1.0, 0.0, 0.25]));
    }
}
