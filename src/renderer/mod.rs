//! Rendering module
//!
//! The game draws through the small [`Renderer`] trait (clear, filled
//! rect, filled circle, alpha). [`VertexBatch`] turns those calls into
//! triangles, and [`RenderState`] uploads the batch with WebGPU.

pub mod batch;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use batch::VertexBatch;
pub use pipeline::RenderState;

use glam::Vec2;

use crate::sim::GameState;
use crate::{Color, Viewport};

/// Primitive draw calls, in canvas pixels with y pointing down
pub trait Renderer {
    /// Start a new frame covering `viewport`
    fn clear(&mut self, viewport: Viewport);
    /// Axis-aligned rectangle from its top-left corner
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Global alpha multiplier for subsequent fills
    fn set_alpha(&mut self, alpha: f32);
}

/// Draw one frame and age the particles. Runs every frame in every phase.
pub fn draw_frame(state: &mut GameState, renderer: &mut dyn Renderer) {
    renderer.clear(state.viewport);

    for brick in state.bricks.alive() {
        renderer.fill_rect(brick.pos, Vec2::new(brick.width, brick.height), brick.color);
    }

    renderer.fill_circle(state.ball.pos, state.ball.radius, state.tuning.ball_color());

    let paddle = &state.paddle;
    renderer.fill_rect(
        paddle.pos,
        Vec2::new(paddle.width, paddle.height),
        state.tuning.paddle_color(),
    );

    draw_particles(state, renderer);
}

/// Fade by remaining life, then drift and count down. Survivors go into a
/// fresh list so removal never skips a neighbour.
fn draw_particles(state: &mut GameState, renderer: &mut dyn Renderer) {
    let full_life = state.tuning.particle_lifespan.max(1) as f32;
    let mut survivors = Vec::with_capacity(state.particles.len());

    for mut particle in std::mem::take(&mut state.particles) {
        if particle.lifespan == 0 {
            continue;
        }
        renderer.set_alpha(particle.lifespan as f32 / full_life);
        renderer.fill_circle(particle.pos, particle.radius, particle.color);
        renderer.set_alpha(1.0);

        particle.pos += particle.vel;
        particle.lifespan -= 1;
        if particle.lifespan > 0 {
            survivors.push(particle);
        }
    }

    state.particles = survivors;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BrickStatus, Particle};
    use crate::tuning::Tuning;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear,
        Rect(Color),
        Circle(f32),
        Alpha(f32),
    }

    #[derive(Default)]
    struct Recorder(Vec<Call>);

    impl Renderer for Recorder {
        fn clear(&mut self, _viewport: Viewport) {
            self.0.push(Call::Clear);
        }
        fn fill_rect(&mut self, _pos: Vec2, _size: Vec2, color: Color) {
            self.0.push(Call::Rect(color));
        }
        fn fill_circle(&mut self, _center: Vec2, radius: f32, _color: Color) {
            self.0.push(Call::Circle(radius));
        }
        fn set_alpha(&mut self, alpha: f32) {
            self.0.push(Call::Alpha(alpha));
        }
    }

    fn state() -> GameState {
        GameState::new(Tuning::default(), Viewport::new(800.0, 600.0), 3)
    }

    #[test]
    fn test_draw_order() {
        let mut s = state();
        let mut r = Recorder::default();
        draw_frame(&mut s, &mut r);

        let bricks = s.bricks.bricks.len();
        assert_eq!(r.0[0], Call::Clear);
        assert!(r.0[1..=bricks].iter().all(|c| matches!(c, Call::Rect(_))));
        assert_eq!(r.0[bricks + 1], Call::Circle(10.0));
        assert!(matches!(r.0[bricks + 2], Call::Rect(_)));
        assert_eq!(r.0.len(), bricks + 3);
    }

    #[test]
    fn test_broken_bricks_not_drawn() {
        let mut s = state();
        s.bricks.bricks[0].status = BrickStatus::Broken;
        let mut r = Recorder::default();
        draw_frame(&mut s, &mut r);
        let rects = r.0.iter().filter(|c| matches!(c, Call::Rect(_))).count();
        // alive bricks + paddle
        assert_eq!(rects, s.bricks.bricks.len() - 1 + 1);
    }

    #[test]
    fn test_particles_fade_move_and_expire() {
        let mut s = state();
        s.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 2.0),
            radius: 2.0,
            color: [0.0, 1.0, 0.0, 1.0],
            lifespan: 2,
        });

        let mut r = Recorder::default();
        draw_frame(&mut s, &mut r);
        assert!(r.0.contains(&Call::Alpha(2.0 / 30.0)));
        assert_eq!(s.particles.len(), 1);
        assert_eq!(s.particles[0].pos, Vec2::new(1.0, 2.0));
        assert_eq!(s.particles[0].lifespan, 1);

        draw_frame(&mut s, &mut Recorder::default());
        assert!(s.particles.is_empty());
    }

    #[test]
    fn test_full_burst_lives_for_lifespan_frames() {
        let mut s = state();
        s.spawn_particles(Vec2::new(100.0, 100.0));
        for _ in 0..29 {
            draw_frame(&mut s, &mut Recorder::default());
        }
        assert_eq!(s.particles.len(), 10);
        draw_frame(&mut s, &mut Recorder::default());
        assert!(s.particles.is_empty());
    }
}
