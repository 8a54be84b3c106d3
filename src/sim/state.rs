//! Game state and core simulation types
//!
//! Everything the loop mutates lives in [`GameState`]; sub-steps borrow it
//! instead of reaching for globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::tuning::Tuning;
use crate::{Color, Viewport};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start menu showing, waiting for a player name
    Start,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Per-axis speed; `|vel.x| == |vel.y| == speed` once launched
    pub speed: f32,
}

impl Ball {
    /// Serve up and to the right at the current speed
    pub fn launch(&mut self) {
        self.vel = Vec2::new(self.speed, -self.speed);
    }

    /// Multiply the speed and rebuild the velocity, keeping its direction signs
    pub fn speed_up(&mut self, factor: f32) {
        self.speed *= factor;
        let sign = |v: f32| if v > 0.0 { 1.0 } else { -1.0 };
        self.vel = Vec2::new(sign(self.vel.x) * self.speed, sign(self.vel.y) * self.speed);
    }
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Pixels per tick
    pub speed: f32,
}

impl Paddle {
    /// Rightmost allowed `pos.x` on a canvas this wide
    pub fn max_x(&self, canvas_width: f32) -> f32 {
        (canvas_width - self.width).max(0.0)
    }

    /// Move horizontally, staying inside the canvas
    pub fn move_by(&mut self, dx: f32, canvas_width: f32) {
        self.pos.x = (self.pos.x + dx).clamp(0.0, self.max_x(canvas_width));
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    /// Center horizontally; pinned to the left edge when the canvas is narrower than the paddle
    pub fn recenter(&mut self, canvas_width: f32) {
        self.pos.x = ((canvas_width - self.width) / 2.0).clamp(0.0, self.max_x(canvas_width));
    }

    /// Whether `x` lies strictly inside the paddle's horizontal span
    pub fn spans(&self, x: f32) -> bool {
        x > self.pos.x && x < self.pos.x + self.width
    }
}

/// Brick status; `Broken` is terminal until the grid is rebuilt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickStatus {
    Alive,
    Broken,
}

/// A brick in the grid
#[derive(Debug, Clone)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub status: BrickStatus,
    pub color: Color,
    pub points: u32,
}

impl Brick {
    pub fn is_alive(&self) -> bool {
        self.status == BrickStatus::Alive
    }

    /// Strict point containment (edges don't count)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.pos.x
            && p.x < self.pos.x + self.width
            && p.y > self.pos.y
            && p.y < self.pos.y + self.height
    }
}

/// Bricks stored column-major: all rows of column 0, then column 1, ...
#[derive(Debug, Clone, Default)]
pub struct BrickGrid {
    pub cols: usize,
    pub rows: usize,
    pub bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Lay out a fresh grid starting `offset_left` pixels from the left edge
    pub fn build(tuning: &Tuning, cols: usize, offset_left: f32) -> Self {
        let rows = tuning.brick_rows;
        let mut bricks = Vec::with_capacity(cols * rows);
        for c in 0..cols {
            for r in 0..rows {
                bricks.push(Brick {
                    pos: Vec2::new(
                        c as f32 * tuning.brick_stride_x() + offset_left,
                        r as f32 * tuning.brick_stride_y() + tuning.brick_offset_top,
                    ),
                    width: tuning.brick_width,
                    height: tuning.brick_height,
                    status: BrickStatus::Alive,
                    color: tuning.brick_color(r),
                    points: tuning.brick_points(r),
                });
            }
        }
        Self { cols, rows, bricks }
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Brick> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.bricks.get(col * self.rows + row)
    }

    pub fn alive(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    pub fn all_broken(&self) -> bool {
        self.bricks.iter().all(|b| !b.is_alive())
    }
}

/// Columns that fit across `width`, leaving the side margins free
pub fn grid_columns(tuning: &Tuning, width: f32) -> usize {
    let stride = tuning.brick_stride_x();
    if stride <= 0.0 {
        return 0;
    }
    let available = width - 2.0 * tuning.brick_side_margin;
    (available / stride).floor().max(0.0) as usize
}

/// Left offset that centers `cols` columns on a canvas this wide
pub fn grid_offset_left(tuning: &Tuning, width: f32, cols: usize) -> f32 {
    let span = cols as f32 * tuning.brick_stride_x() - tuning.brick_padding;
    (width - span) / 2.0
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Frames left; removed when it reaches zero
    pub lifespan: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Current canvas size
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    /// Visual particles (not gameplay-affecting, survive resets)
    pub particles: Vec<Particle>,
    pub score: u32,
    pub lives: u32,
    /// Name recorded on the leaderboard when the run ends
    pub player_name: String,
    /// Spawn particle bursts on brick break
    pub particles_enabled: bool,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game sized to `viewport`, sitting on the start menu
    pub fn new(tuning: Tuning, viewport: Viewport, seed: u64) -> Self {
        let mut state = Self {
            ball: Ball {
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
                radius: tuning.ball_radius,
                speed: tuning.ball_start_speed,
            },
            paddle: Paddle {
                pos: Vec2::ZERO,
                width: tuning.paddle_width,
                height: tuning.paddle_height,
                speed: tuning.paddle_speed,
            },
            tuning,
            viewport,
            phase: GamePhase::Start,
            bricks: BrickGrid::default(),
            particles: Vec::new(),
            score: 0,
            lives: 0,
            player_name: String::new(),
            particles_enabled: true,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset();
        state
    }

    /// Full reset: re-fit the grid to the viewport, recenter everything,
    /// restore score, lives and ball speed. Phase and particles are untouched.
    pub fn reset(&mut self) {
        let Viewport { width, height } = self.viewport;
        let tuning = &self.tuning;

        self.paddle.width = tuning.paddle_width;
        self.paddle.height = tuning.paddle_height;
        self.paddle.speed = tuning.paddle_speed;
        self.paddle.pos.y = height - self.paddle.height - tuning.paddle_floor_gap;
        self.paddle.recenter(width);

        let cols = grid_columns(tuning, width);
        let offset_left = grid_offset_left(tuning, width, cols);
        self.bricks = BrickGrid::build(tuning, cols, offset_left);

        self.ball.radius = tuning.ball_radius;
        self.ball.speed = tuning.ball_start_speed;
        self.ball.vel = Vec2::ZERO;
        self.ball.pos = Vec2::new(width / 2.0, self.paddle.pos.y - tuning.ball_spawn_above_paddle);

        self.score = 0;
        self.lives = tuning.start_lives;

        log::debug!(
            "Reset to {}x{}: {} columns at x={:.1}",
            width,
            height,
            cols,
            offset_left
        );
    }

    /// Viewport changed: hard reset back to the start menu
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.reset();
        self.phase = GamePhase::Start;
        log::info!("Viewport resized to {}x{}, back to start", viewport.width, viewport.height);
    }

    /// Begin a run for `name`
    pub fn start(&mut self, name: &str) {
        self.player_name = name.to_string();
        self.reset();
        self.ball.launch();
        self.phase = GamePhase::Playing;
        log::info!("Run started for {:?}", self.player_name);
    }

    /// Playing <-> Paused; no effect on the start menu
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::Start => GamePhase::Start,
        };
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
        }
    }

    /// After losing a life: ball above the centered paddle, serving again
    pub fn respawn_ball(&mut self) {
        let Viewport { width, .. } = self.viewport;
        self.paddle.recenter(width);
        self.ball.pos = Vec2::new(width / 2.0, self.paddle.pos.y - self.tuning.ball_spawn_above_paddle);
        self.ball.launch();
    }

    /// Burst of particles at `pos`
    pub fn spawn_particles(&mut self, pos: Vec2) {
        if !self.particles_enabled {
            return;
        }
        let color = self.tuning.particle_color();
        for _ in 0..self.tuning.particles_per_break {
            let radius = self.rng.random::<f32>() * 3.0 + 1.0;
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 5.0,
                (self.rng.random::<f32>() - 0.5) * 5.0,
            );
            self.particles.push(Particle {
                pos,
                vel,
                radius,
                color,
                lifespan: self.tuning.particle_lifespan,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(Tuning::default(), Viewport::new(1000.0, 700.0), 7)
    }

    #[test]
    fn test_reset_layout() {
        let s = state();
        // (1000 - 20) / 90 = 10.9 -> 10 columns
        assert_eq!(s.bricks.cols, 10);
        assert_eq!(s.bricks.rows, 5);
        assert_eq!(s.bricks.bricks.len(), 50);
        // span = 10 * 90 - 10 = 890, offset = (1000 - 890) / 2
        let first = s.bricks.get(0, 0).unwrap();
        assert_eq!(first.pos, Vec2::new(55.0, 50.0));
        let below = s.bricks.get(0, 1).unwrap();
        assert_eq!(below.pos, Vec2::new(55.0, 80.0));
        let next_col = s.bricks.get(1, 0).unwrap();
        assert_eq!(next_col.pos, Vec2::new(145.0, 50.0));

        assert_eq!(s.paddle.pos, Vec2::new(425.0, 670.0));
        assert_eq!(s.ball.pos, Vec2::new(500.0, 640.0));
        assert_eq!(s.ball.vel, Vec2::ZERO);
        assert_eq!(s.lives, 3);
        assert_eq!(s.score, 0);
        assert_eq!(s.phase, GamePhase::Start);
    }

    #[test]
    fn test_row_points_and_colors() {
        let s = state();
        assert_eq!(s.bricks.get(3, 0).unwrap().points, 50);
        assert_eq!(s.bricks.get(3, 4).unwrap().points, 10);
        assert_eq!(s.bricks.get(3, 0).unwrap().color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(s.bricks.get(3, 4).unwrap().color, [0.0, 0.0, 1.0, 1.0]);
        assert!(s.bricks.get(10, 0).is_none());
    }

    #[test]
    fn test_narrow_viewport_has_no_columns() {
        let s = GameState::new(Tuning::default(), Viewport::new(90.0, 400.0), 1);
        assert_eq!(s.bricks.cols, 0);
        assert!(s.bricks.bricks.is_empty());
        // Paddle wider than canvas still clamps to 0
        let mut paddle = s.paddle.clone();
        paddle.move_by(50.0, 90.0);
        assert_eq!(paddle.pos.x, 0.0);
    }

    #[test]
    fn test_narrow_viewport_keeps_paddle_on_screen() {
        let mut s = GameState::new(Tuning::default(), Viewport::new(100.0, 400.0), 1);
        assert_eq!(s.paddle.pos.x, 0.0);

        s.start("ann");
        s.paddle.pos.x = 0.0;
        s.respawn_ball();
        assert_eq!(s.paddle.pos.x, 0.0);

        s.resize(Viewport::new(60.0, 400.0));
        assert_eq!(s.paddle.pos.x, 0.0);

        // Wide enough canvases still center exactly
        s.resize(Viewport::new(800.0, 600.0));
        assert_eq!(s.paddle.pos.x, 325.0);
    }

    #[test]
    fn test_start_launches() {
        let mut s = state();
        s.start("ann");
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.player_name, "ann");
        assert_eq!(s.ball.vel, Vec2::new(6.2, -6.2));
    }

    #[test]
    fn test_pause_toggle() {
        let mut s = state();
        s.toggle_pause();
        assert_eq!(s.phase, GamePhase::Start);

        s.start("ann");
        s.toggle_pause();
        assert_eq!(s.phase, GamePhase::Paused);
        s.toggle_pause();
        assert_eq!(s.phase, GamePhase::Playing);
        s.toggle_pause();
        s.resume();
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_speed_up_keeps_signs() {
        let mut ball = Ball {
            pos: Vec2::ZERO,
            vel: Vec2::new(-5.0, 5.0),
            radius: 10.0,
            speed: 5.0,
        };
        ball.speed_up(2.0);
        assert_eq!(ball.speed, 10.0);
        assert_eq!(ball.vel, Vec2::new(-10.0, 10.0));
    }

    #[test]
    fn test_brick_contains_is_strict() {
        let s = state();
        let brick = s.bricks.get(0, 0).unwrap();
        assert!(brick.contains(Vec2::new(60.0, 60.0)));
        assert!(!brick.contains(Vec2::new(55.0, 60.0)));
        assert!(!brick.contains(Vec2::new(60.0, 70.0)));
    }

    #[test]
    fn test_particles_burst_and_toggle() {
        let mut s = state();
        s.spawn_particles(Vec2::new(10.0, 10.0));
        assert_eq!(s.particles.len(), 10);
        for p in &s.particles {
            assert!(p.radius >= 1.0 && p.radius < 4.0);
            assert!(p.vel.x.abs() <= 2.5 && p.vel.y.abs() <= 2.5);
            assert_eq!(p.lifespan, 30);
        }

        s.particles_enabled = false;
        s.spawn_particles(Vec2::new(10.0, 10.0));
        assert_eq!(s.particles.len(), 10);
    }

    #[test]
    fn test_reset_keeps_particles() {
        let mut s = state();
        s.spawn_particles(Vec2::new(10.0, 10.0));
        s.reset();
        assert_eq!(s.particles.len(), 10);
    }
}
