//! Brick Breaker - A classic ball-and-paddle arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (movement, collisions, game phases)
//! - `renderer`: Draw-call abstraction and the WebGPU backend behind it
//! - `input`: Held-key tracking and the pause toggle
//! - `audio`: Trigger-only sound cues
//! - `highscores`: Persisted top-5 leaderboard
//! - `persistence`: Key/value storage (LocalStorage on web)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScoreEntry, HighScores, ScoreStore};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_SPEED: f32 = 6.2;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 150.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 12.0;
    /// Gap between paddle bottom and the canvas floor
    pub const PADDLE_FLOOR_GAP: f32 = 10.0;
    /// Ball spawns this far above the paddle top
    pub const BALL_SPAWN_ABOVE_PADDLE: f32 = 30.0;

    /// Brick grid defaults
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_WIDTH: f32 = 80.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 50.0;
    /// Horizontal margin kept free on each side of the grid
    pub const BRICK_SIDE_MARGIN: f32 = 10.0;
    /// Points per row step: bottom row is worth this, each row above adds it again
    pub const BRICK_POINTS_STEP: u32 = 10;

    pub const START_LIVES: u32 = 3;

    /// Ball speeds up whenever the score lands on a multiple of this
    pub const SPEEDUP_EVERY: u32 = 50;
    pub const SPEEDUP_FACTOR: f32 = 1.1;

    /// Particle burst on brick break
    pub const PARTICLES_PER_BREAK: usize = 10;
    pub const PARTICLE_LIFESPAN: u32 = 30;

    /// Number of leaderboard entries kept
    pub const MAX_HIGH_SCORES: usize = 5;
}

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// Parse a `#rrggbb` hex string into a [`Color`]
pub fn color_from_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    let channel = |shift: u32| ((value >> shift) & 0xff) as f32 / 255.0;
    Some([channel(16), channel(8), channel(0), 1.0])
}

/// Size of the drawing surface in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
