//! Data-driven game balance
//!
//! Every gameplay constant lives here so a balance pass only touches JSON.
//! Missing fields fall back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{Color, color_from_hex};

/// Used when a palette entry fails to parse
const FALLBACK_COLOR: Color = [1.0, 1.0, 1.0, 1.0];

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ball ===
    pub ball_radius: f32,
    pub ball_start_speed: f32,
    pub ball_color: String,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub paddle_floor_gap: f32,
    pub paddle_color: String,
    pub ball_spawn_above_paddle: f32,

    // === Bricks ===
    pub brick_rows: usize,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
    pub brick_offset_top: f32,
    pub brick_side_margin: f32,
    pub brick_points_step: u32,
    /// Row colors, top row first; wraps when there are more rows than colors
    pub brick_palette: Vec<String>,

    // === Rules ===
    pub start_lives: u32,
    pub speedup_every: u32,
    pub speedup_factor: f32,

    // === Effects ===
    pub particles_per_break: usize,
    pub particle_lifespan: u32,
    pub particle_color: String,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_radius: BALL_RADIUS,
            ball_start_speed: BALL_START_SPEED,
            ball_color: "#00ff00".to_string(),

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_floor_gap: PADDLE_FLOOR_GAP,
            paddle_color: "#00ff00".to_string(),
            ball_spawn_above_paddle: BALL_SPAWN_ABOVE_PADDLE,

            brick_rows: BRICK_ROWS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_padding: BRICK_PADDING,
            brick_offset_top: BRICK_OFFSET_TOP,
            brick_side_margin: BRICK_SIDE_MARGIN,
            brick_points_step: BRICK_POINTS_STEP,
            brick_palette: ["#ff0000", "#ffff00", "#00ff00", "#00ffff", "#0000ff"]
                .iter()
                .map(|c| c.to_string())
                .collect(),

            start_lives: START_LIVES,
            speedup_every: SPEEDUP_EVERY,
            speedup_factor: SPEEDUP_FACTOR,

            particles_per_break: PARTICLES_PER_BREAK,
            particle_lifespan: PARTICLE_LIFESPAN,
            particle_color: "#00ff00".to_string(),
        }
    }
}

impl Tuning {
    /// Parse a tuning file; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Horizontal footprint of one grid cell
    pub fn brick_stride_x(&self) -> f32 {
        self.brick_width + self.brick_padding
    }

    /// Vertical footprint of one grid cell
    pub fn brick_stride_y(&self) -> f32 {
        self.brick_height + self.brick_padding
    }

    /// Points for a brick in `row` (0 = top): the top row is worth the most
    pub fn brick_points(&self, row: usize) -> u32 {
        self.brick_rows.saturating_sub(row) as u32 * self.brick_points_step
    }

    pub fn brick_color(&self, row: usize) -> Color {
        if self.brick_palette.is_empty() {
            return FALLBACK_COLOR;
        }
        let hex = &self.brick_palette[row % self.brick_palette.len()];
        parse_or_fallback(hex)
    }

    pub fn ball_color(&self) -> Color {
        parse_or_fallback(&self.ball_color)
    }

    pub fn paddle_color(&self) -> Color {
        parse_or_fallback(&self.paddle_color)
    }

    pub fn particle_color(&self) -> Color {
        parse_or_fallback(&self.particle_color)
    }
}

fn parse_or_fallback(hex: &str) -> Color {
    color_from_hex(hex).unwrap_or_else(|| {
        log::warn!("Invalid color {:?} in tuning, using white", hex);
        FALLBACK_COLOR
    })
}
