//! Simulation module
//!
//! All gameplay logic lives here. No rendering, DOM or audio dependencies:
//! sounds and score recording go through the `SoundSink` and `ScoreStore`
//! traits so the whole loop runs natively in tests.

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{first_brick_hit, hits_ceiling, hits_side_wall, reaches_floor};
pub use state::{
    Ball, Brick, BrickGrid, BrickStatus, GamePhase, GameState, Paddle, Particle, grid_columns,
    grid_offset_left,
};
pub use tick::{TickOutcome, tick};
