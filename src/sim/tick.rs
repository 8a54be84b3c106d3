//! Per-frame simulation tick
//!
//! One call per display refresh. Order: pause toggle, paddle, ball
//! integration, walls, floor/paddle, bricks.

use super::collision::{first_brick_hit, hits_ceiling, hits_side_wall, reaches_floor};
use super::state::{BrickStatus, GamePhase, GameState};
use crate::audio::{SoundCue, SoundSink};
use crate::highscores::ScoreStore;
use crate::input::TickInput;

/// What happened during a tick, for the shell to react to (menus, alerts)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing (start menu or paused); nothing simulated
    Idle,
    /// Normal frame
    Continue,
    /// Ball fell past the paddle but lives remain
    LifeLost { lives_left: u32 },
    /// Last life lost; score recorded and game reset to the start menu
    GameOver { score: u32 },
    /// Every brick broken; score recorded and game reset to the start menu
    Won { score: u32 },
}

impl TickOutcome {
    /// The run ended this tick
    pub fn is_run_over(&self) -> bool {
        matches!(self, TickOutcome::GameOver { .. } | TickOutcome::Won { .. })
    }

    /// Blocking notification to show the player, if any
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            TickOutcome::Won { .. } => Some(WIN_MESSAGE),
            _ => None,
        }
    }
}

const WIN_MESSAGE: &str = "YOU WIN, CONGRATULATIONS!";

/// Advance the game state by one frame
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    sfx: &mut dyn SoundSink,
    scores: &mut dyn ScoreStore,
) -> TickOutcome {
    if input.pause {
        state.toggle_pause();
        log::info!("Phase now {:?}", state.phase);
    }

    if state.phase != GamePhase::Playing {
        return TickOutcome::Idle;
    }

    move_paddle(state, input);

    state.ball.pos += state.ball.vel;

    let mut outcome = TickOutcome::Continue;

    // Walls
    if hits_side_wall(&state.ball, state.viewport.width) {
        state.ball.vel.x = -state.ball.vel.x;
        sfx.play(SoundCue::Wall);
    }
    if hits_ceiling(&state.ball) {
        state.ball.vel.y = -state.ball.vel.y;
        sfx.play(SoundCue::Wall);
    } else if reaches_floor(&state.ball, state.viewport.height) {
        if state.paddle.spans(state.ball.pos.x) {
            state.ball.vel.y = -state.ball.vel.y;
            sfx.play(SoundCue::Paddle);
        } else {
            state.lives = state.lives.saturating_sub(1);
            sfx.play(SoundCue::Loss);
            if state.lives == 0 {
                let score = finish_run(state, scores);
                log::info!("Game over for {:?} with {} points", state.player_name, score);
                return TickOutcome::GameOver { score };
            }
            log::info!("Ball lost, {} lives left", state.lives);
            state.respawn_ball();
            outcome = TickOutcome::LifeLost {
                lives_left: state.lives,
            };
        }
    }

    // Bricks: at most one per tick
    if let Some(index) = first_brick_hit(&state.bricks, state.ball.pos) {
        state.ball.vel.y = -state.ball.vel.y;
        let brick = &mut state.bricks.bricks[index];
        brick.status = BrickStatus::Broken;
        state.score += brick.points;
        sfx.play(SoundCue::Brick);
        let at = state.ball.pos;
        state.spawn_particles(at);

        // Exact multiple only: a total that jumps over a boundary skips the speed-up
        if state.score.checked_rem(state.tuning.speedup_every) == Some(0) {
            state.ball.speed_up(state.tuning.speedup_factor);
            log::debug!("Speed up at {} points: {:.2}", state.score, state.ball.speed);
        }

        if state.bricks.all_broken() {
            let score = finish_run(state, scores);
            log::info!("{:?} cleared the board with {} points", state.player_name, score);
            return TickOutcome::Won { score };
        }
    }

    outcome
}

/// Right wins when both arrows are held
fn move_paddle(state: &mut GameState, input: &TickInput) {
    let width = state.viewport.width;
    let paddle = &mut state.paddle;
    let speed = paddle.speed;
    if input.right && paddle.pos.x < paddle.max_x(width) {
        paddle.move_by(speed, width);
    } else if input.left && paddle.pos.x > 0.0 {
        paddle.move_by(-speed, width);
    }
}

/// Record the score, go back to the start menu and reset the board
fn finish_run(state: &mut GameState, scores: &mut dyn ScoreStore) -> u32 {
    let score = state.score;
    scores.record(&state.player_name, score);
    state.phase = GamePhase::Start;
    state.reset();
    score
}
