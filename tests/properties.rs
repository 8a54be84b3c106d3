//! Property checks over random play

use brick_breaker::audio::Silent;
use brick_breaker::input::TickInput;
use brick_breaker::persistence::MemoryStorage;
use brick_breaker::sim::{GamePhase, GameState, tick};
use brick_breaker::{HighScores, ScoreStore, Tuning, Viewport};
use proptest::prelude::*;

fn arb_input() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), prop::bool::weighted(0.02)).prop_map(|(left, right, pause)| {
        TickInput { left, right, pause }
    })
}

proptest! {
    #[test]
    fn paddle_stays_on_screen(
        width in 40.0f32..2000.0,
        height in 300.0f32..1200.0,
        seed in any::<u64>(),
        inputs in prop::collection::vec(arb_input(), 1..400),
    ) {
        let mut state = GameState::new(Tuning::default(), Viewport::new(width, height), seed);
        let mut scores = HighScores::open(MemoryStorage::new());
        state.start("prop");

        for input in &inputs {
            if state.phase == GamePhase::Start {
                state.start("prop");
            }
            tick(&mut state, input, &mut Silent, &mut scores);
            prop_assert!(state.paddle.pos.x >= 0.0);
            prop_assert!(state.paddle.pos.x <= state.paddle.max_x(width));
        }
    }

    #[test]
    fn ball_speed_never_drops_within_a_run(
        seed in any::<u64>(),
        inputs in prop::collection::vec(arb_input(), 1..600),
    ) {
        let mut state = GameState::new(Tuning::default(), Viewport::new(900.0, 700.0), seed);
        let mut scores = HighScores::open(MemoryStorage::new());
        state.start("prop");

        let mut last = state.ball.speed;
        for input in &inputs {
            let outcome = tick(&mut state, input, &mut Silent, &mut scores);
            if outcome.is_run_over() {
                state.start("prop");
                last = state.ball.speed;
                continue;
            }
            prop_assert!(state.ball.speed >= last);
            prop_assert!((state.ball.vel.x.abs() - state.ball.speed).abs() < 1e-3);
            prop_assert!((state.ball.vel.y.abs() - state.ball.speed).abs() < 1e-3);
            last = state.ball.speed;
        }
    }

    #[test]
    fn leaderboard_stays_short_and_sorted(
        scores_in in prop::collection::vec(0u32..10_000, 0..40),
    ) {
        let mut board = HighScores::open(MemoryStorage::new());
        for (i, score) in scores_in.iter().enumerate() {
            board.record(&format!("p{}", i), *score);

            let entries = board.load();
            prop_assert!(entries.len() <= 5);
            prop_assert!(entries.windows(2).all(|w| w[0].score >= w[1].score));
        }

        let mut best = scores_in.clone();
        best.sort_unstable_by(|a, b| b.cmp(a));
        best.truncate(5);
        let kept: Vec<u32> = board.load().iter().map(|e| e.score).collect();
        prop_assert_eq!(kept, best);
    }
}
