//! Per-frame simulation tick
//!
//! Moves Santa and the present, then decides whether the present was caught,
//! missed, or is still falling.

use super::state::{Character, FallingObject, GameEvent, GameState, RoundPhase};

/// Movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Held direction flags, sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    pub fn set(&mut self, side: Side, pressed: bool) {
        match side {
            Side::Left => self.left = pressed,
            Side::Right => self.right = pressed,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Result of collision resolution for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Caught,
    Missed,
}

/// Move Santa and the present for one tick of `dt_ms` milliseconds.
///
/// Speeds come from the tier for the current score.
pub fn advance(state: &mut GameState, dt_ms: f32) {
    let (fall_speed, move_speed) = state.config.difficulty.speeds_for(state.score);
    let scale = state.config.timestep.step_scale(dt_ms);
    let step = move_speed * scale;

    // Two independent steps so that holding both directions cancels out
    if state.input.left {
        state.character.x -= step;
    }
    if state.input.right {
        state.character.x += step;
    }
    state.character.clamp_to_arena();

    state.object.pos.y += fall_speed * scale;
}

/// Classify the current positions. Pure.
pub fn resolve(character: &Character, object: &FallingObject) -> Outcome {
    if character.rect().overlaps(&object.rect()) {
        Outcome::Caught
    } else if object.has_exited() {
        Outcome::Missed
    } else {
        Outcome::Continue
    }
}

/// Advance the round by one frame.
///
/// Does nothing while idle.
pub fn tick(state: &mut GameState, dt_ms: f32) -> Outcome {
    if state.phase != RoundPhase::Active {
        return Outcome::Continue;
    }

    advance(state, dt_ms);

    let outcome = resolve(&state.character, &state.object);
    match outcome {
        Outcome::Caught => {
            let tier_before = state.config.difficulty.tier_index(state.score);
            state.score += 1;
            if state.config.difficulty.tier_index(state.score) != tier_before {
                log::debug!("Difficulty up at score {}", state.score);
            }
            state.respawn_object();
            state.push_event(GameEvent::Caught { score: state.score });
        }
        Outcome::Missed => {
            state.phase = RoundPhase::Idle;
            state.respawn_object();
            state.push_event(GameEvent::Missed {
                final_score: state.score,
            });
            log::info!("Round over - presents caught: {}", state.score);
        }
        Outcome::Continue => {}
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{RoundConfig, RoundObserver, TimestepPolicy};
    use glam::Vec2;
    use proptest::prelude::*;

    /// Observer that records every notification
    #[derive(Default)]
    struct Recorder {
        catches: Vec<u32>,
        misses: Vec<u32>,
        starts: usize,
    }

    impl RoundObserver for Recorder {
        fn on_catch(&mut self, score: u32) {
            self.catches.push(score);
        }

        fn on_miss(&mut self, final_score: u32) {
            self.misses.push(final_score);
        }

        fn on_round_start(&mut self) {
            self.starts += 1;
        }
    }

    /// Active round with the present parked far to the right of Santa
    fn active_state() -> GameState {
        let mut state = GameState::new(12345);
        state.start_round();
        state.drain_events();
        state.object.pos = Vec2::new(600.0, 0.0);
        state
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut state = GameState::new(1);
        state.set_direction(Side::Left, true);
        let before = state.snapshot();

        assert_eq!(tick(&mut state, NOMINAL_FRAME_MS), Outcome::Continue);
        assert_eq!(state.snapshot(), before);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_present_falls_at_tier_speed() {
        let mut state = active_state();
        tick(&mut state, NOMINAL_FRAME_MS);
        assert_eq!(state.object.pos.y, 5.0);

        state.score = 75;
        tick(&mut state, NOMINAL_FRAME_MS);
        assert_eq!(state.object.pos.y, 23.0);
        // No horizontal drift
        assert_eq!(state.object.pos.x, 600.0);
    }

    #[test]
    fn test_move_left_and_right() {
        let mut state = active_state();
        state.set_direction(Side::Right, true);
        tick(&mut state, NOMINAL_FRAME_MS);
        assert_eq!(state.character.x, 107.0);

        state.set_direction(Side::Right, false);
        state.set_direction(Side::Left, true);
        tick(&mut state, NOMINAL_FRAME_MS);
        tick(&mut state, NOMINAL_FRAME_MS);
        assert_eq!(state.character.x, 93.0);
    }

    #[test]
    fn test_both_directions_cancel() {
        let mut state = active_state();
        state.set_direction(Side::Left, true);
        state.set_direction(Side::Right, true);
        tick(&mut state, NOMINAL_FRAME_MS);
        assert_eq!(state.character.x, 100.0);
    }

    #[test]
    fn test_per_frame_ignores_elapsed_time() {
        let mut state = active_state();
        state.set_direction(Side::Right, true);
        tick(&mut state, 250.0);
        assert_eq!(state.character.x, 107.0);
        assert_eq!(state.object.pos.y, 5.0);
    }

    #[test]
    fn test_scaled_timestep() {
        let config = RoundConfig {
            timestep: TimestepPolicy::Scaled,
            ..Default::default()
        };
        let mut state = GameState::with_config(5, config);
        state.start_round();
        state.object.pos = Vec2::new(600.0, 0.0);
        state.set_direction(Side::Right, true);

        tick(&mut state, NOMINAL_FRAME_MS * 2.0);
        assert!((state.character.x - 114.0).abs() < 1e-3);
        assert!((state.object.pos.y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_scaled_timestep_large_delta_is_unclamped() {
        let config = RoundConfig {
            timestep: TimestepPolicy::Scaled,
            ..Default::default()
        };
        let mut state = GameState::with_config(5, config);
        state.start_round();
        state.object.pos = Vec2::new(600.0, 0.0);

        // A long pause drops the present straight through the floor
        assert_eq!(tick(&mut state, NOMINAL_FRAME_MS * 200.0), Outcome::Missed);
    }

    #[test]
    fn test_edge_touch_continues() {
        let mut state = active_state();
        // After falling 5px the present's bottom sits exactly on Santa's top
        state.object.pos = Vec2::new(state.character.x, 450.0 - 100.0 - 5.0);
        assert_eq!(tick(&mut state, NOMINAL_FRAME_MS), Outcome::Continue);
        assert_eq!(state.score, 0);

        // Side by side, sharing Santa's right edge
        let character = Character::default();
        let object = FallingObject {
            pos: Vec2::new(character.x + character.width, 480.0),
            ..Default::default()
        };
        assert_eq!(resolve(&character, &object), Outcome::Continue);
    }

    #[test]
    fn test_catch_scores_and_respawns() {
        let mut state = active_state();
        state.object.pos = Vec2::new(state.character.x, state.character.y);

        assert_eq!(tick(&mut state, NOMINAL_FRAME_MS), Outcome::Caught);
        assert_eq!(state.score, 1);
        assert_eq!(state.object.pos.y, 0.0);
        let (min_x, max_x) = state.object.spawn_x_range();
        assert!(state.object.pos.x >= min_x && state.object.pos.x <= max_x);
        assert!(state.is_active());
    }

    #[test]
    fn test_catch_uses_next_tier_after_threshold() {
        let mut state = active_state();
        state.score = 14;
        state.object.pos = Vec2::new(state.character.x, state.character.y);
        tick(&mut state, NOMINAL_FRAME_MS);
        assert_eq!(state.score, 15);

        state.object.pos = Vec2::new(600.0, 0.0);
        tick(&mut state, NOMINAL_FRAME_MS);
        assert_eq!(state.object.pos.y, 8.0);
    }

    #[test]
    fn test_miss_ends_round_and_freezes() {
        let mut state = active_state();
        state.score = 9;
        state.object.pos.y = ARENA_HEIGHT + PRESENT_HEIGHT - 1.0;
        state.set_direction(Side::Right, true);

        assert_eq!(tick(&mut state, NOMINAL_FRAME_MS), Outcome::Missed);
        assert_eq!(state.phase, RoundPhase::Idle);
        assert_eq!(state.score, 9);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Missed { final_score: 9 }]
        );

        let frozen = state.snapshot();
        for _ in 0..10 {
            tick(&mut state, NOMINAL_FRAME_MS);
        }
        assert_eq!(state.snapshot(), frozen);
        assert!(!frozen.active);
    }

    #[test]
    fn test_end_to_end_miss() {
        let mut recorder = Recorder::default();
        let mut state = GameState::new(777);
        state.start_round();
        state.object.pos = Vec2::new(600.0, 0.0);

        let mut ticks = 0;
        while state.is_active() {
            tick(&mut state, NOMINAL_FRAME_MS);
            ticks += 1;
            assert!(ticks <= 200, "round never ended");
        }
        // 700px at 5px per frame
        assert_eq!(ticks, 140);

        // Idle ticks afterwards produce nothing further
        tick(&mut state, NOMINAL_FRAME_MS);
        state.notify(&mut recorder);

        assert_eq!(recorder.starts, 1);
        assert_eq!(recorder.misses, vec![0]);
        assert!(recorder.catches.is_empty());
    }

    #[test]
    fn test_end_to_end_catch() {
        let mut recorder = Recorder::default();
        let mut state = GameState::new(4242);
        state.start_round();
        state.object.pos = Vec2::new(state.character.x, state.character.y);

        tick(&mut state, NOMINAL_FRAME_MS);
        state.notify(&mut recorder);

        assert_eq!(state.score, 1);
        assert_eq!(recorder.catches, vec![1]);
        assert!(recorder.misses.is_empty());
    }

    #[test]
    fn test_restart_after_miss() {
        let mut state = active_state();
        state.score = 4;
        state.object.pos.y = 699.0;
        tick(&mut state, NOMINAL_FRAME_MS);
        assert_eq!(state.phase, RoundPhase::Idle);

        assert!(state.start_round());
        assert_eq!(state.score, 0);
        assert_eq!(state.object.pos.y, 0.0);
    }

    proptest! {
        #[test]
        fn prop_character_stays_clamped(
            moves in proptest::collection::vec(
                (any::<bool>(), any::<bool>(), 0.0f32..500.0),
                1..200,
            ),
            scaled in any::<bool>(),
            score in 0u32..120,
        ) {
            let config = RoundConfig {
                timestep: if scaled { TimestepPolicy::Scaled } else { TimestepPolicy::PerFrame },
                ..Default::default()
            };
            let mut state = GameState::with_config(3, config);
            state.start_round();
            state.score = score;

            for (left, right, dt) in moves {
                if !state.is_active() {
                    state.start_round();
                }
                state.set_direction(Side::Left, left);
                state.set_direction(Side::Right, right);
                tick(&mut state, dt);
                prop_assert!(state.character.x >= 1.0);
                prop_assert!(state.character.x <= ARENA_WIDTH - SANTA_WIDTH - 1.0);
            }
        }

        #[test]
        fn prop_score_only_moves_by_catches(seed in any::<u64>(), frames in 1usize..400) {
            let mut state = GameState::new(seed);
            state.start_round();
            let mut last = state.score;
            for _ in 0..frames {
                let outcome = tick(&mut state, NOMINAL_FRAME_MS);
                let expected = if outcome == Outcome::Caught { last + 1 } else { last };
                prop_assert_eq!(state.score, expected);
                last = state.score;
            }
        }
    }
}
