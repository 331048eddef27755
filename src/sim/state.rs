//! Game state and core simulation types
//!
//! Everything the round simulator mutates lives in `GameState`. Santa and the
//! present are created once and moved in place for the lifetime of the game.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyTable;
use super::rect::Rect;
use super::tick::TickInput;
use crate::consts::*;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundPhase {
    /// Menu showing, waiting for a start signal
    #[default]
    Idle,
    /// Presents are falling
    Active,
}

/// How elapsed frame time feeds into movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestepPolicy {
    /// One nominal step per tick, whatever the elapsed time
    #[default]
    PerFrame,
    /// Steps scaled by `dt / NOMINAL_FRAME_MS` (no upper clamp)
    Scaled,
}

impl TimestepPolicy {
    /// Multiplier applied to per-frame speeds for a tick of `dt_ms`
    pub fn step_scale(self, dt_ms: f32) -> f32 {
        match self {
            TimestepPolicy::PerFrame => 1.0,
            TimestepPolicy::Scaled => dt_ms / NOMINAL_FRAME_MS,
        }
    }
}

/// Santa, the player character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Character {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed on the ground line)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            x: SANTA_START_X,
            y: ARENA_HEIGHT - SANTA_HEIGHT,
            width: SANTA_WIDTH,
            height: SANTA_HEIGHT,
        }
    }
}

impl Character {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn min_x(&self) -> f32 {
        EDGE_MARGIN
    }

    pub fn max_x(&self) -> f32 {
        ARENA_WIDTH - self.width - EDGE_MARGIN
    }

    /// Keep Santa inside the side walls
    pub fn clamp_to_arena(&mut self) {
        self.x = self.x.clamp(self.min_x(), self.max_x());
    }

    /// Shift horizontally by `dx`, then clamp
    pub fn shift(&mut self, dx: f32) {
        self.x += dx;
        self.clamp_to_arena();
    }
}

/// The falling present
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallingObject {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Default for FallingObject {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PRESENT_START_X, 0.0),
            size: Vec2::new(PRESENT_WIDTH, PRESENT_HEIGHT),
        }
    }
}

impl FallingObject {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// True once the present has fully left through the bottom of the arena
    pub fn has_exited(&self) -> bool {
        self.pos.y >= ARENA_HEIGHT + self.size.y
    }

    /// Smallest and largest `x` a respawn can produce
    pub fn spawn_x_range(&self) -> (f32, f32) {
        let half = self.size.x / 2.0;
        (SPAWN_CENTER_MIN as f32 - half, SPAWN_CENTER_MAX as f32 - half)
    }

    /// Put the present back at the top with a random horizontal position
    pub fn respawn(&mut self, rng: &mut Pcg32) {
        let center = rng.random_range(SPAWN_CENTER_MIN..=SPAWN_CENTER_MAX);
        self.pos = Vec2::new(center as f32 - self.size.x / 2.0, 0.0);
    }
}

/// Notifications for the presentation/audio layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new round began
    RoundStarted,
    /// Santa caught a present; `score` is the new total
    Caught { score: u32 },
    /// A present hit the ground; the round is over
    Missed { final_score: u32 },
}

impl GameEvent {
    /// Forward this event to an observer
    pub fn dispatch(self, observer: &mut dyn RoundObserver) {
        match self {
            GameEvent::RoundStarted => observer.on_round_start(),
            GameEvent::Caught { score } => observer.on_catch(score),
            GameEvent::Missed { final_score } => observer.on_miss(final_score),
        }
    }
}

/// Subscriber to round events (audio cues, HUD updates)
pub trait RoundObserver {
    fn on_catch(&mut self, score: u32);
    fn on_miss(&mut self, final_score: u32);
    fn on_round_start(&mut self) {}
}

/// Tuning that stays fixed for the life of a simulator
#[derive(Debug, Clone, Default)]
pub struct RoundConfig {
    pub difficulty: DifficultyTable,
    pub timestep: TimestepPolicy,
}

/// Read-only view for the presenter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub character: Vec2,
    pub object: Vec2,
    pub active: bool,
    pub score: u32,
}

/// Complete round simulator state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the spawn RNG was created from
    pub seed: u64,
    pub phase: RoundPhase,
    /// Presents caught this round (frozen after a miss)
    pub score: u32,
    pub character: Character,
    pub object: FallingObject,
    /// Held direction flags
    pub input: TickInput,
    pub config: RoundConfig,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle simulator with the standard tuning
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, RoundConfig::default())
    }

    pub fn with_config(seed: u64, config: RoundConfig) -> Self {
        Self {
            seed,
            phase: RoundPhase::Idle,
            score: 0,
            character: Character::default(),
            object: FallingObject::default(),
            input: TickInput::default(),
            config,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::Active
    }

    /// Begin a round. Ignored while one is already running.
    ///
    /// Returns whether a round was started.
    pub fn start_round(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.score = 0;
        self.respawn_object();
        self.phase = RoundPhase::Active;
        self.events.push(GameEvent::RoundStarted);
        log::info!("Round started");
        true
    }

    /// Record a direction press or release (last write wins)
    pub fn set_direction(&mut self, side: super::tick::Side, pressed: bool) {
        self.input.set(side, pressed);
    }

    /// Instant clamped horizontal shift (swipe gesture)
    pub fn nudge(&mut self, dx: f32) {
        self.character.shift(dx);
    }

    pub(crate) fn respawn_object(&mut self) {
        self.object.respawn(&mut self.rng);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drain pending events into an observer
    pub fn notify(&mut self, observer: &mut dyn RoundObserver) {
        for event in self.drain_events() {
            event.dispatch(observer);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            character: Vec2::new(self.character.x, self.character.y),
            object: self.object.pos,
            active: self.is_active(),
            score: self.score,
        }
    }
}
