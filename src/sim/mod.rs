//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! audio and platform dependencies:
//! - Seeded RNG only
//! - Plain values in, plain values out (no fallible operations)
//! - Effects leave as events for the presentation layer

pub mod autopilot;
pub mod difficulty;
pub mod rect;
pub mod snow;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use difficulty::{DifficultyTable, STANDARD_TIERS, Tier};
pub use rect::Rect;
pub use snow::{Snowfield, Snowflake};
pub use state::{
    Character, FallingObject, GameEvent, GameState, RoundConfig, RoundObserver, RoundPhase,
    Snapshot, TimestepPolicy,
};
pub use tick::{Outcome, Side, TickInput, advance, resolve, tick};
