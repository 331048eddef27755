//! Present Catch - a festive catch-the-falling-presents arcade game
//!
//! Core modules:
//! - `sim`: Simulation (difficulty, motion, collisions, round lifecycle)
//! - `input`: Mapping raw keys/pointer gestures to simulation commands
//! - `settings`: User preferences and tuning overrides
//! - `audio`: Web Audio cues (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod input;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (game-space pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Santa (the character) - resting on the ground line
    pub const SANTA_WIDTH: f32 = 130.0;
    pub const SANTA_HEIGHT: f32 = 150.0;
    pub const SANTA_START_X: f32 = 100.0;

    /// Gap kept between Santa and the arena side walls
    pub const EDGE_MARGIN: f32 = 1.0;

    /// Present (the falling object)
    pub const PRESENT_WIDTH: f32 = 100.0;
    pub const PRESENT_HEIGHT: f32 = 100.0;
    pub const PRESENT_START_X: f32 = 300.0;

    /// Range the present's horizontal centre is drawn from on respawn (inclusive)
    pub const SPAWN_CENTER_MIN: i32 = 50;
    pub const SPAWN_CENTER_MAX: i32 = 750;

    /// Duration of one nominal frame at 60 Hz (ms)
    pub const NOMINAL_FRAME_MS: f32 = 16.67;

    /// Horizontal shift applied by a quick swipe
    pub const NUDGE_DISTANCE: f32 = 60.0;

    /// Number of decorative snowflakes
    pub const SNOWFLAKE_COUNT: usize = 120;
}
