//! Game settings and preferences
//!
//! Read from LocalStorage at startup. Gameplay state itself is never saved.

use serde::{Deserialize, Serialize};

use crate::sim::{DifficultyTable, RoundConfig, Tier, TimestepPolicy};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Simulation ===
    /// How frame time feeds into movement
    pub timestep: TimestepPolicy,
    /// Custom difficulty tiers (standard table when absent or invalid)
    pub difficulty_tiers: Option<Vec<Tier>>,
    /// Fixed RNG seed (random per page load when absent)
    pub seed: Option<u64>,

    // === Visual Effects ===
    /// Background snowfall
    pub snow: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no snowfall)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timestep: TimestepPolicy::PerFrame,
            difficulty_tiers: None,
            seed: None,

            snow: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "present_catch_settings";

    /// Parse settings JSON, falling back to defaults when malformed
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// Effective snowfall (respects reduced_motion)
    pub fn effective_snow(&self) -> bool {
        self.snow && !self.reduced_motion
    }

    /// Effective sound effect volume (0.0 - 1.0)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Difficulty table from custom tiers, or the standard one
    pub fn difficulty_table(&self) -> DifficultyTable {
        match &self.difficulty_tiers {
            None => DifficultyTable::default(),
            Some(tiers) => DifficultyTable::from_tiers(tiers.clone()).unwrap_or_else(|| {
                log::warn!("Invalid custom difficulty tiers, using standard table");
                DifficultyTable::default()
            }),
        }
    }

    /// Simulator tuning derived from these settings
    pub fn round_config(&self) -> RoundConfig {
        RoundConfig {
            difficulty: self.difficulty_table(),
            timestep: self.timestep,
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
