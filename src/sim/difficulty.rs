//! Score-keyed difficulty tiers
//!
//! Presents fall faster and Santa moves faster as the score climbs. The
//! active tier is the one with the highest threshold not above the score.

use serde::{Deserialize, Serialize};

/// A difficulty bracket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Minimum score for this tier to apply
    pub threshold: u32,
    /// Present fall distance per nominal frame
    pub fall_speed: f32,
    /// Santa move distance per nominal frame
    pub move_speed: f32,
}

impl Tier {
    pub const fn new(threshold: u32, fall_speed: f32, move_speed: f32) -> Self {
        Self {
            threshold,
            fall_speed,
            move_speed,
        }
    }
}

/// Shipped tuning.
///
/// Some builds of the game used 23 for the top tier's fall speed; 18 is the
/// canonical value.
pub const STANDARD_TIERS: [Tier; 5] = [
    Tier::new(0, 5.0, 7.0),
    Tier::new(15, 8.0, 10.0),
    Tier::new(30, 11.0, 13.0),
    Tier::new(50, 14.0, 16.0),
    Tier::new(75, 18.0, 20.0),
];

/// Ordered tier list. Always non-empty with a zero first threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyTable {
    tiers: Vec<Tier>,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            tiers: STANDARD_TIERS.to_vec(),
        }
    }
}

impl DifficultyTable {
    /// Build a table from custom tiers.
    ///
    /// Returns `None` unless the list is non-empty, starts at threshold 0,
    /// has strictly increasing thresholds and positive finite speeds.
    pub fn from_tiers(tiers: Vec<Tier>) -> Option<Self> {
        if tiers.first()?.threshold != 0 {
            return None;
        }
        if tiers.windows(2).any(|w| w[0].threshold >= w[1].threshold) {
            return None;
        }
        let valid_speed = |s: f32| s.is_finite() && s > 0.0;
        if !tiers
            .iter()
            .all(|t| valid_speed(t.fall_speed) && valid_speed(t.move_speed))
        {
            return None;
        }
        Some(Self { tiers })
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Index of the tier active at `score`
    pub fn tier_index(&self, score: u32) -> usize {
        // Tier 0 has threshold 0, so at least one tier always matches
        self.tiers
            .partition_point(|t| t.threshold <= score)
            .saturating_sub(1)
    }

    /// Tier active at `score`
    pub fn tier_for(&self, score: u32) -> Tier {
        self.tiers[self.tier_index(score)]
    }

    /// `(fall_speed, move_speed)` at `score`
    pub fn speeds_for(&self, score: u32) -> (f32, f32) {
        let tier = self.tier_for(score);
        (tier.fall_speed, tier.move_speed)
    }
}
