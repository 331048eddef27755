//! Decorative snowfall
//!
//! Runs every frame, idle or not. Never touches gameplay state.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, SNOWFLAKE_COUNT};

/// How far past an edge a flake may drift before wrapping
const WRAP_MARGIN: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snowflake {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Fall per frame
    pub speed: f32,
    /// Sideways drift per frame
    pub drift: f32,
}

impl Snowflake {
    fn random(rng: &mut Pcg32) -> Self {
        Self {
            x: rng.random::<f32>() * ARENA_WIDTH,
            y: rng.random::<f32>() * ARENA_HEIGHT,
            radius: 1.0 + rng.random::<f32>() * 2.2,
            speed: 0.5 + rng.random::<f32>() * 1.2,
            drift: (rng.random::<f32>() - 0.5) * 0.6,
        }
    }
}

/// A field of drifting snowflakes
#[derive(Debug, Clone)]
pub struct Snowfield {
    pub flakes: Vec<Snowflake>,
    rng: Pcg32,
}

impl Snowfield {
    pub fn new(seed: u64) -> Self {
        Self::with_count(seed, SNOWFLAKE_COUNT)
    }

    pub fn with_count(seed: u64, count: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let flakes = (0..count).map(|_| Snowflake::random(&mut rng)).collect();
        Self { flakes, rng }
    }

    /// Move every flake one frame, wrapping at the arena edges
    pub fn update(&mut self) {
        for flake in &mut self.flakes {
            flake.y += flake.speed;
            flake.x += flake.drift;
            if flake.y > ARENA_HEIGHT {
                flake.y = -WRAP_MARGIN;
                flake.x = self.rng.random::<f32>() * ARENA_WIDTH;
            }
            if flake.x < -WRAP_MARGIN {
                flake.x = ARENA_WIDTH + WRAP_MARGIN;
            }
            if flake.x > ARENA_WIDTH + WRAP_MARGIN {
                flake.x = -WRAP_MARGIN;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_flakes_in_arena() {
        let field = Snowfield::new(11);
        assert_eq!(field.flakes.len(), SNOWFLAKE_COUNT);
        for f in &field.flakes {
            assert!(f.x >= 0.0 && f.x < ARENA_WIDTH);
            assert!(f.y >= 0.0 && f.y < ARENA_HEIGHT);
            assert!(f.radius >= 1.0 && f.radius < 3.2 + 1e-4);
            assert!(f.speed >= 0.5 && f.speed < 1.7 + 1e-4);
            assert!(f.drift.abs() <= 0.3 + 1e-4);
        }
    }

    #[test]
    fn test_flakes_wrap() {
        let mut field = Snowfield::with_count(3, 3);
        field.flakes[0] = Snowflake {
            x: 100.0,
            y: ARENA_HEIGHT,
            radius: 1.0,
            speed: 1.0,
            drift: 0.0,
        };
        field.flakes[1] = Snowflake {
            x: -3.9,
            y: 10.0,
            radius: 1.0,
            speed: 1.0,
            drift: -0.2,
        };
        field.flakes[2] = Snowflake {
            x: ARENA_WIDTH + 3.9,
            y: 10.0,
            radius: 1.0,
            speed: 1.0,
            drift: 0.2,
        };
        field.update();

        assert_eq!(field.flakes[0].y, -WRAP_MARGIN);
        assert_eq!(field.flakes[1].x, ARENA_WIDTH + WRAP_MARGIN);
        assert_eq!(field.flakes[2].x, -WRAP_MARGIN);
    }

    #[test]
    fn test_flakes_stay_near_arena() {
        let mut field = Snowfield::new(5);
        for _ in 0..2000 {
            field.update();
        }
        for f in &field.flakes {
            assert!(f.x >= -WRAP_MARGIN && f.x <= ARENA_WIDTH + WRAP_MARGIN);
            assert!(f.y >= -WRAP_MARGIN && f.y <= ARENA_HEIGHT);
        }
    }
}
