//! Difficulty ramp: elapsed time drives puck speed and spawn rate

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Parameters of the linear speed ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRamp {
    pub ramp_time: f32,
    pub max_mult: f32,
    pub base_interval: f32,
    pub min_interval: f32,
}

impl DifficultyRamp {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            ramp_time: config.speed_ramp_time,
            max_mult: config.max_speed_mult,
            base_interval: config.base_spawn_interval,
            min_interval: config.min_spawn_interval,
        }
    }

    /// Linear from 1 at t=0 to `max_mult` at `ramp_time`, flat afterwards
    pub fn speed_multiplier(&self, elapsed: f32) -> f32 {
        if self.ramp_time <= 0.0 {
            return self.max_mult;
        }
        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        if elapsed >= self.ramp_time {
            return self.max_mult;
        }
        let t = elapsed / self.ramp_time;
        1.0 + (self.max_mult - 1.0) * t
    }

    /// Seconds between spawns at a given multiplier, never below the floor
    pub fn spawn_interval(&self, speed_mult: f32) -> f32 {
        (self.base_interval / (0.9 + 0.1 * speed_mult)).max(self.min_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ramp() -> DifficultyRamp {
        DifficultyRamp::from_config(&GameConfig::default())
    }

    #[test]
    fn test_starts_at_one() {
        assert_eq!(ramp().speed_multiplier(0.0), 1.0);
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let r = ramp();
        assert_eq!(r.speed_multiplier(r.ramp_time), r.max_mult);
    }

    #[test]
    fn test_halfway() {
        let r = ramp();
        assert!((r.speed_multiplier(60.0) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_ramp_time_is_at_max() {
        let r = DifficultyRamp {
            ramp_time: 0.0,
            ..ramp()
        };
        assert_eq!(r.speed_multiplier(0.0), r.max_mult);
    }

    #[test]
    fn test_interval_at_start_and_floor() {
        let r = ramp();
        assert!((r.spawn_interval(1.0) - 0.9).abs() < 1e-6);
        // 0.9 / (0.9 + 0.5) ≈ 0.643, above the floor
        assert!((r.spawn_interval(5.0) - 0.9 / 1.4).abs() < 1e-6);
        assert_eq!(r.spawn_interval(100.0), r.min_interval);
    }

    proptest! {
        #[test]
        fn prop_multiplier_bounded_and_monotonic(a in 0.0f32..500.0, b in 0.0f32..500.0) {
            let r = ramp();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let m_lo = r.speed_multiplier(lo);
            let m_hi = r.speed_multiplier(hi);
            prop_assert!(m_lo <= m_hi);
            prop_assert!((1.0..=r.max_mult).contains(&m_lo));
            prop_assert!((1.0..=r.max_mult).contains(&m_hi));
        }

        #[test]
        fn prop_multiplier_flat_after_ramp(extra in 0.0f32..1000.0) {
            let r = ramp();
            prop_assert_eq!(r.speed_multiplier(r.ramp_time + extra), r.max_mult);
        }

        #[test]
        fn prop_interval_floor_and_monotonic(a in 1.0f32..50.0, b in 1.0f32..50.0) {
            let r = ramp();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(r.spawn_interval(lo) >= r.min_interval);
            prop_assert!(r.spawn_interval(hi) >= r.min_interval);
            prop_assert!(r.spawn_interval(lo) >= r.spawn_interval(hi));
        }
    }
}
