//! Difficulty progression
//!
//! A time accumulator that raises the global speed multiplier by a fixed
//! step every interval. Time beyond the threshold in a single update is
//! dropped, not carried into the next interval.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultySystem {
    speed_multiplier: f32,
    /// Milliseconds accumulated since the last step
    timer: f32,
    start: f32,
    interval_ms: f32,
    increment: f32,
}

impl Default for DifficultySystem {
    fn default() -> Self {
        Self::new(&Tuning::default())
    }
}

impl DifficultySystem {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            speed_multiplier: tuning.speed_multiplier_start,
            timer: 0.0,
            start: tuning.speed_multiplier_start,
            interval_ms: tuning.difficulty_interval_ms,
            increment: tuning.speed_increment,
        }
    }

    /// Advance by `delta_ms`; returns true when a step fired
    pub fn update(&mut self, delta_ms: f32) -> bool {
        self.timer += delta_ms;

        if self.timer > self.interval_ms {
            self.speed_multiplier += self.increment;
            self.timer = 0.0;
            log::debug!("Difficulty step: speed x{:.2}", self.speed_multiplier);
            return true;
        }
        false
    }

    /// Current speed multiplier (starts at 1.0, never decreases)
    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Milliseconds since the last step
    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.speed_multiplier = self.start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DIFFICULTY_INTERVAL_MS, SPEED_INCREMENT, SPEED_MULTIPLIER_START};
    use proptest::prelude::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_initial_values() {
        let d = DifficultySystem::default();
        assert_eq!(d.timer(), 0.0);
        assert_eq!(d.speed_multiplier(), SPEED_MULTIPLIER_START);
    }

    #[test]
    fn test_timer_accumulates() {
        let mut d = DifficultySystem::default();
        d.update(1000.0);
        assert_eq!(d.timer(), 1000.0);
    }

    #[test]
    fn test_no_step_before_interval() {
        let mut d = DifficultySystem::default();
        assert!(!d.update(DIFFICULTY_INTERVAL_MS - 100.0));
        assert_eq!(d.speed_multiplier(), SPEED_MULTIPLIER_START);
    }

    #[test]
    fn test_exact_interval_does_not_step() {
        let mut d = DifficultySystem::default();
        assert!(!d.update(DIFFICULTY_INTERVAL_MS));
    }

    #[test]
    fn test_step_resets_timer() {
        let mut d = DifficultySystem::default();
        assert!(d.update(DIFFICULTY_INTERVAL_MS + 100.0));
        assert_eq!(d.timer(), 0.0);
        assert!(approx(d.speed_multiplier(), SPEED_MULTIPLIER_START + SPEED_INCREMENT));
    }

    #[test]
    fn test_three_steps() {
        let mut d = DifficultySystem::default();
        for _ in 0..3 {
            d.update(3100.0);
        }
        assert!(approx(d.speed_multiplier(), 1.3));
    }

    #[test]
    fn test_large_delta_steps_once() {
        let mut d = DifficultySystem::default();
        d.update(10_000.0);
        assert!(approx(d.speed_multiplier(), 1.1));
        assert_eq!(d.timer(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut d = DifficultySystem::default();
        d.update(3100.0);
        d.update(3100.0);
        d.update(500.0);
        d.reset();
        assert_eq!(d.timer(), 0.0);
        assert_eq!(d.speed_multiplier(), SPEED_MULTIPLIER_START);
    }

    proptest! {
        #[test]
        fn prop_multiplier_never_decreases(
            deltas in prop::collection::vec(0.0f32..10_000.0, 0..200),
        ) {
            let mut d = DifficultySystem::default();
            let mut last = d.speed_multiplier();
            for delta in deltas {
                d.update(delta);
                prop_assert!(d.speed_multiplier() >= last);
                last = d.speed_multiplier();
            }
        }

        #[test]
        fn prop_steps_match_count(n in 0usize..50, extra in 1.0f32..5000.0) {
            let mut d = DifficultySystem::default();
            for _ in 0..n {
                d.update(DIFFICULTY_INTERVAL_MS + extra);
            }
            let expected = SPEED_MULTIPLIER_START + n as f32 * SPEED_INCREMENT;
            prop_assert!((d.speed_multiplier() - expected).abs() < 1e-3);
        }

        #[test]
        fn prop_sub_interval_never_steps(delta in 0.0f32..DIFFICULTY_INTERVAL_MS) {
            let mut d = DifficultySystem::default();
            d.update(delta);
            prop_assert_eq!(d.speed_multiplier(), SPEED_MULTIPLIER_START);
        }
    }
}
