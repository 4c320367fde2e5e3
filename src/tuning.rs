//! Data-driven game balance
//!
//! Every field defaults to the matching value in [`crate::consts`], so a
//! partial JSON document only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Difficulty ===
    pub speed_multiplier_start: f32,
    pub difficulty_interval_ms: f32,
    pub speed_increment: f32,

    // === Spawning ===
    pub star_spawn_interval_ms: f32,
    pub enemy_spawn_interval_ms: f32,
    pub min_stars_per_wave: u32,
    pub max_stars_per_wave: u32,
    pub min_enemies_per_wave: u32,
    pub max_enemies_per_wave: u32,
    pub max_lane_attempts: u32,

    // === Scrolling ===
    pub base_scroll: f32,
    pub star_scroll_multiplier: f32,
    pub enemy_scroll_multiplier: f32,
    pub cloud_speed_factor: f32,
    pub robot_speed_factor: f32,

    // === Player ===
    pub player_move_speed: f32,
    pub touch_deadzone: f32,

    // === Scoring / timing ===
    pub star_points: u64,
    pub game_over_delay_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            speed_multiplier_start: SPEED_MULTIPLIER_START,
            difficulty_interval_ms: DIFFICULTY_INTERVAL_MS,
            speed_increment: SPEED_INCREMENT,

            star_spawn_interval_ms: BASE_STAR_SPAWN_INTERVAL_MS,
            enemy_spawn_interval_ms: BASE_ENEMY_SPAWN_INTERVAL_MS,
            min_stars_per_wave: MIN_STARS_PER_WAVE,
            max_stars_per_wave: MAX_STARS_PER_WAVE,
            min_enemies_per_wave: MIN_ENEMIES,
            max_enemies_per_wave: MAX_ENEMIES,
            max_lane_attempts: MAX_LANE_ATTEMPTS,

            base_scroll: BASE_SCROLL,
            star_scroll_multiplier: STAR_SCROLL_MULTIPLIER,
            enemy_scroll_multiplier: ENEMY_SCROLL_MULTIPLIER,
            cloud_speed_factor: CLOUD_SPEED_FACTOR,
            robot_speed_factor: ROBOT_SPEED_FACTOR,

            player_move_speed: PLAYER_MOVE_SPEED,
            touch_deadzone: TOUCH_DEADZONE,

            star_points: STAR_POINTS,
            game_over_delay_ms: GAME_OVER_DELAY_MS,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall or invert the simulation
    pub fn validate(&self) -> Result<(), GameError> {
        if !(self.speed_multiplier_start.is_finite() && self.speed_multiplier_start >= 1.0) {
            return Err(GameError::Tuning(format!(
                "speed_multiplier_start must be at least 1, got {}",
                self.speed_multiplier_start
            )));
        }
        let positive = [
            ("difficulty_interval_ms", self.difficulty_interval_ms),
            ("star_spawn_interval_ms", self.star_spawn_interval_ms),
            ("enemy_spawn_interval_ms", self.enemy_spawn_interval_ms),
            ("base_scroll", self.base_scroll),
            ("player_move_speed", self.player_move_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::Tuning(format!("{name} must be positive, got {value}")));
            }
        }
        let non_negative = [
            ("speed_increment", self.speed_increment),
            ("star_scroll_multiplier", self.star_scroll_multiplier),
            ("enemy_scroll_multiplier", self.enemy_scroll_multiplier),
            ("cloud_speed_factor", self.cloud_speed_factor),
            ("robot_speed_factor", self.robot_speed_factor),
            ("touch_deadzone", self.touch_deadzone),
            ("game_over_delay_ms", self.game_over_delay_ms),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(GameError::Tuning(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        if self.min_stars_per_wave == 0 || self.min_stars_per_wave > self.max_stars_per_wave {
            return Err(GameError::Tuning("star wave size range is empty".into()));
        }
        if self.min_enemies_per_wave > self.max_enemies_per_wave {
            return Err(GameError::Tuning("enemy wave size range is empty".into()));
        }
        if self.max_lane_attempts == 0 {
            return Err(GameError::Tuning("max_lane_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let tuning = Tuning::from_json(r#"{ "speed_increment": 0.25 }"#).unwrap();
        assert_eq!(tuning.speed_increment, 0.25);
        assert_eq!(tuning.difficulty_interval_ms, DIFFICULTY_INTERVAL_MS);
        assert_eq!(tuning.star_points, STAR_POINTS);
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = Tuning::from_json(r#"{ "star_spawn_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, GameError::Tuning(_)));
    }

    #[test]
    fn test_rejects_inverted_wave_range() {
        let err = Tuning::from_json(r#"{ "min_stars_per_wave": 6, "max_stars_per_wave": 2 }"#)
            .unwrap_err();
        assert!(matches!(err, GameError::Tuning(_)));
    }

    #[test]
    fn test_rejects_decreasing_or_sub_unit_multiplier() {
        let shrinking = Tuning {
            speed_increment: -0.5,
            ..Default::default()
        };
        assert!(matches!(shrinking.validate(), Err(GameError::Tuning(_))));

        let slow_start = Tuning {
            speed_multiplier_start: 0.5,
            ..Default::default()
        };
        assert!(matches!(slow_start.validate(), Err(GameError::Tuning(_))));

        let flat = Tuning {
            speed_increment: 0.0,
            ..Default::default()
        };
        assert!(flat.validate().is_ok());
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }
}
