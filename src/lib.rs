//! Sky High - a side-scrolling sky arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (difficulty, spawning, parallax, collisions, game state)
//! - `render`: Depth-sorted sprite list for the host renderer
//! - `platform`: Browser/native platform abstraction (key-value storage)
//! - `highscores`: Persisted top-10 leaderboard
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod audio;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod viewport;

pub use error::GameError;
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;
pub use viewport::Viewport;

/// Game configuration constants
///
/// Spatial values are authored for a 1080 px tall surface and scaled by
/// [`Viewport::scale_ratio`] at runtime.
pub mod consts {
    /// Surface height the spatial constants are authored against
    pub const REFERENCE_HEIGHT: f32 = 1080.0;

    /// Player
    pub const PLAYER_START_X: f32 = 250.0;
    pub const PLAYER_START_Y_RATIO: f32 = 0.4; // 40% from top
    pub const PLAYER_SCALE: f32 = 0.15;
    /// Pixels per second
    pub const PLAYER_MOVE_SPEED: f32 = 400.0;
    /// Player may not descend closer than this to the bottom edge
    pub const PLAYER_GROUND_MARGIN: f32 = 50.0;

    /// Scoring
    pub const STAR_POINTS: u64 = 10;

    /// Scroll speeds (pixels per frame at multiplier 1.0)
    pub const BASE_SCROLL: f32 = 2.0;
    pub const STAR_SCROLL_MULTIPLIER: f32 = 2.0;
    pub const ENEMY_SCROLL_MULTIPLIER: f32 = 1.5;
    pub const CLOUD_SPEED_FACTOR: f32 = 1.5; // Clouds outrun the background
    pub const ROBOT_SPEED_FACTOR: f32 = 1.0;

    /// Difficulty progression
    pub const SPEED_MULTIPLIER_START: f32 = 1.0;
    pub const DIFFICULTY_INTERVAL_MS: f32 = 3000.0;
    pub const SPEED_INCREMENT: f32 = 0.1;
    pub const BASE_STAR_SPAWN_INTERVAL_MS: f32 = 3500.0;
    pub const BASE_ENEMY_SPAWN_INTERVAL_MS: f32 = 3000.0;

    /// Star waves
    pub const MIN_STARS_PER_WAVE: u32 = 3;
    pub const MAX_STARS_PER_WAVE: u32 = 5;
    pub const STAR_ARC_SPACING: f32 = 100.0;
    pub const STAR_HORIZONTAL_SPACING: f32 = 120.0;
    pub const STAR_WAVE_SPACING: f32 = 100.0;
    pub const STAR_WAVE_AMPLITUDE: f32 = 120.0;
    pub const STAR_ARC_RADIUS_MAX: f32 = 150.0;
    pub const STAR_MARGIN_PADDING: f32 = 50.0;
    pub const STAR_TOP_MARGIN: f32 = 80.0; // Below the score display
    pub const STAR_BOTTOM_MARGIN: f32 = 200.0; // Above the ground strip

    /// Enemy waves
    pub const MIN_ENEMIES: u32 = 1;
    pub const MAX_ENEMIES: u32 = 2;
    pub const LANE_HEIGHT: f32 = 70.0;
    pub const LANE_JITTER: f32 = 35.0;
    pub const MIN_LANES: u32 = 4;
    pub const ENEMY_X_OFFSET: f32 = 50.0;
    pub const MAX_LANE_ATTEMPTS: u32 = 10;
    pub const ENEMY_TOP_MARGIN: f32 = 60.0;
    pub const ENEMY_BOTTOM_MARGIN: f32 = 80.0;

    /// Entities are retired once fully past the left edge
    pub const STAR_CLEANUP_X: f32 = -50.0;
    pub const ENEMY_CLEANUP_X: f32 = -100.0;

    /// Entity sprite scales
    pub const STAR_SCALE: f32 = 0.08;
    pub const ENEMY_SCALE: f32 = 0.15;
    /// Surfaces this short or shorter use the compact scales, unscaled
    pub const COMPACT_HEIGHT_THRESHOLD: f32 = 600.0;
    pub const STAR_SCALE_COMPACT: f32 = 0.035;
    pub const ENEMY_SCALE_COMPACT: f32 = 0.06;

    /// Parallax layers: (scroll factor, scale)
    pub const MOUNTAINS_LAYER: (f32, f32) = (0.2, 0.5);
    pub const HILLS_LAYER: (f32, f32) = (0.5, 0.4);
    pub const GROUND_LAYER: (f32, f32) = (1.0, 0.35);
    /// Extra pixels on each strip to hide seams
    pub const LAYER_BLEED: f32 = 2.0;
    /// Sky backdrop oversize to hide edges
    pub const SKY_BLEED: f32 = 1.02;

    /// Physics
    pub const TOUCH_DEADZONE: f32 = 10.0;
    pub const HITBOX_SIZE_RATIO: f32 = 0.6;
    pub const STAR_HITBOX_RATIO: f32 = 0.4;

    /// Demo mode steering
    pub const AUTOPILOT_LOOK_AHEAD: f32 = 450.0;
    pub const AUTOPILOT_CLEARANCE: f32 = 60.0;

    /// Smoke trail
    pub const SMOKE_INTERVAL_MS: f32 = 30.0;
    pub const SMOKE_LIFETIME_MS: f32 = 800.0;
    pub const SMOKE_MAX_BURST: u32 = 4;
    pub const SMOKE_OFFSET_X: f32 = -30.0;
    pub const SMOKE_SPEED_MIN: f32 = 50.0;
    pub const SMOKE_SPEED_MAX: f32 = 100.0;
    pub const SMOKE_SPREAD_DEG: f32 = 10.0;
    pub const SMOKE_SCALE_START: f32 = 0.3;
    pub const SMOKE_SCALE_END: f32 = 0.6;
    pub const SMOKE_ALPHA_START: f32 = 0.7;
    pub const SMOKE_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

    /// Entities draw above every parallax layer
    pub const DEPTH_ENTITIES: f32 = 100.0;

    /// Timing
    pub const GAME_OVER_DELAY_MS: f32 = 1000.0;
    pub const EXPLOSION_SCALE: f32 = 1.5;
}

/// Zero-padded score text for the HUD
pub fn format_score(score: u64) -> String {
    format!("{:04}", score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_score_pads_to_four_digits() {
        assert_eq!(format_score(0), "0000");
        assert_eq!(format_score(50), "0050");
        assert_eq!(format_score(12345), "12345");
    }
}
