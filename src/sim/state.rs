//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Circle};
use crate::assets::AssetKey;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation frozen, reversible
    Paused,
    /// Run ended (terminal)
    GameOver,
}

/// Selectable pilot / ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipId {
    #[default]
    Alexander,
    Klas,
    Bhing,
}

impl ShipId {
    pub const ALL: [ShipId; 3] = [ShipId::Alexander, ShipId::Klas, ShipId::Bhing];

    pub fn texture(&self) -> AssetKey {
        match self {
            ShipId::Alexander => AssetKey::ShipRed,
            ShipId::Klas => AssetKey::ShipBlue,
            ShipId::Bhing => AssetKey::ShipPurple,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipId::Alexander => "alexander",
            ShipId::Klas => "klas",
            ShipId::Bhing => "bhing",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "alexander" => Some(ShipId::Alexander),
            "klas" => Some(ShipId::Klas),
            "bhing" => Some(ShipId::Bhing),
            _ => None,
        }
    }
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub ship: ShipId,
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    /// On-screen sprite size
    pub size: Vec2,
    /// Hitbox half extents
    pub half_extents: Vec2,
    /// Hidden (not removed) once the craft is destroyed
    pub visible: bool,
}

impl Player {
    pub fn hitbox(&self) -> Aabb {
        Aabb::new(self.pos, self.half_extents)
    }
}

/// A collectible star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    /// On-screen sprite size
    pub size: Vec2,
    /// Collision circle radius, smaller than the sprite
    pub radius: f32,
}

impl Star {
    pub fn hitbox(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Outruns the background
    Cloud,
    /// Drifts with the background
    Robot,
}

/// Speed class an enemy kind belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedClass {
    Fast,
    Normal,
}

impl EnemyKind {
    pub fn speed_class(&self) -> SpeedClass {
        match self {
            EnemyKind::Cloud => SpeedClass::Fast,
            EnemyKind::Robot => SpeedClass::Normal,
        }
    }

    pub fn texture(&self) -> AssetKey {
        match self {
            EnemyKind::Cloud => AssetKey::EnemyCloud,
            EnemyKind::Robot => AssetKey::EnemyRobot,
        }
    }
}

/// An obstacle; touching one ends the run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub half_extents: Vec2,
    kind: EnemyKind,
    speed_factor: f32,
}

impl Enemy {
    /// Kind and speed factor are fixed for the enemy's lifetime
    pub fn new(
        kind: EnemyKind,
        speed_factor: f32,
        pos: Vec2,
        size: Vec2,
        half_extents: Vec2,
    ) -> Self {
        Self {
            pos,
            size,
            half_extents,
            kind,
            speed_factor,
        }
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn speed_factor(&self) -> f32 {
        self.speed_factor
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::new(self.pos, self.half_extents)
    }
}

/// Feedback for the host (audio, effects, UI handoff)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A star was picked up
    StarCollected { pos: Vec2, score: u64 },
    /// One-shot collision effect at the player's position
    Explosion { pos: Vec2 },
    /// Music and engine loops should stop for good
    AmbientStopped,
    /// Background audio should pause in place
    AudioSuspended,
    /// Background audio should continue from where it paused
    AudioResumed,
    /// The final score was handed to the game-over callback
    ScoreReported { score: u64 },
}

/// Serializable view of a session's bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub score: u64,
    pub speed_multiplier: f32,
    pub is_game_over: bool,
    pub is_paused: bool,
    pub elapsed_since_last_difficulty_step: f32,
    pub elapsed_since_last_star_spawn: f32,
    pub elapsed_since_last_enemy_spawn: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ship_parse() {
        for ship in ShipId::ALL {
            assert_eq!(ShipId::parse(ship.as_str()), Some(ship));
        }
        assert_eq!(ShipId::parse("KLAS"), Some(ShipId::Klas));
        assert_eq!(ShipId::parse("nobody"), None);
    }

    #[test]
    fn test_ship_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&ShipId::Bhing).unwrap(), "\"bhing\"");
    }

    #[test]
    fn test_enemy_speed_classes() {
        assert_eq!(EnemyKind::Cloud.speed_class(), SpeedClass::Fast);
        assert_eq!(EnemyKind::Robot.speed_class(), SpeedClass::Normal);
    }
}
