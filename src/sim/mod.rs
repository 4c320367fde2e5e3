//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Time-accumulator scheduling only, driven by frame deltas
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod parallax;
pub mod pool;
pub mod scene;
pub mod smoke;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Circle, Shape};
pub use difficulty::DifficultySystem;
pub use parallax::{Anchor, ParallaxLayer, ParallaxSystem};
pub use pool::{EntityGroup, EntityId};
pub use scene::{GameOverCallback, GameScene, StartConfig};
pub use smoke::{Puff, SmokeTrail};
pub use spawn::{SpawnLayout, SpawnReport, SpawnSystem, StarPattern};
pub use state::{
    Enemy, EnemyKind, GameEvent, GamePhase, GameSession, Player, ShipId, SpeedClass, Star,
};
pub use tick::{TickInput, tick};
