//! Asset manifest
//!
//! The core never decodes images itself; it only needs the pixel size of
//! each texture to lay out layers, scale sprites and size hitboxes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Every texture the game scene uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKey {
    Sky,
    Mountains,
    Hills,
    Ground,
    ShipRed,
    ShipBlue,
    ShipPurple,
    EnemyCloud,
    EnemyRobot,
    Star,
    Explosion,
    Smoke,
}

impl AssetKey {
    pub const ALL: [AssetKey; 12] = [
        AssetKey::Sky,
        AssetKey::Mountains,
        AssetKey::Hills,
        AssetKey::Ground,
        AssetKey::ShipRed,
        AssetKey::ShipBlue,
        AssetKey::ShipPurple,
        AssetKey::EnemyCloud,
        AssetKey::EnemyRobot,
        AssetKey::Star,
        AssetKey::Explosion,
        AssetKey::Smoke,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AssetKey::Sky => "bg_sky",
            AssetKey::Mountains => "bg_mountains",
            AssetKey::Hills => "bg_hills",
            AssetKey::Ground => "bg_ground",
            AssetKey::ShipRed => "ship_red",
            AssetKey::ShipBlue => "ship_blue",
            AssetKey::ShipPurple => "ship_purple",
            AssetKey::EnemyCloud => "enemy_cloud",
            AssetKey::EnemyRobot => "enemy_robot",
            AssetKey::Star => "pickup_star",
            AssetKey::Explosion => "explosion",
            AssetKey::Smoke => "particle_smoke",
        }
    }

    /// URL path served by the web host
    pub fn path(&self) -> String {
        format!("/images/{}.png", self.name())
    }

    /// Stable index used as the texture slot in sprite instances
    pub fn index(&self) -> u32 {
        *self as u32
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// Anything that can report decoded texture sizes
pub trait AssetSource {
    /// Pixel dimensions of a loaded texture, `None` if it failed to load
    fn dimensions(&self, key: AssetKey) -> Option<(u32, u32)>;
}

/// Fixed-size source for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct StaticAssets {
    sizes: HashMap<AssetKey, (u32, u32)>,
}

impl StaticAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plausible sizes for every asset
    pub fn standard() -> Self {
        let mut assets = Self::new();
        for key in AssetKey::ALL {
            let size = match key {
                AssetKey::Sky => (1920, 1080),
                AssetKey::Mountains | AssetKey::Hills | AssetKey::Ground => (2048, 512),
                AssetKey::ShipRed | AssetKey::ShipBlue | AssetKey::ShipPurple => (600, 300),
                AssetKey::EnemyCloud | AssetKey::EnemyRobot => (500, 400),
                AssetKey::Star => (512, 512),
                AssetKey::Explosion => (256, 256),
                AssetKey::Smoke => (64, 64),
            };
            assets.insert(key, size.0, size.1);
        }
        assets
    }

    pub fn insert(&mut self, key: AssetKey, width: u32, height: u32) {
        self.sizes.insert(key, (width, height));
    }

    pub fn remove(&mut self, key: AssetKey) {
        self.sizes.remove(&key);
    }
}

impl AssetSource for StaticAssets {
    fn dimensions(&self, key: AssetKey) -> Option<(u32, u32)> {
        self.sizes.get(&key).copied()
    }
}

/// Texture sizes captured from a source, all-or-nothing
#[derive(Debug, Clone)]
pub struct TextureSizes {
    sizes: HashMap<AssetKey, (f32, f32)>,
}

impl TextureSizes {
    /// Read every manifest entry from `source`
    pub fn capture(source: &dyn AssetSource) -> Result<Self, GameError> {
        let mut sizes = HashMap::with_capacity(AssetKey::ALL.len());
        for key in AssetKey::ALL {
            let (w, h) = source
                .dimensions(key)
                .ok_or(GameError::AssetMissing { key: key.name() })?;
            if w == 0 || h == 0 {
                return Err(GameError::AssetInvalid {
                    key: key.name(),
                    reason: format!("zero-sized texture {w}x{h}"),
                });
            }
            sizes.insert(key, (w as f32, h as f32));
        }
        Ok(Self { sizes })
    }

    pub fn get(&self, key: AssetKey) -> (f32, f32) {
        self.sizes.get(&key).copied().unwrap_or((1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip_covers_manifest() {
        for key in AssetKey::ALL {
            assert_eq!(AssetKey::from_index(key.index()), Some(key));
        }
        assert_eq!(AssetKey::from_index(99), None);
    }

    #[test]
    fn test_capture_fails_on_missing_asset() {
        let mut assets = StaticAssets::standard();
        assets.remove(AssetKey::EnemyRobot);
        let err = TextureSizes::capture(&assets).unwrap_err();
        assert!(matches!(err, GameError::AssetMissing { key: "enemy_robot" }));
    }

    #[test]
    fn test_capture_rejects_zero_size() {
        let mut assets = StaticAssets::standard();
        assets.insert(AssetKey::Star, 0, 10);
        assert!(matches!(
            TextureSizes::capture(&assets),
            Err(GameError::AssetInvalid { .. })
        ));
    }

    #[test]
    fn test_paths() {
        assert_eq!(AssetKey::Ground.path(), "/images/bg_ground.png");
    }
}
