//! Sprite instances and draw list construction

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::assets::AssetKey;
use crate::consts::{DEPTH_ENTITIES, EXPLOSION_SCALE};
use crate::settings::Settings;
use crate::sim::GameScene;

/// Sprite flags
pub mod flags {
    /// Repeat the texture horizontally across the rect, bottom aligned,
    /// shifted left by `uv_offset[0]`
    pub const TILED: u32 = 1 << 0;
    /// Transient effect (smoke, explosion), skipped when reduced motion is on
    pub const EFFECT: u32 = 1 << 1;
}

/// Per-sprite data (must match the host's instance layout)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub center: [f32; 2],    // offset 0
    pub size: [f32; 2],      // offset 8
    pub tile_size: [f32; 2], // offset 16
    pub uv_offset: [f32; 2], // offset 24
    pub depth: f32,          // offset 32
    pub texture: u32,        // offset 36 - AssetKey index
    pub flags: u32,          // offset 40
    pub alpha: f32,          // offset 44 - total 48 bytes
}

impl SpriteInstance {
    fn entity(key: AssetKey, center: Vec2, size: Vec2, depth: f32) -> Self {
        Self {
            center: center.to_array(),
            size: size.to_array(),
            tile_size: size.to_array(),
            uv_offset: [0.0, 0.0],
            depth,
            texture: key.index(),
            flags: 0,
            alpha: 1.0,
        }
    }

    pub fn key(&self) -> Option<AssetKey> {
        AssetKey::from_index(self.texture)
    }

    pub fn is_tiled(&self) -> bool {
        self.flags & flags::TILED != 0
    }

    /// Top-left corner in screen space
    pub fn top_left(&self) -> Vec2 {
        Vec2::from(self.center) - Vec2::from(self.size) / 2.0
    }
}

/// Everything to draw this frame, back to front
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub sprites: Vec<SpriteInstance>,
}

impl DrawList {
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Raw instance bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sprites)
    }
}

/// Build the depth-sorted draw list for the current scene state
pub fn build_draw_list(scene: &GameScene, settings: &Settings) -> DrawList {
    let vp = scene.viewport();
    let mut sprites = Vec::with_capacity(
        scene.parallax.layers().len()
            + scene.stars.len()
            + scene.enemies.len()
            + scene.smoke.len()
            + 2,
    );

    for layer in scene.parallax.layers() {
        sprites.push(SpriteInstance {
            center: [vp.width / 2.0, layer.y + layer.height / 2.0],
            size: [vp.width, layer.height],
            tile_size: [layer.tile_width, layer.tile_height],
            uv_offset: [layer.offset_x, 0.0],
            depth: layer.depth,
            texture: layer.key.index(),
            flags: flags::TILED,
            alpha: 1.0,
        });
    }

    for (_, star) in scene.stars.iter() {
        sprites.push(SpriteInstance::entity(
            AssetKey::Star,
            star.pos,
            star.size,
            DEPTH_ENTITIES,
        ));
    }

    for (_, enemy) in scene.enemies.iter() {
        sprites.push(SpriteInstance::entity(
            enemy.kind().texture(),
            enemy.pos,
            enemy.size,
            DEPTH_ENTITIES + 1.0,
        ));
    }

    let smoke_texture = scene.texture_size(AssetKey::Smoke);
    if let (Some(texture), false) = (smoke_texture, settings.reduced_motion) {
        let base = texture * vp.scale_ratio();
        for puff in scene.smoke.puffs() {
            let mut sprite = SpriteInstance::entity(
                AssetKey::Smoke,
                puff.pos,
                base * puff.scale(),
                DEPTH_ENTITIES + 1.5,
            );
            sprite.flags = flags::EFFECT;
            sprite.alpha = puff.alpha();
            sprites.push(sprite);
        }
    }

    let player = &scene.player;
    if player.visible {
        sprites.push(SpriteInstance::entity(
            player.ship.texture(),
            player.pos,
            player.size,
            DEPTH_ENTITIES + 2.0,
        ));
    }

    if let (Some(at), false) = (scene.explosion_at(), settings.reduced_motion) {
        let size = Vec2::splat(player.size.y.max(1.0) * EXPLOSION_SCALE);
        let mut effect =
            SpriteInstance::entity(AssetKey::Explosion, at, size, DEPTH_ENTITIES + 3.0);
        effect.flags = flags::EFFECT;
        sprites.push(effect);
    }

    // Stable, so equal depths keep insertion (spawn) order
    sprites.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    DrawList { sprites }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::StaticAssets;
    use crate::sim::{ShipId, StartConfig, Star, TickInput};
    use crate::viewport::Viewport;

    fn scene() -> GameScene {
        let config = StartConfig::new(ShipId::Bhing, |_| {}).with_seed(11);
        let mut scene = GameScene::init(config, Viewport::new(1280.0, 720.0)).unwrap();
        scene.load_assets(&StaticAssets::standard()).unwrap();
        scene
    }

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 48);
    }

    #[test]
    fn test_draw_list_is_back_to_front() {
        let mut scene = scene();
        scene.stars.create(Star {
            pos: Vec2::new(900.0, 200.0),
            size: Vec2::splat(30.0),
            radius: 12.0,
        });
        let list = build_draw_list(&scene, &Settings::default());

        // 4 layers + star + player
        assert_eq!(list.len(), 6);
        assert!(list.sprites.windows(2).all(|w| w[0].depth <= w[1].depth));
        assert_eq!(list.sprites[0].key(), Some(AssetKey::Sky));
        assert!(list.sprites[..4].iter().all(|s| s.is_tiled()));
        assert_eq!(list.sprites[5].key(), Some(AssetKey::ShipPurple));
        assert_eq!(list.as_bytes().len(), 6 * 48);
    }

    #[test]
    fn test_layer_rect_matches_strip() {
        let scene = scene();
        let list = build_draw_list(&scene, &Settings::default());
        let ground = list
            .sprites
            .iter()
            .find(|s| s.key() == Some(AssetKey::Ground))
            .unwrap();
        let top_left = ground.top_left();
        assert!((top_left.y + ground.size[1] - 720.0).abs() < 1e-3);
        assert_eq!(ground.size[0], 1280.0);
    }

    #[test]
    fn test_game_over_hides_player_and_shows_effect() {
        let mut scene = scene();
        scene.hit_enemy();

        let list = build_draw_list(&scene, &Settings::default());
        assert!(list.sprites.iter().all(|s| s.key() != Some(AssetKey::ShipPurple)));
        let last = list.sprites.last().unwrap();
        assert_eq!(last.key(), Some(AssetKey::Explosion));
        assert_eq!(last.flags & flags::EFFECT, flags::EFFECT);

        let calm = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let list = build_draw_list(&scene, &calm);
        assert!(list.sprites.iter().all(|s| s.key() != Some(AssetKey::Explosion)));
    }

    #[test]
    fn test_smoke_drawn_as_fading_effect() {
        let mut scene = scene();
        for _ in 0..20 {
            scene.tick(&TickInput::default(), 16.0);
        }
        assert!(!scene.smoke.is_empty());

        let list = build_draw_list(&scene, &Settings::default());
        let puffs: Vec<_> = list
            .sprites
            .iter()
            .filter(|s| s.key() == Some(AssetKey::Smoke))
            .collect();
        assert_eq!(puffs.len(), scene.smoke.len());
        assert!(puffs.iter().all(|s| s.flags & flags::EFFECT != 0));
        assert!(puffs.iter().all(|s| s.alpha > 0.0 && s.alpha <= 0.7));
        // Behind the craft
        assert!(puffs.iter().all(|s| s.depth < DEPTH_ENTITIES + 2.0));

        let calm = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let list = build_draw_list(&scene, &calm);
        assert!(list.sprites.iter().all(|s| s.key() != Some(AssetKey::Smoke)));
    }
}
