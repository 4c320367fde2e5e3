//! Parallax scrolling background layers
//!
//! Each layer is a horizontally tiled strip whose texture offset advances
//! by `base_scroll * speed_multiplier * scroll_factor` per frame. A factor
//! of 0 marks a static layer (the sky) which is never advanced.

use serde::{Deserialize, Serialize};

use crate::assets::{AssetKey, TextureSizes};
use crate::consts::LAYER_BLEED;
use crate::viewport::Viewport;

/// Vertical placement policy for a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    /// Strip of scaled texture height stuck to the bottom edge
    Bottom,
    /// Covers the whole surface height
    Fill,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallaxLayer {
    pub key: AssetKey,
    /// 0 = static, 1 = full scroll speed
    pub scroll_factor: f32,
    /// Authored texture scale (before responsive scaling)
    pub scale: f32,
    pub anchor: Anchor,
    /// Horizontal texture offset, kept within one tile width
    pub offset_x: f32,
    /// Draw order; first registered is furthest back
    pub depth: f32,

    // Derived from the viewport and texture size
    /// Top edge of the strip
    pub y: f32,
    /// Strip height on screen
    pub height: f32,
    /// On-screen size of one texture tile
    pub tile_width: f32,
    pub tile_height: f32,
}

impl ParallaxLayer {
    fn layout(&mut self, viewport: &Viewport, textures: &TextureSizes) {
        let (tex_w, tex_h) = textures.get(self.key);
        let responsive_scale = viewport.responsive(self.scale);
        self.tile_width = tex_w * responsive_scale;
        self.tile_height = tex_h * responsive_scale;

        match self.anchor {
            Anchor::Bottom => {
                // Round up to avoid sub-pixel gaps above the strip
                self.height = self.tile_height.ceil() + LAYER_BLEED;
                self.y = (viewport.height - self.height).round();
            }
            Anchor::Fill => {
                self.height = viewport.height;
                self.y = 0.0;
            }
        }

        if self.tile_width > 0.0 {
            self.offset_x = self.offset_x.rem_euclid(self.tile_width);
        }
    }

    pub fn is_static(&self) -> bool {
        self.scroll_factor <= 0.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallaxSystem {
    layers: Vec<ParallaxLayer>,
    base_scroll: f32,
}

impl ParallaxSystem {
    pub fn new(base_scroll: f32) -> Self {
        Self {
            layers: Vec::new(),
            base_scroll,
        }
    }

    /// Register a layer in front of all previously registered ones
    pub fn create_layer(
        &mut self,
        key: AssetKey,
        scroll_factor: f32,
        scale: f32,
        anchor: Anchor,
        viewport: &Viewport,
        textures: &TextureSizes,
    ) {
        let mut layer = ParallaxLayer {
            key,
            scroll_factor: scroll_factor.max(0.0),
            scale,
            anchor,
            offset_x: 0.0,
            depth: self.layers.len() as f32,
            y: 0.0,
            height: 0.0,
            tile_width: 0.0,
            tile_height: 0.0,
        };
        layer.layout(viewport, textures);
        self.layers.push(layer);
    }

    /// Advance every moving layer by one frame
    pub fn update(&mut self, speed_multiplier: f32) {
        let scroll_speed = self.base_scroll * speed_multiplier;

        for layer in self.layers.iter_mut().filter(|l| !l.is_static()) {
            layer.offset_x += scroll_speed * layer.scroll_factor;
            if layer.tile_width > 0.0 {
                layer.offset_x = layer.offset_x.rem_euclid(layer.tile_width);
            }
        }
    }

    /// Recompute strip geometry after a resize, keeping scroll offsets
    pub fn relayout(&mut self, viewport: &Viewport, textures: &TextureSizes) {
        for layer in &mut self.layers {
            layer.layout(viewport, textures);
        }
    }

    pub fn layers(&self) -> &[ParallaxLayer] {
        &self.layers
    }

    pub fn clear(&mut self) {
        self.layers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::StaticAssets;
    use crate::consts::BASE_SCROLL;

    fn textures() -> TextureSizes {
        TextureSizes::capture(&StaticAssets::standard()).unwrap()
    }

    fn system() -> ParallaxSystem {
        let vp = Viewport::new(1920.0, 1080.0);
        let tex = textures();
        let mut p = ParallaxSystem::new(BASE_SCROLL);
        p.create_layer(AssetKey::Sky, 0.0, 1.0, Anchor::Fill, &vp, &tex);
        p.create_layer(AssetKey::Mountains, 0.2, 0.5, Anchor::Bottom, &vp, &tex);
        p.create_layer(AssetKey::Ground, 1.0, 0.35, Anchor::Bottom, &vp, &tex);
        p
    }

    #[test]
    fn test_static_layer_never_moves() {
        let mut p = system();
        for _ in 0..100 {
            p.update(2.0);
        }
        assert_eq!(p.layers()[0].offset_x, 0.0);
    }

    #[test]
    fn test_offset_proportional_to_factor() {
        let mut p = system();
        p.update(1.5);
        let mountains = &p.layers()[1];
        let ground = &p.layers()[2];
        assert!((mountains.offset_x - BASE_SCROLL * 1.5 * 0.2).abs() < 1e-5);
        assert!((ground.offset_x - BASE_SCROLL * 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_offset_wraps_at_tile_width() {
        let mut p = system();
        let tile = p.layers()[2].tile_width;
        let frames = (tile / BASE_SCROLL).ceil() as usize + 10;
        for _ in 0..frames {
            p.update(1.0);
        }
        let ground = &p.layers()[2];
        assert!(ground.offset_x >= 0.0 && ground.offset_x < tile);
    }

    #[test]
    fn test_depth_follows_registration_order() {
        let p = system();
        let depths: Vec<f32> = p.layers().iter().map(|l| l.depth).collect();
        assert_eq!(depths, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_bottom_anchor_touches_bottom_edge() {
        let p = system();
        let ground = &p.layers()[2];
        // 512 * 0.35 = 179.2 -> 180 + 2 bleed
        assert_eq!(ground.height, 182.0);
        assert_eq!(ground.y + ground.height, 1080.0);
        let sky = &p.layers()[0];
        assert_eq!((sky.y, sky.height), (0.0, 1080.0));
    }

    #[test]
    fn test_relayout_scales_with_height() {
        let mut p = system();
        p.update(1.0);
        let offset = p.layers()[2].offset_x;
        p.relayout(&Viewport::new(960.0, 540.0), &textures());
        let ground = &p.layers()[2];
        assert!((ground.tile_height - 512.0 * 0.35 * 0.5).abs() < 1e-3);
        assert_eq!(ground.offset_x, offset);
        assert_eq!(ground.y + ground.height, 540.0);
    }
}
