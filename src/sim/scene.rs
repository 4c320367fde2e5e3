//! Game scene: owns the session and composes the systems
//!
//! Lifecycle is explicit: [`GameScene::init`] with a start configuration,
//! [`GameScene::load_assets`] once textures are decoded, then
//! [`GameScene::tick`] once per rendered frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::difficulty::DifficultySystem;
use super::parallax::{Anchor, ParallaxSystem};
use super::pool::{EntityGroup, EntityId};
use super::smoke::SmokeTrail;
use super::spawn::{SpawnLayout, SpawnSystem, clamp_soft};
use super::state::{Enemy, GameEvent, GamePhase, GameSession, Player, ShipId, Star};
use crate::assets::{AssetKey, AssetSource, TextureSizes};
use crate::consts::*;
use crate::error::GameError;
use crate::tuning::Tuning;
use crate::viewport::Viewport;

/// Callback receiving the final score, invoked at most once per session
pub type GameOverCallback = Box<dyn FnMut(u64)>;

/// Everything needed to start a session
pub struct StartConfig {
    pub ship: ShipId,
    /// RNG seed for spawn placement
    pub seed: u64,
    pub tuning: Tuning,
    pub on_game_over: GameOverCallback,
}

impl StartConfig {
    pub fn new(ship: ShipId, on_game_over: impl FnMut(u64) + 'static) -> Self {
        Self {
            ship,
            seed: 0,
            tuning: Tuning::default(),
            on_game_over: Box::new(on_game_over),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }
}

/// Layout derived from loaded textures and the viewport
pub(crate) struct SceneLayout {
    pub(crate) textures: TextureSizes,
    pub(crate) spawn: SpawnLayout,
}

pub struct GameScene {
    pub(crate) tuning: Tuning,
    pub(crate) viewport: Viewport,
    pub(crate) rng: Pcg32,
    pub(crate) layout: Option<SceneLayout>,

    pub(crate) score: u64,
    pub(crate) phase: GamePhase,
    /// Milliseconds left before the final score is reported
    pub(crate) report_in_ms: Option<f32>,
    pub(crate) reported: bool,
    pub(crate) on_game_over: GameOverCallback,
    pub(crate) events: Vec<GameEvent>,
    /// Where the craft exploded, for the effect sprite
    pub(crate) explosion_at: Option<Vec2>,

    pub difficulty: DifficultySystem,
    pub parallax: ParallaxSystem,
    pub spawn: SpawnSystem,

    pub player: Player,
    pub stars: EntityGroup<Star>,
    pub enemies: EntityGroup<Enemy>,
    pub smoke: SmokeTrail,
}

impl GameScene {
    /// Create a session in the `Playing` phase; nothing simulates until assets load
    ///
    /// Fails with [`GameError::Tuning`] when the balance values are invalid.
    pub fn init(config: StartConfig, viewport: Viewport) -> Result<Self, GameError> {
        let StartConfig {
            ship,
            seed,
            tuning,
            on_game_over,
        } = config;
        tuning.validate().inspect_err(|e| {
            log::error!("Rejected tuning: {}", e);
        })?;

        log::info!(
            "Session start: ship={} seed={} viewport={}x{}",
            ship.as_str(),
            seed,
            viewport.width,
            viewport.height
        );

        Ok(Self {
            difficulty: DifficultySystem::new(&tuning),
            parallax: ParallaxSystem::new(tuning.base_scroll),
            spawn: SpawnSystem::new(&tuning),
            tuning,
            viewport,
            rng: Pcg32::seed_from_u64(seed),
            layout: None,

            score: 0,
            phase: GamePhase::Playing,
            report_in_ms: None,
            reported: false,
            on_game_over,
            events: Vec::new(),
            explosion_at: None,

            player: Player {
                ship,
                pos: Vec2::new(
                    viewport.responsive(PLAYER_START_X),
                    viewport.height * PLAYER_START_Y_RATIO,
                ),
                vel: Vec2::ZERO,
                size: Vec2::ZERO,
                half_extents: Vec2::ZERO,
                visible: true,
            },
            stars: EntityGroup::new(),
            enemies: EntityGroup::new(),
            smoke: SmokeTrail::new(seed),
        })
    }

    /// Capture texture sizes and build layers and layout
    ///
    /// Either every asset is usable and the scene becomes ready, or an
    /// error is returned and the scene is left untouched.
    pub fn load_assets(&mut self, source: &dyn AssetSource) -> Result<(), GameError> {
        let textures = TextureSizes::capture(source).inspect_err(|e| {
            log::error!("Asset load failed: {}", e);
        })?;

        let vp = self.viewport;
        self.parallax.clear();
        // Sky covers the full height regardless of its texture size
        let (_, sky_h) = textures.get(AssetKey::Sky);
        let sky_scale = SKY_BLEED * REFERENCE_HEIGHT / sky_h;
        self.parallax
            .create_layer(AssetKey::Sky, 0.0, sky_scale, Anchor::Fill, &vp, &textures);
        for (key, (factor, scale)) in [
            (AssetKey::Mountains, MOUNTAINS_LAYER),
            (AssetKey::Hills, HILLS_LAYER),
            (AssetKey::Ground, GROUND_LAYER),
        ] {
            self.parallax
                .create_layer(key, factor, scale, Anchor::Bottom, &vp, &textures);
        }

        let spawn = SpawnLayout::new(&vp, &textures);
        self.layout = Some(SceneLayout { textures, spawn });
        self.layout_player();

        log::info!("Assets ready, {} parallax layers", self.parallax.layers().len());
        Ok(())
    }

    /// Whether assets are loaded and the scene will simulate
    pub fn is_ready(&self) -> bool {
        self.layout.is_some()
    }

    /// React to a new render surface size
    pub fn resize(&mut self, viewport: Viewport) {
        let old = self.viewport;
        self.viewport = viewport;

        if let Some(layout) = &mut self.layout {
            self.parallax.relayout(&viewport, &layout.textures);
            layout.spawn = SpawnLayout::new(&viewport, &layout.textures);
        }
        // Keep the craft at the same relative spot
        self.player.pos = Vec2::new(
            self.player.pos.x / old.width * viewport.width,
            self.player.pos.y / old.height * viewport.height,
        );
        self.layout_player();
        log::debug!("Resized to {}x{}", viewport.width, viewport.height);
    }

    fn layout_player(&mut self) {
        if let Some(layout) = &self.layout {
            let (w, h) = layout.textures.get(self.player.ship.texture());
            self.player.size = Vec2::new(w, h) * self.viewport.responsive(PLAYER_SCALE);
            self.player.half_extents = self.player.size * HITBOX_SIZE_RATIO / 2.0;
        }
        self.clamp_player();
    }

    /// Keep the craft on screen and above the ground margin
    pub(crate) fn clamp_player(&mut self) {
        let half = self.player.size / 2.0;
        let floor = self.viewport.height - self.viewport.responsive(PLAYER_GROUND_MARGIN);
        self.player.pos.x = clamp_soft(self.player.pos.x, half.x, self.viewport.width - half.x);
        self.player.pos.y = clamp_soft(self.player.pos.y, half.y, floor);
    }

    // === State machine ===

    /// Flip between Playing and Paused; returns false once the game is over
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::AudioSuspended);
                log::info!("Paused");
                true
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                self.events.push(GameEvent::AudioResumed);
                log::info!("Resumed");
                true
            }
            GamePhase::GameOver => {
                log::debug!("Pause toggle ignored after game over");
                false
            }
        }
    }

    /// Consume a star and score it; false if it was already gone
    pub fn collect_star(&mut self, id: EntityId) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        let Some(star) = self.stars.destroy(id) else {
            return false;
        };
        self.score += self.tuning.star_points;
        self.events.push(GameEvent::StarCollected {
            pos: star.pos,
            score: self.score,
        });
        true
    }

    /// Enter GameOver; further calls are no-ops
    pub fn hit_enemy(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.player.visible = false;
        self.player.vel = Vec2::ZERO;
        self.explosion_at = Some(self.player.pos);
        self.smoke.stop();
        self.report_in_ms = Some(self.tuning.game_over_delay_ms);

        self.events.push(GameEvent::AmbientStopped);
        self.events.push(GameEvent::Explosion {
            pos: self.player.pos,
        });
        log::info!("Game over with score {}", self.score);
    }

    /// Count down to the score handoff and fire it exactly once
    pub(crate) fn advance_report(&mut self, delta_ms: f32) {
        let Some(remaining) = self.report_in_ms else {
            return;
        };
        let remaining = remaining - delta_ms;
        if remaining > 0.0 {
            self.report_in_ms = Some(remaining);
            return;
        }

        self.report_in_ms = None;
        if !self.reported {
            self.reported = true;
            (self.on_game_over)(self.score);
            self.events.push(GameEvent::ScoreReported { score: self.score });
            log::info!("Final score {} reported", self.score);
        }
    }

    // === Accessors ===

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.difficulty.speed_multiplier()
    }

    /// Current per-frame scroll distance at the background's speed
    pub fn scroll_speed(&self) -> f32 {
        self.tuning.base_scroll * self.speed_multiplier()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn explosion_at(&self) -> Option<Vec2> {
        self.explosion_at
    }

    /// Whether the final score has been handed off
    pub fn score_reported(&self) -> bool {
        self.reported
    }

    /// Pixel size of a loaded texture
    pub fn texture_size(&self, key: AssetKey) -> Option<Vec2> {
        self.layout.as_ref().map(|l| {
            let (w, h) = l.textures.get(key);
            Vec2::new(w, h)
        })
    }

    /// Spawn geometry, once assets are loaded
    pub fn spawn_layout(&self) -> Option<&SpawnLayout> {
        self.layout.as_ref().map(|l| &l.spawn)
    }

    /// Take all feedback events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Snapshot of the session bookkeeping
    pub fn session(&self) -> GameSession {
        GameSession {
            score: self.score,
            speed_multiplier: self.speed_multiplier(),
            is_game_over: self.is_game_over(),
            is_paused: self.is_paused(),
            elapsed_since_last_difficulty_step: self.difficulty.timer(),
            elapsed_since_last_star_spawn: self.spawn.star_timer(),
            elapsed_since_last_enemy_spawn: self.spawn.enemy_timer(),
        }
    }
}
