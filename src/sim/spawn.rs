//! Procedural spawning of star waves and enemy waves
//!
//! Two independent time accumulators fire spawn routines. Their effective
//! interval is `base / speed_multiplier`, recomputed on every update, so
//! spawns get denser as the game speeds up.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pool::EntityGroup;
use super::state::{Enemy, EnemyKind, Star};
use crate::assets::{AssetKey, TextureSizes};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::viewport::Viewport;

/// Clamp that tolerates an inverted range (tiny viewports)
#[inline]
pub(crate) fn clamp_soft(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi.max(lo))
}

/// Responsive spawn geometry for the current viewport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnLayout {
    pub width: f32,
    pub height: f32,

    // Stars
    pub star_top_margin: f32,
    pub star_bottom_margin: f32,
    pub star_padding: f32,
    pub star_arc_spacing: f32,
    pub star_line_spacing: f32,
    pub star_wave_spacing: f32,
    pub star_wave_amplitude: f32,
    pub star_arc_radius_max: f32,
    pub star_size: Vec2,
    pub star_radius: f32,
    pub star_cleanup_x: f32,

    // Enemies
    pub enemy_top_margin: f32,
    pub enemy_bottom_margin: f32,
    pub lane_height: f32,
    pub lane_jitter: f32,
    pub enemy_x_offset: f32,
    pub cloud_size: Vec2,
    pub robot_size: Vec2,
    pub enemy_cleanup_x: f32,
}

impl SpawnLayout {
    pub fn new(viewport: &Viewport, textures: &TextureSizes) -> Self {
        let r = |base: f32| viewport.responsive(base);
        // Compact scales apply to the texture as-is
        let sprite = |key: AssetKey, scale: f32, compact: f32| {
            let (w, h) = textures.get(key);
            let factor = if viewport.is_compact() {
                compact
            } else {
                r(scale)
            };
            Vec2::new(w, h) * factor
        };

        let star_size = sprite(AssetKey::Star, STAR_SCALE, STAR_SCALE_COMPACT);
        Self {
            width: viewport.width,
            height: viewport.height,

            star_top_margin: r(STAR_TOP_MARGIN),
            star_bottom_margin: r(STAR_BOTTOM_MARGIN),
            star_padding: r(STAR_MARGIN_PADDING),
            star_arc_spacing: r(STAR_ARC_SPACING),
            star_line_spacing: r(STAR_HORIZONTAL_SPACING),
            star_wave_spacing: r(STAR_WAVE_SPACING),
            star_wave_amplitude: r(STAR_WAVE_AMPLITUDE),
            star_arc_radius_max: r(STAR_ARC_RADIUS_MAX),
            star_radius: star_size.x * STAR_HITBOX_RATIO,
            star_size,
            star_cleanup_x: r(STAR_CLEANUP_X),

            enemy_top_margin: r(ENEMY_TOP_MARGIN),
            enemy_bottom_margin: r(ENEMY_BOTTOM_MARGIN),
            lane_height: r(LANE_HEIGHT),
            lane_jitter: r(LANE_JITTER),
            enemy_x_offset: r(ENEMY_X_OFFSET),
            cloud_size: sprite(AssetKey::EnemyCloud, ENEMY_SCALE, ENEMY_SCALE_COMPACT),
            robot_size: sprite(AssetKey::EnemyRobot, ENEMY_SCALE, ENEMY_SCALE_COMPACT),
            enemy_cleanup_x: r(ENEMY_CLEANUP_X),
        }
    }

    /// Vertical band stars may occupy (top, bottom)
    pub fn star_band(&self) -> (f32, f32) {
        (self.star_top_margin, self.height - self.star_bottom_margin)
    }

    /// Vertical band enemies may occupy (top, bottom)
    pub fn enemy_band(&self) -> (f32, f32) {
        (self.enemy_top_margin, self.height - self.enemy_bottom_margin)
    }

    /// Number of enemy lanes, never fewer than [`MIN_LANES`]
    pub fn lane_count(&self) -> u32 {
        let (top, bottom) = self.enemy_band();
        let fit = ((bottom - top) / self.lane_height).floor();
        if fit.is_finite() && fit > MIN_LANES as f32 {
            fit as u32
        } else {
            MIN_LANES
        }
    }

    fn enemy_size(&self, kind: EnemyKind) -> Vec2 {
        match kind {
            EnemyKind::Cloud => self.cloud_size,
            EnemyKind::Robot => self.robot_size,
        }
    }
}

/// Star wave formations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StarPattern {
    /// Half sine arc around the band centre
    Arc,
    /// Flat row at a random height
    Line,
    /// Sine wave starting near the top of the band
    Wave,
}

impl StarPattern {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.random_range(0..3) {
            0 => StarPattern::Arc,
            1 => StarPattern::Line,
            _ => StarPattern::Wave,
        }
    }
}

/// What a single update spawned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub stars: usize,
    pub enemies: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnSystem {
    star_timer: f32,
    enemy_timer: f32,
    base_star_interval: f32,
    base_enemy_interval: f32,
    min_stars: u32,
    max_stars: u32,
    min_enemies: u32,
    max_enemies: u32,
    max_lane_attempts: u32,
    star_scroll_multiplier: f32,
    enemy_scroll_multiplier: f32,
    cloud_speed_factor: f32,
    robot_speed_factor: f32,
}

impl Default for SpawnSystem {
    fn default() -> Self {
        Self::new(&Tuning::default())
    }
}

impl SpawnSystem {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            star_timer: 0.0,
            enemy_timer: 0.0,
            base_star_interval: tuning.star_spawn_interval_ms,
            base_enemy_interval: tuning.enemy_spawn_interval_ms,
            min_stars: tuning.min_stars_per_wave,
            max_stars: tuning.max_stars_per_wave,
            min_enemies: tuning.min_enemies_per_wave,
            max_enemies: tuning.max_enemies_per_wave,
            max_lane_attempts: tuning.max_lane_attempts,
            star_scroll_multiplier: tuning.star_scroll_multiplier,
            enemy_scroll_multiplier: tuning.enemy_scroll_multiplier,
            cloud_speed_factor: tuning.cloud_speed_factor,
            robot_speed_factor: tuning.robot_speed_factor,
        }
    }

    pub fn effective_star_interval(&self, speed_multiplier: f32) -> f32 {
        self.base_star_interval / speed_multiplier
    }

    pub fn effective_enemy_interval(&self, speed_multiplier: f32) -> f32 {
        self.base_enemy_interval / speed_multiplier
    }

    /// Milliseconds since the last star wave
    pub fn star_timer(&self) -> f32 {
        self.star_timer
    }

    /// Milliseconds since the last enemy wave
    pub fn enemy_timer(&self) -> f32 {
        self.enemy_timer
    }

    pub fn reset(&mut self) {
        self.star_timer = 0.0;
        self.enemy_timer = 0.0;
    }

    /// Advance both timers and fire whichever waves are due
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        delta_ms: f32,
        speed_multiplier: f32,
        rng: &mut R,
        layout: &SpawnLayout,
        stars: &mut EntityGroup<Star>,
        enemies: &mut EntityGroup<Enemy>,
    ) -> SpawnReport {
        let mut report = SpawnReport::default();

        self.star_timer += delta_ms;
        if self.star_timer > self.effective_star_interval(speed_multiplier) {
            report.stars = self.spawn_star_wave(rng, layout, stars);
            self.star_timer = 0.0;
        }

        self.enemy_timer += delta_ms;
        if self.enemy_timer > self.effective_enemy_interval(speed_multiplier) {
            report.enemies = self.spawn_enemy_wave(rng, layout, enemies);
            self.enemy_timer = 0.0;
        }

        report
    }

    /// Spawn 3-5 stars in a random formation; returns how many were created
    pub fn spawn_star_wave<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        layout: &SpawnLayout,
        stars: &mut EntityGroup<Star>,
    ) -> usize {
        let count = rng.random_range(self.min_stars..=self.max_stars) as usize;
        let pattern = StarPattern::random(rng);
        let positions = star_wave_positions(pattern, count, rng, layout);

        for pos in &positions {
            stars.create(Star {
                pos: *pos,
                size: layout.star_size,
                radius: layout.star_radius,
            });
        }
        positions.len()
    }

    /// Spawn 1-2 enemies in distinct lanes; returns how many were created
    pub fn spawn_enemy_wave<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        layout: &SpawnLayout,
        enemies: &mut EntityGroup<Enemy>,
    ) -> usize {
        let wanted = rng.random_range(self.min_enemies..=self.max_enemies);
        let lanes = assign_lanes(rng, wanted, layout.lane_count(), self.max_lane_attempts);
        let (top, bottom) = layout.enemy_band();

        for &lane in &lanes {
            let lane_center = top + lane as f32 * layout.lane_height + layout.lane_height / 2.0;
            let jitter = if layout.lane_jitter > 0.0 {
                rng.random_range(-layout.lane_jitter..=layout.lane_jitter)
            } else {
                0.0
            };
            let y = clamp_soft(lane_center + jitter, top, bottom);

            let kind = if rng.random_bool(0.5) {
                EnemyKind::Cloud
            } else {
                EnemyKind::Robot
            };
            let speed_factor = match kind {
                EnemyKind::Cloud => self.cloud_speed_factor,
                EnemyKind::Robot => self.robot_speed_factor,
            };
            let size = layout.enemy_size(kind);
            enemies.create(Enemy::new(
                kind,
                speed_factor,
                Vec2::new(layout.width + layout.enemy_x_offset, y),
                size,
                size * HITBOX_SIZE_RATIO / 2.0,
            ));
        }
        lanes.len()
    }

    /// Scroll stars left, retiring those past the cleanup line
    pub fn update_stars(
        &self,
        scroll_speed: f32,
        layout: &SpawnLayout,
        stars: &mut EntityGroup<Star>,
    ) -> usize {
        let dx = scroll_speed * self.star_scroll_multiplier;
        for (_, star) in stars.iter_mut() {
            star.pos.x -= dx;
        }
        stars.retain(|s| s.pos.x >= layout.star_cleanup_x)
    }

    /// Scroll enemies left at their own speed, retiring those past the cleanup line
    pub fn update_enemies(
        &self,
        scroll_speed: f32,
        layout: &SpawnLayout,
        enemies: &mut EntityGroup<Enemy>,
    ) -> usize {
        let dx = scroll_speed * self.enemy_scroll_multiplier;
        for (_, enemy) in enemies.iter_mut() {
            enemy.pos.x -= dx * enemy.speed_factor();
        }
        enemies.retain(|e| e.pos.x >= layout.enemy_cleanup_x)
    }
}

/// Star centres for one wave, starting just past the right edge
pub fn star_wave_positions<R: Rng + ?Sized>(
    pattern: StarPattern,
    count: usize,
    rng: &mut R,
    layout: &SpawnLayout,
) -> Vec<Vec2> {
    let (top, bottom) = layout.star_band();
    let spawn_height = (bottom - top).max(0.0);
    let start_x = layout.width + layout.star_size.x / 2.0;

    let raw: Vec<Vec2> = match pattern {
        StarPattern::Arc => {
            let center_y = top + spawn_height / 2.0;
            let radius = layout.star_arc_radius_max.min(spawn_height / 3.0);
            let step = if count > 1 {
                std::f32::consts::PI / (count - 1) as f32
            } else {
                0.0
            };
            (0..count)
                .map(|i| {
                    let angle = step * i as f32 - std::f32::consts::FRAC_PI_2;
                    Vec2::new(
                        start_x + i as f32 * layout.star_arc_spacing,
                        center_y + angle.sin() * radius,
                    )
                })
                .collect()
        }
        StarPattern::Line => {
            let lo = top + layout.star_padding;
            let hi = bottom - layout.star_padding;
            let y = if hi > lo {
                rng.random_range(lo..=hi)
            } else {
                top + spawn_height / 2.0
            };
            (0..count)
                .map(|i| Vec2::new(start_x + i as f32 * layout.star_line_spacing, y))
                .collect()
        }
        StarPattern::Wave => {
            let lo = top + layout.star_padding;
            let hi = top + layout.star_bottom_margin.min(spawn_height / 2.0);
            let start_y = if hi > lo { rng.random_range(lo..=hi) } else { lo };
            (0..count)
                .map(|i| {
                    Vec2::new(
                        start_x + i as f32 * layout.star_wave_spacing,
                        start_y + (i as f32 * 0.5).sin() * layout.star_wave_amplitude,
                    )
                })
                .collect()
        }
    };

    raw.into_iter()
        .map(|p| Vec2::new(p.x, clamp_soft(p.y, top, bottom)))
        .collect()
}

/// Pick up to `wanted` distinct lanes by bounded rejection sampling
///
/// Each placement gets at most `max_attempts` random draws; a placement
/// whose draws all hit occupied lanes is skipped.
pub fn assign_lanes<R: Rng + ?Sized>(
    rng: &mut R,
    wanted: u32,
    lane_count: u32,
    max_attempts: u32,
) -> Vec<u32> {
    let mut occupied: Vec<u32> = Vec::with_capacity(wanted as usize);
    if lane_count == 0 {
        return occupied;
    }

    for _ in 0..wanted {
        if occupied.len() as u32 >= lane_count {
            break;
        }
        let mut placed = false;
        for _ in 0..max_attempts {
            let lane = rng.random_range(0..lane_count);
            if !occupied.contains(&lane) {
                occupied.push(lane);
                placed = true;
                break;
            }
        }
        if !placed {
            log::debug!(
                "No free lane after {} attempts ({} of {} occupied)",
                max_attempts,
                occupied.len(),
                lane_count
            );
        }
    }
    occupied
}
