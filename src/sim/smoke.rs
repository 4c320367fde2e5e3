//! Exhaust trail behind the craft
//!
//! Puffs are emitted on a fixed cadence while the craft flies, then drift
//! backwards, grow and fade out over their lifetime.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::viewport::Viewport;

/// A single smoke particle
#[derive(Debug, Clone, PartialEq)]
pub struct Puff {
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    pub age_ms: f32,
}

impl Puff {
    /// 0 at birth, 1 at expiry
    pub fn progress(&self) -> f32 {
        (self.age_ms / SMOKE_LIFETIME_MS).clamp(0.0, 1.0)
    }

    pub fn alpha(&self) -> f32 {
        SMOKE_ALPHA_START * (1.0 - self.progress())
    }

    /// Scale relative to the smoke texture
    pub fn scale(&self) -> f32 {
        SMOKE_SCALE_START + (SMOKE_SCALE_END - SMOKE_SCALE_START) * self.progress()
    }
}

#[derive(Debug, Clone)]
pub struct SmokeTrail {
    puffs: Vec<Puff>,
    emit_timer: f32,
    emitting: bool,
    // Own stream: puff count varies with frame rate, spawn placement must not
    rng: Pcg32,
}

impl SmokeTrail {
    pub fn new(seed: u64) -> Self {
        Self {
            puffs: Vec::new(),
            emit_timer: 0.0,
            emitting: true,
            rng: Pcg32::seed_from_u64(seed ^ SMOKE_SEED_SALT),
        }
    }

    pub fn puffs(&self) -> &[Puff] {
        &self.puffs
    }

    pub fn len(&self) -> usize {
        self.puffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puffs.is_empty()
    }

    pub fn is_emitting(&self) -> bool {
        self.emitting
    }

    /// Stop emitting; live puffs keep fading
    pub fn stop(&mut self) {
        self.emitting = false;
        self.emit_timer = 0.0;
    }

    /// Age and move live puffs, then emit behind `anchor` if due
    pub fn update(&mut self, delta_ms: f32, anchor: Vec2, viewport: &Viewport) {
        let dt = delta_ms / 1000.0;
        for puff in &mut self.puffs {
            puff.age_ms += delta_ms;
            puff.pos += puff.vel * dt;
        }
        self.puffs.retain(|p| p.age_ms < SMOKE_LIFETIME_MS);

        if !self.emitting {
            return;
        }
        self.emit_timer += delta_ms;
        let due = (self.emit_timer / SMOKE_INTERVAL_MS) as u32;
        self.emit_timer %= SMOKE_INTERVAL_MS;
        for _ in 0..due.min(SMOKE_MAX_BURST) {
            self.emit(anchor, viewport);
        }
    }

    fn emit(&mut self, anchor: Vec2, viewport: &Viewport) {
        let spread = SMOKE_SPREAD_DEG.to_radians();
        let angle = std::f32::consts::PI + self.rng.random_range(-spread..=spread);
        let speed = self.rng.random_range(SMOKE_SPEED_MIN..=SMOKE_SPEED_MAX);
        self.puffs.push(Puff {
            pos: anchor + Vec2::new(viewport.responsive(SMOKE_OFFSET_X), 0.0),
            vel: Vec2::from_angle(angle) * viewport.responsive(speed),
            age_ms: 0.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHOR: Vec2 = Vec2::new(250.0, 400.0);

    fn viewport() -> Viewport {
        Viewport::new(1920.0, 1080.0)
    }

    #[test]
    fn test_emits_on_cadence_behind_anchor() {
        let mut trail = SmokeTrail::new(1);
        trail.update(16.0, ANCHOR, &viewport());
        assert!(trail.is_empty());

        trail.update(16.0, ANCHOR, &viewport());
        assert_eq!(trail.len(), 1);
        let puff = &trail.puffs()[0];
        assert_eq!(puff.pos, ANCHOR + Vec2::new(SMOKE_OFFSET_X, 0.0));
        assert!(puff.vel.x < 0.0);
        assert_eq!(puff.alpha(), SMOKE_ALPHA_START);
    }

    #[test]
    fn test_puffs_grow_fade_and_expire() {
        let mut trail = SmokeTrail::new(2);
        trail.update(SMOKE_INTERVAL_MS, ANCHOR, &viewport());
        trail.stop();

        trail.update(SMOKE_LIFETIME_MS / 2.0, ANCHOR, &viewport());
        let puff = &trail.puffs()[0];
        assert!((puff.alpha() - SMOKE_ALPHA_START / 2.0).abs() < 1e-4);
        assert!(puff.scale() > SMOKE_SCALE_START && puff.scale() < SMOKE_SCALE_END);
        assert!(puff.pos.x < ANCHOR.x + SMOKE_OFFSET_X);

        trail.update(SMOKE_LIFETIME_MS / 2.0, ANCHOR, &viewport());
        assert!(trail.is_empty());
    }

    #[test]
    fn test_stop_ends_emission() {
        let mut trail = SmokeTrail::new(3);
        for _ in 0..10 {
            trail.update(16.0, ANCHOR, &viewport());
        }
        let live = trail.len();
        assert!(live > 0);

        trail.stop();
        assert!(!trail.is_emitting());
        trail.update(100.0, ANCHOR, &viewport());
        assert!(trail.len() <= live);
    }

    #[test]
    fn test_long_frame_emits_bounded_burst() {
        let mut trail = SmokeTrail::new(4);
        trail.update(60_000.0, ANCHOR, &viewport());
        assert_eq!(trail.len(), SMOKE_MAX_BURST as usize);
    }

    #[test]
    fn test_same_seed_same_trail() {
        let mut a = SmokeTrail::new(9);
        let mut b = SmokeTrail::new(9);
        for _ in 0..50 {
            a.update(16.0, ANCHOR, &viewport());
            b.update(16.0, ANCHOR, &viewport());
        }
        assert_eq!(a.puffs(), b.puffs());
    }
}
