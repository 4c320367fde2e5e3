//! Per-frame simulation tick
//!
//! Advances a [`GameScene`] by one rendered frame. Given the same seed and
//! the same sequence of inputs and deltas, the outcome is identical.

use glam::Vec2;

use super::collision::Shape;
use super::pool::EntityId;
use super::scene::GameScene;
use super::state::GamePhase;
use crate::consts::*;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Active pointer/touch position; takes priority over keys
    pub pointer: Option<Vec2>,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Pause toggle (button, Escape or P)
    pub toggle_pause: bool,
    /// Demo mode - steer automatically
    pub autopilot: bool,
}

impl GameScene {
    /// Advance the scene by one frame of `delta_ms` milliseconds
    pub fn tick(&mut self, input: &TickInput, delta_ms: f32) {
        tick(self, input, delta_ms);
    }
}

/// Advance the scene by one frame
pub fn tick(scene: &mut GameScene, input: &TickInput, delta_ms: f32) {
    if !scene.is_ready() {
        return;
    }

    // A bad delta must not poison timers or the multiplier
    let delta_ms = if delta_ms.is_finite() && delta_ms >= 0.0 {
        delta_ms
    } else {
        log::warn!("Ignoring invalid frame delta {}", delta_ms);
        0.0
    };

    if input.toggle_pause {
        scene.toggle_pause();
    }

    match scene.phase {
        GamePhase::Paused => return,
        GamePhase::GameOver => {
            // Trail is stopped; remaining puffs fade out
            scene
                .smoke
                .update(delta_ms, scene.player.pos, &scene.viewport);
            scene.advance_report(delta_ms);
            return;
        }
        GamePhase::Playing => {}
    }

    // Player movement
    let target = if input.autopilot {
        autopilot_target(scene)
    } else {
        input.pointer
    };
    steer(scene, input, target, delta_ms / 1000.0);
    scene
        .smoke
        .update(delta_ms, scene.player.pos, &scene.viewport);

    // Difficulty first; everything below reads its multiplier
    scene.difficulty.update(delta_ms);
    let speed_multiplier = scene.difficulty.speed_multiplier();
    scene.parallax.update(speed_multiplier);

    if let Some(layout) = scene.layout.as_ref() {
        let spawn_layout = &layout.spawn;
        scene.spawn.update(
            delta_ms,
            speed_multiplier,
            &mut scene.rng,
            spawn_layout,
            &mut scene.stars,
            &mut scene.enemies,
        );
        let scroll_speed = scene.tuning.base_scroll * speed_multiplier;
        scene
            .spawn
            .update_stars(scroll_speed, spawn_layout, &mut scene.stars);
        scene
            .spawn
            .update_enemies(scroll_speed, spawn_layout, &mut scene.enemies);
    }

    // Collisions
    let player = Shape::Box(scene.player.hitbox());

    let collected: Vec<EntityId> = scene
        .stars
        .iter()
        .filter(|(_, star)| player.overlaps(&Shape::Circle(star.hitbox())))
        .map(|(id, _)| id)
        .collect();
    for id in collected {
        scene.collect_star(id);
    }

    let crashed = scene
        .enemies
        .iter()
        .any(|(_, enemy)| player.overlaps(&Shape::Box(enemy.hitbox())));
    if crashed {
        scene.hit_enemy();
    }
}

/// Map input to velocity and integrate the player's position
fn steer(scene: &mut GameScene, input: &TickInput, target: Option<Vec2>, dt: f32) {
    let speed = scene.viewport.responsive(scene.tuning.player_move_speed);
    let deadzone = scene.viewport.responsive(scene.tuning.touch_deadzone);
    let pos = scene.player.pos;

    let vel = match target {
        Some(target) => {
            let to_target = target - pos;
            let distance = to_target.length();
            if distance <= deadzone {
                Vec2::ZERO
            } else if dt > 0.0 && distance <= speed * dt {
                // Land on the target instead of overshooting it
                to_target / dt
            } else {
                to_target / distance * speed
            }
        }
        None => {
            // Left wins over right, up over down
            let x = if input.left {
                -1.0
            } else if input.right {
                1.0
            } else {
                0.0
            };
            let y = if input.up {
                -1.0
            } else if input.down {
                1.0
            } else {
                0.0
            };
            Vec2::new(x, y) * speed
        }
    };

    scene.player.vel = vel;
    scene.player.pos += vel * dt;
    scene.clamp_player();
}

/// Pick a steering target for demo mode
///
/// Dodges the nearest enemy closing in on the craft's row, otherwise lines
/// up with the next star.
fn autopilot_target(scene: &GameScene) -> Option<Vec2> {
    let player = &scene.player;
    let vp = scene.viewport;
    let look_ahead = vp.responsive(AUTOPILOT_LOOK_AHEAD);
    let clearance = vp.responsive(AUTOPILOT_CLEARANCE);

    let threat = scene
        .enemies
        .iter()
        .map(|(_, e)| e)
        .filter(|e| {
            let ahead = e.pos.x + e.half_extents.x > player.pos.x - player.half_extents.x
                && e.pos.x - player.pos.x < look_ahead;
            let reach = e.half_extents.y + player.half_extents.y + clearance;
            let in_row = (e.pos.y - player.pos.y).abs() < reach;
            ahead && in_row
        })
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    if let Some(enemy) = threat {
        let dodge = enemy.half_extents.y + player.half_extents.y + clearance;
        let above = enemy.pos.y - dodge;
        let below = enemy.pos.y + dodge;
        let floor = vp.height - vp.responsive(PLAYER_GROUND_MARGIN);
        let above_ok = above >= player.size.y / 2.0;
        let below_ok = below <= floor;

        let y = match (above_ok, below_ok) {
            (true, true) => {
                if (above - player.pos.y).abs() <= (below - player.pos.y).abs() {
                    above
                } else {
                    below
                }
            }
            (true, false) => above,
            (false, true) => below,
            (false, false) => player.pos.y,
        };
        return Some(Vec2::new(player.pos.x, y));
    }

    scene
        .stars
        .iter()
        .map(|(_, s)| s)
        .filter(|s| s.pos.x > player.pos.x)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
        .map(|s| Vec2::new(player.pos.x, s.pos.y))
}
