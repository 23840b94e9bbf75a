//! Demo mode: a scripted player
//!
//! Produces a [`PlayerIntent`] from the current world only, so an autopilot run
//! is as deterministic as a recorded one. Used by the headless binary.

use std::cmp::Ordering;

use glam::Vec2;

use crate::sim::{Enemy, Faction, PlayerIntent, World};

/// Extra clearance kept around enemy bodies (px)
const BODY_CLEARANCE: f32 = 90.0;
/// Enemy projectiles closer than this are dodged (px)
const DODGE_RADIUS: f32 = 80.0;

/// Intent for the next tick
pub fn autopilot_intent(world: &World) -> PlayerIntent {
    let player = &world.player;
    let bounds = world.bounds();
    let archetype = world.tuning.weapons.get(player.weapon);

    // Nearest living enemy, ties broken by id order
    let target = world
        .enemies
        .iter()
        .filter(|e| !e.is_dead())
        .min_by(|a, b| {
            a.pos
                .distance_squared(player.pos)
                .partial_cmp(&b.pos.distance_squared(player.pos))
                .unwrap_or(Ordering::Equal)
        });

    // Push away from anything about to touch us
    let mut flee = Vec2::ZERO;
    for enemy in world.enemies.iter().filter(|e| !e.is_dead()) {
        let away = player.pos - enemy.pos;
        let danger = enemy.radius + player.radius + BODY_CLEARANCE;
        let dist = away.length();
        if dist < danger {
            flee += away.normalize_or_zero() * (1.0 - dist / danger);
        }
    }
    for proj in world.projectiles.iter().filter(|p| p.owner == Faction::Enemy) {
        let away = player.pos - proj.pos;
        let closing = proj.vel.dot(away) > 0.0;
        let dist = away.length();
        if closing && dist < DODGE_RADIUS {
            // Step sideways out of the thorn's path
            let side = proj.vel.perp().normalize_or_zero();
            let side = if side.dot(away) >= 0.0 { side } else { -side };
            flee += side * (1.0 - dist / DODGE_RADIUS);
        }
    }

    // Drift back toward the middle so corners don't pin us
    let home = (bounds.center() - player.pos) / bounds.width().max(1.0);

    // Oscillating strafe to avoid perfect loops
    let time_factor = world.time_ticks as f32 * 0.01;
    let wobble = time_factor.sin() * 0.3 + (time_factor * 0.7).sin() * 0.15;
    let strafe = player.aim.perp() * wobble;

    let move_vector = (flee * 2.0 + home + strafe).clamp_length_max(1.0);

    let (aim_point, fire) = match target {
        Some(enemy) => (
            lead_target(enemy, player.pos, archetype.projectile_speed),
            enemy.pos.distance(player.pos) <= archetype.range() * 1.1,
        ),
        None => (player.pos + player.aim * 100.0, false),
    };

    PlayerIntent {
        move_vector,
        aim_point,
        fire,
        ..Default::default()
    }
}

/// Where to aim so a projectile meets a target moving at constant velocity
fn lead_target(enemy: &Enemy, from: Vec2, projectile_speed: f32) -> Vec2 {
    let flight_time = enemy.pos.distance(from) / projectile_speed.max(1.0);
    enemy.pos + enemy.vel * flight_time
}
