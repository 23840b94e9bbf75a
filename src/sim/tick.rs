//! Fixed timestep simulation tick
//!
//! Core game loop that advances a run deterministically. Each tick runs the
//! same fixed sequence: player intent, spawner, enemy behavior, projectile and
//! particle motion, invulnerability countdown, collisions, purge, game over.
//! Dead entities are only removed in the purge step, so every collision check
//! within a tick sees the same set of entities.

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, circles_overlap};
use super::enemy::{self, AreaEffect, Attack};
use super::events::{AudioCue, GameEvent};
use super::particles::{self, ParticleKind};
use super::spawner::difficulty_tier;
use super::state::{Faction, Player, ProjectileVisual, RunStats, World};
use super::weapon;
use crate::consts::COOLDOWN_EPSILON;
use crate::finite_or_zero;
use crate::tuning::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerIntent {
    /// Desired movement, each axis in [-1, 1]
    pub move_vector: Vec2,
    /// Cursor position in world coordinates
    pub aim_point: Vec2,
    /// Trigger held
    pub fire: bool,
    /// Handled by the session, ignored by the tick
    pub restart_requested: bool,
    /// Handled by the session, ignored by the tick
    pub return_to_menu_requested: bool,
}

impl PlayerIntent {
    /// Movement vector with non-finite axes zeroed, axes clamped to [-1, 1]
    /// and total length clamped to 1
    pub fn movement(&self) -> Vec2 {
        finite_or_zero(self.move_vector)
            .clamp(Vec2::NEG_ONE, Vec2::ONE)
            .clamp_length_max(1.0)
    }

    /// Unit aim direction from `from`, or `None` if the aim point is unusable
    pub fn aim_direction(&self, from: Vec2) -> Option<Vec2> {
        if !self.aim_point.is_finite() {
            return None;
        }
        (self.aim_point - from).try_normalize()
    }
}

/// Particle burst queued during a tick, spawned after the purge
struct Burst {
    kind: ParticleKind,
    pos: Vec2,
    color: [u8; 3],
}

impl World {
    /// Advance this world by one fixed timestep (see [`advance`])
    pub fn advance(&mut self, intent: &PlayerIntent, dt: f32) -> Vec<GameEvent> {
        advance(self, intent, dt)
    }
}

/// Advance the world by one fixed timestep.
///
/// A non-positive or non-finite `dt`, or a world whose run has ended, leaves
/// the world untouched and returns no events.
pub fn advance(world: &mut World, intent: &PlayerIntent, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if world.terminal || !dt.is_finite() || dt <= 0.0 {
        return events;
    }

    let tuning = Arc::clone(&world.tuning);
    let mut fx: Vec<Burst> = Vec::new();

    world.time_ticks += 1;
    world.elapsed += dt;

    // 1. Player movement, aim and weapon
    apply_intent(world, &tuning, intent, dt, &mut events);

    // 2. Wave director
    let spawned = world.spawner.advance(
        dt,
        world.elapsed,
        world.score,
        world.player.pos,
        &tuning,
        &mut world.rng,
    );
    for enemy in spawned {
        world.add_enemy(enemy);
    }
    let tier = difficulty_tier(world.elapsed, world.score, &tuning.spawner);
    if tier != world.tier {
        log::info!("Difficulty tier {} -> {} at {:.1}s", world.tier, tier, world.elapsed);
        world.tier = tier;
    }

    // 3. Enemy behavior
    let player_pos = world.player.pos;
    let mut pulses: Vec<AreaEffect> = Vec::new();
    let mut thorns = Vec::new();
    for enemy in world.enemies.iter_mut() {
        let action = enemy::update(enemy, dt, player_pos, &tuning.enemies);
        enemy.vel = action.velocity;
        enemy.pos += enemy.vel * dt;
        match action.attack {
            Some(Attack::Projectile(spawn)) => thorns.push(spawn),
            Some(Attack::Pulse(area)) => {
                fx.push(Burst {
                    kind: ParticleKind::SporeCloud,
                    pos: area.center,
                    color: tuning.enemies.profile(enemy.kind).color,
                });
                pulses.push(area);
            }
            None => {}
        }
    }
    for spawn in thorns {
        world.add_projectile(Faction::Enemy, ProjectileVisual::Thorn, spawn);
    }

    // 4. Projectiles
    for proj in world.projectiles.iter_mut() {
        proj.pos += proj.vel * dt;
        proj.lifetime -= dt;
    }

    // 5. Particles
    particles::update(&mut world.particles, dt, tuning.particles.shrink_rate);

    // 6. Post-hit grace
    world.player.invulnerable = (world.player.invulnerable - dt).max(0.0);

    // 7. Collisions
    resolve_collisions(world, &tuning, &pulses, &mut fx, &mut events);

    // 8. Purge
    purge(world, &tuning, &mut fx, &mut events);
    emit_bursts(world, &tuning, fx, &mut events);

    // 9. Game over
    if !world.player.is_alive() {
        world.terminal = true;
        events.push(GameEvent::Audio(AudioCue::GameOver));
        log::info!(
            "Game over after {:.1}s: score {}, {} kills",
            world.elapsed,
            world.score,
            world.stats.enemies_killed
        );
    }

    // Ensure deterministic ordering
    world.normalize_order();
    events
}

fn apply_intent(
    world: &mut World,
    tuning: &Tuning,
    intent: &PlayerIntent,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    let walkable = tuning.playfield.bounds().inset(world.player.radius);
    let player = &mut world.player;

    player.vel = intent.movement() * tuning.player.speed;
    player.pos = walkable.clamp_point(player.pos + player.vel * dt);
    if let Some(dir) = intent.aim_direction(player.pos) {
        player.aim = dir;
    }

    player.weapon_cooldown = (player.weapon_cooldown - dt).max(0.0);
    if !intent.fire || player.weapon_cooldown > COOLDOWN_EPSILON {
        return;
    }

    let kind = player.weapon;
    let archetype = tuning.weapons.get(kind);
    let shots = weapon::fire(archetype, player.pos, player.aim);
    player.weapon_cooldown = archetype.fire_interval;

    world.stats.shots_fired += 1;
    for spawn in shots {
        world.add_projectile(Faction::Player, ProjectileVisual::Weapon(kind), spawn);
    }
    events.push(GameEvent::Audio(AudioCue::ShotFired));
}

/// Apply damage to the player unless the grace timer is running.
/// Returns whether the hit landed.
fn damage_player(
    player: &mut Player,
    amount: i32,
    grace: f32,
    stats: &mut RunStats,
    events: &mut Vec<GameEvent>,
) -> bool {
    if amount <= 0 || player.is_invulnerable() || !player.is_alive() {
        return false;
    }
    player.health = (player.health - amount).max(0);
    player.invulnerable = grace;
    stats.damage_taken += amount;
    events.push(GameEvent::Audio(AudioCue::PlayerHit));
    true
}

/// Spore pulse / burst against the player: knockback always, damage subject to grace
fn apply_area(
    player: &mut Player,
    area: &AreaEffect,
    walkable: &Rect,
    grace: f32,
    stats: &mut RunStats,
    events: &mut Vec<GameEvent>,
) {
    if player.pos.distance(area.center) >= area.radius + player.radius {
        return;
    }
    if area.knockback > 0.0 {
        let away = (player.pos - area.center).try_normalize().unwrap_or(Vec2::X);
        player.pos = walkable.clamp_point(player.pos + away * area.knockback);
    }
    damage_player(player, area.damage, grace, stats, events);
}

fn resolve_collisions(
    world: &mut World,
    tuning: &Tuning,
    pulses: &[AreaEffect],
    fx: &mut Vec<Burst>,
    events: &mut Vec<GameEvent>,
) {
    let grace = tuning.player.invulnerability;
    let walkable = tuning.playfield.bounds().inset(world.player.radius);
    let World {
        player,
        enemies,
        projectiles,
        stats,
        ..
    } = world;

    for proj in projectiles.iter_mut() {
        if proj.is_spent() {
            continue;
        }
        match proj.owner {
            Faction::Player => {
                for enemy in enemies.iter_mut() {
                    // Already-fallen enemies stop being targets for the rest of the tick
                    if enemy.is_dead() || proj.hits.contains(&enemy.id) {
                        continue;
                    }
                    if !circles_overlap(proj.pos, proj.radius, enemy.pos, enemy.radius) {
                        continue;
                    }
                    enemy.health -= proj.damage;
                    proj.hits.push(enemy.id);
                    events.push(GameEvent::Audio(AudioCue::EnemyHit));
                    fx.push(Burst {
                        kind: ParticleKind::HitSpark,
                        pos: proj.pos,
                        color: proj.visual.color(),
                    });
                    if proj.pierce > 0 {
                        proj.pierce -= 1;
                    } else {
                        proj.consumed = true;
                        break;
                    }
                }
            }
            Faction::Enemy => {
                if circles_overlap(proj.pos, proj.radius, player.pos, player.radius) {
                    // Spent even if the grace timer swallows the damage
                    proj.consumed = true;
                    let damage = proj.damage.round() as i32;
                    if damage_player(player, damage, grace, stats, events) {
                        fx.push(Burst {
                            kind: ParticleKind::HitSpark,
                            pos: proj.pos,
                            color: proj.visual.color(),
                        });
                    }
                }
            }
        }
    }

    for enemy in enemies.iter() {
        if enemy.is_dead() {
            continue;
        }
        if circles_overlap(enemy.pos, enemy.radius, player.pos, player.radius) {
            let profile = tuning.enemies.profile(enemy.kind);
            damage_player(player, profile.contact_damage, grace, stats, events);
        }
    }

    for area in pulses {
        apply_area(player, area, &walkable, grace, stats, events);
    }
}

fn purge(world: &mut World, tuning: &Tuning, fx: &mut Vec<Burst>, events: &mut Vec<GameEvent>) {
    let bounds = tuning.playfield.bounds();
    let despawn_zone = bounds.expand(tuning.playfield.despawn_margin);

    let mut fallen = Vec::new();
    let mut wandered = 0;
    world.enemies.retain(|enemy| {
        if enemy.is_dead() {
            fallen.push(enemy.clone());
            false
        } else if !despawn_zone.contains(enemy.pos) {
            wandered += 1;
            false
        } else {
            true
        }
    });
    world.stats.enemies_despawned += wandered;

    let grace = tuning.player.invulnerability;
    let walkable = bounds.inset(world.player.radius);
    for enemy in &fallen {
        let profile = tuning.enemies.profile(enemy.kind);
        world.score += profile.score;
        world.stats.enemies_killed += 1;
        events.push(GameEvent::Audio(AudioCue::EnemyKilled));
        fx.push(Burst {
            kind: ParticleKind::DeathBurst,
            pos: enemy.pos,
            color: profile.color,
        });

        if let Some(area) = enemy::death_effect(enemy, &tuning.enemies) {
            fx.push(Burst {
                kind: ParticleKind::SporeCloud,
                pos: area.center,
                color: profile.color,
            });
            apply_area(
                &mut world.player,
                &area,
                &walkable,
                grace,
                &mut world.stats,
                events,
            );
        }
    }

    world
        .projectiles
        .retain(|p| !p.is_spent() && bounds.contains(p.pos));
    world.particles.retain(|p| p.is_alive());
}

fn emit_bursts(world: &mut World, tuning: &Tuning, fx: Vec<Burst>, events: &mut Vec<GameEvent>) {
    for burst in fx {
        let spawned = particles::burst(
            burst.kind,
            burst.pos,
            burst.color,
            &tuning.particles,
            &mut world.fx_rng,
        );
        world.particles.extend(spawned);
        events.push(GameEvent::Particles {
            kind: burst.kind,
            pos: burst.pos,
        });
    }
    particles::enforce_cap(&mut world.particles, tuning.particles.max_particles);
}
