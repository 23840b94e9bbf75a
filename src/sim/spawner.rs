//! Wave director: time- and score-driven enemy spawning
//!
//! The difficulty curve is formulaic. Elapsed time and score raise the tier,
//! which shortens the spawn interval (down to a floor), grows the group size,
//! scales enemy health and speed, and shifts the mix toward tougher kinds.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::enemy::{EnemyKind, EnemyTable};
use super::state::Enemy;
use crate::tuning::Tuning;

/// Difficulty curve parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnerTuning {
    /// Delay before the first group (0 = first tick)
    pub initial_delay: f32,
    /// Spawn interval at the start of a run (seconds)
    pub base_interval: f32,
    /// Interval never drops below this
    pub min_interval: f32,
    /// Interval shrink per second of run time
    pub interval_decay_per_second: f32,
    /// Interval shrink per point of score
    pub interval_decay_per_point: f32,
    /// Group size grows by one every this many seconds
    pub group_growth_seconds: f32,
    pub max_group: u32,
    /// One tier per this many seconds...
    pub tier_seconds: f32,
    /// ...plus one tier per this many points
    pub tier_score: u64,
    pub max_tier: u32,
    /// Health multiplier gained per tier
    pub health_per_tier: f32,
    /// Speed multiplier gained per tier
    pub speed_per_tier: f32,
    /// Sproutling weight moved to tougher kinds per tier
    pub weight_shift_per_tier: f32,
    /// Preferred minimum distance between a spawn point and the player
    pub safe_distance: f32,
    /// Edge points sampled when looking for a safe spawn
    pub spawn_attempts: u32,
}

impl Default for SpawnerTuning {
    fn default() -> Self {
        Self {
            initial_delay: 0.0,
            base_interval: 1.4,
            min_interval: 0.4,
            interval_decay_per_second: 0.01,
            interval_decay_per_point: 0.001,
            group_growth_seconds: 12.0,
            max_group: 6,
            tier_seconds: 20.0,
            tier_score: 100,
            max_tier: 10,
            health_per_tier: 0.1,
            speed_per_tier: 0.04,
            weight_shift_per_tier: 0.03,
            safe_distance: 260.0,
            spawn_attempts: 6,
        }
    }
}

/// Difficulty tier for a point in the run
pub fn difficulty_tier(elapsed: f32, score: u64, t: &SpawnerTuning) -> u32 {
    let from_time = (elapsed.max(0.0) / t.tier_seconds).floor() as u32;
    let from_score = (score / t.tier_score.max(1)).min(u64::from(u32::MAX)) as u32;
    from_time.saturating_add(from_score).min(t.max_tier)
}

/// Seconds until the next group
pub fn spawn_interval(elapsed: f32, score: u64, t: &SpawnerTuning) -> f32 {
    let shrink = elapsed.max(0.0) * t.interval_decay_per_second
        + score as f32 * t.interval_decay_per_point;
    (t.base_interval - shrink).max(t.min_interval)
}

/// Enemies per group
pub fn group_size(elapsed: f32, t: &SpawnerTuning) -> u32 {
    let growth = (elapsed.max(0.0) / t.group_growth_seconds).floor() as u32;
    (1 + growth).min(t.max_group.max(1))
}

/// Spawn weights in [`EnemyKind::ALL`] order
pub fn kind_weights(tier: u32, enemies: &EnemyTable, t: &SpawnerTuning) -> [f32; 3] {
    let base = enemies.sproutling.spawn_weight;
    let floor = base * 0.4;
    let moved = (t.weight_shift_per_tier * tier as f32).min(base - floor);
    [
        base - moved,
        enemies.root_beast.spawn_weight + moved * 2.0 / 3.0,
        enemies.sporeshroom.spawn_weight + moved / 3.0,
    ]
}

fn pick_kind<R: Rng>(weights: &[f32; 3], rng: &mut R) -> EnemyKind {
    let total: f32 = weights.iter().sum();
    if total <= 0.0 {
        return EnemyKind::Sproutling;
    }
    let mut roll = rng.random_range(0.0..total);
    for (kind, &w) in EnemyKind::ALL.iter().zip(weights.iter()) {
        if roll < w {
            return *kind;
        }
        roll -= w;
    }
    EnemyKind::ALL[2]
}

/// A random point just outside one playfield edge
fn edge_point<R: Rng>(bounds: &Rect, offset: f32, rng: &mut R) -> Vec2 {
    let x = rng.random_range(bounds.min.x..=bounds.max.x);
    let y = rng.random_range(bounds.min.y..=bounds.max.y);
    match rng.random_range(0..4u8) {
        0 => Vec2::new(x, bounds.min.y - offset),
        1 => Vec2::new(x, bounds.max.y + offset),
        2 => Vec2::new(bounds.min.x - offset, y),
        _ => Vec2::new(bounds.max.x + offset, y),
    }
}

/// Edge spawn point, preferring ones away from the player.
///
/// Takes the first candidate at least `safe_distance` from the player, or the
/// farthest candidate if none qualifies.
pub fn spawn_point<R: Rng>(
    bounds: &Rect,
    offset: f32,
    player_pos: Vec2,
    t: &SpawnerTuning,
    rng: &mut R,
) -> Vec2 {
    let mut best = edge_point(bounds, offset, rng);
    let mut best_dist = best.distance(player_pos);
    for _ in 1..t.spawn_attempts.max(1) {
        if best_dist >= t.safe_distance {
            break;
        }
        let candidate = edge_point(bounds, offset, rng);
        let dist = candidate.distance(player_pos);
        if dist > best_dist {
            best = candidate;
            best_dist = dist;
        }
    }
    best
}

/// Spawn timer state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Seconds until the next group
    pub timer: f32,
    /// Groups spawned so far
    pub waves: u32,
}

impl Spawner {
    pub fn new(t: &SpawnerTuning) -> Self {
        Self {
            timer: t.initial_delay,
            waves: 0,
        }
    }

    /// Count down by `dt`; returns the enemies of any group that came due.
    ///
    /// Returned enemies carry id 0; the world assigns real ids on insert.
    /// A non-positive `dt` never spawns.
    pub fn advance<R: Rng>(
        &mut self,
        dt: f32,
        elapsed: f32,
        score: u64,
        player_pos: Vec2,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Vec<Enemy> {
        if !(dt > 0.0) {
            return Vec::new();
        }
        self.timer -= dt;
        if self.timer > 0.0 {
            return Vec::new();
        }

        let t = &tuning.spawner;
        let bounds = tuning.playfield.bounds();
        let tier = difficulty_tier(elapsed, score, t);
        let weights = kind_weights(tier, &tuning.enemies, t);
        let health_scale = 1.0 + t.health_per_tier * tier as f32;
        let speed_scale = 1.0 + t.speed_per_tier * tier as f32;
        let count = group_size(elapsed, t);

        let group: Vec<Enemy> = (0..count)
            .map(|_| {
                let kind = pick_kind(&weights, rng);
                let radius = tuning.enemies.profile(kind).radius;
                let pos = spawn_point(&bounds, radius, player_pos, t, rng);
                Enemy::new(0, kind, pos, &tuning.enemies, health_scale, speed_scale)
            })
            .collect();

        self.timer = spawn_interval(elapsed, score, t);
        self.waves += 1;
        log::debug!(
            "Wave {}: {} enemies, tier {}, next in {:.2}s",
            self.waves,
            group.len(),
            tier,
            self.timer
        );
        group
    }
}
