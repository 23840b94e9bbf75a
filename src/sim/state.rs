//! Game state and core simulation types
//!
//! Everything a run needs to continue deterministically lives in [`World`],
//! including both RNG streams, so a serialized world replays identically.

use std::sync::Arc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::enemy::{EnemyKind, EnemyTable};
use super::particles::Particle;
use super::snapshot::WorldSnapshot;
use super::spawner::Spawner;
use super::weapon::{ProjectileSpawn, WeaponKind};
use crate::tuning::Tuning;

/// Which side fired a projectile (decides what it can hit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

/// Render variant of a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileVisual {
    Weapon(WeaponKind),
    /// Root Beast thorn
    Thorn,
}

impl ProjectileVisual {
    /// Render hint, also used to tint hit sparks
    pub fn color(&self) -> [u8; 3] {
        match self {
            ProjectileVisual::Weapon(kind) => kind.color(),
            ProjectileVisual::Thorn => [205, 120, 60],
        }
    }
}

/// The garden's guardian
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Unit aim direction
    pub aim: Vec2,
    pub radius: f32,
    pub health: i32,
    pub max_health: i32,
    /// Fixed for the whole run
    pub weapon: WeaponKind,
    /// Seconds until the weapon can fire again
    pub weapon_cooldown: f32,
    /// Seconds of post-hit grace remaining
    pub invulnerable: f32,
}

impl Player {
    pub fn new(pos: Vec2, weapon: WeaponKind, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            aim: Vec2::X,
            radius: tuning.player.radius,
            health: tuning.player.max_health,
            max_health: tuning.player.max_health,
            weapon,
            weapon_cooldown: 0.0,
            invulnerable: 0.0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0.0
    }
}

/// A garden pest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub health: f32,
    pub max_health: f32,
    /// Movement speed after difficulty scaling
    pub speed: f32,
    pub radius: f32,
    /// Seconds until the next thorn burst / spore pulse
    pub attack_cooldown: f32,
    /// Remaining pulse telegraph time (Sporeshroom only)
    pub pulse_flash: f32,
}

impl Enemy {
    pub fn new(
        id: u32,
        kind: EnemyKind,
        pos: Vec2,
        table: &EnemyTable,
        health_scale: f32,
        speed_scale: f32,
    ) -> Self {
        let profile = table.profile(kind);
        let health = profile.health * health_scale;
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            health,
            max_health: health,
            speed: profile.speed * speed_scale,
            radius: profile.radius,
            attack_cooldown: table.initial_cooldown(kind),
            pulse_flash: 0.0,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// A seed, thorn or sunbeam in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub owner: Faction,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    pub radius: f32,
    /// Seconds remaining
    pub lifetime: f32,
    /// Further targets this projectile may pass through
    pub pierce: u32,
    /// Set once the projectile has spent its last hit
    pub consumed: bool,
    /// Enemy ids already damaged by this projectile
    pub hits: Vec<u32>,
    pub visual: ProjectileVisual,
}

impl Projectile {
    pub fn from_spawn(
        id: u32,
        owner: Faction,
        visual: ProjectileVisual,
        spawn: ProjectileSpawn,
    ) -> Self {
        Self {
            id,
            owner,
            pos: spawn.pos,
            vel: spawn.vel,
            damage: spawn.damage,
            radius: spawn.radius,
            lifetime: spawn.lifetime,
            pierce: spawn.pierce,
            consumed: false,
            hits: Vec::new(),
            visual,
        }
    }

    #[inline]
    pub fn is_spent(&self) -> bool {
        self.consumed || self.lifetime <= 0.0
    }
}

/// Per-run counters, shown on the results screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// Trigger pulls that produced projectiles
    pub shots_fired: u32,
    pub projectiles_spawned: u32,
    pub enemies_spawned: u32,
    pub enemies_killed: u32,
    /// Enemies that wandered off the playfield
    pub enemies_despawned: u32,
    pub damage_taken: i32,
}

/// Complete game state for one run (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Shared balance data, read-only for the whole run
    pub tuning: Arc<Tuning>,
    pub player: Player,
    /// Live enemies (sorted by id for determinism)
    pub enemies: Vec<Enemy>,
    /// Live projectiles (sorted by id for determinism)
    pub projectiles: Vec<Projectile>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Seconds of simulated run time
    pub elapsed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub score: u64,
    /// Current difficulty tier
    pub tier: u32,
    pub spawner: Spawner,
    pub stats: RunStats,
    /// Set once the player has fallen; no further ticks run
    pub terminal: bool,
    /// Gameplay RNG (spawner rolls)
    pub(crate) rng: Pcg32,
    /// Cosmetic RNG (particles only)
    pub(crate) fx_rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

/// Stream offset so the cosmetic RNG never mirrors the gameplay one
const FX_SEED_SALT: u64 = 0x5EED_F00D_CAFE_B0BA;

impl World {
    /// Start a fresh run. `tuning` is expected to have passed validation.
    pub fn new(tuning: Arc<Tuning>, weapon: WeaponKind, seed: u64) -> Self {
        debug_assert!(tuning.validate().is_ok());
        let bounds = tuning.playfield.bounds();
        let player = Player::new(bounds.center(), weapon, &tuning);
        let spawner = Spawner::new(&tuning.spawner);

        log::info!("New run: weapon={}, seed={}", weapon.as_str(), seed);

        Self {
            seed,
            player,
            enemies: Vec::with_capacity(64),
            projectiles: Vec::with_capacity(128),
            particles: Vec::with_capacity(tuning.particles.max_particles),
            elapsed: 0.0,
            time_ticks: 0,
            score: 0,
            tier: 0,
            spawner,
            stats: RunStats::default(),
            terminal: false,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ FX_SEED_SALT),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Playfield rectangle
    pub fn bounds(&self) -> Rect {
        self.tuning.playfield.bounds()
    }

    /// Insert an enemy, assigning it a fresh id. Returns the id.
    pub fn add_enemy(&mut self, mut enemy: Enemy) -> u32 {
        enemy.id = self.next_entity_id();
        let id = enemy.id;
        self.enemies.push(enemy);
        self.stats.enemies_spawned += 1;
        id
    }

    /// Insert a projectile. Returns its id.
    pub fn add_projectile(
        &mut self,
        owner: Faction,
        visual: ProjectileVisual,
        spawn: ProjectileSpawn,
    ) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile::from_spawn(id, owner, visual, spawn));
        if owner == Faction::Player {
            self.stats.projectiles_spawned += 1;
        }
        id
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> WorldSnapshot<'_> {
        WorldSnapshot {
            player: &self.player,
            enemies: &self.enemies,
            projectiles: &self.projectiles,
            particles: &self.particles,
            score: self.score,
            elapsed: self.elapsed,
            tier: self.tier,
            weapon: self.player.weapon,
            terminal: self.terminal,
            stats: &self.stats,
        }
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.projectiles.sort_by_key(|p| p.id);
    }
}
