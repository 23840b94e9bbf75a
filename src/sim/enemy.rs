//! Enemy kinds, their balance profiles and per-tick behavior
//!
//! Behavior is a closed set matched on [`EnemyKind`]. Each update returns the
//! desired velocity plus an optional attack; the tick integrates the motion
//! and resolves the attack against the player.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::seek_direction;
use super::state::Enemy;
use super::weapon::ProjectileSpawn;

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Weak, numerous, walks straight at the player
    Sproutling,
    /// Slow and tough, spits thorns at close range
    RootBeast,
    /// Drifting mushroom with a periodic spore pulse and a death burst
    Sporeshroom,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [
        EnemyKind::Sproutling,
        EnemyKind::RootBeast,
        EnemyKind::Sporeshroom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Sproutling => "Sproutling",
            EnemyKind::RootBeast => "Root Beast",
            EnemyKind::Sporeshroom => "Sporeshroom",
        }
    }
}

/// Base stats shared by every enemy kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyProfile {
    /// Movement speed (px/s) before difficulty scaling
    pub speed: f32,
    /// Health before difficulty scaling
    pub health: f32,
    pub radius: f32,
    /// Damage dealt to the player on body contact
    pub contact_damage: i32,
    /// Score awarded on kill
    pub score: u64,
    /// Relative spawn weight at tier 0
    pub spawn_weight: f32,
    /// Render hint
    pub color: [u8; 3],
}

/// Root Beast thorn burst
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThornBurst {
    /// Player must be this close for the beast to attack
    pub range: f32,
    pub interval: f32,
    pub projectile_speed: f32,
    pub projectile_damage: i32,
    pub projectile_lifetime: f32,
    pub projectile_radius: f32,
}

/// Sporeshroom pulse and death burst
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SporeTuning {
    pub pulse_interval: f32,
    pub pulse_radius: f32,
    pub pulse_damage: i32,
    /// How long the pulse telegraph stays visible after firing
    pub pulse_flash: f32,
    pub burst_radius: f32,
    pub burst_damage: i32,
    /// Distance the player is shoved by the death burst
    pub burst_knockback: f32,
}

/// All enemy balance data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTable {
    pub sproutling: EnemyProfile,
    pub root_beast: EnemyProfile,
    pub sporeshroom: EnemyProfile,
    pub thorns: ThornBurst,
    pub spores: SporeTuning,
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            sproutling: EnemyProfile {
                speed: 100.0,
                health: 30.0,
                radius: 13.0,
                contact_damage: 10,
                score: 5,
                spawn_weight: 0.5,
                color: [120, 255, 120],
            },
            root_beast: EnemyProfile {
                speed: 70.0,
                health: 60.0,
                radius: 18.0,
                contact_damage: 15,
                score: 10,
                spawn_weight: 0.3,
                color: [205, 120, 60],
            },
            sporeshroom: EnemyProfile {
                speed: 30.0,
                health: 25.0,
                radius: 11.0,
                contact_damage: 8,
                score: 8,
                spawn_weight: 0.2,
                color: [180, 160, 255],
            },
            thorns: ThornBurst {
                range: 180.0,
                interval: 2.0,
                projectile_speed: 260.0,
                projectile_damage: 12,
                projectile_lifetime: 0.8,
                projectile_radius: 7.0,
            },
            spores: SporeTuning {
                pulse_interval: 3.0,
                pulse_radius: 90.0,
                pulse_damage: 10,
                pulse_flash: 0.25,
                burst_radius: 110.0,
                burst_damage: 15,
                burst_knockback: 40.0,
            },
        }
    }
}

impl EnemyTable {
    pub fn profile(&self, kind: EnemyKind) -> &EnemyProfile {
        match kind {
            EnemyKind::Sproutling => &self.sproutling,
            EnemyKind::RootBeast => &self.root_beast,
            EnemyKind::Sporeshroom => &self.sporeshroom,
        }
    }

    /// Cooldown a freshly spawned enemy starts with
    pub fn initial_cooldown(&self, kind: EnemyKind) -> f32 {
        match kind {
            EnemyKind::Sproutling => 0.0,
            EnemyKind::RootBeast => self.thorns.interval,
            EnemyKind::Sporeshroom => self.spores.pulse_interval,
        }
    }
}

/// Area damage centred on a point (spore pulse, spore burst)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaEffect {
    pub center: Vec2,
    pub radius: f32,
    pub damage: i32,
    /// Distance the player is pushed away from the centre
    pub knockback: f32,
}

/// An attack produced by one behavior update
#[derive(Debug, Clone, PartialEq)]
pub enum Attack {
    Projectile(ProjectileSpawn),
    Pulse(AreaEffect),
}

/// Result of one behavior update
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyAction {
    pub velocity: Vec2,
    pub attack: Option<Attack>,
}

/// Run one enemy's behavior for `dt` seconds.
///
/// Counts down the enemy's own timers; does not move it.
pub fn update(enemy: &mut Enemy, dt: f32, player_pos: Vec2, table: &EnemyTable) -> EnemyAction {
    let toward = seek_direction(enemy.pos, player_pos);
    let velocity = toward * enemy.speed;
    enemy.attack_cooldown = (enemy.attack_cooldown - dt).max(0.0);
    enemy.pulse_flash = (enemy.pulse_flash - dt).max(0.0);

    let attack = match enemy.kind {
        EnemyKind::Sproutling => None,
        EnemyKind::RootBeast => {
            let thorns = &table.thorns;
            let in_range = enemy.pos.distance(player_pos) <= thorns.range;
            if in_range && enemy.attack_cooldown <= crate::consts::COOLDOWN_EPSILON {
                enemy.attack_cooldown = thorns.interval;
                let aim = if toward == Vec2::ZERO { Vec2::X } else { toward };
                Some(Attack::Projectile(ProjectileSpawn {
                    pos: enemy.pos,
                    vel: aim * thorns.projectile_speed,
                    damage: thorns.projectile_damage as f32,
                    radius: thorns.projectile_radius,
                    lifetime: thorns.projectile_lifetime,
                    pierce: 0,
                }))
            } else {
                None
            }
        }
        EnemyKind::Sporeshroom => {
            let spores = &table.spores;
            if enemy.attack_cooldown <= crate::consts::COOLDOWN_EPSILON {
                enemy.attack_cooldown = spores.pulse_interval;
                enemy.pulse_flash = spores.pulse_flash;
                Some(Attack::Pulse(AreaEffect {
                    center: enemy.pos,
                    radius: spores.pulse_radius,
                    damage: spores.pulse_damage,
                    knockback: 0.0,
                }))
            } else {
                None
            }
        }
    };

    EnemyAction { velocity, attack }
}

/// Area effect released when an enemy dies, if its kind has one
pub fn death_effect(enemy: &Enemy, table: &EnemyTable) -> Option<AreaEffect> {
    match enemy.kind {
        EnemyKind::Sporeshroom => Some(AreaEffect {
            center: enemy.pos,
            radius: table.spores.burst_radius,
            damage: table.spores.burst_damage,
            knockback: table.spores.burst_knockback,
        }),
        EnemyKind::Sproutling | EnemyKind::RootBeast => None,
    }
}
