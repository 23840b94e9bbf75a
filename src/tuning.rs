//! Data-driven game balance
//!
//! Every number the simulation reads comes from [`Tuning`]. The default is the
//! shipped balance; an override can be loaded from JSON and is validated
//! before a session will accept it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::sim::collision::Rect;
use crate::sim::enemy::{EnemyKind, EnemyTable};
use crate::sim::particles::ParticleTuning;
use crate::sim::spawner::SpawnerTuning;
use crate::sim::weapon::{WeaponArchetype, WeaponKind};

/// Rejected tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{section}.{field} must be {requirement} (got {value})")]
    OutOfRange {
        section: String,
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerTuning {
    /// Max movement speed (px/s)
    pub speed: f32,
    pub max_health: i32,
    pub radius: f32,
    /// Post-hit grace (seconds)
    pub invulnerability: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 240.0,
            max_health: 100,
            radius: 24.0,
            invulnerability: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayfieldTuning {
    pub width: f32,
    pub height: f32,
    /// Enemies farther than this outside the playfield are dropped
    pub despawn_margin: f32,
}

impl Default for PlayfieldTuning {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            despawn_margin: 200.0,
        }
    }
}

impl PlayfieldTuning {
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }
}

/// The three selectable weapons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponTable {
    pub seed_blaster: WeaponArchetype,
    pub thorn_fork: WeaponArchetype,
    pub solar_beam: WeaponArchetype,
}

impl Default for WeaponTable {
    fn default() -> Self {
        Self {
            seed_blaster: WeaponArchetype::seed_blaster(),
            thorn_fork: WeaponArchetype::thorn_fork(),
            solar_beam: WeaponArchetype::solar_beam(),
        }
    }
}

impl WeaponTable {
    pub fn get(&self, kind: WeaponKind) -> &WeaponArchetype {
        match kind {
            WeaponKind::SeedBlaster => &self.seed_blaster,
            WeaponKind::ThornFork => &self.thorn_fork,
            WeaponKind::SolarBeam => &self.solar_beam,
        }
    }
}

/// Complete balance data, shared read-only by every run of a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub playfield: PlayfieldTuning,
    pub weapons: WeaponTable,
    pub enemies: EnemyTable,
    pub spawner: SpawnerTuning,
    pub particles: ParticleTuning,
}

fn positive(section: &str, field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(out_of_range(section, field, "finite and > 0", value))
    }
}

fn non_negative(section: &str, field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(out_of_range(section, field, "finite and >= 0", value))
    }
}

fn at_least_one(section: &str, field: &'static str, value: u64) -> Result<(), TuningError> {
    if value >= 1 {
        Ok(())
    } else {
        Err(out_of_range(section, field, ">= 1", value as f32))
    }
}

fn out_of_range(
    section: &str,
    field: &'static str,
    requirement: &'static str,
    value: f32,
) -> TuningError {
    TuningError::OutOfRange {
        section: section.to_string(),
        field,
        requirement,
        value: f64::from(value),
    }
}

impl Tuning {
    /// Parse a JSON override; missing sections fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let p = &self.player;
        positive("player", "speed", p.speed)?;
        positive("player", "radius", p.radius)?;
        non_negative("player", "invulnerability", p.invulnerability)?;
        if p.max_health <= 0 {
            return Err(out_of_range("player", "max_health", "> 0", p.max_health as f32));
        }

        let f = &self.playfield;
        positive("playfield", "width", f.width)?;
        positive("playfield", "height", f.height)?;
        non_negative("playfield", "despawn_margin", f.despawn_margin)?;

        for kind in WeaponKind::ALL {
            let w = self.weapons.get(kind);
            let section = format!("weapons.{}", kind.as_str());
            positive(&section, "fire_interval", w.fire_interval)?;
            positive(&section, "projectile_speed", w.projectile_speed)?;
            non_negative(&section, "projectile_damage", w.projectile_damage)?;
            at_least_one(&section, "projectile_count", u64::from(w.projectile_count))?;
            non_negative(&section, "spread_degrees", w.spread_degrees)?;
            positive(&section, "lifetime", w.lifetime)?;
            positive(&section, "projectile_radius", w.projectile_radius)?;
        }

        for kind in EnemyKind::ALL {
            let e = self.enemies.profile(kind);
            let section = format!("enemies.{}", kind.as_str());
            non_negative(&section, "speed", e.speed)?;
            positive(&section, "health", e.health)?;
            positive(&section, "radius", e.radius)?;
            non_negative(&section, "spawn_weight", e.spawn_weight)?;
            if e.contact_damage < 0 {
                let value = e.contact_damage as f32;
                return Err(out_of_range(&section, "contact_damage", ">= 0", value));
            }
        }
        let thorns = &self.enemies.thorns;
        non_negative("enemies.thorns", "range", thorns.range)?;
        positive("enemies.thorns", "interval", thorns.interval)?;
        positive("enemies.thorns", "projectile_speed", thorns.projectile_speed)?;
        positive("enemies.thorns", "projectile_lifetime", thorns.projectile_lifetime)?;
        positive("enemies.thorns", "projectile_radius", thorns.projectile_radius)?;
        let spores = &self.enemies.spores;
        positive("enemies.spores", "pulse_interval", spores.pulse_interval)?;
        non_negative("enemies.spores", "pulse_radius", spores.pulse_radius)?;
        non_negative("enemies.spores", "pulse_flash", spores.pulse_flash)?;
        non_negative("enemies.spores", "burst_radius", spores.burst_radius)?;
        non_negative("enemies.spores", "burst_knockback", spores.burst_knockback)?;

        let s = &self.spawner;
        non_negative("spawner", "initial_delay", s.initial_delay)?;
        positive("spawner", "min_interval", s.min_interval)?;
        positive("spawner", "base_interval", s.base_interval)?;
        non_negative("spawner", "interval_decay_per_second", s.interval_decay_per_second)?;
        non_negative("spawner", "interval_decay_per_point", s.interval_decay_per_point)?;
        positive("spawner", "group_growth_seconds", s.group_growth_seconds)?;
        at_least_one("spawner", "max_group", u64::from(s.max_group))?;
        positive("spawner", "tier_seconds", s.tier_seconds)?;
        at_least_one("spawner", "tier_score", s.tier_score)?;
        non_negative("spawner", "health_per_tier", s.health_per_tier)?;
        non_negative("spawner", "speed_per_tier", s.speed_per_tier)?;
        non_negative("spawner", "weight_shift_per_tier", s.weight_shift_per_tier)?;
        non_negative("spawner", "safe_distance", s.safe_distance)?;

        let total_weight: f32 = EnemyKind::ALL
            .iter()
            .map(|k| self.enemies.profile(*k).spawn_weight)
            .sum();
        positive("enemies", "total spawn_weight", total_weight)?;

        let fx = &self.particles;
        non_negative("particles", "max_speed", fx.max_speed)?;
        positive("particles", "life_min", fx.life_min)?;
        if !(fx.life_max.is_finite() && fx.life_max >= fx.life_min) {
            return Err(out_of_range("particles", "life_max", ">= life_min", fx.life_max));
        }
        positive("particles", "radius_min", fx.radius_min)?;
        if !(fx.radius_max.is_finite() && fx.radius_max >= fx.radius_min) {
            return Err(out_of_range("particles", "radius_max", ">= radius_min", fx.radius_max));
        }
        non_negative("particles", "shrink_rate", fx.shrink_rate)?;

        Ok(())
    }
}
