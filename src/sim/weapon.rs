//! Weapon archetypes and their fire patterns
//!
//! Firing is pure: it turns an archetype plus the muzzle position and aim into
//! a list of projectiles to spawn. Cooldown bookkeeping lives in the tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The three weapons a run can be started with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Rapid single seeds
    SeedBlaster,
    /// Three-thorn fan, short range
    ThornFork,
    /// Slow, heavy, piercing sunbeam
    SolarBeam,
}

impl WeaponKind {
    /// Menu order
    pub const ALL: [WeaponKind; 3] = [
        WeaponKind::SeedBlaster,
        WeaponKind::ThornFork,
        WeaponKind::SolarBeam,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponKind::SeedBlaster => "Seed Blaster",
            WeaponKind::ThornFork => "Thorn Fork",
            WeaponKind::SolarBeam => "Solar Beam",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WeaponKind::SeedBlaster => "Fires seeds quickly for moderate damage.",
            WeaponKind::ThornFork => "A triple thorn volley, ideal against groups.",
            WeaponKind::SolarBeam => "Slow, but burns straight through enemies.",
        }
    }

    /// Position in the menu (0-based)
    pub fn index(&self) -> usize {
        match self {
            WeaponKind::SeedBlaster => 0,
            WeaponKind::ThornFork => 1,
            WeaponKind::SolarBeam => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Projectile / highlight colour hint for the presentation layer
    pub fn color(&self) -> [u8; 3] {
        match self {
            WeaponKind::SeedBlaster => [255, 235, 120],
            WeaponKind::ThornFork => [120, 255, 120],
            WeaponKind::SolarBeam => [255, 180, 80],
        }
    }
}

/// Immutable weapon descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponArchetype {
    /// Seconds between shots
    pub fire_interval: f32,
    /// Projectile speed (px/s)
    pub projectile_speed: f32,
    pub projectile_damage: f32,
    /// Projectiles per trigger pull
    pub projectile_count: u32,
    /// Total fan angle in degrees, centred on the aim direction
    pub spread_degrees: f32,
    /// Extra enemies a projectile can pass through after its first hit
    pub pierce: u32,
    /// Projectile lifetime (seconds); together with speed this is the range
    pub lifetime: f32,
    pub projectile_radius: f32,
}

impl WeaponArchetype {
    pub fn seed_blaster() -> Self {
        Self {
            fire_interval: 0.2,
            projectile_speed: 520.0,
            projectile_damage: 15.0,
            projectile_count: 1,
            spread_degrees: 0.0,
            pierce: 0,
            lifetime: 1.6,
            projectile_radius: 6.0,
        }
    }

    pub fn thorn_fork() -> Self {
        Self {
            fire_interval: 0.6,
            projectile_speed: 420.0,
            projectile_damage: 12.0,
            projectile_count: 3,
            spread_degrees: 24.0,
            pierce: 0,
            lifetime: 0.45,
            projectile_radius: 5.0,
        }
    }

    pub fn solar_beam() -> Self {
        Self {
            fire_interval: 0.9,
            projectile_speed: 620.0,
            projectile_damage: 40.0,
            projectile_count: 1,
            spread_degrees: 0.0,
            pierce: 2,
            lifetime: 2.5,
            projectile_radius: 8.0,
        }
    }

    /// Distance a projectile covers before expiring
    pub fn range(&self) -> f32 {
        self.projectile_speed * self.lifetime
    }
}

/// A projectile about to enter the world (owner and id are assigned there)
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileSpawn {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    pub radius: f32,
    pub lifetime: f32,
    pub pierce: u32,
}

/// Projectiles produced by one trigger pull.
///
/// Multi-projectile archetypes are fanned evenly across `spread_degrees`;
/// a zero aim falls back to +X.
pub fn fire(archetype: &WeaponArchetype, origin: Vec2, aim: Vec2) -> Vec<ProjectileSpawn> {
    let dir = aim.try_normalize().unwrap_or(Vec2::X);
    let count = archetype.projectile_count.max(1);
    let spread = archetype.spread_degrees.to_radians();
    let (start, step) = if count > 1 {
        (-spread / 2.0, spread / (count - 1) as f32)
    } else {
        (0.0, 0.0)
    };

    (0..count)
        .map(|i| {
            let offset = start + step * i as f32;
            let heading = Vec2::from_angle(offset).rotate(dir);
            ProjectileSpawn {
                pos: origin,
                vel: heading * archetype.projectile_speed,
                damage: archetype.projectile_damage,
                radius: archetype.projectile_radius,
                lifetime: archetype.lifetime,
                pierce: archetype.pierce,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_blaster_single_straight_shot() {
        let shots = fire(&WeaponArchetype::seed_blaster(), Vec2::new(480.0, 270.0), Vec2::Y);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].pos, Vec2::new(480.0, 270.0));
        assert!((shots[0].vel - Vec2::new(0.0, 520.0)).length() < 1e-3);
        assert_eq!(shots[0].pierce, 0);
    }

    #[test]
    fn test_thorn_fork_fan_is_symmetric() {
        let arch = WeaponArchetype::thorn_fork();
        let shots = fire(&arch, Vec2::ZERO, Vec2::X);
        assert_eq!(shots.len(), 3);

        let angles: Vec<f32> = shots.iter().map(|s| crate::dir_to_angle(s.vel)).collect();
        let half = arch.spread_degrees.to_radians() / 2.0;
        assert!((angles[0] + half).abs() < 1e-4);
        assert!(angles[1].abs() < 1e-4);
        assert!((angles[2] - half).abs() < 1e-4);

        for shot in &shots {
            assert!((shot.vel.length() - arch.projectile_speed).abs() < 1e-2);
        }
    }

    #[test]
    fn test_solar_beam_pierces() {
        let arch = WeaponArchetype::solar_beam();
        let shots = fire(&arch, Vec2::ZERO, Vec2::new(0.0, -3.0));
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].pierce, 2);
        assert!(arch.range() > WeaponArchetype::thorn_fork().range());
    }

    #[test]
    fn test_zero_aim_falls_back_to_x() {
        let shots = fire(&WeaponArchetype::seed_blaster(), Vec2::ZERO, Vec2::ZERO);
        assert!(shots[0].vel.x > 0.0);
        assert!(shots[0].vel.y.abs() < 1e-4);
    }

    #[test]
    fn test_weapon_kind_index_round_trip() {
        for kind in WeaponKind::ALL {
            assert_eq!(WeaponKind::from_index(kind.index()), Some(kind));
        }
        assert_eq!(WeaponKind::from_index(3), None);
    }
}
