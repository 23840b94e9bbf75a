//! Read-only view of a world for rendering and HUD

use serde::Serialize;

use super::enemy::EnemyKind;
use super::particles::Particle;
use super::state::{Enemy, Player, Projectile, RunStats};
use super::weapon::WeaponKind;

/// Borrowed view handed to the presentation layer each frame
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WorldSnapshot<'a> {
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub particles: &'a [Particle],
    pub score: u64,
    pub elapsed: f32,
    pub tier: u32,
    pub weapon: WeaponKind,
    /// Run has ended
    pub terminal: bool,
    pub stats: &'a RunStats,
}

impl WorldSnapshot<'_> {
    pub fn enemy_count(&self, kind: EnemyKind) -> usize {
        self.enemies.iter().filter(|e| e.kind == kind).count()
    }

    /// One-line HUD text: health, score, time, weapon
    pub fn hud_line(&self) -> String {
        format!(
            "Health: {}  Score: {}  Time: {} s  Weapon: {}",
            self.player.health.max(0),
            self.score,
            self.elapsed as u32,
            self.weapon.as_str()
        )
    }
}
