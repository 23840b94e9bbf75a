//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod enemy;
pub mod events;
pub mod particles;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod weapon;

pub use collision::{Rect, circles_overlap};
pub use enemy::{EnemyKind, EnemyProfile, EnemyTable};
pub use events::{AudioCue, GameEvent, count_cue};
pub use particles::{Particle, ParticleKind, ParticleTuning};
pub use snapshot::WorldSnapshot;
pub use spawner::{Spawner, SpawnerTuning};
pub use state::{Enemy, Faction, Player, Projectile, ProjectileVisual, RunStats, World};
pub use tick::{PlayerIntent, advance};
pub use weapon::{ProjectileSpawn, WeaponArchetype, WeaponKind};
