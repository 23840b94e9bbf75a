//! Cosmetic particle bursts
//!
//! Particles never feed back into gameplay. They draw from their own RNG
//! stream so the number of sparks on screen cannot perturb spawn rolls.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Shared spark palette; every burst also mixes in its source colour
pub const PARTICLE_COLORS: [[u8; 3]; 4] = [
    [255, 180, 80],
    [255, 255, 160],
    [120, 255, 120],
    [180, 160, 255],
];

/// Visual variant of a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Projectile impact
    HitSpark,
    /// Enemy death
    DeathBurst,
    /// Sporeshroom pulse or death cloud
    SporeCloud,
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ParticleKind,
    pub color: [u8; 3],
    /// Seconds remaining
    pub life: f32,
    pub radius: f32,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life > 0.0 && self.radius > 0.0
    }
}

/// Burst parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleTuning {
    /// Particles per death burst; sparks use half, spore clouds the full count
    pub burst_count: u32,
    /// Per-axis velocity range (px/s)
    pub max_speed: f32,
    pub life_min: f32,
    pub life_max: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    /// Radius lost per second
    pub shrink_rate: f32,
    /// Oldest particles are dropped beyond this many
    pub max_particles: usize,
}

impl Default for ParticleTuning {
    fn default() -> Self {
        Self {
            burst_count: 12,
            max_speed: 120.0,
            life_min: 0.2,
            life_max: 0.6,
            radius_min: 2.0,
            radius_max: 6.0,
            shrink_rate: 40.0,
            max_particles: 512,
        }
    }
}

impl ParticleKind {
    fn count(&self, tuning: &ParticleTuning) -> u32 {
        match self {
            ParticleKind::HitSpark => (tuning.burst_count / 2).max(1),
            ParticleKind::DeathBurst | ParticleKind::SporeCloud => tuning.burst_count,
        }
    }

    fn speed_scale(&self) -> f32 {
        match self {
            ParticleKind::HitSpark => 1.0,
            ParticleKind::DeathBurst => 1.0,
            // Lazy drifting cloud
            ParticleKind::SporeCloud => 0.5,
        }
    }
}

/// Spawn one burst of particles at `pos`
pub fn burst<R: Rng>(
    kind: ParticleKind,
    pos: Vec2,
    source_color: [u8; 3],
    tuning: &ParticleTuning,
    rng: &mut R,
) -> Vec<Particle> {
    let speed = tuning.max_speed * kind.speed_scale();
    (0..kind.count(tuning))
        .map(|_| {
            let vel = Vec2::new(
                rng.random_range(-speed..=speed),
                rng.random_range(-speed..=speed),
            );
            // Palette plus the source colour as a fifth entry
            let pick = rng.random_range(0..=PARTICLE_COLORS.len());
            let color = PARTICLE_COLORS.get(pick).copied().unwrap_or(source_color);
            Particle {
                pos,
                vel,
                kind,
                color,
                life: rng.random_range(tuning.life_min..=tuning.life_max),
                radius: rng.random_range(tuning.radius_min..=tuning.radius_max),
            }
        })
        .collect()
}

/// Integrate and age every particle
pub fn update(particles: &mut [Particle], dt: f32, shrink_rate: f32) {
    for p in particles.iter_mut() {
        p.pos += p.vel * dt;
        p.life -= dt;
        p.radius = (p.radius - shrink_rate * dt).max(0.0);
    }
}

/// Drop the oldest particles above the cap
pub fn enforce_cap(particles: &mut Vec<Particle>, max: usize) {
    if particles.len() > max {
        let excess = particles.len() - max;
        particles.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_counts_and_ranges() {
        let tuning = ParticleTuning::default();
        let mut rng = Pcg32::seed_from_u64(3);

        let death = burst(ParticleKind::DeathBurst, Vec2::ONE, [1, 2, 3], &tuning, &mut rng);
        assert_eq!(death.len(), 12);
        let sparks = burst(ParticleKind::HitSpark, Vec2::ONE, [1, 2, 3], &tuning, &mut rng);
        assert_eq!(sparks.len(), 6);

        for p in death.iter().chain(sparks.iter()) {
            assert!(p.vel.x.abs() <= tuning.max_speed && p.vel.y.abs() <= tuning.max_speed);
            assert!(p.life >= tuning.life_min && p.life <= tuning.life_max);
            assert!(p.radius >= tuning.radius_min && p.radius <= tuning.radius_max);
            assert!(p.is_alive());
        }
    }

    #[test]
    fn test_update_expires_particles() {
        let tuning = ParticleTuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut particles =
            burst(ParticleKind::SporeCloud, Vec2::ZERO, [0, 0, 0], &tuning, &mut rng);

        for _ in 0..40 {
            update(&mut particles, 1.0 / 60.0, tuning.shrink_rate);
        }
        assert!(particles.iter().all(|p| !p.is_alive()));
    }

    #[test]
    fn test_enforce_cap_drops_oldest() {
        let tuning = ParticleTuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut particles =
            burst(ParticleKind::DeathBurst, Vec2::ZERO, [0, 0, 0], &tuning, &mut rng);
        let newest = burst(ParticleKind::DeathBurst, Vec2::ONE, [0, 0, 0], &tuning, &mut rng);
        particles.extend(newest);

        enforce_cap(&mut particles, 12);
        assert_eq!(particles.len(), 12);
        assert!(particles.iter().all(|p| p.pos == Vec2::ONE));
    }
}
