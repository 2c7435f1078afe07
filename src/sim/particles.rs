//! Particle bursts for brick destruction
//!
//! Purely cosmetic: particles never take part in gameplay collision. The
//! system prunes dead particles every frame and enforces a hard cap so a
//! combo of destructions cannot grow unbounded.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::easing;
use crate::consts::*;

/// A single short-lived particle with a lifetime budget and gravity.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in [0, 1]; ticks down at `1 / lifetime` per second
    pub life: f32,
    /// Total lifetime budget in seconds
    pub lifetime: f32,
    pub size: f32,
    /// Brick difficulty at spawn, for color lookup in the renderer
    pub difficulty: u8,
}

impl Particle {
    /// Render alpha, eased so particles fade out rather than blink off.
    pub fn alpha(&self) -> f32 {
        easing::ease_out_quad(self.life)
    }
}

/// Owns the particle pool for one level.
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self {
            particles: Vec::with_capacity(MAX_PARTICLES),
        }
    }

    /// Spawn a radial burst at `pos`. Oldest particles are dropped first
    /// when the cap is reached.
    pub fn spawn_burst(&mut self, pos: Vec2, difficulty: u8, rng: &mut Pcg32) {
        for _ in 0..PARTICLE_BURST {
            if self.particles.len() >= MAX_PARTICLES {
                self.particles.remove(0);
            }
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(60.0..220.0);
            let lifetime = rng.random_range(0.4..0.9);
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: 1.0,
                lifetime,
                size: rng.random_range(2.0..5.0),
                difficulty,
            });
        }
    }

    /// Integrate and prune. Dead particles are removed in the same pass.
    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.vel.y += PARTICLE_GRAVITY * dt;
            p.pos += p.vel * dt;
            p.life -= dt / p.lifetime;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_burst_spawns_particles() {
        let mut sys = ParticleSystem::new();
        let mut rng = Pcg32::seed_from_u64(7);
        sys.spawn_burst(Vec2::new(100.0, 100.0), 3, &mut rng);
        assert_eq!(sys.len(), PARTICLE_BURST);
        assert!(sys.iter().all(|p| p.life == 1.0 && p.difficulty == 3));
    }

    #[test]
    fn test_particles_prune_when_expired() {
        let mut sys = ParticleSystem::new();
        let mut rng = Pcg32::seed_from_u64(7);
        sys.spawn_burst(Vec2::ZERO, 1, &mut rng);
        // Max lifetime is < 1 s, so 2 simulated seconds clears everything
        for _ in 0..240 {
            sys.update(1.0 / 120.0);
        }
        assert!(sys.is_empty());
    }

    #[test]
    fn test_cap_is_enforced() {
        let mut sys = ParticleSystem::new();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            sys.spawn_burst(Vec2::ZERO, 2, &mut rng);
        }
        assert!(sys.len() <= MAX_PARTICLES);
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut sys = ParticleSystem::new();
        let mut rng = Pcg32::seed_from_u64(7);
        sys.spawn_burst(Vec2::ZERO, 1, &mut rng);
        let before: Vec<f32> = sys.iter().map(|p| p.vel.y).collect();
        sys.update(0.1);
        for (p, b) in sys.iter().zip(before) {
            assert!(p.vel.y > b);
        }
    }

    #[test]
    fn test_alpha_fades_with_life() {
        let p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 0.5,
            lifetime: 0.5,
            size: 3.0,
            difficulty: 1,
        };
        assert!(p.alpha() > 0.0 && p.alpha() < 1.0);
    }
}
