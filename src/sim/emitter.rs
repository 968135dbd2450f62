//! Campfire particle emitters
//!
//! One emitter type covers both smoke and fire; the kind only decides how a
//! particle is colored when drawn. Particles are decoration and never affect
//! gameplay, so emitters draw from their own RNG stream.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sampler::Sampler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmitterKind {
    Smoke,
    Fire,
}

impl EmitterKind {
    /// RGBA color for one particle at the given alpha
    pub fn sample_color(self, sampler: &mut Sampler, alpha: f32) -> [u8; 4] {
        let alpha = alpha.clamp(0.0, 255.0);
        match self {
            EmitterKind::Fire => [
                sampler.between(200.0, 230.0) as u8,
                sampler.between(50.0, 150.0) as u8,
                10,
                alpha as u8,
            ],
            EmitterKind::Smoke => {
                let gray = sampler.between(50.0, 150.0) as u8;
                [gray, gray, gray, sampler.between(0.0, alpha) as u8]
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Ticks alive
    pub age: u32,
    /// 0-255, fades by `ALPHA_FADE` per tick
    pub alpha: f32,
}

const SPAWN_ALPHA: f32 = 200.0;
const ALPHA_FADE: f32 = 2.0;

/// A particle source at a fixed point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Emitter {
    pub kind: EmitterKind,
    pub origin: Vec2,
    pub base_vel: Vec2,
    pub base_size: f32,
    /// Upper bound for the random age at which a particle is retired
    pub lifetime: f32,
    pub particles: Vec<Particle>,
}

impl Emitter {
    pub fn new(kind: EmitterKind, origin: Vec2, base_vel: Vec2, base_size: f32) -> Self {
        Self {
            kind,
            origin,
            base_vel,
            base_size,
            lifetime: 2.0,
            particles: Vec::new(),
        }
    }

    /// Smoke column rising off the campfire at `camp_x`
    pub fn campfire_smoke(camp_x: f32, floor_y: f32, sampler: &mut Sampler) -> Self {
        let mut e = Self::new(
            EmitterKind::Smoke,
            Vec2::new(camp_x - 105.0, floor_y - 60.0),
            Vec2::new(2.5, -0.1),
            5.0,
        );
        e.start(700, 700.0, sampler);
        e
    }

    /// Flames licking the logs of the campfire at `camp_x`
    pub fn campfire_flames(camp_x: f32, floor_y: f32, sampler: &mut Sampler) -> Self {
        let mut e = Self::new(
            EmitterKind::Fire,
            Vec2::new(camp_x - 105.0, floor_y - 30.0),
            Vec2::new(0.0, 1.0),
            6.0,
        );
        e.start(200, 180.0, sampler);
        e
    }

    fn spawn(&self, sampler: &mut Sampler) -> Particle {
        Particle {
            pos: Vec2::new(
                sampler.between(self.origin.x - 8.0, self.origin.x + 8.0),
                sampler.between(self.origin.y - 10.0, self.origin.y + 10.0),
            ),
            vel: Vec2::new(
                sampler.between(self.base_vel.x - 0.5, self.base_vel.x + 0.5),
                sampler.between(self.base_vel.y - 2.0, self.base_vel.y - 1.0),
            ),
            size: sampler.between(self.base_size - 4.0, self.base_size + 4.0),
            age: 0,
            alpha: SPAWN_ALPHA,
        }
    }

    /// Seed the emitter with `count` particles
    pub fn start(&mut self, count: usize, lifetime: f32, sampler: &mut Sampler) {
        self.lifetime = lifetime;
        self.particles.reserve(count);
        for _ in 0..count {
            let p = self.spawn(sampler);
            self.particles.push(p);
        }
    }

    /// Move and age every particle, retiring old ones and replacing them 1:1
    pub fn update(&mut self, sampler: &mut Sampler) {
        let lifetime = self.lifetime;
        let mut retired = 0;
        self.particles.retain_mut(|p| {
            p.pos += p.vel;
            p.age += 1;
            p.alpha -= ALPHA_FADE;
            let keep = (p.age as f32) <= sampler.between(0.0, lifetime);
            if !keep {
                retired += 1;
            }
            keep
        });
        for _ in 0..retired {
            let p = self.spawn(sampler);
            self.particles.push(p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FLOOR_Y;

    #[test]
    fn test_campfire_emitters_start_full() {
        let mut sampler = Sampler::new(1);
        let smoke = Emitter::campfire_smoke(1700.0, FLOOR_Y, &mut sampler);
        let fire = Emitter::campfire_flames(1700.0, FLOOR_Y, &mut sampler);
        assert_eq!(smoke.particles.len(), 700);
        assert_eq!(fire.particles.len(), 200);
        assert_eq!(smoke.origin, Vec2::new(1595.0, FLOOR_Y - 60.0));
        assert_eq!(fire.kind, EmitterKind::Fire);
    }

    #[test]
    fn test_update_keeps_population_constant() {
        let mut sampler = Sampler::new(2);
        let mut fire = Emitter::campfire_flames(0.0, FLOOR_Y, &mut sampler);
        for _ in 0..300 {
            fire.update(&mut sampler);
            assert_eq!(fire.particles.len(), 200);
        }
        // Everything has been recycled at least once by now
        assert!(fire.particles.iter().all(|p| p.age <= 180));
    }

    #[test]
    fn test_particles_drift_and_fade() {
        let mut sampler = Sampler::new(3);
        let mut e = Emitter::new(EmitterKind::Smoke, Vec2::ZERO, Vec2::new(1.0, -1.0), 5.0);
        e.start(1, 1_000_000.0, &mut sampler);
        let before = e.particles[0].clone();
        e.update(&mut sampler);
        let after = &e.particles[0];
        assert_eq!(after.age, 1);
        assert_eq!(after.alpha, before.alpha - 2.0);
        assert_eq!(after.pos, before.pos + before.vel);
    }

    #[test]
    fn test_color_rules() {
        let mut sampler = Sampler::new(4);
        for _ in 0..50 {
            let [r, g, b, a] = EmitterKind::Fire.sample_color(&mut sampler, 150.0);
            assert!((200..230).contains(&r));
            assert!((50..150).contains(&g));
            assert_eq!(b, 10);
            assert_eq!(a, 150);

            let [r, g, b, a] = EmitterKind::Smoke.sample_color(&mut sampler, 150.0);
            assert!(r == g && g == b);
            assert!((50..150).contains(&r));
            assert!(a < 150);
        }
    }
}
