use crate::settings::SizeRange;
use crate::types::Bounds;
use glam::Vec2;
use rand::Rng;

/// Half-width of the uniform velocity range applied at seed time,
/// in pixels per frame.
const SEED_SPEED: f32 = 0.25;

/// One animated point of the particle field.
///
/// The radius is fixed at seed time and never mutated afterwards; position
/// and velocity are rewritten every tick by the simulation phases.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Particle {
    /// Returns `true` if position and velocity carry no NaN or infinity.
    ///
    /// Radius is included for completeness even though nothing mutates it
    /// after seeding.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite() && self.radius.is_finite()
    }
}

/// The live particle array, exclusively owned by the engine.
#[derive(Debug)]
pub struct ParticleStore {
    pub particles: Vec<Particle>,
}

impl ParticleStore {
    /// Creates an empty store (the engine's pre-seed state).
    pub fn empty() -> Self {
        Self {
            particles: Vec::new(),
        }
    }

    /// Seeds a fresh store of `count` particles.
    ///
    /// Each particle gets a uniformly random position inside `bounds`, a
    /// small uniform velocity with both components in
    /// `[-SEED_SPEED, SEED_SPEED]`, and a radius sampled uniformly from
    /// `size_range`. Seeding is a full replacement; it never mixes old and
    /// new particles.
    pub fn seed(count: usize, bounds: Bounds, size_range: SizeRange, rng: &mut impl Rng) -> Self {
        let particles = (0..count)
            .map(|_| random_particle(bounds, size_range, rng))
            .collect();

        Self { particles }
    }

    /// Replaces the particle at `index` with a fresh random seed.
    ///
    /// This is the numeric-fault recovery path: a particle whose state
    /// went NaN/infinite mid-tick is locally reset with the same rule as
    /// bulk seeding, and the rest of the frame proceeds unaffected.
    pub fn reseed_particle(
        &mut self,
        index: usize,
        bounds: Bounds,
        size_range: SizeRange,
        rng: &mut impl Rng,
    ) {
        self.particles[index] = random_particle(bounds, size_range, rng);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

fn random_particle(bounds: Bounds, size_range: SizeRange, rng: &mut impl Rng) -> Particle {
    let pos = Vec2::new(
        rng.random_range(0.0..bounds.width),
        rng.random_range(0.0..bounds.height),
    );
    let vel = Vec2::new(
        rng.random_range(-SEED_SPEED..=SEED_SPEED),
        rng.random_range(-SEED_SPEED..=SEED_SPEED),
    );
    let radius = rng.random_range(size_range.min..=size_range.max);

    Particle { pos, vel, radius }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn seed_produces_exact_count_inside_bounds() {
        let bounds = Bounds::new(800.0, 600.0);
        let range = SizeRange { min: 1.0, max: 3.0 };
        let store = ParticleStore::seed(250, bounds, range, &mut rng());

        assert_eq!(store.len(), 250);
        for p in &store.particles {
            assert!(p.pos.x >= 0.0 && p.pos.x < bounds.width);
            assert!(p.pos.y >= 0.0 && p.pos.y < bounds.height);
        }
    }

    #[test]
    fn seeded_velocities_are_small() {
        let bounds = Bounds::new(800.0, 600.0);
        let range = SizeRange { min: 1.0, max: 3.0 };
        let store = ParticleStore::seed(100, bounds, range, &mut rng());

        for p in &store.particles {
            assert!(p.vel.x.abs() <= SEED_SPEED);
            assert!(p.vel.y.abs() <= SEED_SPEED);
        }
    }

    #[test]
    fn seeded_radii_stay_within_range() {
        let bounds = Bounds::new(800.0, 600.0);
        let range = SizeRange { min: 2.0, max: 5.0 };
        let store = ParticleStore::seed(100, bounds, range, &mut rng());

        for p in &store.particles {
            assert!(p.radius >= range.min && p.radius <= range.max);
        }
    }

    #[test]
    fn reseed_particle_replaces_only_the_target() {
        let bounds = Bounds::new(800.0, 600.0);
        let range = SizeRange { min: 1.0, max: 3.0 };
        let mut store = ParticleStore::seed(3, bounds, range, &mut rng());

        // Poison the middle particle.
        store.particles[1].pos = Vec2::new(f32::NAN, 0.0);
        let before_0 = store.particles[0];
        let before_2 = store.particles[2];

        store.reseed_particle(1, bounds, range, &mut rng());

        assert!(store.particles[1].is_finite());
        assert_eq!(store.particles[0].pos, before_0.pos);
        assert_eq!(store.particles[2].pos, before_2.pos);
    }

    #[test]
    fn is_finite_rejects_nan_and_infinity() {
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 1.0,
        };
        assert!(p.is_finite());

        p.vel.y = f32::INFINITY;
        assert!(!p.is_finite());

        p.vel.y = 0.0;
        p.pos.x = f32::NAN;
        assert!(!p.is_finite());
    }
}
