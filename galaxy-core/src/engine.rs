//! The stateful simulation engine driven by a host render loop.
//!
//! The host calls [`Engine::tick`] once per frame with the latest settings
//! snapshot, pointer position, and container bounds; the engine owns all
//! particle state and returns the renderable [`FrameState`] for that frame.

use crate::frame::FrameState;
use crate::particle::{Particle, ParticleStore};
use crate::phases;
use crate::settings::Settings;
use crate::types::Bounds;
use glam::Vec2;
use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Operating state of the [`Engine`].
///
/// There are exactly two states and no terminal one: the engine runs for
/// as long as the host keeps ticking it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// No usable bounds seen yet; ticks only record the bounds.
    Uninitialized,
    /// Seeded and simulating on every tick.
    Running,
}

/// The particle-field engine.
///
/// Single-threaded and cooperatively driven: exactly one [`Engine::tick`]
/// runs at a time, and all passes execute sequentially within it. The
/// settings are taken by value (a snapshot copy), so the host may mutate
/// its own configuration from anywhere between ticks without tearing a
/// frame.
pub struct Engine {
    store: ParticleStore,
    frame: FrameState,
    bounds: Bounds,
    rng: SmallRng,
    state: EngineState,
}

impl Engine {
    /// Creates an engine seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_os_rng())
    }

    /// Creates an engine with a deterministic RNG seed.
    ///
    /// Identical seeds plus identical tick inputs reproduce identical
    /// frames, which is what the tests (and any recording host) rely on.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            store: ParticleStore::empty(),
            frame: FrameState::new(),
            bounds: Bounds::ZERO,
            rng,
            state: EngineState::Uninitialized,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The live particle array (read-only outside a tick).
    pub fn particles(&self) -> &[Particle] {
        &self.store.particles
    }

    /// The most recently produced frame.
    ///
    /// Identical to the reference the last [`Engine::tick`] returned;
    /// before the first successful tick it is empty.
    pub fn last_frame(&self) -> &FrameState {
        &self.frame
    }

    /// Advances the simulation by one frame.
    ///
    /// Per-tick flow:
    /// 1. Sanitize the settings snapshot and record the bounds (a resize
    ///    takes effect here; positions are never rescaled, out-of-bounds
    ///    particles simply wrap on this tick).
    /// 2. With degenerate (zero-area or non-finite) bounds, skip the frame
    ///    and return the previous [`FrameState`] unchanged.
    /// 3. Re-seed the store when bounds first become known or when
    ///    `particle_count` changed; every other settings change leaves
    ///    particle state untouched.
    /// 4. Run the passes in order: orbital force, pointer force,
    ///    collisions, integration.
    /// 5. Reset any particle whose state went non-finite (local recovery,
    ///    never a frame abort).
    /// 6. Rebuild the frame: one point per particle, then the proximity
    ///    segments from post-movement positions.
    ///
    /// A non-finite pointer is treated as "no pointer this frame".
    pub fn tick(&mut self, settings: Settings, pointer: Vec2, bounds: Bounds) -> &FrameState {
        let settings = settings.sanitized();
        self.bounds = bounds;

        if bounds.is_degenerate() {
            return &self.frame;
        }

        if self.state == EngineState::Uninitialized || self.store.len() != settings.particle_count {
            self.store = ParticleStore::seed(
                settings.particle_count,
                bounds,
                settings.particle_size,
                &mut self.rng,
            );
            self.state = EngineState::Running;
            debug!("seeded particle store with {} particles", self.store.len());
        }

        phases::orbital_phase(&mut self.store, &settings, bounds);
        if pointer.is_finite() {
            phases::pointer_phase(&mut self.store, &settings, pointer);
        }
        phases::collision_phase(&mut self.store, &settings);
        phases::integrate_phase(&mut self.store, &settings, bounds);

        self.recover_numeric_faults(&settings);

        self.frame.clear();
        for p in &self.store.particles {
            self.frame.push_point(p.pos, p.radius);
        }
        phases::proximity_phase(&self.store, &settings, &mut self.frame);

        &self.frame
    }

    /// Re-seeds any particle whose position or velocity went non-finite.
    ///
    /// A degenerate division somewhere in the passes poisons at most the
    /// particles involved; each one is individually replaced with a fresh
    /// random seed and the frame carries on.
    fn recover_numeric_faults(&mut self, settings: &Settings) {
        for i in 0..self.store.len() {
            if !self.store.particles[i].is_finite() {
                warn!("particle {i} went non-finite, re-seeding it");
                self.store
                    .reseed_particle(i, self.bounds, settings.particle_size, &mut self.rng);
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
