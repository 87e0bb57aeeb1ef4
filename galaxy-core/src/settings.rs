/// Inclusive radius sampling range used when seeding particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeRange {
    pub min: f32,
    pub max: f32,
}

/// Per-tick configuration snapshot.
///
/// The host passes a fresh copy into every `tick` call; the engine never
/// mutates it and never holds onto it across ticks, so live reconfiguration
/// is just "pass different values next frame".
#[derive(Clone, Copy, Debug)]
pub struct Settings {
    /// Number of particles in the store; a change triggers a full re-seed.
    pub particle_count: usize,
    /// Per-frame velocity decay factor, kept in `(0, 1]`.
    pub friction: f32,
    /// Magnitude of the pointer-induced force.
    pub mouse_force: f32,
    /// Inverts the pointer force (repel instead of attract).
    pub reverse_gravity: bool,
    /// Maximum distance at which a connection segment is drawn.
    pub connection_distance: f32,
    /// Radius sampling range applied at seed time.
    pub particle_size: SizeRange,
    /// Enables the pairwise elastic collision pass.
    pub particle_collisions: bool,
    /// Enables the orbital force around the space center.
    pub orbit_around_center: bool,
    /// Tangential force scale for the orbital force.
    pub orbit_speed: f32,
    /// Target orbit radius for the centripetal correction.
    pub orbit_radius: f32,
    /// Strength of the centripetal correction.
    pub orbit_gravity: f32,
}

/// Smallest friction value accepted after sanitization.
///
/// Friction must stay strictly above zero; a zero factor would freeze
/// every particle on the first frame instead of decaying velocities.
pub const MIN_FRICTION: f32 = 0.001;

/// Smallest particle radius accepted after sanitization.
pub const MIN_RADIUS: f32 = 0.1;

impl Default for Settings {
    fn default() -> Self {
        Self {
            particle_count: 100,
            friction: 0.99,
            mouse_force: 2.0,
            reverse_gravity: false,
            connection_distance: 120.0,
            particle_size: SizeRange { min: 1.0, max: 3.0 },
            particle_collisions: true,
            orbit_around_center: false,
            orbit_speed: 1.0,
            orbit_radius: 200.0,
            orbit_gravity: 0.05,
        }
    }
}

impl Settings {
    /// Returns a copy with every field clamped to its valid range.
    ///
    /// Invalid configuration never surfaces as an error to the host
    /// (the engine degrades visually rather than halting), so ingestion
    /// corrects each field to the nearest valid value instead:
    ///
    /// - `particle_count` is raised to at least 1.
    /// - `friction` is clamped into `[MIN_FRICTION, 1]`.
    /// - Force magnitudes, distances, and radii are clamped to be
    ///   non-negative.
    /// - `particle_size` has `min` and `max` swapped if inverted, and both
    ///   raised to at least [`MIN_RADIUS`].
    /// - Any NaN or infinite float falls back to the corresponding
    ///   [`Settings::default`] value before clamping.
    pub fn sanitized(self) -> Self {
        let defaults = Settings::default();

        let (mut size_min, mut size_max) = (
            finite_or(self.particle_size.min, defaults.particle_size.min),
            finite_or(self.particle_size.max, defaults.particle_size.max),
        );
        if size_min > size_max {
            std::mem::swap(&mut size_min, &mut size_max);
        }

        Self {
            particle_count: self.particle_count.max(1),
            friction: finite_or(self.friction, defaults.friction).clamp(MIN_FRICTION, 1.0),
            mouse_force: finite_or(self.mouse_force, defaults.mouse_force).max(0.0),
            reverse_gravity: self.reverse_gravity,
            connection_distance: finite_or(self.connection_distance, defaults.connection_distance)
                .max(0.0),
            particle_size: SizeRange {
                min: size_min.max(MIN_RADIUS),
                max: size_max.max(MIN_RADIUS),
            },
            particle_collisions: self.particle_collisions,
            orbit_around_center: self.orbit_around_center,
            orbit_speed: finite_or(self.orbit_speed, defaults.orbit_speed),
            orbit_radius: finite_or(self.orbit_radius, defaults.orbit_radius).max(0.0),
            orbit_gravity: finite_or(self.orbit_gravity, defaults.orbit_gravity).max(0.0),
        }
    }
}

/// Replaces NaN/infinite values with a fallback before clamping.
///
/// `f32::clamp` propagates NaN, so the fallback has to happen first.
#[inline]
fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}
