//! Per-tick simulation passes for the particle field.
//!
//! The engine runs these in a fixed order every tick:
//! 1. [`orbital_phase`] — tangential kick plus spring-like centripetal
//!    correction around the space center.
//! 2. [`pointer_phase`] — radial force around the pointer with a linear
//!    falloff.
//! 3. [`collision_phase`] — pairwise equal-mass elastic collisions with
//!    positional separation.
//! 4. [`integrate_phase`] — position integration, toroidal wrap, friction.
//! 5. [`proximity_phase`] — connection segments between nearby particles,
//!    built from post-movement positions.
//!
//! All passes are plain functions over the [`ParticleStore`]; none of them
//! allocates, except `proximity_phase` growing the frame's segment list up
//! to its steady-state capacity.

use crate::frame::FrameState;
use crate::particle::ParticleStore;
use crate::settings::Settings;
use crate::types::Bounds;
use glam::Vec2;

/// Scale applied to `orbit_speed` before it feeds the tangential kick.
///
/// Empirical tuning value; it keeps the slider range of `orbit_speed`
/// comfortable while the per-frame velocity change stays small.
pub const ORBIT_SPEED_SCALE: f32 = 0.01;

/// Radius of the pointer's influence, in pixels.
pub const POINTER_RADIUS: f32 = 100.0;

/// Opacity ceiling for connection segments.
///
/// A segment of zero length would render at exactly this alpha; opacity
/// falls off linearly to zero at `connection_distance`.
pub const CONNECTION_ALPHA: f32 = 0.3;

/// Applies the orbital force around the center of the simulation space.
///
/// Inactive unless `settings.orbit_around_center` is set. For each
/// particle at distance `r > 0` from the center:
///
/// 1. Adds a tangential kick of magnitude
///    `orbit_speed * ORBIT_SPEED_SCALE` perpendicular to the radial
///    direction.
/// 2. Pulls the particle toward the target `orbit_radius` with a spring
///    acceleration of `(r - orbit_radius) * orbit_gravity` along the
///    radial direction.
///
/// The correction is under-damped rather than an exact orbit; combined
/// with friction it settles particles into a ring around `orbit_radius`.
/// A particle exactly at the center has no defined radial direction and
/// is skipped.
pub fn orbital_phase(store: &mut ParticleStore, settings: &Settings, bounds: Bounds) {
    if !settings.orbit_around_center {
        return;
    }

    let center = bounds.center();
    for p in &mut store.particles {
        let d = p.pos - center;
        let r = d.length();
        if r > 0.0 {
            let radial = d / r;
            p.vel += radial.perp() * settings.orbit_speed * ORBIT_SPEED_SCALE;
            p.vel -= radial * (r - settings.orbit_radius) * settings.orbit_gravity;
        }
    }
}

/// Applies the pointer-driven radial force.
///
/// Particles within [`POINTER_RADIUS`] of the pointer are pushed directly
/// away from it (or pulled toward it when `settings.reverse_gravity` is
/// set), scaled by a linear falloff `(POINTER_RADIUS - dist) /
/// POINTER_RADIUS` and by `settings.mouse_force`.
///
/// A particle exactly at the pointer position receives no force: the
/// direction is undefined there, and skipping it is the chosen policy
/// rather than picking an arbitrary angle.
pub fn pointer_phase(store: &mut ParticleStore, settings: &Settings, pointer: Vec2) {
    if settings.mouse_force <= 0.0 {
        return;
    }

    let sign = if settings.reverse_gravity { -1.0 } else { 1.0 };
    for p in &mut store.particles {
        let d = p.pos - pointer;
        let dist = d.length();
        if dist > 0.0 && dist < POINTER_RADIUS {
            let falloff = (POINTER_RADIUS - dist) / POINTER_RADIUS;
            p.vel += (d / dist) * falloff * settings.mouse_force * sign;
        }
    }
}

/// Resolves pairwise elastic collisions between overlapping particles.
///
/// Inactive unless `settings.particle_collisions` is set. Every unordered
/// pair `(i, j)` with `i < j` is visited in left-to-right index order,
/// which keeps the outcome deterministic for a given store state. A pair
/// collides when `0 < dist < radius_i + radius_j`; the response treats
/// both particles as equal point masses:
///
/// 1. Rotate both velocities into the collision-normal frame.
/// 2. Swap the normal-axis components, leaving the tangential components
///    untouched (equal-mass elastic exchange, conserving kinetic energy).
/// 3. Rotate back to world space.
/// 4. Push both particles apart along the normal by half the overlap each,
///    so the pair is exactly in contact afterwards.
///
/// Complexity is O(n²); at the particle counts this engine targets
/// (a few hundred) that is cheaper than maintaining a broad phase.
pub fn collision_phase(store: &mut ParticleStore, settings: &Settings) {
    if !settings.particle_collisions {
        return;
    }

    let n = store.particles.len();
    for i in 0..n {
        // Split so that p_i and every later particle are borrowable at once.
        let (head, tail) = store.particles.split_at_mut(i + 1);
        let p_i = &mut head[i];

        for p_j in tail.iter_mut() {
            let delta = p_j.pos - p_i.pos;
            let dist = delta.length();
            let min_dist = p_i.radius + p_j.radius;
            if dist <= 0.0 || dist >= min_dist {
                continue;
            }

            let angle = delta.to_angle();
            let to_normal = Vec2::from_angle(-angle);
            let to_world = Vec2::from_angle(angle);

            // Velocities in the collision frame: x along the normal.
            let vi = to_normal.rotate(p_i.vel);
            let vj = to_normal.rotate(p_j.vel);

            // Equal masses: the normal components trade places.
            p_i.vel = to_world.rotate(Vec2::new(vj.x, vi.y));
            p_j.vel = to_world.rotate(Vec2::new(vi.x, vj.y));

            // Remove the overlap symmetrically along the normal.
            let normal = delta / dist;
            let push = (min_dist - dist) * 0.5;
            p_i.pos -= normal * push;
            p_j.pos += normal * push;
        }
    }
}

/// Advances positions, wraps at the bounds, and applies friction.
///
/// The per-particle order is fixed:
/// 1. `pos += vel`.
/// 2. Wrap each axis independently: below `0` jumps to the far edge,
///    beyond the edge jumps to `0` (toroidal space).
/// 3. `vel *= friction`.
///
/// Friction runs last, exactly once per tick, after every pass that adds
/// velocity; repeated ticks therefore converge instead of diverging.
pub fn integrate_phase(store: &mut ParticleStore, settings: &Settings, bounds: Bounds) {
    for p in &mut store.particles {
        p.pos += p.vel;

        if p.pos.x < 0.0 {
            p.pos.x = bounds.width;
        } else if p.pos.x > bounds.width {
            p.pos.x = 0.0;
        }
        if p.pos.y < 0.0 {
            p.pos.y = bounds.height;
        } else if p.pos.y > bounds.height {
            p.pos.y = 0.0;
        }

        p.vel *= settings.friction;
    }
}

/// Emits a connection segment for every pair of nearby particles.
///
/// Pairs are scanned in the same `i < j` order as the collision pass. A
/// segment is emitted iff the pair distance is strictly below
/// `settings.connection_distance`, with opacity
/// `(1 - dist / connection_distance) * CONNECTION_ALPHA`, so opacity is
/// strictly decreasing in distance and tops out at [`CONNECTION_ALPHA`].
///
/// This pass only reads the store; it must run after
/// [`integrate_phase`] so segments connect post-movement positions.
pub fn proximity_phase(store: &ParticleStore, settings: &Settings, frame: &mut FrameState) {
    if settings.connection_distance <= 0.0 {
        return;
    }

    let particles = &store.particles;
    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            let dist = particles[i].pos.distance(particles[j].pos);
            if dist < settings.connection_distance {
                let opacity = (1.0 - dist / settings.connection_distance) * CONNECTION_ALPHA;
                frame.push_segment(particles[i].pos, particles[j].pos, opacity);
            }
        }
    }
}
