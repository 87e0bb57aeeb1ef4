use glam::Vec2;

/// Simulation-space bounds in pixels.
///
/// Particles live in `[0, width) x [0, height)`; the space is toroidal,
/// so crossing one edge re-enters from the opposite edge. Bounds are
/// supplied fresh on every tick and may change between ticks (e.g. on a
/// container resize); positions are never rescaled, only the wrap
/// boundary moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const ZERO: Bounds = Bounds {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Center of the simulation space, used as the orbital attractor.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Returns `true` if the bounds cannot host a simulation step.
    ///
    /// Zero-area or non-finite bounds would divide by zero in the wrap
    /// and orbital math, so a tick against them is skipped entirely.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
            || !self.width.is_finite()
            || !self.height.is_finite()
    }
}
