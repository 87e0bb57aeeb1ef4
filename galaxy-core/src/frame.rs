use glam::Vec2;

/// One particle as handed to the renderer: position plus draw radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderPoint {
    pub pos: Vec2,
    pub radius: f32,
}

/// One proximity-graph edge as handed to the renderer.
///
/// `opacity` is already attenuated by distance; the renderer only has to
/// apply it as an alpha factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
    pub opacity: f32,
}

/// The renderable output of one tick.
///
/// The engine owns a single `FrameState` and refills it in place every
/// tick, so steady-state frames reuse the same two allocations instead of
/// building fresh vectors at animation rate. On a skipped tick (degenerate
/// bounds) the previous contents are simply left untouched and returned
/// again.
#[derive(Debug, Default)]
pub struct FrameState {
    /// Particle positions and radii, in store order.
    pub points: Vec<RenderPoint>,
    /// Proximity edges between particle pairs, in pair-scan order.
    pub segments: Vec<Segment>,
}

impl FrameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties both lists while keeping their capacity.
    pub fn clear(&mut self) {
        self.points.clear();
        self.segments.clear();
    }

    #[inline]
    pub fn push_point(&mut self, pos: Vec2, radius: f32) {
        self.points.push(RenderPoint { pos, radius });
    }

    #[inline]
    pub fn push_segment(&mut self, from: Vec2, to: Vec2, opacity: f32) {
        self.segments.push(Segment { from, to, opacity });
    }
}
