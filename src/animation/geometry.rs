use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::foundation::{core::Vertex, math::RandomSource};

/// Chance per step that a heading snaps by a full right angle.
pub const SHARP_TURN_PROBABILITY: f64 = 0.02;
/// Chance (after the sharp-turn roll fails) of a small wobble in the heading.
pub const SOFT_TURN_PROBABILITY: f64 = 0.08;
/// Width of the wobble window; samples fall in `(-SOFT_TURN_SPAN / 2, SOFT_TURN_SPAN / 2)`.
pub const SOFT_TURN_SPAN: f64 = FRAC_PI_4;

/// Shortest step a moving head takes.
pub const MIN_STEP_LENGTH: f64 = 2.5;
/// Upper bound (exclusive) of a moving head's step.
pub const MAX_STEP_LENGTH: f64 = 7.5;

/// Fixed-length polyline storage plus the renderer's dirty mark.
///
/// The length is set at construction and nothing in this crate changes it afterwards; every step
/// shifts the contents instead.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexBuffer {
    positions: Vec<Vertex>,
    dirty: bool,
}

impl VertexBuffer {
    pub fn new(positions: Vec<Vertex>) -> Self {
        Self {
            positions,
            dirty: true,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vertex] {
        &self.positions
    }

    pub(crate) fn positions_mut(&mut self) -> &mut [Vertex] {
        &mut self.positions
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return the dirty mark and clear it. Called by whoever uploads the positions.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

/// Head of the polyline and the vertex just behind it.
///
/// # Panics
///
/// Panics when `buffer` holds fewer than two vertices; a heading cannot be derived from one point.
pub fn last_two_vertices(buffer: &[Vertex]) -> (Vertex, Vertex) {
    let count = buffer.len();
    assert!(
        count >= 2,
        "last_two_vertices needs at least 2 vertices, buffer has {count}"
    );
    (buffer[count - 1], buffer[count - 2])
}

/// Turning angle for one step: mostly straight, sometimes a wobble, rarely a right angle.
pub fn rotation_angle(rng: &mut impl RandomSource) -> f64 {
    if rng.chance(SHARP_TURN_PROBABILITY) {
        if rng.chance(0.5) { -FRAC_PI_2 } else { FRAC_PI_2 }
    } else if rng.chance(SOFT_TURN_PROBABILITY) {
        (rng.next_f64() - 0.5) * SOFT_TURN_SPAN
    } else {
        0.0
    }
}

/// Step length in `[MIN_STEP_LENGTH, MAX_STEP_LENGTH)`.
pub fn step_length(rng: &mut impl RandomSource) -> f64 {
    rng.range(MIN_STEP_LENGTH, MAX_STEP_LENGTH)
}

/// Slide every vertex one slot toward the tail and put `new_vertex` (with z = 0) at the head.
///
/// The polyline behaves like a snake of fixed length that always ends at its newest point.
pub fn update_position_array(buffer: &mut [Vertex], new_vertex: Vertex) {
    let Some(last) = buffer.len().checked_sub(1) else {
        return;
    };
    buffer.copy_within(1.., 0);
    buffer[last] = new_vertex.flattened();
}

#[cfg(test)]
#[path = "../../tests/unit/animation/geometry.rs"]
mod tests;
