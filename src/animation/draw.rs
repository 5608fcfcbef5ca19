use crate::{
    animation::{
        geometry::{
            VertexBuffer, last_two_vertices, rotation_angle, step_length, update_position_array,
        },
        tracker::{Counter, Flag},
    },
    foundation::{core::Vertex, math::RandomSource},
};

/// Once the head is closer than this to the target's first vertex the line starts tracing.
pub const TRACE_START_DISTANCE: f64 = 3.0;
/// Chance per approach step of steering straight at the target instead of keeping the heading.
pub const AIM_PROBABILITY: f64 = 0.05;

/// Where a line is in its current trace cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineState {
    /// Moving around, steering toward the target now and then.
    Approaching,
    /// Copying target vertices into the head one per step.
    Tracing,
    /// Whole target traced; inert until the group resets it.
    Done,
}

/// One polyline and its trace progress.
#[derive(Clone, Debug)]
pub struct TrackedLine {
    buffer: VertexBuffer,
    index_counter: Counter,
    draw_inverse: Flag,
    inverse_drawn: Flag,
}

impl TrackedLine {
    pub fn new(positions: Vec<Vertex>) -> Self {
        Self {
            buffer: VertexBuffer::new(positions),
            index_counter: Counter::new(0),
            draw_inverse: Flag::new(false),
            inverse_drawn: Flag::new(false),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len()
    }

    pub fn buffer(&self) -> &VertexBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut VertexBuffer {
        &mut self.buffer
    }

    pub fn positions(&self) -> &[Vertex] {
        self.buffer.positions()
    }

    /// Number of target vertices traced so far in this cycle.
    pub fn index_counter(&self) -> u64 {
        self.index_counter.value()
    }

    pub fn draw_inverse(&self) -> bool {
        self.draw_inverse.value()
    }

    pub fn inverse_drawn(&self) -> bool {
        self.inverse_drawn.value()
    }

    pub fn state(&self) -> LineState {
        if self.inverse_drawn.value() {
            LineState::Done
        } else if self.draw_inverse.value() {
            LineState::Tracing
        } else {
            LineState::Approaching
        }
    }

    /// Clear both trace flags; the line approaches again on its next step.
    pub fn reset_trace_flags(&mut self) {
        self.draw_inverse.reset();
        self.inverse_drawn.reset();
    }

    /// Forget how much of the target was traced.
    pub fn reset_index_counter(&mut self) {
        self.index_counter.reset();
    }

    fn push(&mut self, vertex: Vertex) {
        update_position_array(self.buffer.positions_mut(), vertex);
    }

    /// Advance one step toward `target`: approach its first vertex, then trace it vertex by
    /// vertex. A line that is already done is left untouched.
    pub fn draw_toward(&mut self, target: &[Vertex], rng: &mut impl RandomSource) {
        if self.inverse_drawn.value() {
            return;
        }
        let Some(&target_first) = target.first() else {
            return;
        };

        if !self.draw_inverse.value() {
            let (last, second_to_last) = last_two_vertices(self.buffer.positions());

            if last.distance_to(target_first) < TRACE_START_DISTANCE {
                self.draw_inverse.set_true();
            } else {
                let heading = if rng.chance(AIM_PROBABILITY) {
                    target_first - last
                } else {
                    last - second_to_last
                };
                // steps stay in the drawing plane even when a target carries depth
                let next = heading
                    .flattened()
                    .with_length(step_length(rng))
                    .rotate_z(rotation_angle(rng))
                    + last;
                self.push(next);
                return;
            }
        }

        let vertex_count = self.vertex_count();
        let index = self.index_counter.value() as usize;
        let next = if index < vertex_count {
            target.get(index).copied()
        } else {
            None
        };
        let Some(next) = next else {
            self.inverse_drawn.set_true();
            return;
        };
        self.index_counter.increment();
        self.push(next);
    }

    /// Advance one step along the current heading, ignoring any target.
    pub fn wander(&mut self, rng: &mut impl RandomSource) {
        let (last, second_to_last) = last_two_vertices(self.buffer.positions());
        let next = (last - second_to_last)
            .with_length(step_length(rng))
            .rotate_z(rotation_angle(rng))
            + last;
        self.push(next);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/draw.rs"]
mod tests;
