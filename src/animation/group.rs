use std::time::Duration;

use crate::{
    animation::{draw::TrackedLine, tracker::Counter},
    foundation::{
        core::Vertex,
        error::{InkError, InkResult},
        math::RandomSource,
    },
};

/// Which of the two target geometries lines trace toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// The SVG shape as loaded.
    Original,
    /// The vertically reflected shape.
    Inverse,
}

impl Target {
    pub fn other(self) -> Self {
        match self {
            Self::Original => Self::Inverse,
            Self::Inverse => Self::Original,
        }
    }
}

/// Group-level phase. Exactly one variant is live, so at most one of wander, trace-inverse and
/// trace-original can be active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Lines hold still before the very first wander.
    Startup { remaining: Duration },
    /// Lines move at random; `next` is traced once the time runs out.
    Wander { remaining: Duration, next: Target },
    /// Lines approach and trace `Target` until every one of them is done.
    Trace(Target),
    /// Lines hold the finished shape. When the time runs out the draw count advances, index
    /// counters clear, and the group wanders before tracing `next`.
    Pause { remaining: Duration, next: Target },
}

impl Phase {
    fn remaining_mut(&mut self) -> Option<&mut Duration> {
        match self {
            Self::Startup { remaining }
            | Self::Wander { remaining, .. }
            | Self::Pause { remaining, .. } => Some(remaining),
            Self::Trace(_) => None,
        }
    }
}

/// Receives half-cycle completion notices from a [`LineGroup`].
pub trait PhaseListener {
    /// The original shape has been fully traced (odd draw count).
    fn front_finished(&mut self);
    /// The inverse shape has been fully traced (even draw count).
    fn back_finished(&mut self);
}

impl PhaseListener for () {
    fn front_finished(&mut self) {}
    fn back_finished(&mut self) {}
}

/// All lines of one shape, their two target geometries, and the phase machine driving them.
#[derive(Clone, Debug)]
pub struct LineGroup {
    lines: Vec<TrackedLine>,
    initial: Vec<Vec<Vertex>>,
    inverse: Vec<Vec<Vertex>>,
    pause: Duration,
    phase: Phase,
    draw_count: Counter,
    total_vertex_count: u64,
}

impl LineGroup {
    /// Build a group whose lines start out as copies of `initial`.
    pub fn from_targets(
        initial: Vec<Vec<Vertex>>,
        inverse: Vec<Vec<Vertex>>,
        pause: Duration,
    ) -> InkResult<Self> {
        let lines = initial.clone();
        Self::new(lines, initial, inverse, pause)
    }

    /// Build a group from explicit starting buffers plus both target sets, indexed in parallel.
    #[tracing::instrument(skip_all, fields(lines = lines.len()))]
    pub fn new(
        lines: Vec<Vec<Vertex>>,
        initial: Vec<Vec<Vertex>>,
        inverse: Vec<Vec<Vertex>>,
        pause: Duration,
    ) -> InkResult<Self> {
        if lines.is_empty() {
            return Err(InkError::animation("line group must contain at least one line"));
        }
        if initial.len() != lines.len() || inverse.len() != lines.len() {
            return Err(InkError::animation(format!(
                "target geometry count mismatch: {} lines, {} initial, {} inverse",
                lines.len(),
                initial.len(),
                inverse.len()
            )));
        }
        for (i, line) in lines.iter().enumerate() {
            if line.len() < 2 {
                return Err(InkError::animation(format!(
                    "line {i} has {} vertices; at least 2 are required",
                    line.len()
                )));
            }
            if initial[i].len() != line.len() || inverse[i].len() != line.len() {
                return Err(InkError::animation(format!(
                    "line {i} has {} vertices but its targets have {} (initial) and {} (inverse)",
                    line.len(),
                    initial[i].len(),
                    inverse[i].len()
                )));
            }
        }

        let total_vertex_count = lines.iter().map(|l| l.len() as u64).sum();
        tracing::debug!(total_vertex_count, "line group ready");

        Ok(Self {
            lines: lines.into_iter().map(TrackedLine::new).collect(),
            initial,
            inverse,
            pause,
            phase: Phase::Startup { remaining: pause },
            draw_count: Counter::new(0),
            total_vertex_count,
        })
    }

    pub fn lines(&self) -> &[TrackedLine] {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut [TrackedLine] {
        &mut self.lines
    }

    pub fn targets(&self, target: Target) -> &[Vec<Vertex>] {
        match target {
            Target::Original => &self.initial,
            Target::Inverse => &self.inverse,
        }
    }

    pub fn pause(&self) -> Duration {
        self.pause
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Override the current phase, e.g. to skip the start-up hold.
    pub fn set_phase(&mut self, phase: Phase) {
        tracing::debug!(?phase, "phase set");
        self.phase = phase;
    }

    pub fn draw_count(&self) -> u64 {
        self.draw_count.value()
    }

    pub fn total_vertex_count(&self) -> u64 {
        self.total_vertex_count
    }

    pub fn wander_shape(&self) -> bool {
        matches!(self.phase, Phase::Wander { .. })
    }

    pub fn draw_inverse_shape(&self) -> bool {
        self.phase == Phase::Trace(Target::Inverse)
    }

    pub fn draw_original_shape(&self) -> bool {
        self.phase == Phase::Trace(Target::Original)
    }

    /// Fraction of all target vertices traced so far, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let traced: u64 = self.lines.iter().map(TrackedLine::index_counter).sum();
        traced as f64 / self.total_vertex_count as f64
    }

    /// Advance wall-clock time, then step every line once.
    pub fn tick(
        &mut self,
        dt: Duration,
        rng: &mut impl RandomSource,
        listener: &mut impl PhaseListener,
    ) {
        self.advance_clock(dt);
        self.step(rng, listener);
    }

    /// Let `dt` elapse on the phase timer, firing every transition it covers. Time left over
    /// after a transition carries into the next timed phase.
    pub fn advance_clock(&mut self, dt: Duration) {
        let mut budget = dt;
        loop {
            let Some(remaining) = self.phase.remaining_mut() else {
                return;
            };
            if budget < *remaining {
                *remaining -= budget;
                return;
            }
            budget -= *remaining;
            self.expire_phase();
        }
    }

    fn expire_phase(&mut self) {
        let next_phase = match self.phase {
            Phase::Startup { .. } => Phase::Wander {
                remaining: self.pause,
                next: Target::Inverse,
            },
            Phase::Pause { next, .. } => {
                self.draw_count.increment();
                for line in &mut self.lines {
                    line.reset_index_counter();
                }
                Phase::Wander {
                    remaining: self.pause,
                    next,
                }
            }
            Phase::Wander { next, .. } => Phase::Trace(next),
            Phase::Trace(t) => Phase::Trace(t),
        };
        tracing::debug!(
            from = ?self.phase,
            to = ?next_phase,
            draw_count = self.draw_count.value(),
            "phase transition"
        );
        self.phase = next_phase;
    }

    /// Step every line once according to the current phase, run the completion barrier, and mark
    /// all buffers dirty.
    pub fn step(&mut self, rng: &mut impl RandomSource, listener: &mut impl PhaseListener) {
        match self.phase {
            Phase::Wander { .. } => {
                for line in &mut self.lines {
                    line.wander(rng);
                }
            }
            Phase::Trace(target) => {
                let targets = match target {
                    Target::Original => &self.initial,
                    Target::Inverse => &self.inverse,
                };
                for (line, target) in self.lines.iter_mut().zip(targets) {
                    line.draw_toward(target, rng);
                }
                if self.lines.iter().all(TrackedLine::inverse_drawn) {
                    self.finish_half_cycle(listener);
                }
            }
            Phase::Startup { .. } | Phase::Pause { .. } => {}
        }

        for line in &mut self.lines {
            line.buffer_mut().mark_dirty();
        }
    }

    fn finish_half_cycle(&mut self, listener: &mut impl PhaseListener) {
        for line in &mut self.lines {
            line.reset_trace_flags();
        }

        let next = if self.draw_count.is_even() {
            listener.back_finished();
            Target::Original
        } else {
            listener.front_finished();
            Target::Inverse
        };
        tracing::info!(
            draw_count = self.draw_count.value(),
            finished = ?next.other(),
            "half-cycle complete"
        );
        self.phase = Phase::Pause {
            remaining: self.pause,
            next,
        };
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/group.rs"]
mod tests;
