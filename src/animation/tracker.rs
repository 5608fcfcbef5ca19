//! Counter and flag cells for animation state.
//!
//! Both remember the value they were built with so a phase transition can put them back where
//! they started. They are plain owned values: whoever owns the line or group mutates them through
//! `&mut`, so there is never a stale copy to observe.

/// Integer counter that resets to its construction-time value, not to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Counter {
    initial: u64,
    value: u64,
}

impl Counter {
    pub fn new(initial: u64) -> Self {
        Self {
            initial,
            value: initial,
        }
    }

    pub fn increment(&mut self) {
        self.value += 1;
    }

    pub fn reset(&mut self) {
        self.value = self.initial;
    }

    pub fn set(&mut self, value: u64) {
        self.value = value;
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn is_even(&self) -> bool {
        self.value.is_multiple_of(2)
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Boolean cell with the same reset semantics as [`Counter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Flag {
    initial: bool,
    value: bool,
}

impl Flag {
    pub fn new(initial: bool) -> Self {
        Self {
            initial,
            value: initial,
        }
    }

    pub fn set_true(&mut self) {
        self.value = true;
    }

    pub fn set_false(&mut self) {
        self.value = false;
    }

    pub fn set(&mut self, value: bool) {
        self.value = value;
    }

    pub fn reset(&mut self) {
        self.value = self.initial;
    }

    pub fn value(&self) -> bool {
        self.value
    }
}
