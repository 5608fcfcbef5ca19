//! Falling-letter text overlay.
//!
//! Letters are dropped from above the view, fall under per-letter gravity until they pass their
//! slot, then ease into it. As the shape's trace progresses the text shifts to the fade color and
//! finally fades out. Coordinates are view units with the origin at the view center and y up; the
//! view is [`VIEW_HEIGHT`] units tall.

use serde::{Deserialize, Serialize};

use crate::{
    animation::{group::PhaseListener, tracker::Flag},
    foundation::{
        core::Point,
        math::{RandomSource, Rng64, lerp},
    },
    hooks::color::Rgb,
};

/// Height of the overlay's view in text units.
pub const VIEW_HEIGHT: f64 = 187.46;
/// Progress past which the color fade starts.
pub const COLOR_FADE_THRESHOLD: f64 = 0.6;
/// Progress past which the opacity fade starts.
pub const OPACITY_FADE_THRESHOLD: f64 = 0.96;
pub const COLOR_FADE_SECS: f64 = 5.0;
pub const OPACITY_FADE_SECS: f64 = 1.0;
pub const MIN_GRAVITY: f64 = 0.5;
pub const MAX_GRAVITY: f64 = 6.0;
/// Per-frame (at 60 fps) pull of a landed letter toward its slot.
pub const SETTLE_LERP: f64 = 0.3;
/// Horizontal jitter applied to stacked letters.
const VERTICAL_JITTER: f64 = 10.0;
const REFERENCE_FRAME_SECS: f64 = 1.0 / 60.0;

pub const LYRICS: &[[&str; 2]] = &[
    ["THIS PARTY", "SUCKS"],
    ["WE ARE HAVING", "A PARTY"],
    ["YOUR TATTOOS", "ARE SO DEEP"],
    ["I THINK WE'RE", "HAVING FUN"],
    ["BREAK A BOTTLE", "CLEAN IT UP"],
    ["I JUST WANT SOME", "CHIPS AND DIP"],
    ["I CAN SEE", "YOUR NIP"],
    ["OHHHHH", "HAPPINESS"],
    ["IM A GIANT", "VAGINA"],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Words spread left to right and top to bottom across the whitespace.
    #[default]
    Horizontal,
    /// Letters stacked in a column.
    Vertical,
}

/// What to drop and how.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropSpec {
    /// Left and right blocks. `None` picks a random entry from [`LYRICS`].
    #[serde(default)]
    pub text: Option<[String; 2]>,
    pub color: Rgb,
    #[serde(default)]
    pub orientation: Orientation,
}

impl DropSpec {
    pub fn new(text: Option<[&str; 2]>, color: Rgb, orientation: Orientation) -> Self {
        Self {
            text: text.map(|[a, b]| [a.to_owned(), b.to_owned()]),
            color,
            orientation,
        }
    }
}

/// Sizing and color settings for the overlay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Glyph size in view units.
    pub size: f64,
    /// Line-step multiplier for stacked letters.
    pub spacing: f64,
    /// Advance width as a fraction of `size`.
    pub advance_ratio: f64,
    pub font_family: String,
    pub fade_color: Rgb,
    /// Drop performed at start-up.
    pub intro: DropSpec,
    /// Drop performed whenever the original shape finishes.
    pub on_front_finished: DropSpec,
    /// Drop performed whenever the inverse shape finishes.
    pub on_back_finished: DropSpec,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 8.0,
            spacing: 1.5,
            advance_ratio: 0.62,
            font_family: "serif".to_owned(),
            fade_color: Rgb::from_u8(0x58, 0x12, 0x16),
            intro: DropSpec::new(
                Some(["I THINK WE'RE", "HAVING FUN"]),
                Rgb::BLACK,
                Orientation::Horizontal,
            ),
            on_front_finished: DropSpec::new(None, Rgb::BLACK, Orientation::Horizontal),
            on_back_finished: DropSpec::new(
                Some(["NO", "REGERTS"]),
                Rgb::WHITE,
                Orientation::Vertical,
            ),
        }
    }
}

/// View extents the layout works within.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextView {
    pub width: f64,
    pub height: f64,
    /// Distance from the view center to the shape's right edge.
    pub shape_half_width: f64,
}

impl TextView {
    /// Center of the empty band between the shape and the view edge.
    pub fn whitespace_center(&self) -> f64 {
        self.shape_half_width + (self.width / 2.0 - self.shape_half_width) / 2.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Letter {
    pub ch: char,
    pub position: Point,
    pub target: Point,
    pub gravity: f64,
}

/// The overlay's animated state.
#[derive(Clone, Debug)]
pub struct TextOverlay {
    style: TextStyle,
    view: TextView,
    rng: Rng64,
    letters: Vec<Letter>,
    base_color: Rgb,
    color: Rgb,
    opacity: f64,
    clock: f64,
    color_fade_start: Option<f64>,
    opacity_fade_start: Option<f64>,
    fade_color_triggered: Flag,
    fade_out_triggered: Flag,
}

impl TextOverlay {
    pub fn new(style: TextStyle, view: TextView, seed: u64) -> Self {
        Self {
            base_color: style.intro.color,
            color: style.intro.color,
            style,
            view,
            rng: Rng64::new(seed),
            letters: Vec::new(),
            opacity: 1.0,
            clock: 0.0,
            color_fade_start: None,
            opacity_fade_start: None,
            fade_color_triggered: Flag::new(false),
            fade_out_triggered: Flag::new(false),
        }
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn fade_color_triggered(&self) -> bool {
        self.fade_color_triggered.value()
    }

    pub fn fade_out_triggered(&self) -> bool {
        self.fade_out_triggered.value()
    }

    pub fn drop_intro(&mut self) {
        let spec = self.style.intro.clone();
        self.drop_letters(&spec);
    }

    /// Replace the current text with a fresh drop and rearm both fades.
    pub fn drop_letters(&mut self, spec: &DropSpec) {
        self.clock = 0.0;
        self.color_fade_start = None;
        self.opacity_fade_start = None;
        self.fade_color_triggered.reset();
        self.fade_out_triggered.reset();
        self.base_color = spec.color;
        self.color = spec.color;
        self.opacity = 1.0;

        let [left, right] = match &spec.text {
            Some(t) => t.clone(),
            None => {
                let i = ((self.rng.next_f64() * LYRICS.len() as f64) as usize).min(LYRICS.len() - 1);
                LYRICS[i].map(str::to_owned)
            }
        };
        tracing::debug!(%left, %right, orientation = ?spec.orientation, "dropping letters");

        let offset = self.view.whitespace_center();
        let mut letters = self.layout(&left, spec.orientation);
        shift_x(&mut letters, -offset);
        let mut right_letters = self.layout(&right, spec.orientation);
        shift_x(&mut right_letters, offset);
        letters.extend(right_letters);
        self.letters = letters;
    }

    fn layout(&mut self, text: &str, orientation: Orientation) -> Vec<Letter> {
        match orientation {
            Orientation::Horizontal => self.layout_horizontal(text),
            Orientation::Vertical => self.layout_vertical(text),
        }
    }

    fn start_y(&mut self) -> f64 {
        let h = self.view.height;
        self.rng.range(h / 2.0, h)
    }

    fn gravity(&mut self) -> f64 {
        self.rng.range(MIN_GRAVITY, MAX_GRAVITY)
    }

    fn layout_vertical(&mut self, text: &str) -> Vec<Letter> {
        let size = self.style.size;
        let spacing = self.style.spacing;
        let chars: Vec<char> = text.chars().collect();
        let n = chars.len() as f64;
        let word_height = n * size + (n - 1.0).max(0.0) * spacing;

        let mut out = Vec::with_capacity(chars.len());
        for (i, ch) in chars.into_iter().enumerate() {
            let gravity = self.gravity();
            let target = Point::new(
                (self.rng.next_f64() - 0.5) * VERTICAL_JITTER,
                word_height / 2.0 - spacing * size * i as f64,
            );
            let x = (self.rng.next_f64() - 0.5) * VERTICAL_JITTER;
            let y = self.start_y();
            out.push(Letter {
                ch,
                position: Point::new(x, y),
                target,
                gravity,
            });
        }
        out
    }

    fn layout_horizontal(&mut self, text: &str) -> Vec<Letter> {
        let advance = self.style.size * self.style.advance_ratio;
        let words: Vec<&str> = text.split_whitespace().collect();
        let n = words.len() as f64;
        let y_spacing = self.view.height / (n + 1.0);
        let x_spacing = (self.view.width / 2.0 - self.view.shape_half_width) / (n + 1.0);

        let mut out = Vec::new();
        for (word_index, word) in words.iter().enumerate() {
            let wi = word_index as f64;
            let count = word.chars().count();
            let word_width = count as f64 * advance;
            for (i, ch) in word.chars().enumerate() {
                let gravity = self.gravity();
                let x = (i as f64 + 0.5) * advance - word_width / 2.0 + x_spacing * wi
                    - (n - 1.0) * x_spacing / 2.0;
                let y = y_spacing * (n - wi - 1.0) - (n - 1.0) * y_spacing / 2.0;
                let start_y = self.start_y();
                out.push(Letter {
                    ch,
                    position: Point::new(x, start_y),
                    target: Point::new(x, y),
                    gravity,
                });
            }
        }
        out
    }

    /// Advance falling letters and fades by `dt_secs`, arming fades from `percent`.
    pub fn update(&mut self, percent: f64, dt_secs: f64) {
        if self.letters.is_empty() {
            return;
        }
        self.clock += dt_secs;
        let frames = dt_secs / REFERENCE_FRAME_SECS;
        let t = self.clock;
        let settle = 1.0 - (1.0 - SETTLE_LERP).powf(frames);

        for letter in &mut self.letters {
            if letter.position.y > letter.target.y {
                letter.position.y -= 0.5 * letter.gravity * t * t * frames;
            } else {
                letter.position = letter.position.lerp(letter.target, settle);
            }
        }

        let in_window = |threshold: f64| percent > threshold && percent < 1.0;
        if in_window(COLOR_FADE_THRESHOLD) && !self.fade_color_triggered.value() {
            self.fade_color_triggered.set_true();
            self.color_fade_start = Some(self.clock);
            tracing::debug!(percent, "text color fade triggered");
        }
        if in_window(OPACITY_FADE_THRESHOLD) && !self.fade_out_triggered.value() {
            self.fade_out_triggered.set_true();
            self.opacity_fade_start = Some(self.clock);
            tracing::debug!(percent, "text fade-out triggered");
        }

        if let Some(start) = self.color_fade_start {
            let u = ((self.clock - start) / COLOR_FADE_SECS).clamp(0.0, 1.0);
            self.color = self.base_color.lerp_linear(self.style.fade_color, u);
        }
        if let Some(start) = self.opacity_fade_start {
            let u = ((self.clock - start) / OPACITY_FADE_SECS).clamp(0.0, 1.0);
            self.opacity = lerp(1.0, 0.0, u);
        }
    }
}

impl PhaseListener for TextOverlay {
    fn front_finished(&mut self) {
        let spec = self.style.on_front_finished.clone();
        self.drop_letters(&spec);
    }

    fn back_finished(&mut self) {
        let spec = self.style.on_back_finished.clone();
        self.drop_letters(&spec);
    }
}

fn shift_x(letters: &mut [Letter], dx: f64) {
    for l in letters {
        l.position.x += dx;
        l.target.x += dx;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hooks/text.rs"]
mod tests;
