use serde::{Deserialize, Serialize};

use crate::foundation::{
    error::{InkError, InkResult},
    math::lerp,
};

/// Exponent applied to draw progress before it drives a color fade.
pub const FADE_EXPONENT: i32 = 5;

/// An opaque sRGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (alpha is ignored). The `#` is optional.
    pub fn from_hex(s: &str) -> InkResult<Self> {
        parse_hex(s).map_err(InkError::validation)
    }

    pub fn to_u8(self) -> [u8; 3] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [to_u8(self.r), to_u8(self.g), to_u8(self.b)]
    }

    /// Six upper-case hex digits without `#`, e.g. `3C3A3D`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_u8();
        format!("{r:02X}{g:02X}{b:02X}")
    }

    /// Per-channel complement (`255 - c` on the 8-bit value).
    pub fn inverted(self) -> Self {
        let [r, g, b] = self.to_u8();
        Self::from_u8(255 - r, 255 - g, 255 - b)
    }

    pub fn to_linear(self) -> [f64; 3] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        ]
    }

    pub fn from_linear(c: [f64; 3]) -> Self {
        Self::new(
            linear_to_srgb(c[0]),
            linear_to_srgb(c[1]),
            linear_to_srgb(c[2]),
        )
    }

    /// Interpolate toward `other` in linear light, returning an sRGB color.
    pub fn lerp_linear(self, other: Self, t: f64) -> Self {
        let a = self.to_linear();
        let b = other.to_linear();
        Self::from_linear([
            lerp(a[0], b[0], t),
            lerp(a[1], b[1], t),
            lerp(a[2], b[2], t),
        ])
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbObj { r: f64, g: f64, b: f64 },
            Arr(Vec<f64>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbObj { r, g, b } => Ok(Self::new(r, g, b)),
            Repr::Arr(v) => {
                if v.len() == 3 {
                    Ok(Self::new(v[0], v[1], v[2]))
                } else {
                    Err(serde::de::Error::custom("rgb array must have len 3 ([r,g,b])"))
                }
            }
        }
    }
}

fn parse_hex(s: &str) -> Result<Rgb, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err(format!("invalid hex color \"{s}\""));
    }

    match s.len() {
        3 => {
            let mut out = [0u8; 3];
            for (o, c) in out.iter_mut().zip(s.chars()) {
                let nibble = c
                    .to_digit(16)
                    .ok_or_else(|| format!("invalid hex digit '{c}'"))?;
                *o = (nibble * 17) as u8;
            }
            Ok(Rgb::from_u8(out[0], out[1], out[2]))
        }
        6 | 8 => Ok(Rgb::from_u8(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        _ => Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

fn srgb_to_linear(c: f64) -> f64 {
    if c < 0.04045 {
        c * 0.077_399_380_7
    } else {
        (c * 0.947_867_298_6 + 0.052_132_701_4).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> f64 {
    if c < 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(0.41666) - 0.055
    }
}

/// How far a fade has progressed for a given half-cycle.
///
/// Even draw counts trace the inverse shape and ease in (`p^5`); odd ones trace the original and
/// run the fade backwards (`(1 - p)^5`).
pub fn fade_amount(draw_count: u64, percent: f64) -> f64 {
    let p = percent.clamp(0.0, 1.0);
    if draw_count.is_multiple_of(2) {
        p.powi(FADE_EXPONENT)
    } else {
        (1.0 - p).powi(FADE_EXPONENT)
    }
}

/// One stroke color that fades to its complement as the shape is traced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialFade {
    pub start: Rgb,
    pub end: Rgb,
    pub current: Rgb,
}

/// Background and stroke colors driven by draw progress.
#[derive(Debug, Clone)]
pub struct ColorHook {
    background_start: Rgb,
    background_end: Rgb,
    background: Rgb,
    materials: Vec<MaterialFade>,
}

impl ColorHook {
    /// Collect every distinct stroke color whose hex code is listed in `animated` (case
    /// insensitive, `#` optional) and fade it toward its complement.
    pub fn new(
        background_start: Rgb,
        background_end: Rgb,
        stroke_colors: impl IntoIterator<Item = Rgb>,
        animated: &[String],
    ) -> Self {
        let wanted: Vec<String> = animated
            .iter()
            .map(|h| h.trim().trim_start_matches('#').to_ascii_uppercase())
            .collect();

        let mut materials: Vec<MaterialFade> = Vec::new();
        for color in stroke_colors {
            if !wanted.contains(&color.to_hex()) {
                continue;
            }
            if materials.iter().any(|m| m.start == color) {
                continue;
            }
            materials.push(MaterialFade {
                start: color,
                end: color.inverted(),
                current: color,
            });
        }

        Self {
            background_start,
            background_end,
            background: background_start,
            materials,
        }
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn materials(&self) -> &[MaterialFade] {
        &self.materials
    }

    /// Recompute every color for the given half-cycle and progress fraction.
    pub fn apply(&mut self, draw_count: u64, percent: f64) {
        let t = fade_amount(draw_count, percent);
        self.background = self.background_start.lerp_linear(self.background_end, t);
        for m in &mut self.materials {
            m.current = m.start.lerp_linear(m.end, t);
        }
    }

    /// Current color for a stroke: its animated value if it is one of the fading materials,
    /// otherwise the stroke itself.
    pub fn stroke(&self, original: Rgb) -> Rgb {
        self.materials
            .iter()
            .find(|m| m.start == original)
            .map_or(original, |m| m.current)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hooks/color.rs"]
mod tests;
