use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        core::{Canvas, Fps},
        error::{InkError, InkResult},
    },
    hooks::{color::Rgb, text::TextStyle},
};

/// How each line is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DrawStyle {
    #[default]
    Lines,
    /// One dot per vertex.
    Points,
}

/// Text overlay settings. `enabled: false` hides the overlay entirely.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub enabled: bool,
    #[serde(flatten)]
    pub style: TextStyle,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            style: TextStyle::default(),
        }
    }
}

/// Everything needed to build a [`crate::Scene`], as read from a JSON file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// SVG to animate. Relative paths resolve against the config file's directory.
    pub svg: PathBuf,
    pub canvas: Canvas,
    pub fps: Fps,
    /// Hold time between half-cycles, in milliseconds.
    pub pause_ms: u64,
    pub seed: u64,
    pub style: DrawStyle,
    pub stroke_width: f64,
    pub point_radius: f64,
    /// Fraction of the canvas the shape is fitted into.
    pub shape_fill: f64,
    /// Flattening tolerance in SVG user units.
    pub tolerance: f64,
    /// Vertical shift applied to the mirrored shape, in SVG user units.
    pub inverse_offset: f64,
    /// Stroke colors (hex) that fade to their complement.
    pub animated_colors: Vec<String>,
    pub background_start: Rgb,
    pub background_end: Rgb,
    pub text: TextConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            svg: PathBuf::from("shape.svg"),
            canvas: Canvas::default(),
            fps: Fps::default(),
            pause_ms: 6000,
            seed: 1,
            style: DrawStyle::Lines,
            stroke_width: 1.5,
            point_radius: 1.0,
            shape_fill: 0.8,
            tolerance: crate::assets::svg::DEFAULT_TOLERANCE,
            inverse_offset: 0.0,
            animated_colors: vec!["3C3A3D".to_owned(), "434345".to_owned()],
            background_start: Rgb::WHITE,
            background_end: Rgb::BLACK,
            text: TextConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Read a config from JSON and resolve `svg` against the file's directory.
    pub fn load(path: &Path) -> InkResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read config '{}'", path.display()))?;
        let mut cfg: Self = serde_json::from_slice(&bytes)?;
        if cfg.svg.is_relative() {
            let root = path.parent().unwrap_or_else(|| Path::new("."));
            cfg.svg = root.join(&cfg.svg);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> InkResult<()> {
        self.canvas.validate()?;
        Fps::new(self.fps.num, self.fps.den)?;
        if self.svg.as_os_str().is_empty() {
            return Err(InkError::validation("svg path must be non-empty"));
        }
        for (name, value) in [
            ("stroke_width", self.stroke_width),
            ("point_radius", self.point_radius),
            ("tolerance", self.tolerance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(InkError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !(self.shape_fill > 0.0 && self.shape_fill <= 1.0) {
            return Err(InkError::validation("shape_fill must be in (0, 1]"));
        }
        if !self.inverse_offset.is_finite() {
            return Err(InkError::validation("inverse_offset must be finite"));
        }
        for hex in &self.animated_colors {
            Rgb::from_hex(hex)?;
        }
        let t = &self.text.style;
        if self.text.enabled && !(t.size > 0.0 && t.spacing >= 0.0 && t.advance_ratio > 0.0) {
            return Err(InkError::validation(
                "text size and advance_ratio must be > 0, spacing >= 0",
            ));
        }
        Ok(())
    }

    pub fn pause(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.pause_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
