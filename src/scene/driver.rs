use kurbo::{Affine, Point, Rect, Vec2};

use crate::{
    animation::group::LineGroup,
    assets::svg::Shape,
    foundation::{
        core::{Canvas, FrameIndex},
        error::{InkError, InkResult},
        math::Rng64,
    },
    hooks::{
        color::{ColorHook, Rgb},
        text::{TextOverlay, TextView, VIEW_HEIGHT},
    },
    scene::model::SceneConfig,
};

// Overlay letters draw from their own stream, derived from the scene seed.
const TEXT_SEED_SALT: u64 = 0x7E47_0F1E_A5ED_0001;

/// A running animation: the line group, its hooks, and the frame clock that drives them.
///
/// Frame 0 is the state right after construction. Each [`Scene::tick`] advances exactly one
/// frame of `1 / fps` seconds.
#[derive(Debug)]
pub struct Scene {
    config: SceneConfig,
    shape: Shape,
    group: LineGroup,
    colors: ColorHook,
    text: Option<TextOverlay>,
    rng: Rng64,
    frame: FrameIndex,
    fit: Affine,
    px_per_unit: f64,
}

impl Scene {
    /// Load the SVG named by `config` and build the scene.
    pub fn load(config: SceneConfig) -> InkResult<Self> {
        config.validate()?;
        let shape = Shape::load(&config.svg, config.tolerance)?;
        Self::new(config, shape)
    }

    #[tracing::instrument(skip_all, fields(lines = shape.lines().len(), seed = config.seed))]
    pub fn new(config: SceneConfig, shape: Shape) -> InkResult<Self> {
        config.validate()?;

        let group = LineGroup::from_targets(
            shape.initial_geometries(),
            shape.inverse_geometries(config.inverse_offset),
            config.pause(),
        )?;

        let mut colors = ColorHook::new(
            config.background_start,
            config.background_end,
            shape.colors(),
            &config.animated_colors,
        );
        colors.apply(0, 0.0);

        let bounds = shape.bounds();
        let both = bounds.union(bounds + Vec2::new(0.0, config.inverse_offset));
        let (fit, scale) = fit_transform(both, config.canvas, config.shape_fill);
        let px_per_unit = f64::from(config.canvas.height) / VIEW_HEIGHT;

        let text = config.text.enabled.then(|| {
            let view = TextView {
                width: f64::from(config.canvas.width) / px_per_unit,
                height: VIEW_HEIGHT,
                shape_half_width: bounds.width() * scale / 2.0 / px_per_unit,
            };
            let mut overlay =
                TextOverlay::new(config.text.style.clone(), view, config.seed ^ TEXT_SEED_SALT);
            overlay.drop_intro();
            overlay
        });

        tracing::info!(
            vertices = group.total_vertex_count(),
            materials = colors.materials().len(),
            text = text.is_some(),
            "scene ready"
        );

        Ok(Self {
            rng: Rng64::new(config.seed),
            config,
            shape,
            group,
            colors,
            text,
            frame: FrameIndex(0),
            fit,
            px_per_unit,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn group(&self) -> &LineGroup {
        &self.group
    }

    pub fn group_mut(&mut self) -> &mut LineGroup {
        &mut self.group
    }

    pub fn colors(&self) -> &ColorHook {
        &self.colors
    }

    pub fn text(&self) -> Option<&TextOverlay> {
        self.text.as_ref()
    }

    pub fn background(&self) -> Rgb {
        self.colors.background()
    }

    /// Frame the current state corresponds to.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    pub fn progress(&self) -> f64 {
        self.group.progress()
    }

    /// Maps shape coordinates into canvas pixels.
    pub fn fit(&self) -> Affine {
        self.fit
    }

    /// Maps overlay view units (origin at center, y up) into canvas pixels.
    pub fn text_to_canvas(&self, p: Point) -> Point {
        let canvas = self.config.canvas;
        Point::new(
            f64::from(canvas.width) / 2.0 + p.x * self.px_per_unit,
            f64::from(canvas.height) / 2.0 - p.y * self.px_per_unit,
        )
    }

    /// Overlay glyph size in pixels.
    pub fn text_size_px(&self) -> f64 {
        self.config.text.style.size * self.px_per_unit
    }

    /// Advance one frame.
    pub fn tick(&mut self) {
        let dt = self.config.fps.frame_duration();
        match self.text.as_mut() {
            Some(text) => self.group.tick(dt, &mut self.rng, text),
            None => self.group.tick(dt, &mut self.rng, &mut ()),
        }

        let percent = self.group.progress();
        self.colors.apply(self.group.draw_count(), percent);
        if let Some(text) = self.text.as_mut() {
            text.update(percent, dt.as_secs_f64());
        }
        self.frame = FrameIndex(self.frame.0 + 1);
    }

    /// Tick until the scene reaches `frame`. Scenes only move forward.
    pub fn advance_to(&mut self, frame: FrameIndex) -> InkResult<()> {
        if frame < self.frame {
            return Err(InkError::animation(format!(
                "cannot rewind scene from frame {} to {}",
                self.frame.0, frame.0
            )));
        }
        while self.frame < frame {
            self.tick();
        }
        Ok(())
    }
}

/// Uniform scale centering `bounds` in `canvas`, filling `fill` of the tighter dimension.
pub(crate) fn fit_transform(bounds: Rect, canvas: Canvas, fill: f64) -> (Affine, f64) {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let sx = w * fill / bounds.width().max(f64::EPSILON);
    let sy = h * fill / bounds.height().max(f64::EPSILON);
    let scale = sx.min(sy);
    let affine = Affine::translate((w / 2.0, h / 2.0))
        * Affine::scale(scale)
        * Affine::translate(-bounds.center().to_vec2());
    (affine, scale)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/driver.rs"]
mod tests;
