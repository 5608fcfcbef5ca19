use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::{
        core::FrameIndex,
        error::{InkError, InkResult},
    },
    render::{
        compose::SvgComposer,
        frame::FrameRGBA,
        raster::{Rasterizer, RenderSettings},
    },
    scene::driver::Scene,
};

/// Composes and rasterizes scene frames.
#[derive(Debug)]
pub struct FrameRenderer {
    composer: SvgComposer,
    rasterizer: Rasterizer,
}

impl FrameRenderer {
    pub fn new(settings: &RenderSettings) -> Self {
        Self {
            composer: SvgComposer::new(),
            rasterizer: Rasterizer::new(settings),
        }
    }

    /// Render the scene's current state.
    pub fn render(&mut self, scene: &mut Scene) -> InkResult<FrameRGBA> {
        let canvas = scene.config().canvas;
        let svg = self.composer.compose(scene);
        self.rasterizer.rasterize(&svg, canvas.width, canvas.height)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Aggregated rendering counters.
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_rendered: u64,
    /// Half-cycles the group completed during the range.
    pub half_cycles: u64,
}

/// Simulate forward to `frame` and render it.
pub fn render_frame(
    scene: &mut Scene,
    frame: FrameIndex,
    renderer: &mut FrameRenderer,
) -> InkResult<FrameRGBA> {
    scene.advance_to(frame)?;
    renderer.render(scene)
}

/// Render `count` consecutive frames starting at the scene's current frame into `sink`.
#[tracing::instrument(skip(scene, renderer, sink), fields(start = scene.frame().0))]
pub fn render_range(
    scene: &mut Scene,
    count: u64,
    renderer: &mut FrameRenderer,
    sink: &mut dyn FrameSink,
) -> InkResult<RenderStats> {
    if count == 0 {
        return Err(InkError::validation("render range must be non-empty"));
    }
    let cfg = scene.config();
    sink.begin(SinkConfig {
        width: cfg.canvas.width,
        height: cfg.canvas.height,
        fps: cfg.fps,
    })?;

    let mut stats = RenderStats::default();
    let start_draw_count = scene.group().draw_count();
    let mut pending = None;
    for i in 0..count {
        if i > 0 {
            scene.tick();
        }
        let frame = renderer.render(scene)?;
        if let Err(e) = sink.push_frame(scene.frame(), &frame) {
            pending = Some(e);
            break;
        }
        stats.frames_rendered += 1;
    }
    // Let the sink finish cleanly even when a push failed, then surface the first error.
    let ended = sink.end();
    if let Some(e) = pending {
        return Err(e);
    }
    ended?;

    stats.half_cycles = scene.group().draw_count() - start_draw_count;
    tracing::info!(
        frames = stats.frames_rendered,
        end = scene.frame().0,
        "render range complete"
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
