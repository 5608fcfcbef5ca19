use std::sync::Arc;

use anyhow::Context as _;

use crate::{
    foundation::error::{InkError, InkResult},
    render::frame::FrameRGBA,
};

/// Options for [`Rasterizer`].
#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// Load system fonts so the text overlay can be drawn.
    pub system_fonts: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self { system_fonts: true }
    }
}

/// Turns composed SVG documents into premultiplied RGBA8 frames with `resvg`.
pub struct Rasterizer {
    opts: usvg::Options<'static>,
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("font_faces", &self.opts.fontdb.len())
            .finish()
    }
}

impl Rasterizer {
    pub fn new(settings: &RenderSettings) -> Self {
        let mut db = usvg::fontdb::Database::new();
        if settings.system_fonts {
            db.load_system_fonts();
        }
        tracing::debug!(faces = db.len(), "font database ready");
        let opts = usvg::Options {
            fontdb: Arc::new(db),
            ..Default::default()
        };
        Self { opts }
    }

    pub fn rasterize(&self, svg: &str, width: u32, height: u32) -> InkResult<FrameRGBA> {
        let tree = usvg::Tree::from_str(svg, &self.opts).context("parse composed frame svg")?;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| InkError::render("failed to allocate frame pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );
        Ok(FrameRGBA {
            width,
            height,
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}
