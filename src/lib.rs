//! Inkmorph turns an SVG drawing into a generative line animation.
//!
//! Every stroke of the drawing becomes a fixed-length polyline whose head wanders the canvas, finds
//! the mirrored copy of its stroke and traces it, pauses, then wanders back and traces the original.
//! Background and stroke colors fade with tracing progress and a text overlay drops letters at
//! every completed half-cycle.
//!
//! - Load a [`SceneConfig`] and build a [`Scene`]
//! - Advance it with [`Scene::tick`] (one frame of `1 / fps` seconds)
//! - Render frames with a [`FrameRenderer`], or stream a range into a [`FrameSink`]
//!
//! The animation core ([`LineGroup`], [`TrackedLine`]) is usable on its own with any
//! [`RandomSource`].
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod encode;
mod foundation;
mod hooks;
mod render;
mod scene;

pub use crate::animation::draw::{AIM_PROBABILITY, LineState, TRACE_START_DISTANCE, TrackedLine};
pub use crate::animation::geometry::{
    MAX_STEP_LENGTH, MIN_STEP_LENGTH, SHARP_TURN_PROBABILITY, SOFT_TURN_PROBABILITY,
    SOFT_TURN_SPAN, VertexBuffer, last_two_vertices, rotation_angle, step_length,
    update_position_array,
};
pub use crate::animation::group::{LineGroup, Phase, PhaseListener, Target};
pub use crate::animation::tracker::{Counter, Flag};
pub use crate::assets::svg::{DEFAULT_TOLERANCE, Shape, ShapeLine};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig, write_png};
pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Rect, Vertex};
pub use crate::foundation::error::{InkError, InkResult};
pub use crate::foundation::math::{RandomSource, ReplayRandom, Rng64};
pub use crate::hooks::color::{ColorHook, FADE_EXPONENT, MaterialFade, Rgb, fade_amount};
pub use crate::hooks::text::{
    COLOR_FADE_SECS, COLOR_FADE_THRESHOLD, DropSpec, LYRICS, Letter, MAX_GRAVITY, MIN_GRAVITY,
    OPACITY_FADE_SECS, OPACITY_FADE_THRESHOLD, Orientation, SETTLE_LERP, TextOverlay, TextStyle,
    TextView, VIEW_HEIGHT,
};
pub use crate::render::compose::SvgComposer;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::pipeline::{FrameRenderer, RenderStats, render_frame, render_range};
pub use crate::render::raster::{Rasterizer, RenderSettings};
pub use crate::scene::driver::Scene;
pub use crate::scene::model::{DrawStyle, SceneConfig, TextConfig};
