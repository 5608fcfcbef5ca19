use std::fmt::Write as _;

use kurbo::Affine;

use crate::{
    foundation::core::Vertex,
    scene::{driver::Scene, model::DrawStyle},
};

/// Serializes scene state into an SVG document, one frame at a time.
///
/// Per-line geometry markup is cached and rebuilt only for lines whose buffer was marked dirty
/// since the previous frame.
#[derive(Debug, Default)]
pub struct SvgComposer {
    cache: Vec<String>,
    key: Option<(DrawStyle, [f64; 6])>,
    rebuilt: usize,
}

impl SvgComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines whose markup was regenerated by the last [`SvgComposer::compose`].
    pub fn rebuilt_lines(&self) -> usize {
        self.rebuilt
    }

    /// Compose the scene's current frame, consuming the dirty flag of every line buffer.
    pub fn compose(&mut self, scene: &mut Scene) -> String {
        let canvas = scene.config().canvas;
        let style = scene.config().style;
        let fit = scene.fit();
        let key = (style, fit.as_coeffs());
        let line_count = scene.group().lines().len();
        if self.key != Some(key) || self.cache.len() != line_count {
            self.key = Some(key);
            self.cache = vec![String::new(); line_count];
        }
        let stroke_width = scene.config().stroke_width;
        let radius = scene.config().point_radius;

        self.rebuilt = 0;
        for (line, cached) in scene.group_mut().lines_mut().iter_mut().zip(&mut self.cache) {
            let dirty = line.buffer_mut().take_dirty();
            if dirty || cached.is_empty() {
                *cached = line_markup(line.positions(), fit, style, radius);
                self.rebuilt += 1;
            }
        }

        let (w, h) = (canvas.width, canvas.height);
        let mut out = String::with_capacity(256 + self.cache.iter().map(String::len).sum::<usize>());
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        let _ = write!(
            out,
            r##"<rect width="{w}" height="{h}" fill="#{}"/>"##,
            scene.background().to_hex()
        );

        let colors = scene.colors();
        for (shape_line, markup) in scene.shape().lines().iter().zip(&self.cache) {
            let color = colors.stroke(shape_line.color).to_hex();
            match style {
                DrawStyle::Lines => {
                    let _ = write!(
                        out,
                        r##"<polyline points="{markup}" fill="none" stroke="#{color}" stroke-width="{stroke_width}" stroke-linejoin="round" stroke-linecap="round"/>"##
                    );
                }
                DrawStyle::Points => {
                    let _ = write!(out, r##"<g fill="#{color}">{markup}</g>"##);
                }
            }
        }

        write_text(&mut out, scene);
        out.push_str("</svg>");
        out
    }
}

fn line_markup(
    positions: &[Vertex],
    fit: Affine,
    style: DrawStyle,
    radius: f64,
) -> String {
    let mut s = String::with_capacity(positions.len() * 16);
    for v in positions {
        let p = fit * v.to_point();
        match style {
            DrawStyle::Lines => {
                if !s.is_empty() {
                    s.push(' ');
                }
                let _ = write!(s, "{:.2},{:.2}", p.x, p.y);
            }
            DrawStyle::Points => {
                let _ = write!(s, r#"<circle cx="{:.2}" cy="{:.2}" r="{radius}"/>"#, p.x, p.y);
            }
        }
    }
    s
}

fn write_text(out: &mut String, scene: &Scene) {
    let Some(text) = scene.text() else {
        return;
    };
    if text.letters().is_empty() || text.opacity() <= 0.0 {
        return;
    }
    let size = scene.text_size_px();
    let _ = write!(
        out,
        r##"<g font-family="{}" font-size="{size:.2}" fill="#{}" fill-opacity="{:.3}" text-anchor="middle">"##,
        escape(&text.style().font_family),
        text.color().to_hex(),
        text.opacity()
    );
    // Letter positions are glyph centers in both layouts; shift down to the baseline.
    let baseline = size * 0.35;
    for letter in text.letters() {
        let p = scene.text_to_canvas(letter.position);
        let mut buf = [0u8; 4];
        let _ = write!(
            out,
            r#"<text x="{:.2}" y="{:.2}">{}</text>"#,
            p.x,
            p.y + baseline,
            escape(letter.ch.encode_utf8(&mut buf))
        );
    }
    out.push_str("</g>");
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
