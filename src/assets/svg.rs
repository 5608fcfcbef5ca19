use std::path::Path;

use anyhow::Context as _;
use kurbo::{Affine, BezPath, PathEl};

use crate::{
    foundation::{
        core::{Rect, Vertex},
        error::{InkError, InkResult},
    },
    hooks::color::Rgb,
};

/// Default flattening tolerance, in SVG user units.
pub const DEFAULT_TOLERANCE: f64 = 0.25;

/// One flattened sub-path and the color it is drawn with.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeLine {
    pub points: Vec<Vertex>,
    pub color: Rgb,
}

/// Polylines extracted from an SVG document, in the document's user space (y down).
#[derive(Clone, Debug)]
pub struct Shape {
    lines: Vec<ShapeLine>,
    bounds: Rect,
}

impl Shape {
    /// Read and flatten an SVG file.
    pub fn load(path: &Path, tolerance: f64) -> InkResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read svg '{}'", path.display()))?;
        Self::from_svg_data(&bytes, tolerance)
    }

    /// Parse SVG bytes and flatten every drawable sub-path into a polyline.
    ///
    /// Sub-paths that collapse to fewer than two distinct points are skipped.
    #[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
    pub fn from_svg_data(bytes: &[u8], tolerance: f64) -> InkResult<Self> {
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(InkError::validation("flatten tolerance must be > 0"));
        }
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;

        let mut lines = Vec::new();
        collect_group(tree.root(), tolerance, &mut lines);
        Self::from_lines(lines)
    }

    /// Wrap already-flattened polylines.
    pub fn from_lines(lines: Vec<ShapeLine>) -> InkResult<Self> {
        let mut it = lines.iter().flat_map(|l| l.points.iter());
        let Some(first) = it.next() else {
            return Err(InkError::asset("svg contains no drawable paths"));
        };
        let mut bounds = Rect::from_points(first.to_point(), first.to_point());
        for p in it {
            bounds = bounds.union_pt(p.to_point());
        }
        tracing::debug!(lines = lines.len(), ?bounds, "shape flattened");
        Ok(Self { lines, bounds })
    }

    pub fn lines(&self) -> &[ShapeLine] {
        &self.lines
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn center(&self) -> Vertex {
        let c = self.bounds.center();
        Vertex::new(c.x, c.y, 0.0)
    }

    pub fn total_vertex_count(&self) -> usize {
        self.lines.iter().map(|l| l.points.len()).sum()
    }

    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.lines.iter().map(|l| l.color)
    }

    /// The shape as loaded, one vertex sequence per line.
    pub fn initial_geometries(&self) -> Vec<Vec<Vertex>> {
        self.lines.iter().map(|l| l.points.clone()).collect()
    }

    /// The shape mirrored about its horizontal center line, then shifted by `offset`.
    pub fn inverse_geometries(&self, offset: f64) -> Vec<Vec<Vertex>> {
        let cy = self.center().y;
        self.lines
            .iter()
            .map(|l| {
                l.points
                    .iter()
                    .map(|p| Vertex::new(p.x, 2.0 * cy - p.y + offset, p.z))
                    .collect()
            })
            .collect()
    }
}

fn collect_group(group: &usvg::Group, tolerance: f64, out: &mut Vec<ShapeLine>) {
    for node in group.children() {
        match node {
            usvg::Node::Group(g) => collect_group(g, tolerance, out),
            usvg::Node::Path(p) => collect_path(p, tolerance, out),
            usvg::Node::Text(t) => collect_group(t.flattened(), tolerance, out),
            usvg::Node::Image(_) => {}
        }
    }
}

fn collect_path(path: &usvg::Path, tolerance: f64, out: &mut Vec<ShapeLine>) {
    if !path.is_visible() {
        return;
    }
    // Strokes are what the animation draws; fill-only shapes fall back to their fill.
    let paint = path
        .stroke()
        .map(usvg::Stroke::paint)
        .or_else(|| path.fill().map(usvg::Fill::paint));
    let color = match paint {
        Some(usvg::Paint::Color(c)) => Rgb::from_u8(c.red, c.green, c.blue),
        _ => Rgb::BLACK,
    };

    let bez = to_bez_path(path.data(), path.abs_transform());
    for points in flatten_subpaths(&bez, tolerance) {
        if points.len() >= 2 {
            out.push(ShapeLine { points, color });
        }
    }
}

fn to_bez_path(data: &usvg::tiny_skia_path::Path, ts: usvg::Transform) -> BezPath {
    use usvg::tiny_skia_path::PathSegment;

    let pt = |p: usvg::tiny_skia_path::Point| kurbo::Point::new(f64::from(p.x), f64::from(p.y));
    let mut out = BezPath::new();
    for seg in data.segments() {
        match seg {
            PathSegment::MoveTo(p) => out.move_to(pt(p)),
            PathSegment::LineTo(p) => out.line_to(pt(p)),
            PathSegment::QuadTo(p1, p) => out.quad_to(pt(p1), pt(p)),
            PathSegment::CubicTo(p1, p2, p) => out.curve_to(pt(p1), pt(p2), pt(p)),
            PathSegment::Close => out.close_path(),
        }
    }
    let affine = Affine::new([
        f64::from(ts.sx),
        f64::from(ts.ky),
        f64::from(ts.kx),
        f64::from(ts.sy),
        f64::from(ts.tx),
        f64::from(ts.ty),
    ]);
    affine * out
}

/// Flatten `path` into one point list per sub-path, dropping repeated points.
pub(crate) fn flatten_subpaths(path: &BezPath, tolerance: f64) -> Vec<Vec<Vertex>> {
    let mut subpaths: Vec<Vec<Vertex>> = Vec::new();
    let mut current: Vec<Vertex> = Vec::new();

    fn push_point(current: &mut Vec<Vertex>, p: kurbo::Point) {
        let v = Vertex::from(p);
        if current.last() != Some(&v) {
            current.push(v);
        }
    }

    kurbo::flatten(path, tolerance, |el| match el {
        PathEl::MoveTo(p) => {
            if !current.is_empty() {
                subpaths.push(std::mem::take(&mut current));
            }
            push_point(&mut current, p);
        }
        PathEl::LineTo(p) => push_point(&mut current, p),
        PathEl::ClosePath => {
            if let Some(&first) = current.first() {
                push_point(&mut current, first.to_point());
            }
        }
        // flatten only emits lines
        PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => push_point(&mut current, p),
    });
    if !current.is_empty() {
        subpaths.push(current);
    }
    subpaths
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg.rs"]
mod tests;
