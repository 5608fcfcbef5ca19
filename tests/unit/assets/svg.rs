use super::*;

fn svg(body: &str) -> Vec<u8> {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100" viewBox="0 0 100 100">{body}</svg>"#
    )
    .into_bytes()
}

#[test]
fn stroked_polyline_becomes_one_line() {
    let bytes = svg(r##"<path d="M0,0 L10,0 L10,10" stroke="#3C3A3D" fill="none"/>"##);
    let shape = Shape::from_svg_data(&bytes, DEFAULT_TOLERANCE).unwrap();

    assert_eq!(shape.lines().len(), 1);
    let line = &shape.lines()[0];
    assert_eq!(
        line.points,
        vec![
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(10.0, 0.0, 0.0),
            Vertex::new(10.0, 10.0, 0.0),
        ]
    );
    assert_eq!(line.color.to_hex(), "3C3A3D");
    assert_eq!(shape.total_vertex_count(), 3);
}

#[test]
fn subpaths_split_into_lines() {
    let bytes = svg(r##"<path d="M0 0 L10 0 M0 5 L10 5" stroke="#000" fill="none"/>"##);
    let shape = Shape::from_svg_data(&bytes, DEFAULT_TOLERANCE).unwrap();
    assert_eq!(shape.lines().len(), 2);
}

#[test]
fn closed_path_returns_to_start() {
    let bytes = svg(r##"<path d="M0 0 L10 0 L10 10 L0 10 Z" stroke="#000" fill="none"/>"##);
    let shape = Shape::from_svg_data(&bytes, DEFAULT_TOLERANCE).unwrap();
    let pts = &shape.lines()[0].points;
    assert_eq!(pts.len(), 5);
    assert_eq!(pts.first(), pts.last());
}

#[test]
fn curves_are_flattened_to_many_points() {
    let bytes = svg(r##"<path d="M0 50 C0 0 100 0 100 50" stroke="#000" fill="none"/>"##);
    let shape = Shape::from_svg_data(&bytes, DEFAULT_TOLERANCE).unwrap();
    assert!(shape.lines()[0].points.len() > 5);
}

#[test]
fn group_transform_is_applied() {
    let bytes = svg(
        r##"<g transform="translate(5,7)"><path d="M0 0 L10 0" stroke="#000" fill="none"/></g>"##,
    );
    let shape = Shape::from_svg_data(&bytes, DEFAULT_TOLERANCE).unwrap();
    let pts = &shape.lines()[0].points;
    assert!((pts[0].x - 5.0).abs() < 1e-4);
    assert!((pts[0].y - 7.0).abs() < 1e-4);
}

#[test]
fn fill_only_paths_use_fill_color() {
    let bytes = svg(r##"<path d="M0 0 L10 0 L10 10 Z" fill="#ff0000"/>"##);
    let shape = Shape::from_svg_data(&bytes, DEFAULT_TOLERANCE).unwrap();
    assert_eq!(shape.lines()[0].color, Rgb::new(1.0, 0.0, 0.0));
}

#[test]
fn empty_and_invalid_documents_fail() {
    assert!(Shape::from_svg_data(&svg(""), DEFAULT_TOLERANCE).is_err());
    assert!(Shape::from_svg_data(b"<svg", DEFAULT_TOLERANCE).is_err());
    let ok = svg(r##"<path d="M0 0 L10 0" stroke="#000"/>"##);
    assert!(Shape::from_svg_data(&ok, 0.0).is_err());
}

#[test]
fn inverse_geometry_mirrors_about_center() {
    let lines = vec![ShapeLine {
        points: vec![Vertex::new(0.0, 0.0, 0.0), Vertex::new(4.0, 10.0, 0.0)],
        color: Rgb::BLACK,
    }];
    let shape = Shape::from_lines(lines).unwrap();
    assert_eq!(shape.center(), Vertex::new(2.0, 5.0, 0.0));

    let inv = shape.inverse_geometries(0.0);
    assert_eq!(
        inv[0],
        vec![Vertex::new(0.0, 10.0, 0.0), Vertex::new(4.0, 0.0, 0.0)]
    );

    let shifted = shape.inverse_geometries(3.0);
    assert_eq!(shifted[0][0], Vertex::new(0.0, 13.0, 0.0));

    assert_eq!(shape.initial_geometries(), vec![shape.lines()[0].points.clone()]);
}

#[test]
fn flatten_drops_repeated_points() {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((0.0, 0.0));
    p.line_to((1.0, 0.0));
    let subs = flatten_subpaths(&p, DEFAULT_TOLERANCE);
    assert_eq!(subs, vec![vec![Vertex::ZERO, Vertex::new(1.0, 0.0, 0.0)]]);
}
