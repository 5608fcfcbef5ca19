use super::*;
use crate::foundation::math::{ReplayRandom, Rng64};

fn v(x: f64, y: f64, z: f64) -> Vertex {
    Vertex::new(x, y, z)
}

#[test]
fn update_position_array_shifts_and_flattens_head() {
    let mut buf = vec![
        v(0.0, 0.0, 1.0),
        v(1.0, 0.0, 2.0),
        v(2.0, 0.0, 3.0),
        v(3.0, 0.0, 4.0),
    ];
    update_position_array(&mut buf, v(4.0, 1.0, 9.0));
    assert_eq!(
        buf,
        vec![
            v(1.0, 0.0, 2.0),
            v(2.0, 0.0, 3.0),
            v(3.0, 0.0, 4.0),
            v(4.0, 1.0, 0.0),
        ]
    );
}

#[test]
fn update_position_array_keeps_length() {
    let mut buf = vec![Vertex::ZERO; 7];
    for i in 0..20 {
        update_position_array(&mut buf, v(i as f64, 0.0, 0.0));
        assert_eq!(buf.len(), 7);
    }
    assert_eq!(buf[6], v(19.0, 0.0, 0.0));
    assert_eq!(buf[0], v(13.0, 0.0, 0.0));
}

#[test]
fn update_position_array_on_empty_is_noop() {
    let mut buf: Vec<Vertex> = Vec::new();
    update_position_array(&mut buf, v(1.0, 1.0, 1.0));
    assert!(buf.is_empty());
}

#[test]
fn last_two_vertices_reads_head() {
    let buf = vec![v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(2.0, 5.0, 0.0)];
    let (last, second) = last_two_vertices(&buf);
    assert_eq!(last, v(2.0, 5.0, 0.0));
    assert_eq!(second, v(1.0, 0.0, 0.0));
}

#[test]
#[should_panic(expected = "at least 2 vertices")]
fn last_two_vertices_rejects_single_vertex() {
    let _ = last_two_vertices(&[Vertex::ZERO]);
}

#[test]
fn rotation_angle_branches() {
    // sharp turn, negative sign
    let mut r = ReplayRandom::new([0.0, 0.1]);
    assert_eq!(rotation_angle(&mut r), -FRAC_PI_2);

    // sharp turn, positive sign
    let mut r = ReplayRandom::new([0.0, 0.9]);
    assert_eq!(rotation_angle(&mut r), FRAC_PI_2);

    // soft wobble at the window edge
    let mut r = ReplayRandom::new([0.5, 0.0, 1.0]);
    assert!((rotation_angle(&mut r) - FRAC_PI_4 / 2.0).abs() < 1e-12);

    // straight ahead
    let mut r = ReplayRandom::new([0.5, 0.5]);
    assert_eq!(rotation_angle(&mut r), 0.0);
    assert_eq!(r.consumed(), 2);
}

#[test]
fn rotation_angle_is_bounded_and_mostly_straight() {
    let mut rng = Rng64::new(42);
    let mut straight = 0;
    for _ in 0..10_000 {
        let a = rotation_angle(&mut rng);
        let sharp = (a.abs() - FRAC_PI_2).abs() < 1e-12;
        assert!(sharp || a.abs() < FRAC_PI_4 / 2.0 + 1e-12);
        if a == 0.0 {
            straight += 1;
        }
    }
    assert!(straight > 8_500);
}

#[test]
fn step_length_in_range() {
    let mut rng = Rng64::new(9);
    for _ in 0..1000 {
        let l = step_length(&mut rng);
        assert!((MIN_STEP_LENGTH..MAX_STEP_LENGTH).contains(&l));
    }
}

#[test]
fn vertex_buffer_dirty_mark() {
    let mut b = VertexBuffer::new(vec![Vertex::ZERO; 3]);
    assert!(b.take_dirty());
    assert!(!b.is_dirty());
    b.mark_dirty();
    assert!(b.take_dirty());
    assert_eq!(b.len(), 3);
}
