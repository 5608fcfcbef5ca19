use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn with_length_keeps_direction() {
    let v = Vertex::new(3.0, 4.0, 0.0).with_length(10.0);
    assert!(approx(v.x, 6.0));
    assert!(approx(v.y, 8.0));
    assert!(approx(v.length(), 10.0));
}

#[test]
fn with_length_of_zero_vector_is_zero() {
    assert_eq!(Vertex::ZERO.with_length(5.0), Vertex::ZERO);
}

#[test]
fn rotate_z_quarter_turn() {
    let v = Vertex::new(1.0, 0.0, 2.0).rotate_z(std::f64::consts::FRAC_PI_2);
    assert!(approx(v.x, 0.0));
    assert!(approx(v.y, 1.0));
    assert!(approx(v.z, 2.0));
}

#[test]
fn distance_is_symmetric() {
    let a = Vertex::new(0.0, 0.0, 0.0);
    let b = Vertex::new(3.0, 0.0, 4.0);
    assert!(approx(a.distance_to(b), 5.0));
    assert!(approx(b.distance_to(a), 5.0));
}

#[test]
fn fps_frame_duration() {
    let fps = Fps::new(30000, 1001).unwrap();
    assert!((fps.frame_duration().as_secs_f64() - 1001.0 / 30000.0).abs() < 1e-9);
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn fps_secs_to_frames_floors() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_floor(2.5), 75);
    assert_eq!(fps.secs_to_frames_floor(0.99 / 30.0), 0);
    assert_eq!(fps.secs_to_frames_floor(-1.0), 0);
}

#[test]
fn canvas_rejects_zero_size() {
    assert!(
        Canvas {
            width: 0,
            height: 10
        }
        .validate()
        .is_err()
    );
    assert!(Canvas::default().validate().is_ok());
}
