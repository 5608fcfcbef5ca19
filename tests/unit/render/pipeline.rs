use super::*;
use crate::{
    assets::svg::{Shape, ShapeLine},
    encode::sink::InMemorySink,
    foundation::core::{Canvas, Fps, Vertex},
    hooks::color::Rgb,
    scene::model::SceneConfig,
};

fn scene() -> Scene {
    let shape = Shape::from_lines(vec![ShapeLine {
        points: vec![Vertex::new(0.0, 0.0, 0.0), Vertex::new(0.0, 2.0, 0.0)],
        color: Rgb::from_hex("#3C3A3D").unwrap(),
    }])
    .unwrap();
    let mut cfg = SceneConfig {
        canvas: Canvas {
            width: 64,
            height: 36,
        },
        fps: Fps::new(30, 1).unwrap(),
        pause_ms: 0,
        ..SceneConfig::default()
    };
    cfg.text.enabled = false;
    Scene::new(cfg, shape).unwrap()
}

fn renderer() -> FrameRenderer {
    FrameRenderer::new(&RenderSettings {
        system_fonts: false,
    })
}

#[test]
fn first_frame_has_background_and_line() {
    let mut scene = scene();
    let frame = render_frame(&mut scene, FrameIndex(0), &mut renderer()).unwrap();
    assert_eq!((frame.width, frame.height), (64, 36));
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(0, 0), Some([255, 255, 255, 255]));
    // line runs down x = 32, partially covering the pixel to its right
    let on_line = frame.pixel(32, 18).unwrap();
    assert!(on_line[0] < 200);
}

#[test]
fn range_pushes_consecutive_frames() {
    let mut scene = scene();
    let mut sink = InMemorySink::new();
    let stats = render_range(&mut scene, 5, &mut renderer(), &mut sink).unwrap();

    assert_eq!(stats.frames_rendered, 5);
    assert_eq!(stats.half_cycles, 1);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3, 4]);
    assert_eq!(sink.config().unwrap().width, 64);
    assert_eq!(scene.frame(), FrameIndex(4));
}

#[test]
fn empty_range_and_rewind_fail() {
    let mut scene = scene();
    let mut sink = InMemorySink::new();
    assert!(render_range(&mut scene, 0, &mut renderer(), &mut sink).is_err());

    scene.advance_to(FrameIndex(3)).unwrap();
    assert!(render_frame(&mut scene, FrameIndex(1), &mut renderer()).is_err());
}
