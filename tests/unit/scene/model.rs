use super::*;
use serde_json::json;

#[test]
fn empty_object_uses_defaults() {
    let cfg: SceneConfig = serde_json::from_value(json!({})).unwrap();
    assert_eq!(cfg, SceneConfig::default());
    assert_eq!(cfg.pause_ms, 6000);
    assert!(cfg.text.enabled);
    cfg.validate().unwrap();
}

#[test]
fn parses_full_document() {
    let cfg: SceneConfig = serde_json::from_value(json!({
        "svg": "heart.svg",
        "canvas": {"width": 320, "height": 240},
        "fps": {"num": 30, "den": 1},
        "pause_ms": 250,
        "seed": 42,
        "style": "points",
        "background_start": "#eee",
        "animated_colors": ["#ff0000"],
        "text": {"enabled": false, "size": 12.0, "fade_color": "#000000"}
    }))
    .unwrap();

    assert_eq!(cfg.style, DrawStyle::Points);
    assert_eq!(cfg.canvas.width, 320);
    assert_eq!(cfg.pause(), std::time::Duration::from_millis(250));
    assert_eq!(cfg.background_start.to_hex(), "EEEEEE");
    assert!(!cfg.text.enabled);
    assert_eq!(cfg.text.style.size, 12.0);
    assert_eq!(cfg.text.style.fade_color, Rgb::BLACK);
    cfg.validate().unwrap();
}

#[test]
fn rejects_unknown_fields() {
    assert!(serde_json::from_value::<SceneConfig>(json!({"bogus": 1})).is_err());
}

#[test]
fn validate_catches_bad_values() {
    let mut cfg = SceneConfig::default();
    cfg.fps = Fps { num: 30, den: 0 };
    assert!(cfg.validate().is_err());

    let mut cfg = SceneConfig::default();
    cfg.shape_fill = 1.5;
    assert!(cfg.validate().is_err());

    let mut cfg = SceneConfig::default();
    cfg.stroke_width = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = SceneConfig::default();
    cfg.animated_colors = vec!["nope".to_owned()];
    assert!(cfg.validate().is_err());

    let mut cfg = SceneConfig::default();
    cfg.canvas.height = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn load_resolves_svg_next_to_config() {
    let dir = std::path::PathBuf::from("target").join("unit_scene_model");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("scene.json");
    std::fs::write(&path, r#"{"svg": "shape.svg", "seed": 3}"#).unwrap();

    let cfg = SceneConfig::load(&path).unwrap();
    assert_eq!(cfg.svg, dir.join("shape.svg"));
    assert_eq!(cfg.seed, 3);
}
