use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        InkError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        InkError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(InkError::asset("x").to_string().contains("asset error:"));
    assert!(InkError::render("x").to_string().contains("render error:"));
    assert!(
        InkError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = InkError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let e = serde_json::from_str::<u32>("nope").unwrap_err();
    let err = InkError::from(e);
    assert!(matches!(err, InkError::Serde(_)));
}
