use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        NeonError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        NeonError::surface_unavailable("x")
            .to_string()
            .contains("surface unavailable:")
    );
    assert!(NeonError::render("x").to_string().contains("render error:"));
    assert!(NeonError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = NeonError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
