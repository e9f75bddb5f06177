use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(SignetError::decode("x").to_string().contains("decode error:"));
    assert!(SignetError::encode("x").to_string().contains("encode error:"));
    assert!(
        SignetError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SignetError::render("x").to_string().contains("render error:"));
    assert!(
        SignetError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn no_source_reads_as_a_user_notice() {
    assert!(SignetError::NoSource.to_string().contains("no image selected"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SignetError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
