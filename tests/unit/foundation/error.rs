use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CovergenError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        CovergenError::invalid_dataset("x")
            .to_string()
            .contains("invalid dataset:")
    );
    assert!(
        CovergenError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(CovergenError::io("x").to_string().contains("io error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CovergenError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert!(!err.is_invalid_dataset());
}

#[test]
fn invalid_dataset_is_detectable() {
    assert!(CovergenError::invalid_dataset("empty").is_invalid_dataset());
    assert!(!CovergenError::validation("empty").is_invalid_dataset());
}
