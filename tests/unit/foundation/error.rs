use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        HeatError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(HeatError::io("x").to_string().contains("io failure:"));
    assert_eq!(
        HeatError::missing_field(3, "y").to_string(),
        "missing field 'y' in coordinate record 3"
    );
    assert!(
        HeatError::not_found("a/b.json")
            .to_string()
            .contains("file not found:")
    );
}

#[test]
fn from_io_classifies_not_found() {
    let path = Path::new("nope.json");
    let err = HeatError::from_io(path, std::io::Error::from(std::io::ErrorKind::NotFound));
    assert!(matches!(err, HeatError::NotFound(p) if p == path));

    let err = HeatError::from_io(path, std::io::Error::other("disk on fire"));
    assert!(matches!(err, HeatError::Io(ref m) if m.contains("disk on fire")));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = HeatError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
