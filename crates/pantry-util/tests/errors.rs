use pantry_util::errors::PantryError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = PantryError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_manifest_error_display() {
    let err = PantryError::Manifest {
        message: "bad syntax".to_string(),
    };
    assert_eq!(err.to_string(), "Manifest error: bad syntax");
}

#[test]
fn test_config_error_display() {
    let err = PantryError::Config {
        message: "unknown strategy".to_string(),
    };
    assert_eq!(err.to_string(), "Configuration error: unknown strategy");
}

#[test]
fn test_lockfile_error_display() {
    let err = PantryError::Lockfile {
        message: "truncated".to_string(),
    };
    assert_eq!(err.to_string(), "Lock file error: truncated");
}

#[test]
fn test_generic_error_display() {
    let err = PantryError::Generic {
        message: "something broke".to_string(),
    };
    assert_eq!(err.to_string(), "something broke");
}

#[test]
fn test_io_error_from_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: PantryError = io_err.into();
    assert!(matches!(err, PantryError::Io(_)));
}
