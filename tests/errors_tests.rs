//! Error type tests

use jumpto::errors::JumptoError;

#[test]
fn test_error_codes_are_unique() {
    let errors = [
        JumptoError::invalid_alias("x"),
        JumptoError::invalid_url("x"),
        JumptoError::unsafe_url("x"),
        JumptoError::invalid_import_format("x"),
        JumptoError::store_unavailable("x"),
        JumptoError::not_found("x"),
        JumptoError::serialization("x"),
        JumptoError::file_operation("x"),
        JumptoError::config("x"),
    ];

    let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
}

#[test]
fn test_user_errors() {
    assert!(JumptoError::invalid_alias("bad").is_user_error());
    assert!(JumptoError::unsafe_url("Suspicious domain detected").is_user_error());
    assert!(!JumptoError::store_unavailable("down").is_user_error());
    assert!(!JumptoError::serialization("broken").is_user_error());
}

#[test]
fn test_display_and_formats() {
    let err = JumptoError::not_found("Shortcut 'gh' not found");
    assert_eq!(err.message(), "Shortcut 'gh' not found");
    assert_eq!(err.to_string(), "Resource Not Found: Shortcut 'gh' not found");
    assert_eq!(err.format_simple(), err.to_string());
    assert!(err.format_colored().contains("E006"));
}

#[test]
fn test_conversions() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    assert!(matches!(JumptoError::from(io), JumptoError::FileOperation(_)));

    let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(JumptoError::from(json), JumptoError::Serialization(_)));

    let url = url::Url::parse("https://").unwrap_err();
    assert!(matches!(JumptoError::from(url), JumptoError::InvalidUrl(_)));
}
