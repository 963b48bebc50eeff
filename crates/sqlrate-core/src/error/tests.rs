//! Tests for error conversions and messages

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_messages() {
    assert_eq!(
        SqlrateError::Client("mariadb not found".to_string()).to_string(),
        "Client error: mariadb not found"
    );
    assert_eq!(
        SqlrateError::Configuration("port must be non-zero".to_string()).to_string(),
        "Configuration error: port must be non-zero"
    );
}

#[test]
fn test_from_conversions() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    assert!(matches!(SqlrateError::from(io), SqlrateError::Io(_)));

    let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = SqlrateError::from(json);
    assert!(matches!(err, SqlrateError::Serialization(_)));
    assert!(err.to_string().starts_with("Serialization error: "));
}
