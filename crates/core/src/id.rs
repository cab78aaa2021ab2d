// Document identifiers
//
// Every document is keyed by a UUID. Callers hand identifiers around as
// strings (path segments, `jobId` fields), so parsing is the one place a
// malformed key is rejected.

use thiserror::Error;
use uuid::Uuid;

/// Identifier parsing failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// The value is present but is not a valid identifier.
    #[error("invalid identifier: {0:?}")]
    Malformed(String),
    /// A required identifier field was absent or not a string.
    #[error("missing identifier field `{0}`")]
    Missing(&'static str),
}

/// Generate a new time-ordered document identifier.
pub fn new_id() -> Uuid {
    Uuid::now_v7()
}

/// Parse a caller-supplied identifier.
pub fn parse_id(raw: &str) -> Result<Uuid, IdError> {
    Uuid::parse_str(raw.trim()).map_err(|_| IdError::Malformed(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        let id = new_id();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        let id = new_id();
        assert_eq!(parse_id(&format!(" {} ", id)).unwrap(), id);
    }

    #[test]
    fn test_parse_malformed_id() {
        let err = parse_id("not-an-id").unwrap_err();
        assert_eq!(err, IdError::Malformed("not-an-id".to_string()));

        // Mongo-style object ids are not accepted
        assert!(parse_id("6541c9d2f1a2b3c4d5e6f7a8").is_err());
        assert!(parse_id("").is_err());
    }

    #[test]
    fn test_new_ids_are_time_ordered() {
        let first = new_id();
        let second = new_id();
        assert!(first < second);
    }
}
