use serde::{Deserialize, Serialize};
use std::fmt;

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Identifies one logical browser screen across process restarts.
///
/// Session ids double as file stems in the session store, so only ASCII
/// alphanumerics, `-` and `_` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(new_id())
    }

    /// Parse a caller-supplied id. Returns `None` for empty ids or ids
    /// containing characters that are unsafe in a file name.
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = !raw.is_empty()
            && raw.len() <= 128
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_is_valid_uuid() {
        let id = new_id();
        let parsed = uuid::Uuid::parse_str(&id);
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap().get_version_num(), 4);
    }

    #[test]
    fn session_id_new_is_parseable() {
        let sid = SessionId::new();
        assert_eq!(SessionId::parse(sid.as_str()), Some(sid));
    }

    #[test]
    fn session_id_parse_accepts_simple_names() {
        let sid = SessionId::parse("home_screen-1").unwrap();
        assert_eq!(sid.as_str(), "home_screen-1");
    }

    #[test]
    fn session_id_parse_rejects_unsafe_names() {
        assert!(SessionId::parse("").is_none());
        assert!(SessionId::parse("../etc/passwd").is_none());
        assert!(SessionId::parse("a/b").is_none());
        assert!(SessionId::parse("with space").is_none());
        assert!(SessionId::parse(&"x".repeat(129)).is_none());
    }

    #[test]
    fn session_id_display() {
        let sid = SessionId::new();
        assert_eq!(sid.to_string(), sid.as_str());
    }

    #[test]
    fn session_id_uniqueness() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn session_id_serialization() {
        let sid = SessionId::new();
        let json = serde_json::to_string(&sid).unwrap();
        let deserialized: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(sid, deserialized);
    }
}
