//! Diagnostic messages raised by passes built on the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A message with an optional source location.
///
/// Passes use this to report problems found in a node graph. The traversal
/// core never produces or inspects diagnostics.
///
/// ```rust
/// use nodewalk_core::Diagnostic;
///
/// assert_eq!(Diagnostic::new("bad glyph").at("3:4").to_string(), "3:4: bad glyph");
/// assert_eq!(Diagnostic::new("bad glyph").to_string(), "bad glyph");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

impl Diagnostic {
    /// Creates a diagnostic without a location.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Creates a diagnostic with an optional location.
    pub fn with_location(message: impl Into<String>, location: Option<String>) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }

    /// Returns a copy located at `location`.
    pub fn at(self, location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..self
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location() {
            Some(location) if !location.is_empty() => write!(f, "{location}: {}", self.message),
            _ => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::with_location(Some("3:4"), "3:4: bad glyph")]
    #[case::without_location(None, "bad glyph")]
    #[case::empty_location(Some(""), "bad glyph")]
    fn test_display(#[case] location: Option<&str>, #[case] expected: &str) {
        let diagnostic = Diagnostic::with_location("bad glyph", location.map(str::to_string));
        assert_eq!(diagnostic.to_string(), expected);
    }

    #[test]
    fn test_accessors() {
        let diagnostic = Diagnostic::new("oops").at("glyphs/a");
        assert_eq!(diagnostic.message(), "oops");
        assert_eq!(diagnostic.location(), Some("glyphs/a"));
    }

    #[test]
    fn test_serde_omits_missing_location() {
        let json = serde_json::to_string(&Diagnostic::new("m")).unwrap();
        assert_eq!(json, r#"{"message":"m"}"#);

        let back: Diagnostic = serde_json::from_str(r#"{"message":"m","location":"1:2"}"#).unwrap();
        assert_eq!(back, Diagnostic::new("m").at("1:2"));
    }
}
