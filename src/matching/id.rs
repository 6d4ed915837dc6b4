//! Literal and regex identifiers used by ignore rules.

use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A group or artifact id pattern.
///
/// Regex ids must match the whole input, not a substring.
#[derive(Debug, Clone)]
pub enum Id {
    /// Exact string equality
    Literal(String),
    /// Full-string regular expression match
    Regex(IdRegex),
}

/// A compiled regex that remembers the pattern it was built from.
#[derive(Debug, Clone)]
pub struct IdRegex {
    pattern: String,
    anchored: Regex,
}

impl IdRegex {
    /// The pattern text as written in configuration
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Id {
    /// Create a literal id
    pub fn literal(id: impl Into<String>) -> Self {
        Self::Literal(id.into())
    }

    /// Compile a regex id
    pub fn regex(pattern: impl Into<String>) -> Result<Self, regex::Error> {
        let pattern = pattern.into();
        // Validate alone first: an unbalanced `)` would otherwise close the
        // anchoring group early.
        Regex::new(&pattern)?;
        let anchored = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self::Regex(IdRegex { pattern, anchored }))
    }

    /// Whether `id` is matched by this pattern
    #[must_use]
    pub fn matches(&self, id: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == id,
            Self::Regex(regex) => regex.anchored.is_match(id),
        }
    }

    /// Whether everything matched by `other` is also matched by `self`.
    ///
    /// Structural and best effort: two regexes are only related when their
    /// pattern text is identical, so semantically equal patterns written
    /// differently are not detected.
    #[must_use]
    pub fn subsumes(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(this), Self::Literal(other)) => this == other,
            (Self::Literal(this), Self::Regex(other)) => regex::escape(this) == other.pattern,
            (Self::Regex(this), Self::Literal(other)) => this.anchored.is_match(other),
            (Self::Regex(this), Self::Regex(other)) => this.pattern == other.pattern,
        }
    }

    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl PartialEq for Id {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => a.pattern == b.pattern,
            _ => false,
        }
    }
}

impl Eq for Id {}

impl Hash for Id {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Literal(literal) => literal.hash(state),
            Self::Regex(regex) => regex.pattern.hash(state),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "{literal}"),
            Self::Regex(regex) => write!(f, "/{}/", regex.pattern),
        }
    }
}
