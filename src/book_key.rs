use std::fmt;

use serde::{Deserialize, Serialize};

/// Edition assumed when a key is built from a title alone
pub const FIRST_EDITION: i32 = 1;

/// Composite identifier of a registered book.
///
/// Keys order by title first and edition second, so all editions of one
/// title sit next to each other in an ordered map.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct BookKey {
    /// Book title, compared lexicographically
    title: String,
    /// Edition number, compared numerically
    edition: i32,
}

impl BookKey {
    /// Build a key for the given title and edition
    #[must_use]
    pub fn new(title: impl Into<String>, edition: i32) -> Self {
        Self { title: title.into(), edition }
    }

    /// Build a key for the first edition of a title
    #[must_use]
    pub fn first_edition(title: impl Into<String>) -> Self {
        Self::new(title, FIRST_EDITION)
    }

    /// Title part of the key
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Edition part of the key
    #[must_use]
    pub fn edition(&self) -> i32 {
        self.edition
    }
}

impl From<&str> for BookKey {
    fn from(title: &str) -> Self {
        Self::first_edition(title)
    }
}

impl fmt::Display for BookKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.title, self.edition)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_title_only_key_is_first_edition() {
        let key = BookKey::from("Windows 8 for Dummies");
        assert_eq!(key, BookKey::new("Windows 8 for Dummies", 1));
        assert_eq!(key.edition(), FIRST_EDITION);
    }

    #[test]
    fn test_ordering_is_title_then_edition() {
        let mut keys = vec![
            BookKey::new("b", 1),
            BookKey::new("a", 10),
            BookKey::new("a", 2),
            BookKey::new("b", -3),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                BookKey::new("a", 2),
                BookKey::new("a", 10),
                BookKey::new("b", -3),
                BookKey::new("b", 1),
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(BookKey::new("Linux", 3).to_string(), "Linux #3");
    }
}
