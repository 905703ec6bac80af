use serde::{Deserialize, Serialize};

use crate::book_key::BookKey;

/// How a registered book came to exist
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum BookOrigin {
    /// Registered directly, not derived from any other book
    #[default]
    Original,
    /// Translated from the referenced book, sharing its edition number
    Translation(BookKey),
    /// Revised from the referenced book into a later edition
    Revision(BookKey),
}

impl BookOrigin {
    /// Book this one was derived from, if any
    #[must_use]
    pub fn source(&self) -> Option<&BookKey> {
        match self {
            Self::Original => None,
            Self::Translation(source) | Self::Revision(source) => Some(source),
        }
    }

    /// Short lowercase label used in logs and rendered output
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Translation(_) => "translation",
            Self::Revision(_) => "revision",
        }
    }
}

/// Data stored for every registered key
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BookRecord {
    /// Two character language code
    pub language: String,
    /// Year the book was published
    pub publication_year: i32,
    /// Unique authors in the order they were given.
    /// Derived books carry the authors of the book they were derived from.
    pub authors: Vec<String>,
    /// Derivation edge back into the same registry
    pub origin: BookOrigin,
}

impl BookRecord {
    /// Key of the book this record was translated or revised from
    #[must_use]
    pub fn derived_from(&self) -> Option<&BookKey> {
        self.origin.source()
    }

    /// Whether this record is an original book
    #[must_use]
    pub fn is_original(&self) -> bool {
        self.origin == BookOrigin::Original
    }
}
