use thiserror::Error;

/// Failures reported by registry operations.
///
/// Every failing operation leaves the registry untouched.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Title of a new book is empty
    #[error("Book title is empty")]
    EmptyTitle,
    /// A book with the same title and edition is already registered
    #[error("Book title must be unique")]
    NonUniqueTitle,
    /// Language code is not exactly two characters long
    #[error("Language code must consist exactly of 2 characters")]
    LanguageCodeNot2Chars,
    /// Original book registered without authors
    #[error("List of authors should not be empty")]
    EmptyAuthorsList,
    /// Same author listed twice for one book
    #[error("Same author was already specified for this book")]
    DuplicateAuthor,
    /// Edition of an original book is zero or negative
    #[error("Edition number must be positive")]
    NonPositiveEdition,
    /// Referenced title and edition were never registered
    #[error("Book with the specified title & edition was not previously registered")]
    BookNotFound,
    /// Translation published before the book it was translated from
    #[error("Derived book cannot be published earlier than original")]
    DerivedBeforeOriginal,
    /// Translation keeps the language of the book it was translated from
    #[error("Language of translation should be different from original language")]
    TranslatedToSameLanguage,
    /// Revised edition is not greater than the edition it revises
    #[error("Revised edition number should be greater than original edition number")]
    RevisedEditionLessEqu,
    /// Original-book lookup on a book that is not derived
    #[error("The book is not derived (translated, revised) from any other book")]
    NotADerivedBook,

    /// Snapshot text could not be parsed or produced
    #[error("Snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type used throughout the registry
pub type Result<T> = std::result::Result<T, RegistryError>;
