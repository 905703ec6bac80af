use std::{
    collections::{BTreeMap, HashSet},
    fmt,
};

use crate::{
    book_key::BookKey,
    error::{RegistryError, Result},
    observers::RegistryObserver,
    record::{BookOrigin, BookRecord},
};

/// Exact number of ASCII characters in a language code
const LANGUAGE_CODE_LEN: usize = 2;

/// Append-only registry of original, translated and revised books.
///
/// Records are keyed by [`BookKey`]. Derived books point back to their source
/// through [`BookRecord::origin`], and a source must already be registered
/// when a book is derived from it, so the derivation graph is always a forest.
#[derive(Default)]
pub struct BookRegistry {
    /// Records ordered by title, then edition
    books: BTreeMap<BookKey, BookRecord>,
    /// Keys in the order they were registered
    registration_order: Vec<BookKey>,
    /// Notified of every registration that passes validation
    observers: Vec<Box<dyn RegistryObserver>>,
}

// Manual implementation of Debug for BookRegistry
impl fmt::Debug for BookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookRegistry")
            .field("books", &self.books)
            .field("registration_order", &self.registration_order)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl BookRegistry {
    /// Create an empty registry with no observers
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer to be notified of every new book
    pub fn register_observer(&mut self, observer: Box<dyn RegistryObserver>) {
        self.observers.push(observer);
    }

    /// Register an original book
    ///
    /// # Errors
    ///
    /// Checks run in this order and the first failure is returned:
    /// - `RegistryError::EmptyTitle` if the title is empty
    /// - `RegistryError::NonPositiveEdition` if the edition is zero or negative
    /// - `RegistryError::NonUniqueTitle` if the exact key is already registered
    /// - `RegistryError::EmptyAuthorsList` if no authors are given
    /// - `RegistryError::DuplicateAuthor` if an author is listed twice
    /// - `RegistryError::LanguageCodeNot2Chars` if the language code is not 2 ASCII characters
    pub fn add_original_book<I, S>(
        &mut self,
        key: BookKey,
        authors: I,
        language: &str,
        publication_year: i32,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if key.title().is_empty() {
            return Err(RegistryError::EmptyTitle);
        }
        if key.edition() <= 0 {
            return Err(RegistryError::NonPositiveEdition);
        }
        self.ensure_unique(&key)?;

        let authors: Vec<String> = authors.into_iter().map(Into::into).collect();
        if authors.is_empty() {
            return Err(RegistryError::EmptyAuthorsList);
        }
        let mut seen = HashSet::with_capacity(authors.len());
        if !authors.iter().all(|author| seen.insert(author.as_str())) {
            return Err(RegistryError::DuplicateAuthor);
        }
        check_language_code(language)?;

        self.insert(
            key,
            BookRecord {
                language: language.to_string(),
                publication_year,
                authors,
                origin: BookOrigin::Original,
            },
        );
        Ok(())
    }

    /// Register a translation of `source` under a new title.
    ///
    /// The translation keeps the edition number of its source, so the new
    /// key is `(title, source.edition)`. Authors are copied from the source.
    /// Translating a translation or a revision is allowed.
    ///
    /// # Errors
    ///
    /// Checks run in this order and the first failure is returned:
    /// - `RegistryError::EmptyTitle` if the new title is empty
    /// - `RegistryError::NonUniqueTitle` if `(title, source.edition)` is already registered
    /// - `RegistryError::BookNotFound` if `source` is not registered
    /// - `RegistryError::LanguageCodeNot2Chars` if the language code is not 2 ASCII characters
    /// - `RegistryError::TranslatedToSameLanguage` if the language equals the source language
    /// - `RegistryError::DerivedBeforeOriginal` if the year precedes the source year
    pub fn add_translation(
        &mut self,
        title: impl Into<String>,
        source: &BookKey,
        language: &str,
        publication_year: i32,
    ) -> Result<BookKey> {
        let title = title.into();
        if title.is_empty() {
            return Err(RegistryError::EmptyTitle);
        }
        let key = BookKey::new(title, source.edition());
        self.ensure_unique(&key)?;

        let source_record = self.record(source)?;
        check_language_code(language)?;
        if source_record.language == language {
            return Err(RegistryError::TranslatedToSameLanguage);
        }
        if publication_year < source_record.publication_year {
            return Err(RegistryError::DerivedBeforeOriginal);
        }

        let record = BookRecord {
            language: language.to_string(),
            publication_year,
            authors: source_record.authors.clone(),
            origin: BookOrigin::Translation(source.clone()),
        };
        self.insert(key.clone(), record);
        Ok(key)
    }

    /// Register a revised edition of `source`.
    ///
    /// Language and authors are copied from the source. Only edition ordering
    /// is enforced; the revision year is not compared with the source year.
    ///
    /// # Errors
    ///
    /// Checks run in this order and the first failure is returned:
    /// - `RegistryError::EmptyTitle` if the revised title is empty
    /// - `RegistryError::RevisedEditionLessEqu` if the revised edition is not
    ///   greater than the source edition, whether or not the source exists
    /// - `RegistryError::NonUniqueTitle` if the revised key is already registered
    /// - `RegistryError::BookNotFound` if `source` is not registered
    pub fn add_revised(
        &mut self,
        revised_key: BookKey,
        source: &BookKey,
        publication_year: i32,
    ) -> Result<()> {
        if revised_key.title().is_empty() {
            return Err(RegistryError::EmptyTitle);
        }
        if revised_key.edition() <= source.edition() {
            return Err(RegistryError::RevisedEditionLessEqu);
        }
        self.ensure_unique(&revised_key)?;

        let source_record = self.record(source)?;
        let record = BookRecord {
            language: source_record.language.clone(),
            publication_year,
            authors: source_record.authors.clone(),
            origin: BookOrigin::Revision(source.clone()),
        };
        self.insert(revised_key, record);
        Ok(())
    }

    /// Language code of a registered book
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::BookNotFound` if `key` is not registered
    pub fn book_language(&self, key: &BookKey) -> Result<&str> {
        Ok(&self.record(key)?.language)
    }

    /// Publication year of a registered book
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::BookNotFound` if `key` is not registered
    pub fn book_publication_year(&self, key: &BookKey) -> Result<i32> {
        Ok(self.record(key)?.publication_year)
    }

    /// Authors of a registered book, in the order they were given
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::BookNotFound` if `key` is not registered
    pub fn book_authors(&self, key: &BookKey) -> Result<&[String]> {
        Ok(&self.record(key)?.authors)
    }

    /// Every registered key with exactly this title, ascending by edition.
    ///
    /// Unrelated lineages may share a title; all of them are returned.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::BookNotFound` if no edition of `title` is registered
    pub fn find_book_editions(&self, title: &str) -> Result<Vec<BookKey>> {
        let editions: Vec<BookKey> = self.editions_of(title).cloned().collect();
        if editions.is_empty() {
            return Err(RegistryError::BookNotFound);
        }
        Ok(editions)
    }

    /// Highest registered edition number of a title
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::BookNotFound` if no edition of `title` is registered
    pub fn book_latest_edition(&self, title: &str) -> Result<i32> {
        self.editions_of(title).map(BookKey::edition).max().ok_or(RegistryError::BookNotFound)
    }

    /// Translations made from exactly this title and edition, in registration order.
    ///
    /// Revisions of `key` are not included.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::BookNotFound` if `key` is not registered
    pub fn find_book_translations(&self, key: &BookKey) -> Result<Vec<BookKey>> {
        self.record(key)?;
        Ok(self
            .derivatives_of(key)
            .filter(|candidate| candidate.edition() == key.edition())
            .cloned()
            .collect())
    }

    /// Immediate source of a translated or revised book
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::BookNotFound` if `key` is not registered, or
    /// `RegistryError::NotADerivedBook` if `key` is an original book
    pub fn original_book(&self, key: &BookKey) -> Result<&BookKey> {
        self.record(key)?.derived_from().ok_or(RegistryError::NotADerivedBook)
    }

    /// Chain of keys from `key` back to its root original, both ends included
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::BookNotFound` if `key` is not registered
    pub fn lineage(&self, key: &BookKey) -> Result<Vec<BookKey>> {
        let mut chain = vec![key.clone()];
        let mut current = self.record(key)?;
        while let Some(source) = current.derived_from() {
            chain.push(source.clone());
            current = self.record(source)?;
        }
        Ok(chain)
    }

    /// Original book at the root of the lineage of `key`.
    /// An original book is its own root.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::BookNotFound` if `key` is not registered
    pub fn root_original(&self, key: &BookKey) -> Result<&BookKey> {
        let (mut root, mut record) =
            self.books.get_key_value(key).ok_or(RegistryError::BookNotFound)?;
        while let Some(source) = record.derived_from() {
            (root, record) = self.books.get_key_value(source).ok_or(RegistryError::BookNotFound)?;
        }
        Ok(root)
    }

    /// Every translation and revision made directly from `key`, in registration order
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::BookNotFound` if `key` is not registered
    pub fn derived_books(&self, key: &BookKey) -> Result<Vec<BookKey>> {
        self.record(key)?;
        Ok(self.derivatives_of(key).cloned().collect())
    }

    /// Record stored for `key`, if registered
    #[must_use]
    pub fn get(&self, key: &BookKey) -> Option<&BookRecord> {
        self.books.get(key)
    }

    /// Whether `key` is registered
    #[must_use]
    pub fn contains(&self, key: &BookKey) -> bool {
        self.books.contains_key(key)
    }

    /// Number of registered books
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether no book has been registered yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Registered books in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&BookKey, &BookRecord)> {
        self.registration_order.iter().filter_map(|key| self.books.get_key_value(key))
    }

    /// Look up the record for `key`
    fn record(&self, key: &BookKey) -> Result<&BookRecord> {
        self.books.get(key).ok_or(RegistryError::BookNotFound)
    }

    /// Reject keys that are already registered
    fn ensure_unique(&self, key: &BookKey) -> Result<()> {
        if self.books.contains_key(key) {
            return Err(RegistryError::NonUniqueTitle);
        }
        Ok(())
    }

    /// Keys sharing `title`, ascending by edition
    fn editions_of(&self, title: &str) -> impl Iterator<Item = &BookKey> {
        self.books
            .range(BookKey::new(title, i32::MIN)..=BookKey::new(title, i32::MAX))
            .map(|(key, _)| key)
    }

    /// Keys whose record was derived directly from `source`, in registration order
    fn derivatives_of(&self, source: &BookKey) -> impl Iterator<Item = &BookKey> {
        self.iter()
            .filter(move |(_, record)| record.derived_from() == Some(source))
            .map(|(key, _)| key)
    }

    /// Store a validated record and notify observers
    fn insert(&mut self, key: BookKey, record: BookRecord) {
        for observer in &self.observers {
            observer.on_book_registered(&key, &record);
        }
        self.registration_order.push(key.clone());
        self.books.insert(key, record);
    }
}

impl fmt::Display for BookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let originals = self.books.values().filter(|record| record.is_original()).count();
        write!(f, "{} books registered ({originals} originals)", self.books.len())
    }
}

/// Language codes are exactly two ASCII characters
fn check_language_code(language: &str) -> Result<()> {
    if language.len() != LANGUAGE_CODE_LEN || !language.is_ascii() {
        return Err(RegistryError::LanguageCodeNot2Chars);
    }
    Ok(())
}
