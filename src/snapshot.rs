use serde::{Deserialize, Serialize};

use crate::{
    book_key::BookKey,
    error::Result,
    record::BookOrigin,
    registry::BookRegistry,
};

/// One registration, recorded as the inputs needed to replay it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnapshotEntry {
    /// Replayed through `BookRegistry::add_original_book`
    Original {
        /// Key of the original book
        key: BookKey,
        /// Authors in their original order
        authors: Vec<String>,
        /// Two character language code
        language: String,
        /// Year the book was published
        publication_year: i32,
    },
    /// Replayed through `BookRegistry::add_translation`
    Translation {
        /// Title of the translation; the edition comes from `source`
        title: String,
        /// Book the translation was made from
        source: BookKey,
        /// Language of the translation
        language: String,
        /// Year the translation was published
        publication_year: i32,
    },
    /// Replayed through `BookRegistry::add_revised`
    Revision {
        /// Key of the revised edition
        key: BookKey,
        /// Book the revision was made from
        source: BookKey,
        /// Year the revision was published
        publication_year: i32,
    },
}

/// Serializable representation of a registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegistrySnapshot {
    /// Registrations in the order they happened
    pub books: Vec<SnapshotEntry>,
}

impl BookRegistry {
    /// Capture every registration in registration order
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        let books = self
            .iter()
            .map(|(key, record)| match &record.origin {
                BookOrigin::Original => SnapshotEntry::Original {
                    key: key.clone(),
                    authors: record.authors.clone(),
                    language: record.language.clone(),
                    publication_year: record.publication_year,
                },
                BookOrigin::Translation(source) => SnapshotEntry::Translation {
                    title: key.title().to_string(),
                    source: source.clone(),
                    language: record.language.clone(),
                    publication_year: record.publication_year,
                },
                BookOrigin::Revision(source) => SnapshotEntry::Revision {
                    key: key.clone(),
                    source: source.clone(),
                    publication_year: record.publication_year,
                },
            })
            .collect();

        RegistrySnapshot { books }
    }

    /// Serialize the registry to pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns a `RegistryError::Json` if the snapshot cannot be serialized
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    /// Rebuild a registry by replaying a snapshot.
    ///
    /// Every entry goes through the regular add operations, so a snapshot
    /// that breaks a registry rule is rejected with the matching error.
    /// The restored registry has no observers.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while replaying an entry
    pub fn restore(snapshot: RegistrySnapshot) -> Result<Self> {
        let mut registry = Self::new();

        for entry in snapshot.books {
            match entry {
                SnapshotEntry::Original { key, authors, language, publication_year } => {
                    registry.add_original_book(key, authors, &language, publication_year)?;
                }
                SnapshotEntry::Translation { title, source, language, publication_year } => {
                    registry.add_translation(title, &source, &language, publication_year)?;
                }
                SnapshotEntry::Revision { key, source, publication_year } => {
                    registry.add_revised(key, &source, publication_year)?;
                }
            }
        }

        tracing::debug!(books = registry.len(), "restored registry from snapshot");

        Ok(registry)
    }

    /// Parse a JSON snapshot and replay it
    ///
    /// # Errors
    ///
    /// Returns a `RegistryError::Json` if the text is not a valid snapshot,
    /// or the first error raised while replaying an entry
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: RegistrySnapshot = serde_json::from_str(json)?;
        Self::restore(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::RegistryError;

    /// Helper building a registry with every kind of registration
    fn populated_registry() -> BookRegistry {
        let mut registry = BookRegistry::new();
        let original = BookKey::first_edition("Windows 8 for Dummies");

        assert!(registry.add_original_book(original.clone(), ["A. Rathbone", "B. Gates"], "en", 2012).is_ok());
        assert!(registry.add_revised(BookKey::new("Windows 10", 2), &original, 2013).is_ok());
        assert!(registry.add_translation("Linux", &original, "ok", 2014).is_ok());
        assert!(registry.add_translation("Meraving", &BookKey::new("Windows 10", 2), "de", 2015).is_ok());

        registry
    }

    #[test]
    fn test_snapshot_records_replay_inputs_in_order() {
        let snapshot = populated_registry().snapshot();
        let original = BookKey::first_edition("Windows 8 for Dummies");

        assert_eq!(
            snapshot.books,
            vec![
                SnapshotEntry::Original {
                    key: original.clone(),
                    authors: vec!["A. Rathbone".to_string(), "B. Gates".to_string()],
                    language: "en".to_string(),
                    publication_year: 2012,
                },
                SnapshotEntry::Revision {
                    key: BookKey::new("Windows 10", 2),
                    source: original.clone(),
                    publication_year: 2013,
                },
                SnapshotEntry::Translation {
                    title: "Linux".to_string(),
                    source: original,
                    language: "ok".to_string(),
                    publication_year: 2014,
                },
                SnapshotEntry::Translation {
                    title: "Meraving".to_string(),
                    source: BookKey::new("Windows 10", 2),
                    language: "de".to_string(),
                    publication_year: 2015,
                },
            ]
        );
    }

    #[test]
    fn test_json_restore_rebuilds_every_query() {
        let registry = populated_registry();
        let json = registry.to_json();
        assert!(json.is_ok());

        let restored = BookRegistry::from_json(&json.unwrap_or_default());
        assert!(restored.is_ok());
        let restored = restored.unwrap_or_default();

        assert_eq!(restored.snapshot(), registry.snapshot());
        let meraving = BookKey::new("Meraving", 2);
        assert_eq!(restored.book_language(&meraving).ok(), Some("de"));
        assert_eq!(
            restored.book_authors(&meraving).ok(),
            Some(&["A. Rathbone".to_string(), "B. Gates".to_string()][..])
        );
        assert_eq!(restored.original_book(&meraving).ok(), Some(&BookKey::new("Windows 10", 2)));
        assert!(format!("{restored:?}").contains("observers_count: 0"));
    }

    #[test]
    fn test_json_uses_kind_tags() {
        let json = populated_registry().to_json().unwrap_or_default();
        assert!(json.contains("\"kind\": \"original\""));
        assert!(json.contains("\"kind\": \"translation\""));
        assert!(json.contains("\"kind\": \"revision\""));
    }

    #[test]
    fn test_restore_rejects_rule_breaking_snapshot() {
        let original = BookKey::first_edition("Windows 8 for Dummies");
        let snapshot = RegistrySnapshot {
            books: vec![
                SnapshotEntry::Original {
                    key: original.clone(),
                    authors: vec!["A. Rathbone".to_string()],
                    language: "en".to_string(),
                    publication_year: 2012,
                },
                SnapshotEntry::Translation {
                    title: "Linux".to_string(),
                    source: original,
                    language: "en".to_string(),
                    publication_year: 2014,
                },
            ],
        };

        let result = BookRegistry::restore(snapshot);
        assert!(matches!(result, Err(RegistryError::TranslatedToSameLanguage)));
    }

    #[test]
    fn test_restore_rejects_forward_references() {
        let snapshot = RegistrySnapshot {
            books: vec![SnapshotEntry::Revision {
                key: BookKey::new("Windows 10", 2),
                source: BookKey::first_edition("Windows 8 for Dummies"),
                publication_year: 2013,
            }],
        };

        let result = BookRegistry::restore(snapshot);
        assert!(matches!(result, Err(RegistryError::BookNotFound)));
    }

    #[test]
    fn test_from_json_rejects_malformed_text() {
        let result = BookRegistry::from_json("{ \"books\": [ { \"kind\": \"sequel\" } ] }");
        assert!(matches!(result, Err(RegistryError::Json(_))));
    }

    #[test]
    fn test_empty_snapshot_restores_empty_registry() {
        let restored = BookRegistry::restore(RegistrySnapshot::default());
        assert!(restored.is_ok());

        let restored = restored.unwrap_or_default();
        assert!(restored.is_empty());
        assert_eq!(format!("{restored:?}"), format!("{:?}", BookRegistry::new()));
    }
}
