use crate::{book_key::BookKey, record::BookRecord};

/// Trait for registration observation
pub trait RegistryObserver {
    /// Called after a book has been inserted into the registry
    fn on_book_registered(&self, key: &BookKey, record: &BookRecord);
}

/// Logs every registration as a structured tracing event
#[derive(Debug)]
pub struct RegistrationLogger;

impl RegistryObserver for RegistrationLogger {
    fn on_book_registered(&self, key: &BookKey, record: &BookRecord) {
        if let Some(source) = record.derived_from() {
            tracing::info!(
                title = key.title(),
                edition = key.edition(),
                origin = record.origin.label(),
                source = %source,
                language = %record.language,
                year = record.publication_year,
                "registered derived book"
            );
        } else {
            tracing::info!(
                title = key.title(),
                edition = key.edition(),
                language = %record.language,
                year = record.publication_year,
                authors = record.authors.len(),
                "registered original book"
            );
        }
    }
}
