use std::{collections::HashMap, fmt::Write as _, fs::File, io::Write, path::Path};

use crate::{
    book_key::BookKey,
    record::{BookOrigin, BookRecord},
    registry::BookRegistry,
};

/// Visualization tools for book lineages
#[derive(Debug)]
pub struct LineageVisualization;

impl LineageVisualization {
    /// Generate a DOT graph of the derivation forest.
    ///
    /// Edges point from a derived book to the book it was derived from.
    #[must_use]
    pub fn generate_dot(registry: &BookRegistry) -> String {
        let mut dot = String::from("digraph book_lineage {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box, style=filled, fillcolor=lightblue];\n");

        let node_ids: HashMap<&BookKey, usize> =
            registry.iter().enumerate().map(|(idx, (key, _))| (key, idx)).collect();

        // Add books, originals are highlighted
        for (idx, (key, record)) in registry.iter().enumerate() {
            let label = escape(&Self::format_node(key, record));
            if record.is_original() {
                let _ = writeln!(
                    dot,
                    "  b{idx} [label=\"{label}\", fillcolor=palegreen, peripheries=2];"
                );
            } else {
                let _ = writeln!(dot, "  b{idx} [label=\"{label}\"];");
            }
        }

        // Add derivation edges
        for (idx, (_, record)) in registry.iter().enumerate() {
            let Some(source) = record.derived_from() else {
                continue;
            };
            if let Some(source_idx) = node_ids.get(source) {
                let style = if matches!(record.origin, BookOrigin::Revision(_)) {
                    "style=dashed"
                } else {
                    "style=solid"
                };
                let _ = writeln!(
                    dot,
                    "  b{idx} -> b{source_idx} [label=\"{}\", {style}];",
                    record.origin.label()
                );
            }
        }

        dot.push_str("}\n");
        dot
    }

    /// Save the DOT representation to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written to
    pub fn save_dot_to_file(dot: &str, path: impl AsRef<Path>) -> Result<(), std::io::Error> {
        let mut file = File::create(path)?;
        file.write_all(dot.as_bytes())?;
        Ok(())
    }

    /// Generate a markdown table of the catalog in registration order
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn catalog_table(registry: &BookRegistry) -> String {
        if registry.is_empty() {
            return "No books registered yet.".to_string();
        }

        let mut table =
            String::from("| # | Title | Edition | Language | Year | Authors | Derived from |\n");
        table.push_str("|---|-------|---------|----------|------|---------|--------------|\n");

        for (i, (key, record)) in registry.iter().enumerate() {
            let derived_from = record.derived_from().map_or_else(
                || "-".to_string(),
                |source| format!("{} of {source}", record.origin.label()),
            );
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {} | {} | {} |",
                i + 1,
                key.title(),
                key.edition(),
                record.language,
                record.publication_year,
                record.authors.join(", "),
                derived_from
            );
        }

        table
    }

    /// Print the catalog table and a short summary to stdout
    pub fn print_catalog(registry: &BookRegistry) {
        println!("=== Book Catalog ===");
        println!("{}", Self::catalog_table(registry));
        println!("{registry}");
    }

    /// Format a book for a graph node
    fn format_node(key: &BookKey, record: &BookRecord) -> String {
        format!("{key}\\n({}, {})", record.language, record.publication_year)
    }
}

/// Escape quotes so titles stay inside DOT string literals
fn escape(label: &str) -> String {
    label.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Helper building a small lineage with a quoted title
    fn sample_registry() -> BookRegistry {
        let mut registry = BookRegistry::new();
        let original = BookKey::first_edition("Windows \"8\"");

        assert!(registry.add_original_book(original.clone(), ["A. Rathbone"], "en", 2012).is_ok());
        assert!(registry.add_revised(BookKey::new("Windows 10", 2), &original, 2013).is_ok());
        assert!(registry.add_translation("Linux", &original, "ok", 2014).is_ok());

        registry
    }

    #[test]
    fn test_dot_contains_nodes_and_edges() {
        let dot = LineageVisualization::generate_dot(&sample_registry());

        assert!(dot.starts_with("digraph book_lineage {\n"));
        assert!(dot.contains("b0 [label=\"Windows \\\"8\\\" #1\\n(en, 2012)\", fillcolor=palegreen"));
        assert!(dot.contains("b1 -> b0 [label=\"revision\", style=dashed];"));
        assert!(dot.contains("b2 -> b0 [label=\"translation\", style=solid];"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_catalog_table_rows() {
        let table = LineageVisualization::catalog_table(&sample_registry());
        let rows: Vec<&str> = table.lines().collect();

        assert_eq!(rows.len(), 5);
        assert_eq!(rows.get(2).copied(), Some("| 1 | Windows \"8\" | 1 | en | 2012 | A. Rathbone | - |"));
        assert_eq!(
            rows.get(4).copied(),
            Some("| 3 | Linux | 1 | ok | 2014 | A. Rathbone | translation of Windows \"8\" #1 |")
        );
    }

    #[test]
    fn test_catalog_table_of_empty_registry() {
        assert_eq!(
            LineageVisualization::catalog_table(&BookRegistry::new()),
            "No books registered yet."
        );
    }
}
