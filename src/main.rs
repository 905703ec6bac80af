use std::path::PathBuf;

use book_registry::{BookKey, BookRegistry, LineageVisualization, RegistrationLogger};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the book registry demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging (RUST_LOG takes precedence when set)
    #[arg(short, long)]
    verbose: bool,

    /// Write the lineage graph in DOT format to this path
    #[arg(long, value_name = "PATH")]
    dot: Option<PathBuf>,

    /// Print the registry snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Skip the catalog table
    #[arg(long)]
    no_table: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_tracing(args.verbose);

    println!("{}", "Book Registry Demonstration".green().bold());
    println!("===========================\n");

    let registry = build_sample_registry()?;

    if !args.no_table {
        LineageVisualization::print_catalog(&registry);
    }

    lineage_queries(&registry)?;

    if let Some(path) = &args.dot {
        let dot = LineageVisualization::generate_dot(&registry);
        LineageVisualization::save_dot_to_file(&dot, path)?;
        println!("\nLineage graph written to {}", path.display());
    }

    if args.json {
        println!("\n{}", "Registry snapshot:".yellow().bold());
        println!("{}", registry.to_json()?);
    }

    println!("\n{}", "Demonstration complete!".green().bold());
    Ok(())
}

/// Install the stderr log subscriber
fn initialize_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Registers an original, a revision, a translation and a chained translation,
/// plus an unrelated book with two editions
fn build_sample_registry() -> book_registry::Result<BookRegistry> {
    let mut registry = BookRegistry::new();
    registry.register_observer(Box::new(RegistrationLogger));

    let original = BookKey::first_edition("Windows 8 for Dummies");
    registry.add_original_book(original.clone(), ["A. Rathbone"], "en", 2012)?;
    registry.add_revised(BookKey::new("Windows 10", 2), &original, 2013)?;
    let linux = registry.add_translation("Linux", &original, "ok", 2014)?;
    registry.add_translation("Meraving", &linux, "de", 2015)?;

    let dragon = BookKey::new("How to train your dragon", 3);
    registry.add_original_book(dragon.clone(), ["Valerka", "Vitalka"], "ua", 2000)?;
    registry.add_revised(BookKey::new("How to train your dragon", 4), &dragon, 2004)?;

    Ok(registry)
}

/// Print the answers to the typical lineage questions
fn lineage_queries(registry: &BookRegistry) -> book_registry::Result<()> {
    println!("\n{}", "Lineage queries:".yellow().bold());

    let revised = BookKey::new("Windows 10", 2);
    println!("  language of {revised}: {}", registry.book_language(&revised)?);

    let linux = BookKey::first_edition("Linux");
    println!("  original of {linux}: {}", registry.original_book(&linux)?);

    let original = BookKey::first_edition("Windows 8 for Dummies");
    match registry.original_book(&original) {
        Ok(source) => println!("  original of {original}: {source}"),
        Err(err) => println!("  original of {original}: {}", err.to_string().as_str().red()),
    }

    let translations = registry.find_book_translations(&original)?;
    println!("  translations of {original}: {}", join_keys(&translations, ", "));

    let meraving = BookKey::first_edition("Meraving");
    println!("  lineage of {meraving}: {}", join_keys(&registry.lineage(&meraving)?, " -> "));

    let title = "How to train your dragon";
    println!("  editions of \"{title}\": {}", join_keys(&registry.find_book_editions(title)?, ", "));
    println!("  latest edition of \"{title}\": {}", registry.book_latest_edition(title)?);

    Ok(())
}

/// Join keys for display
fn join_keys(keys: &[BookKey], separator: &str) -> String {
    if keys.is_empty() {
        return "(none)".to_string();
    }
    keys.iter().map(ToString::to_string).collect::<Vec<_>>().join(separator)
}
