//! Example: Validate every facet file against the catalog
//!
//! Run with: cargo run --package similarity --example check_facets
//!
//! This example shows how to:
//! 1. Load the movie catalog
//! 2. Build a file-backed SimilarityIndex sized for it
//! 3. Load each facet and report its shape or the reason it was rejected

use catalog::Catalog;
use similarity::{Facet, FileFacetSource, SimilarityIndex};
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    println!("=== Facet Check ===\n");

    let start = Instant::now();
    let catalog = Catalog::load_from_files(Path::new("data"))?;
    println!("Loaded {} movies in {:?}\n", catalog.len(), start.elapsed());

    let index = SimilarityIndex::for_catalog(FileFacetSource::new("data/facets"), &catalog);

    for facet in Facet::ALL {
        let start = Instant::now();
        match index.load_facet(facet) {
            Ok(matrix) => {
                let diagonal_ones = (0..matrix.rows())
                    .filter(|&i| matrix.score(i, i) == Some(1.0))
                    .count();
                println!(
                    "  {:<22} ok   {}x{} in {:?} ({} unit diagonal entries)",
                    facet.as_str(),
                    matrix.rows(),
                    matrix.cols(),
                    start.elapsed(),
                    diagonal_ones
                );
            }
            Err(e) => println!("  {:<22} FAIL {}", facet.as_str(), e),
        }
    }

    println!("\nLoaded facets: {:?}", index.loaded_facets());
    Ok(())
}
