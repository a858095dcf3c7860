use catalog::Catalog;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data");

    println!("Loading movie catalog...\n");

    let start = Instant::now();
    let catalog = Catalog::load_from_files(data_dir)
        .expect("Failed to load catalog");
    let elapsed = start.elapsed();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", catalog.len());
    println!("Browse entries: {}", catalog.browse_entries().len());
    println!("\nPerformance: {:.0} movies/second",
             catalog.len() as f64 / elapsed.as_secs_f64());
}
