mod synthetic_data;

use std::time::Instant;
use storefront_import::ProductCatalog;
use storefront_import::import::{ImportOptions, import_file};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rows = std::env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or(5_000);
    let csv_path = synthetic_data::ensure_synthetic_data("benchmarks/synthetic_data/supplier.csv", rows)?;
    println!("Synthetic data ready at {}", csv_path.display());

    let catalog = ProductCatalog::new();
    let mut ids = catalog.existing_ids();
    let started = Instant::now();
    let report = import_file(&csv_path, &mut ids, &catalog, &ImportOptions::default())?;
    let elapsed = started.elapsed();
    println!(
        "{{\"rows\":{},\"imported\":{},\"skipped\":{},\"elapsed_ms\":{}}}",
        report.rows,
        report.imported,
        report.skipped,
        elapsed.as_millis()
    );
    Ok(())
}
