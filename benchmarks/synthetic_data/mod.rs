use csv::Writer;
use fake::{Fake, faker::company::en::CompanyName, faker::lorem::en::Word};
use rand::Rng;
use std::path::{Path, PathBuf};

/// Standard-layout supplier sheet with a realistic mix of junk rows.
pub fn generate_standard_csv(path: &Path, total_rows: usize, chunk_size: usize) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = Writer::from_path(path)?;
    let mut rng = rand::rng();

    wtr.write_record(["name", "price", "originalPrice", "image", "galleryImages", "category", "stock", "tags"])?;

    let mut row = 0;
    while row < total_rows {
        let end = std::cmp::min(row + chunk_size, total_rows);
        for i in row..end {
            if i % 20 == 0 {
                wtr.write_record(["", "0", "", "", "", "", "", ""])?;
                continue;
            }
            let name: String = CompanyName().fake();
            let category: String = Word().fake();
            let price: f64 = rng.random_range(50.0..50_000.0);
            let stock: u32 = rng.random_range(0..500);
            wtr.write_record([
                name,
                format!("{price:.2}"),
                format!("{:.2}", price * 1.2),
                format!("/uploads/p{i}.jpg"),
                format!("/uploads/p{i}-1.jpg, /uploads/p{i}-2.jpg"),
                category.clone(),
                stock.to_string(),
                format!("{category}, sale"),
            ])?;
        }
        wtr.flush()?;
        row = end;
    }
    Ok(())
}

pub fn ensure_synthetic_data(path: &str, rows: usize) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = PathBuf::from(path);
    if !p.exists() {
        if let Some(parent) = p.parent() {
            std::fs::create_dir_all(parent)?;
        }
        generate_standard_csv(&p, rows, 1_000)?;
    }
    Ok(p)
}
