use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;

use super::options::{ExportFormat, ExportOptions, ExportReport};
use super::sinks::{CsvSink, NdjsonSink, ProductSink};
use crate::catalog::ProductCatalog;
use crate::errors::{ImportError, Result};
use crate::fsutil::{persist_atomic, temp_beside};
use crate::product::Product;

/// `products_export_<YYYY-MM-DD>.csv`
pub fn default_file_name(date: NaiveDate) -> String {
    format!("products_export_{}.csv", date.format("%Y-%m-%d"))
}

/// Export the catalog to a file atomically via a temp file + persist.
///
/// # Errors
/// [`ImportError::NothingToExport`] for an empty catalog; I/O errors if the
/// destination cannot be written. The destination is untouched on error.
pub fn export_file(catalog: &ProductCatalog, path: impl AsRef<Path>, opts: &ExportOptions) -> Result<ExportReport> {
    let dest = path.as_ref();
    log::info!("export: path={} format={:?}", dest.display(), opts.format);
    let products = catalog.products();
    if products.is_empty() {
        return Err(ImportError::NothingToExport);
    }
    let mut tmp = temp_beside(dest)?;
    let report = export_products(&products, &mut tmp, opts)?;
    persist_atomic(tmp, dest)?;
    Ok(report)
}

/// Writes `products` to `writer` in the requested format.
///
/// # Errors
/// [`ImportError::NothingToExport`] for an empty slice, or the writer's I/O error.
pub fn export_products<W: Write>(products: &[Product], writer: W, opts: &ExportOptions) -> Result<ExportReport> {
    if products.is_empty() {
        return Err(ImportError::NothingToExport);
    }
    let mut sink: Box<dyn ProductSink> = match opts.format {
        ExportFormat::Ndjson => Box::new(NdjsonSink::new(writer)),
        ExportFormat::Csv => Box::new(CsvSink::new(writer, opts.csv.delimiter, opts.csv.write_headers)),
    };
    let mut report = ExportReport::default();
    let limit = opts.limit.unwrap_or(usize::MAX);
    for p in products.iter().take(limit) {
        sink.write_product(p)?;
        report.written += 1;
    }
    sink.finish()?;
    log::info!("export: wrote {} products", report.written);
    Ok(report)
}
