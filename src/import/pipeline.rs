use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::csv::read_delimited;
use super::detect::{detect_layout, detect_table_format};
use super::ids::{ExistingIds, IdAllocator};
use super::options::{ImportOptions, ImportReport, SheetLayout, TableFormat};
use super::table::{Row, Table};
use super::xlsx::read_workbook;
use super::{marketplace, standard};
use crate::errors::{ImportError, Result};
use crate::product::Product;

/// Receiver of accepted records; merges them into whatever store backs the admin.
pub trait BulkImport {
    /// Returns the number of records stored.
    ///
    /// # Errors
    /// Implementations return [`ImportError::Commit`] when the batch is refused.
    fn bulk_import(&self, products: Vec<Product>) -> Result<usize>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    Idle,
    Reading,
    Detecting,
    Mapping,
    Empty,
    Committing,
    Done,
    Failed,
}

/// One import run: read, detect, map, then either stop empty or commit.
#[derive(Debug)]
pub struct ImportPipeline<'o> {
    opts: &'o ImportOptions,
    stage: ImportStage,
}

impl<'o> ImportPipeline<'o> {
    pub fn new(opts: &'o ImportOptions) -> Self {
        Self { opts, stage: ImportStage::Idle }
    }

    pub fn stage(&self) -> ImportStage {
        self.stage
    }

    fn enter(&mut self, stage: ImportStage) {
        log::debug!("import stage {:?} -> {:?}", self.stage, stage);
        self.stage = stage;
    }

    /// Parses file bytes into a table. `name` is only used for extension sniffing.
    ///
    /// # Errors
    /// [`ImportError::Parse`] when the bytes do not decode as the detected type,
    /// [`ImportError::UnsupportedFile`] when no type can be determined.
    pub fn read(&mut self, name: &Path, bytes: Vec<u8>) -> Result<Table> {
        self.enter(ImportStage::Reading);
        let res = read_table(name, bytes, self.opts);
        if let Err(e) = &res {
            log::error!("import read failed for {}: {e}", name.display());
            self.enter(ImportStage::Failed);
        }
        res
    }

    /// Maps every row, drops unusable records and hands the rest to `sink`.
    ///
    /// # Errors
    /// [`ImportError::NoValidRecords`] when nothing survives the filter, or the
    /// collaborator's error when the commit is refused.
    pub fn process(
        &mut self,
        headers: &[String],
        rows: &[Row],
        existing: &mut ExistingIds,
        sink: &dyn BulkImport,
    ) -> Result<ImportReport> {
        self.enter(ImportStage::Detecting);
        let layout = detect_layout(headers);
        log::info!("import: detected {} ({} rows, {} columns)", layout.label(), rows.len(), headers.len());

        self.enter(ImportStage::Mapping);
        let mut ids = IdAllocator::new(existing);
        let mut accepted = Vec::with_capacity(rows.len());
        for (n, row) in rows.iter().enumerate() {
            let product = match layout {
                SheetLayout::Marketplace => marketplace::map_row(row, &mut ids),
                SheetLayout::Standard => standard::map_row(row, &mut ids),
            };
            if product.is_usable() {
                accepted.push(product);
            }
            if let Some(every) = self.opts.progress_every
                && every > 0
                && (n + 1) % every == 0
            {
                log::info!("mapped {} of {} rows", n + 1, rows.len());
            }
        }
        let skipped = rows.len() - accepted.len();
        if accepted.is_empty() {
            self.enter(ImportStage::Empty);
            log::warn!("import: no usable rows among {}", rows.len());
            self.enter(ImportStage::Done);
            return Err(ImportError::NoValidRecords { rows: rows.len() });
        }

        if let Some(normalizer) = &self.opts.image_normalizer {
            for p in &mut accepted {
                normalizer.normalize_product(p);
            }
        }

        self.enter(ImportStage::Committing);
        let ids: Vec<_> = accepted.iter().map(|p| p.id).collect();
        let result = sink.bulk_import(accepted);
        self.enter(ImportStage::Done);
        let imported = result?;
        log::info!(
            target: crate::logger::AUDIT_TARGET,
            "import layout={:?} rows={} imported={} skipped={}",
            layout,
            rows.len(),
            imported,
            skipped
        );
        Ok(ImportReport { rows: rows.len(), imported, skipped, layout, ids })
    }
}

/// Picks the reader for `name`/`bytes` and parses them.
///
/// # Errors
/// See [`ImportPipeline::read`].
pub fn read_table(name: &Path, bytes: Vec<u8>, opts: &ImportOptions) -> Result<Table> {
    let format = match opts.format {
        TableFormat::Auto => detect_table_format(name, &bytes)
            .ok_or_else(|| ImportError::UnsupportedFile(name.display().to_string()))?,
        other => other,
    };
    if format == TableFormat::Xlsx {
        return read_workbook(bytes);
    }
    let delimiter = opts.delimiter.unwrap_or_else(|| format.delimiter());
    read_delimited(bytes.as_slice(), delimiter, format)
}

/// Runs detection, mapping and commit over rows that are already in memory.
///
/// # Errors
/// See [`ImportPipeline::process`].
pub fn process_rows(
    headers: &[String],
    rows: &[Row],
    existing: &mut ExistingIds,
    sink: &dyn BulkImport,
    opts: &ImportOptions,
) -> Result<ImportReport> {
    ImportPipeline::new(opts).process(headers, rows, existing, sink)
}

/// Imports raw file bytes. Parse failures abort before any row is mapped.
///
/// # Errors
/// Any [`ImportError`] from reading or processing.
pub fn import_bytes(
    name: &Path,
    bytes: Vec<u8>,
    existing: &mut ExistingIds,
    sink: &dyn BulkImport,
    opts: &ImportOptions,
) -> Result<ImportReport> {
    let mut pipeline = ImportPipeline::new(opts);
    let table = pipeline.read(name, bytes)?;
    pipeline.process(&table.headers, &table.rows, existing, sink)
}

/// Imports from an arbitrary reader of a known or sniffable format.
///
/// # Errors
/// Any [`ImportError`] from reading or processing.
pub fn import_from_reader<R: Read>(
    mut reader: R,
    name: &Path,
    existing: &mut ExistingIds,
    sink: &dyn BulkImport,
    opts: &ImportOptions,
) -> Result<ImportReport> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    import_bytes(name, bytes, existing, sink, opts)
}

/// Imports a file from disk.
///
/// # Errors
/// I/O errors opening the file plus any [`ImportError`] from the run.
pub fn import_file<P: AsRef<Path>>(
    path: P,
    existing: &mut ExistingIds,
    sink: &dyn BulkImport,
    opts: &ImportOptions,
) -> Result<ImportReport> {
    let path = path.as_ref();
    log::info!("import: path={}", path.display());
    let reader = BufReader::new(File::open(path)?);
    import_from_reader(reader, path, existing, sink, opts)
}

/// Like [`import_file`], waiting for the file bytes without blocking the runtime.
///
/// # Errors
/// I/O errors reading the file plus any [`ImportError`] from the run.
pub async fn import_file_async<P: AsRef<Path>>(
    path: P,
    existing: &mut ExistingIds,
    sink: &dyn BulkImport,
    opts: &ImportOptions,
) -> Result<ImportReport> {
    let path = path.as_ref();
    log::info!("import(async): path={}", path.display());
    let bytes = tokio::fs::read(path).await?;
    import_bytes(path, bytes, existing, sink, opts)
}
