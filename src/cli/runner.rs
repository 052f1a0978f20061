use std::path::PathBuf;

use crate::catalog::ProductCatalog;
use crate::config::AppConfig;
use crate::errors::{ImportError, Result};
use crate::export::{ExportOptions, export_file};
use crate::import::{
    ImportOptions, ImportReport, SheetLayout, TableFormat, detect_layout, detect_table_format, import_file,
    read_table,
};
use crate::media::{ImageTransformOptions, ImageUrlNormalizer};

use super::command::Command;
use super::util::{parse_export_format, parse_table_format};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
}

/// What a command produced, before it is rendered for the terminal.
#[derive(Debug)]
pub enum Outcome {
    Imported(ImportReport),
    Detected { format: TableFormat, layout: SheetLayout, rows: usize, headers: Vec<String> },
    Exported { path: PathBuf, written: u64 },
    ImageUrl(String),
}

impl Outcome {
    pub fn render(&self, mode: OutputMode) -> String {
        match (self, mode) {
            (Self::Imported(r), OutputMode::Human) => r.summary(),
            (Self::Imported(r), OutputMode::Json) => serde_json::json!({
                "action": "imported",
                "rows": r.rows,
                "imported": r.imported,
                "skipped": r.skipped,
                "layout": r.layout.label(),
                "ids": r.ids,
            })
            .to_string(),
            (Self::Detected { format, layout, rows, .. }, OutputMode::Human) => {
                format!("format={format} layout={} rows={rows}", layout.label())
            }
            (Self::Detected { format, layout, rows, headers }, OutputMode::Json) => serde_json::json!({
                "format": format.to_string(),
                "layout": layout.label(),
                "rows": rows,
                "headers": headers,
            })
            .to_string(),
            (Self::Exported { path, written }, OutputMode::Human) => {
                format!("Exported {written} products to {}", path.display())
            }
            (Self::Exported { path, written }, OutputMode::Json) => {
                serde_json::json!({"action": "exported", "path": path.display().to_string(), "written": written})
                    .to_string()
            }
            (Self::ImageUrl(u), OutputMode::Human) => u.clone(),
            (Self::ImageUrl(u), OutputMode::Json) => serde_json::json!({"url": u}).to_string(),
        }
    }
}

/// Normalizer configured from the `[cdn]` and `[import]` sections.
pub fn normalizer_for(cfg: &AppConfig) -> ImageUrlNormalizer {
    let mut n = ImageUrlNormalizer::new(cfg.cdn.clone());
    if let Some(api) = &cfg.import.api_base_url {
        n = n.with_api_base_url(api.clone());
    }
    if let Some(origin) = &cfg.import.origin {
        n = n.with_origin(origin.clone());
    }
    n
}

/// Runs a command against the configured catalog and returns its outcome.
///
/// # Errors
/// Any [`ImportError`] raised by the underlying operation.
pub fn execute(cfg: &AppConfig, cmd: Command) -> Result<Outcome> {
    match cmd {
        Command::Import { file, format, normalize_images } => {
            let catalog_path = cfg.catalog_path();
            let catalog = ProductCatalog::load_ndjson(&catalog_path)?;
            let mut existing = catalog.existing_ids();
            let opts = ImportOptions {
                format: parse_table_format(format.as_deref()).map_err(ImportError::Config)?,
                delimiter: cfg.import.delimiter_byte()?,
                image_normalizer: (normalize_images || cfg.import.normalize_images).then(|| normalizer_for(cfg)),
                ..Default::default()
            };
            let report = import_file(&file, &mut existing, &catalog, &opts)?;
            catalog.save_ndjson(&catalog_path)?;
            Ok(Outcome::Imported(report))
        }
        Command::Detect { file } => {
            let bytes = std::fs::read(&file)?;
            let format = detect_table_format(&file, &bytes)
                .ok_or_else(|| ImportError::UnsupportedFile(file.display().to_string()))?;
            let opts = ImportOptions { format, delimiter: cfg.import.delimiter_byte()?, ..Default::default() };
            let table = read_table(&file, bytes, &opts)?;
            let layout = detect_layout(&table.headers);
            Ok(Outcome::Detected { format, layout, rows: table.rows.len(), headers: table.headers })
        }
        Command::Export { file, format, limit } => {
            let catalog = ProductCatalog::load_ndjson(&cfg.catalog_path())?;
            let opts = ExportOptions {
                format: parse_export_format(format.as_deref()).map_err(ImportError::Config)?,
                limit,
                ..Default::default()
            };
            let report = export_file(&catalog, &file, &opts)?;
            Ok(Outcome::Exported { path: file, written: report.written })
        }
        Command::ImageUrl { url, width, height, quality } => {
            let n = normalizer_for(cfg);
            if width.is_none() && height.is_none() && quality.is_none() {
                return Ok(Outcome::ImageUrl(n.normalize(&url)));
            }
            let opts = ImageTransformOptions {
                width,
                height,
                quality,
                ..ImageTransformOptions::from_settings(&n.cdn().transform)
            };
            Ok(Outcome::ImageUrl(n.cdn_image_url(url.trim(), Some(&opts))))
        }
    }
}

/// Runs a command and prints its outcome.
///
/// # Errors
/// Any [`ImportError`] raised by the command; nothing is printed in that case.
pub fn run_with_format(cfg: &AppConfig, cmd: Command, mode: OutputMode) -> Result<()> {
    let outcome = execute(cfg, cmd)?;
    println!("{}", outcome.render(mode));
    Ok(())
}

/// # Errors
/// See [`run_with_format`].
pub fn run(cfg: &AppConfig, cmd: Command) -> Result<()> {
    run_with_format(cfg, cmd, OutputMode::Human)
}
