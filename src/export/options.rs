use std::str::FromStr;

/// Column order of the CSV export; matches what the standard import reads back.
pub const CSV_COLUMNS: &[&str] = &[
    "id",
    "name",
    "price",
    "originalPrice",
    "sku",
    "stock",
    "category",
    "subCategory",
    "brand",
    "status",
    "tags",
    "galleryImages",
    "description",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Ndjson,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "ndjson" | "json" | "jsonl" => Ok(Self::Ndjson),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub write_headers: bool,
}
impl Default for CsvOptions {
    fn default() -> Self { Self { delimiter: b',', write_headers: true } }
}

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub csv: CsvOptions,
    pub limit: Option<usize>,
}

#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: u64,
}
