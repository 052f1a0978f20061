use crate::media::ImageUrlNormalizer;
use crate::product::ProductId;

/// Physical file shape of an import source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    #[default]
    Auto,
    Csv,
    Tsv,
    /// Any workbook calamine can open (`.xlsx`, `.xls`, `.ods`).
    Xlsx,
}

impl TableFormat {
    pub fn delimiter(self) -> u8 {
        match self {
            Self::Tsv => b'\t',
            _ => b',',
        }
    }
}

impl std::fmt::Display for TableFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Auto => "auto",
            Self::Csv => "CSV",
            Self::Tsv => "TSV",
            Self::Xlsx => "XLSX",
        };
        f.write_str(s)
    }
}

/// Header layout of a sheet, decided once per import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetLayout {
    /// Daraz/Lazada seller-center bulk export.
    Marketplace,
    Standard,
}

impl SheetLayout {
    pub fn label(self) -> &'static str {
        match self {
            Self::Marketplace => "Daraz format",
            Self::Standard => "Standard format",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub format: TableFormat,
    /// Overrides the delimiter implied by `format` for delimited files.
    pub delimiter: Option<u8>,
    /// Rewrites image and gallery URLs of accepted records before commit.
    pub image_normalizer: Option<ImageUrlNormalizer>,
    pub progress_every: Option<usize>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self { format: TableFormat::Auto, delimiter: None, image_normalizer: None, progress_every: Some(1000) }
    }
}

#[derive(Debug, Clone)]
pub struct ImportReport {
    pub rows: usize,
    pub imported: usize,
    pub skipped: usize,
    pub layout: SheetLayout,
    pub ids: Vec<ProductId>,
}

impl ImportReport {
    pub fn summary(&self) -> String {
        format!("Imported {} products successfully! ({})", self.imported, self.layout.label())
    }
}
