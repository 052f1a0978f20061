use thiserror::Error;

use crate::import::TableFormat;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Parse error ({format}): {cause}")]
    Parse { format: TableFormat, cause: String },

    #[error("No valid products found in file ({rows} rows read)")]
    NoValidRecords { rows: usize },

    #[error("Unsupported file: {0}")]
    UnsupportedFile(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Bulk import rejected: {0}")]
    Commit(String),

    #[error("No products to export")]
    NothingToExport,

    #[error("Config error: {0}")]
    Config(String),
}

impl ImportError {
    pub fn parse(format: TableFormat, cause: impl std::fmt::Display) -> Self {
        Self::Parse { format, cause: cause.to_string() }
    }

    /// Text shown to the person who triggered the import.
    pub fn user_message(&self) -> String {
        match self {
            Self::Parse { format, cause } => {
                format!("Failed to parse {format} file: {cause}. Please check the file and try again.")
            }
            Self::NoValidRecords { .. } => "No valid products found in file".to_string(),
            Self::UnsupportedFile(name) => {
                format!("Unsupported file type: {name}. Use a .csv, .tsv, .xlsx or .xls file.")
            }
            Self::NothingToExport => "No products to export".to_string(),
            other => format!("Failed to process file data: {other}"),
        }
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_empty_messages_differ() {
        let parse = ImportError::parse(TableFormat::Xlsx, "invalid zip header");
        let empty = ImportError::NoValidRecords { rows: 3 };
        assert!(parse.user_message().contains("check the file"));
        assert_eq!(empty.user_message(), "No valid products found in file");
        assert_ne!(parse.user_message(), empty.user_message());
    }

    #[test]
    fn display_includes_format() {
        let e = ImportError::parse(TableFormat::Csv, "invalid utf-8");
        assert_eq!(format!("{e}"), "Parse error (CSV): invalid utf-8");
    }
}
