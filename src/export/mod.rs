mod options;
mod pipeline;
mod sinks;

pub use options::{CSV_COLUMNS, CsvOptions, ExportFormat, ExportOptions, ExportReport};
pub use pipeline::{default_file_name, export_file, export_products};
