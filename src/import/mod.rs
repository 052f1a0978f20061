//! Spreadsheet import: CSV/TSV/XLSX sources mapped onto catalog products.

mod csv;
mod detect;
pub mod fields;
mod ids;
pub mod marketplace;
mod options;
mod pipeline;
pub mod standard;
mod table;
mod xlsx;

pub use self::csv::read_delimited;
pub use detect::{MARKETPLACE_MARKERS, detect_layout, detect_table_format};
pub use ids::{ExistingIds, IdAllocator, RANDOM_SPAN};
pub use options::{ImportOptions, ImportReport, SheetLayout, TableFormat};
pub use pipeline::{
    BulkImport, ImportPipeline, ImportStage, import_bytes, import_file, import_file_async,
    import_from_reader, process_rows, read_table,
};
pub use table::{Cell, Row, Table};
pub use xlsx::read_workbook;
