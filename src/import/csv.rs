use std::io::Read;

use super::TableFormat;
use super::table::{Cell, Row, Table};
use crate::errors::{ImportError, Result};

/// Reads a delimited file; the first record is the header row.
pub fn read_delimited<R: Read>(reader: R, delimiter: u8, format: TableFormat) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| ImportError::parse(format, e))?
        .iter()
        .enumerate()
        .map(|(i, h)| if i == 0 { h.trim_start_matches('\u{feff}').to_string() } else { h.to_string() })
        .collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ImportError::parse(format, "missing header row"));
    }
    let mut rows = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec.map_err(|e| ImportError::parse(format, format!("record {}: {e}", line + 1)))?;
        let mut fields = rec.iter();
        let row: Row = headers
            .iter()
            .map(|h| (h.clone(), fields.next().map(Cell::from).unwrap_or_else(Cell::empty)))
            .collect();
        if row.is_blank() {
            continue;
        }
        rows.push(row);
    }
    log::debug!("read {} {format} rows with {} columns", rows.len(), headers.len());
    Ok(Table { headers, rows })
}
