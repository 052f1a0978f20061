use std::io::Cursor;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};

use super::TableFormat;
use super::table::{Cell, Row, Table};
use crate::errors::{ImportError, Result};

/// Reads the first worksheet of a workbook held in memory.
pub fn read_workbook(bytes: Vec<u8>) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| ImportError::parse(TableFormat::Xlsx, e))?;
    let Some(first) = workbook.sheet_names().first().cloned() else {
        return Err(ImportError::parse(TableFormat::Xlsx, "workbook has no sheets"));
    };
    let range = workbook
        .worksheet_range(&first)
        .map_err(|e| ImportError::parse(TableFormat::Xlsx, format!("sheet {first:?}: {e}")))?;
    let table = range_to_table(&range);
    log::debug!("read {} rows from sheet {first:?}", table.rows.len());
    Ok(table)
}

fn range_to_table(range: &Range<Data>) -> Table {
    let mut rows_iter = range.rows();
    let Some(header_row) = rows_iter.next() else {
        return Table::default();
    };
    let headers = header_names(header_row);
    let mut rows = Vec::new();
    for cells in rows_iter {
        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), cells.get(i).map(data_to_cell).unwrap_or_else(Cell::empty)))
            .collect();
        if !row.is_blank() {
            rows.push(row);
        }
    }
    Table { headers, rows }
}

/// Blank header cells get spreadsheet-style `__EMPTY`, `__EMPTY_1`, ... names.
fn header_names(cells: &[Data]) -> Vec<String> {
    let mut blanks = 0usize;
    cells
        .iter()
        .map(|c| {
            let name = data_to_cell(c).as_text();
            if !name.trim().is_empty() {
                return name;
            }
            let generated = if blanks == 0 { "__EMPTY".to_string() } else { format!("__EMPTY_{blanks}") };
            blanks += 1;
            generated
        })
        .collect()
}

pub fn data_to_cell(d: &Data) -> Cell {
    match d {
        Data::Empty => Cell::empty(),
        Data::String(s) => Cell::Text(s.clone()),
        #[allow(clippy::cast_precision_loss)]
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(format!("#{e:?}")),
    }
}
