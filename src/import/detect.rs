//! Format detection: file shape from name/content, sheet layout from headers.

use std::path::Path;

use super::{SheetLayout, TableFormat};

/// Header names only seen in marketplace bulk exports (required-field `*` stripped).
pub const MARKETPLACE_MARKERS: &[&str] =
    &["Product Name(English)", "Product Images1", "Main Description"];

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Decides the table format from the extension, falling back to sniffing `head`.
pub fn detect_table_format(path: &Path, head: &[u8]) -> Option<TableFormat> {
    if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => return Some(TableFormat::Csv),
            "tsv" | "tab" => return Some(TableFormat::Tsv),
            "xlsx" | "xlsm" | "xls" | "ods" => return Some(TableFormat::Xlsx),
            _ => {}
        }
    }
    if head.starts_with(ZIP_MAGIC) || head.starts_with(OLE_MAGIC) {
        return Some(TableFormat::Xlsx);
    }
    let text = String::from_utf8_lossy(&head[..head.len().min(4096)]);
    let first_line = text.lines().next()?;
    if first_line.matches('\t').count() > first_line.matches(',').count() {
        Some(TableFormat::Tsv)
    } else if first_line.contains(',') {
        Some(TableFormat::Csv)
    } else {
        None
    }
}

/// Classifies the header set. Pure; depends on headers only.
pub fn detect_layout<S: AsRef<str>>(headers: &[S]) -> SheetLayout {
    let hit = headers.iter().any(|h| {
        let h = h.as_ref().trim();
        let h = h.strip_prefix('*').unwrap_or(h).trim_start();
        MARKETPLACE_MARKERS.iter().any(|m| h.contains(m))
    });
    if hit { SheetLayout::Marketplace } else { SheetLayout::Standard }
}
