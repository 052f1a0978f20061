use crate::export::ExportFormat;
use crate::import::TableFormat;

pub fn parse_format_input(s: Option<&str>) -> Option<String> {
    s.map(str::to_lowercase)
}

pub fn parse_table_format(s: Option<&str>) -> Result<TableFormat, String> {
    match parse_format_input(s).as_deref() {
        None | Some("auto") => Ok(TableFormat::Auto),
        Some("csv") => Ok(TableFormat::Csv),
        Some("tsv" | "tab") => Ok(TableFormat::Tsv),
        Some("xlsx" | "xls" | "excel") => Ok(TableFormat::Xlsx),
        Some(other) => Err(format!("unknown import format: {other}")),
    }
}

pub fn parse_export_format(s: Option<&str>) -> Result<ExportFormat, String> {
    s.map_or(Ok(ExportFormat::Csv), str::parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_format_parsing() {
        assert_eq!(parse_table_format(Some("CSV")), Ok(TableFormat::Csv));
        assert_eq!(parse_table_format(Some("tsv")), Ok(TableFormat::Tsv));
        assert_eq!(parse_table_format(Some("xls")), Ok(TableFormat::Xlsx));
        assert_eq!(parse_table_format(None), Ok(TableFormat::Auto));
        assert!(parse_table_format(Some("bson")).is_err());
    }

    #[test]
    fn export_format_parsing() {
        assert_eq!(parse_export_format(Some("ndjson")), Ok(ExportFormat::Ndjson));
        assert_eq!(parse_export_format(Some("jsonl")), Ok(ExportFormat::Ndjson));
        assert_eq!(parse_export_format(None), Ok(ExportFormat::Csv));
        assert!(parse_export_format(Some("xml")).is_err());
    }
}
