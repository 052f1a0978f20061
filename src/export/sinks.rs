use std::io::{self, BufWriter, Write};

use super::options::CSV_COLUMNS;
use crate::product::Product;

pub trait ProductSink {
    fn write_product(&mut self, product: &Product) -> io::Result<()>;
    fn finish(self: Box<Self>) -> io::Result<()>;
}

pub struct NdjsonSink<W: Write> {
    w: BufWriter<W>,
}
impl<W: Write> NdjsonSink<W> {
    pub fn new(inner: W) -> Self { Self { w: BufWriter::new(inner) } }
}
impl<W: Write> ProductSink for NdjsonSink<W> {
    fn write_product(&mut self, product: &Product) -> io::Result<()> {
        let s = serde_json::to_string(product)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writeln!(self.w, "{s}")
    }
    fn finish(mut self: Box<Self>) -> io::Result<()> { self.w.flush() }
}

pub struct CsvSink<W: Write> {
    w: csv::Writer<BufWriter<W>>,
    wrote_headers: bool,
    write_headers: bool,
}
impl<W: Write> CsvSink<W> {
    pub fn new(inner: W, delimiter: u8, write_headers: bool) -> Self {
        let w = csv::WriterBuilder::new().delimiter(delimiter).from_writer(BufWriter::new(inner));
        Self { w, wrote_headers: false, write_headers }
    }
}
impl<W: Write> ProductSink for CsvSink<W> {
    fn write_product(&mut self, p: &Product) -> io::Result<()> {
        if self.write_headers && !self.wrote_headers {
            self.w.write_record(CSV_COLUMNS).map_err(|e| io::Error::other(e.to_string()))?;
            self.wrote_headers = true;
        }
        let original = if p.original_price > 0.0 { number_text(p.original_price) } else { String::new() };
        let row = [
            p.id.to_string(),
            p.name.clone(),
            number_text(p.price),
            original,
            p.sku.clone(),
            p.stock.to_string(),
            p.category.clone(),
            p.sub_category.clone(),
            p.brand.clone(),
            p.status.to_string(),
            p.tags.join(", "),
            p.gallery_images.join(";"),
            p.description.clone(),
        ];
        self.w.write_record(&row).map_err(|e| io::Error::other(e.to_string()))
    }
    fn finish(mut self: Box<Self>) -> io::Result<()> {
        self.w.flush().map_err(|e| io::Error::other(e.to_string()))
    }
}

/// `1200.0` -> `1200`, `12.5` -> `12.5`.
fn number_text(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        #[allow(clippy::cast_possible_truncation)]
        let i = n as i64;
        i.to_string()
    } else {
        n.to_string()
    }
}
