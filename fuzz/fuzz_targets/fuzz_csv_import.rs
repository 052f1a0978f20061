#![no_main]
use libfuzzer_sys::fuzz_target;
use std::path::Path;

struct Discard;

impl storefront_import::import::BulkImport for Discard {
    fn bulk_import(&self, products: Vec<storefront_import::Product>) -> storefront_import::Result<usize> {
        Ok(products.len())
    }
}

fuzz_target!(|data: &[u8]| {
    if data.len() > 16384 { return; }
    let mut ids = storefront_import::ExistingIds::new();
    let opts = storefront_import::ImportOptions::default();
    let _ = storefront_import::import::import_bytes(Path::new("fuzz.csv"), data.to_vec(), &mut ids, &Discard, &opts);
});
