//! In-memory product catalog backing the admin product list.
//!
//! The catalog is the receiver of import batches and the source of the
//! existing-id set for the next run. It persists as NDJSON, one product per line.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use parking_lot::RwLock;

use crate::errors::{ImportError, Result};
use crate::fsutil::{persist_atomic, temp_beside};
use crate::import::{BulkImport, ExistingIds};
use crate::product::{Product, ProductId};

#[derive(Debug, Default)]
pub struct ProductCatalog {
    products: RwLock<Vec<Product>>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products: RwLock::new(products) }
    }

    pub fn len(&self) -> usize {
        self.products.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.read().is_empty()
    }

    /// Snapshot of every id currently stored, for seeding an import run.
    pub fn existing_ids(&self) -> ExistingIds {
        self.products.read().iter().map(|p| p.id).collect()
    }

    /// Cloned snapshot in insertion order.
    pub fn products(&self) -> Vec<Product> {
        self.products.read().clone()
    }

    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.products.read().iter().find(|p| p.id == id).cloned()
    }

    pub fn remove(&self, id: ProductId) -> bool {
        let mut guard = self.products.write();
        let before = guard.len();
        guard.retain(|p| p.id != id);
        guard.len() != before
    }

    /// Appends the batch, refusing it whole if any id is already present or repeated.
    fn insert_all(&self, batch: Vec<Product>) -> Result<usize> {
        let mut guard = self.products.write();
        let mut seen: HashSet<ProductId> = guard.iter().map(|p| p.id).collect();
        if let Some(dup) = batch.iter().find(|p| !seen.insert(p.id)) {
            return Err(ImportError::Commit(format!("duplicate product id {}", dup.id)));
        }
        let n = batch.len();
        guard.extend(batch);
        Ok(n)
    }

    /// Loads an NDJSON catalog. A missing file is an empty catalog.
    ///
    /// # Errors
    /// I/O failures, malformed lines, or duplicate ids.
    pub fn load_ndjson(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("catalog {} not found; starting empty", path.display());
            return Ok(Self::new());
        }
        let reader = BufReader::new(File::open(path)?);
        let catalog = Self::new();
        let mut batch = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            batch.push(serde_json::from_str::<Product>(line)?);
        }
        catalog.insert_all(batch)?;
        log::info!("catalog: loaded {} products from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Writes the catalog through a temp file and renames it over `path`.
    ///
    /// # Errors
    /// I/O or serialization failures; `path` is left untouched on error.
    pub fn save_ndjson(&self, path: &Path) -> Result<()> {
        let tmp = temp_beside(path)?;
        {
            let mut w = BufWriter::new(tmp.as_file());
            for p in self.products.read().iter() {
                serde_json::to_writer(&mut w, p)?;
                w.write_all(b"\n")?;
            }
            w.flush()?;
        }
        persist_atomic(tmp, path)?;
        log::info!("catalog: saved {} products to {}", self.len(), path.display());
        Ok(())
    }
}

impl BulkImport for ProductCatalog {
    fn bulk_import(&self, products: Vec<Product>) -> Result<usize> {
        self.insert_all(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(id: ProductId, name: &str) -> Product {
        let mut p = Product::new(id);
        p.name = name.to_string();
        p
    }

    #[test]
    fn bulk_import_appends_in_order() {
        let cat = ProductCatalog::from_products(vec![named(1, "a")]);
        let n = cat.bulk_import(vec![named(2, "b"), named(3, "c")]).unwrap();
        assert_eq!(n, 2);
        let names: Vec<_> = cat.products().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn duplicate_ids_reject_the_whole_batch() {
        let cat = ProductCatalog::from_products(vec![named(1, "a")]);
        let err = cat.bulk_import(vec![named(2, "b"), named(1, "dup")]).unwrap_err();
        assert!(matches!(err, ImportError::Commit(_)));
        assert_eq!(cat.len(), 1);
        let err = cat.bulk_import(vec![named(5, "x"), named(5, "y")]).unwrap_err();
        assert!(matches!(err, ImportError::Commit(_)));
    }

    #[test]
    fn existing_ids_and_remove() {
        let cat = ProductCatalog::from_products(vec![named(1, "a"), named(2, "b")]);
        let ids = cat.existing_ids();
        assert!(ids.contains(1) && ids.contains(2));
        assert!(cat.remove(1));
        assert!(!cat.remove(1));
        assert!(cat.get(1).is_none());
        assert_eq!(cat.get(2).map(|p| p.name), Some("b".to_string()));
    }

    #[test]
    fn ndjson_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.ndjson");
        let cat = ProductCatalog::from_products(vec![named(10, "Lamp"), named(11, "Desk")]);
        cat.save_ndjson(&path).unwrap();
        let loaded = ProductCatalog::load_ndjson(&path).unwrap();
        assert_eq!(loaded.products(), cat.products());
    }

    #[test]
    fn save_replaces_existing_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.ndjson");
        ProductCatalog::from_products(vec![named(1, "Old")]).save_ndjson(&path).unwrap();
        ProductCatalog::from_products(vec![named(2, "New"), named(3, "Newer")]).save_ndjson(&path).unwrap();
        let names: Vec<_> = ProductCatalog::load_ndjson(&path).unwrap().products().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["New", "Newer"]);
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cat = ProductCatalog::load_ndjson(&dir.path().join("nope.ndjson")).unwrap();
        assert!(cat.is_empty());
    }

    #[test]
    fn malformed_line_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ndjson");
        std::fs::write(&path, "{\"id\":1,\"name\":\"a\",\"price\":1}\nnot json\n").unwrap();
        assert!(matches!(ProductCatalog::load_ndjson(&path), Err(ImportError::Json(_))));
    }
}
