//! Bulk product import for a storefront admin.
//!
//! Supplier spreadsheets (CSV, TSV, Excel, including Daraz/Lazada seller
//! exports) are read into header-keyed rows, classified by layout, mapped onto
//! [`product::Product`] records with collision-free ids and handed to a
//! [`import::BulkImport`] collaborator such as [`catalog::ProductCatalog`].

pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod export;
pub mod fsutil;
pub mod import;
pub mod logger;
pub mod media;
pub mod product;

pub use catalog::ProductCatalog;
pub use errors::{ImportError, Result};
pub use import::{BulkImport, ExistingIds, ImportOptions, ImportReport, SheetLayout};
pub use product::{Product, ProductId, ProductStatus};
