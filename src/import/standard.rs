//! Mapper for generic spreadsheets with loosely named columns.

use super::fields::{self, count, list, number, simple_slug, text};
use super::ids::IdAllocator;
use super::table::Row;
use crate::product::{Product, ProductStatus};

pub const NAME: &[&str] = &["name", "Name", "product_name"];
pub const PRICE: &[&str] = &["price", "Price", "salesPrice", "sales_price"];
pub const ORIGINAL_PRICE: &[&str] = &["originalPrice", "original_price", "regularPrice", "regular_price"];
pub const COST_PRICE: &[&str] = &["costPrice", "cost_price"];
pub const IMAGE: &[&str] = &["image", "Image", "mainImage", "main_image"];
pub const GALLERY: &[&str] = &["galleryImages", "gallery_images"];
pub const DESCRIPTION: &[&str] = &["description", "Description"];
pub const CATEGORY: &[&str] = &["category", "Category"];
pub const SUB_CATEGORY: &[&str] = &["subCategory", "sub_category"];
pub const CHILD_CATEGORY: &[&str] = &["childCategory", "child_category"];
pub const BRAND: &[&str] = &["brand", "Brand"];
pub const SKU: &[&str] = &["sku", "SKU"];
pub const STOCK: &[&str] = &["stock", "Stock", "quantity", "Quantity"];
pub const STATUS: &[&str] = &["status", "Status"];
pub const TAGS: &[&str] = &["tags", "Tags"];
pub const SLUG: &[&str] = &["slug", "Slug"];

pub fn map_row(row: &Row, ids: &mut IdAllocator<'_>) -> Product {
    let mut p = Product::new(ids.allocate());
    if let Some(name) = text(row, NAME) {
        p.name = name;
    }
    p.price = number(row, PRICE);
    p.original_price = number(row, ORIGINAL_PRICE);
    p.cost_price = number(row, COST_PRICE);
    p.image = fields::text_or_default(row, IMAGE);
    p.gallery_images = list(row, GALLERY);
    p.description = fields::text_or_default(row, DESCRIPTION);
    p.category = fields::text_or_default(row, CATEGORY);
    p.sub_category = fields::text_or_default(row, SUB_CATEGORY);
    p.child_category = fields::text_or_default(row, CHILD_CATEGORY);
    p.brand = fields::text_or_default(row, BRAND);
    if let Some(sku) = text(row, SKU) {
        p.sku = sku;
    }
    p.stock = count(row, STOCK);
    p.status = text(row, STATUS).map(|s| ProductStatus::from_cell(&s)).unwrap_or_default();
    p.tags = list(row, TAGS);
    let slug = text(row, SLUG).unwrap_or_else(|| simple_slug(&text(row, NAME).unwrap_or_default()));
    if !slug.is_empty() {
        p.slug = slug;
    }
    p
}
