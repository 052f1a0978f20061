//! Mapper for Daraz/Lazada seller-center bulk exports.
//!
//! These sheets mark required columns with a leading `*`, spread the gallery over
//! numbered image columns and carry the description as ready-made HTML.

use super::fields::{self, count, number, strict_slug, text};
use super::ids::IdAllocator;
use super::table::Row;
use crate::product::{Product, ProductStatus};

/// Gallery slots in output order; each slot accepts the starred and plain spelling.
pub const IMAGE_SLOTS: &[&str] = &[
    "Product Images1",
    "Product Images2",
    "Product Images3",
    "Product Images4",
    "Product Images5",
    "Product Images6",
    "Product Images7",
    "Product Images8",
    "White Background Image",
];

pub const NAME: &[&str] =
    &["*Product Name(English)", "Product Name(English)", "*Product Name", "Product Name"];
pub const NAME_BENGALI: &[&str] = &["Product Name(Bengali)"];
pub const DESCRIPTION: &[&str] = &["Main Description", "Description"];
pub const HIGHLIGHTS: &[&str] = &["Highlights"];
pub const WARRANTY: &[&str] = &["Warranty"];
pub const WARRANTY_TYPE: &[&str] = &["Warranty Type"];
pub const WARRANTY_POLICY: &[&str] = &["Warranty Policy"];
pub const PRICE: &[&str] = &["Price", "*Price", "Sale Price"];
pub const ORIGINAL_PRICE: &[&str] = &["Original Price", "Regular Price"];
pub const CATEGORY: &[&str] = &["Category", "*Category"];
pub const SUB_CATEGORY: &[&str] = &["Sub Category"];
pub const CHILD_CATEGORY: &[&str] = &["Child Category"];
pub const BRAND: &[&str] = &["Brand", "*Brand"];
pub const SKU: &[&str] = &["SKU", "Product ID"];
pub const STOCK: &[&str] = &["Stock", "Quantity"];

pub fn map_row(row: &Row, ids: &mut IdAllocator<'_>) -> Product {
    let mut p = Product::new(ids.allocate());
    let name = text(row, NAME).unwrap_or_default();

    p.gallery_images = gallery(row);
    p.image = p.gallery_images.first().cloned().unwrap_or_default();
    p.description = description(row);
    p.price = number(row, PRICE);
    p.original_price = number(row, ORIGINAL_PRICE);
    p.category = fields::text_or_default(row, CATEGORY);
    p.sub_category = fields::text_or_default(row, SUB_CATEGORY);
    p.child_category = fields::text_or_default(row, CHILD_CATEGORY);
    p.brand = fields::text_or_default(row, BRAND);
    if let Some(sku) = text(row, SKU) {
        p.sku = sku;
    }
    p.stock = count(row, STOCK);
    p.status = ProductStatus::Active;

    let slug = strict_slug(&name);
    if !slug.is_empty() {
        p.slug = slug;
    }
    if !name.is_empty() {
        p.name = name;
    }
    p
}

/// Non-empty image cells in slot order.
pub fn gallery(row: &Row) -> Vec<String> {
    IMAGE_SLOTS
        .iter()
        .filter_map(|slot| {
            let starred = format!("*{slot}");
            text(row, &[starred.as_str(), *slot])
        })
        .map(|s| s.trim().to_string())
        .collect()
}

/// Bengali name, main HTML, highlights and warranty, in that order; each optional.
pub fn description(row: &Row) -> String {
    let mut html = String::new();
    if let Some(bn) = text(row, NAME_BENGALI) {
        html.push_str(&format!("<p><strong>Bengali:</strong> {bn}</p>"));
    }
    html.push_str(&fields::text_or_default(row, DESCRIPTION));
    if let Some(hl) = text(row, HIGHLIGHTS) {
        html.push_str(&format!("<div class=\"highlights\"><h4>Highlights</h4>{hl}</div>"));
    }
    let warranty: Vec<String> =
        [WARRANTY, WARRANTY_TYPE, WARRANTY_POLICY].iter().filter_map(|a| text(row, a)).collect();
    if !warranty.is_empty() {
        html.push_str(&format!("<p><strong>Warranty:</strong> {}</p>", warranty.join(" - ")));
    }
    html
}
