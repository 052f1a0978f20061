use serde::{Deserialize, Serialize};

pub type ProductId = u64;

/// Name given to records whose source row had no name cell.
pub const UNNAMED_PRODUCT: &str = "Unnamed Product";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    #[default]
    Active,
    Draft,
}

impl ProductStatus {
    /// Case-insensitive; unknown text falls back to `Active`.
    pub fn from_cell(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Self::Draft,
            _ => Self::Active,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Draft => "Draft",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canonical product record every import path converges on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: f64,
    #[serde(default)]
    pub cost_price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub gallery_images: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
    #[serde(default)]
    pub child_category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub stock: u64,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub slug: String,
}

impl Product {
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            name: UNNAMED_PRODUCT.to_string(),
            price: 0.0,
            original_price: 0.0,
            cost_price: 0.0,
            image: String::new(),
            gallery_images: Vec::new(),
            description: String::new(),
            category: String::new(),
            sub_category: String::new(),
            child_category: String::new(),
            brand: String::new(),
            sku: default_sku(id),
            stock: 0,
            status: ProductStatus::Active,
            tags: Vec::new(),
            slug: default_slug(id),
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty() && self.name != UNNAMED_PRODUCT
    }

    /// A record is usable when it carries a real name, a positive price or an image.
    pub fn is_usable(&self) -> bool {
        self.has_name() || self.price > 0.0 || !self.image.is_empty()
    }
}

pub fn default_sku(id: ProductId) -> String {
    format!("SKU-{id}")
}

pub fn default_slug(id: ProductId) -> String {
    format!("product-{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_is_lenient() {
        assert_eq!(ProductStatus::from_cell("Draft"), ProductStatus::Draft);
        assert_eq!(ProductStatus::from_cell(" DRAFT "), ProductStatus::Draft);
        assert_eq!(ProductStatus::from_cell("active"), ProductStatus::Active);
        assert_eq!(ProductStatus::from_cell("archived"), ProductStatus::Active);
        assert_eq!(ProductStatus::from_cell(""), ProductStatus::Active);
    }

    #[test]
    fn blank_record_is_not_usable() {
        let p = Product::new(7);
        assert!(!p.is_usable());
        assert_eq!(p.sku, "SKU-7");
        assert_eq!(p.slug, "product-7");
    }

    #[test]
    fn any_single_signal_makes_record_usable() {
        let mut named = Product::new(1);
        named.name = "Lamp".into();
        assert!(named.is_usable());

        let mut priced = Product::new(2);
        priced.price = 10.0;
        assert!(priced.is_usable());

        let mut pictured = Product::new(3);
        pictured.image = "a.jpg".into();
        assert!(pictured.is_usable());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let p = Product::new(5);
        let v = serde_json::to_value(&p).unwrap();
        assert!(v.get("galleryImages").is_some());
        assert!(v.get("originalPrice").is_some());
        assert_eq!(v["status"], "Active");
    }
}
