//! Header alias lookup and the lenient value conversions shared by both mappers.

use once_cell::sync::Lazy;
use regex::Regex;

use super::table::{Cell, Row};

static LEADING_FLOAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("valid regex"));
static LEADING_INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static NON_SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("valid regex"));
static HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").expect("valid regex"));

pub const MAX_SLUG_LEN: usize = 100;

/// First cell among `aliases` that is present and not blank.
pub fn first_present<'r>(row: &'r Row, aliases: &[&str]) -> Option<&'r Cell> {
    aliases.iter().filter_map(|a| row.get(a)).find(|c| !c.is_blank())
}

pub fn text(row: &Row, aliases: &[&str]) -> Option<String> {
    first_present(row, aliases).map(Cell::as_text)
}

pub fn text_or_default(row: &Row, aliases: &[&str]) -> String {
    text(row, aliases).unwrap_or_default()
}

pub fn number(row: &Row, aliases: &[&str]) -> f64 {
    match first_present(row, aliases) {
        Some(Cell::Number(n)) if n.is_finite() => *n,
        Some(Cell::Text(s)) => parse_leading_f64(s),
        _ => 0.0,
    }
}

/// Non-negative integer count; fractional and negative inputs are truncated and clamped.
pub fn count(row: &Row, aliases: &[&str]) -> u64 {
    match first_present(row, aliases) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(Cell::Number(n)) if n.is_finite() && *n > 0.0 => n.trunc() as u64,
        Some(Cell::Text(s)) => parse_leading_int(s).max(0).try_into().unwrap_or(0),
        _ => 0,
    }
}

pub fn list(row: &Row, aliases: &[&str]) -> Vec<String> {
    text(row, aliases).map(|s| split_list(&s)).unwrap_or_default()
}

/// Longest numeric prefix, ignoring surrounding whitespace; 0 when there is none.
pub fn parse_leading_f64(s: &str) -> f64 {
    LEADING_FLOAT
        .find(s.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

pub fn parse_leading_int(s: &str) -> i64 {
    LEADING_INT.find(s.trim()).and_then(|m| m.as_str().parse::<i64>().ok()).unwrap_or(0)
}

pub fn split_list(s: &str) -> Vec<String> {
    s.split(',').map(str::trim).filter(|p| !p.is_empty()).map(str::to_string).collect()
}

/// `Red  Shoe` -> `red-shoe`.
pub fn simple_slug(name: &str) -> String {
    WHITESPACE.replace_all(&name.to_lowercase(), "-").into_owned()
}

/// Drops non-word characters, hyphenates whitespace, collapses hyphen runs, caps length.
pub fn strict_slug(name: &str) -> String {
    let lower = name.to_lowercase();
    let stripped = NON_SLUG.replace_all(&lower, "");
    let hyphenated = WHITESPACE.replace_all(&stripped, "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.chars().take(MAX_SLUG_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn first_non_blank_alias_wins() {
        let r = row(&[("Name", ""), ("name", "  "), ("product_name", "Chair")]);
        assert_eq!(text(&r, &["name", "Name", "product_name"]).as_deref(), Some("Chair"));
        assert_eq!(text(&r, &["missing"]), None);
    }

    #[test]
    fn leading_number_parse() {
        assert_eq!(parse_leading_f64("1200"), 1200.0);
        assert_eq!(parse_leading_f64(" 12.50 BDT"), 12.5);
        assert_eq!(parse_leading_f64("1,200"), 1.0);
        assert_eq!(parse_leading_f64("abc"), 0.0);
        assert_eq!(parse_leading_int("7 pcs"), 7);
        assert_eq!(parse_leading_int("-3"), -3);
    }

    #[test]
    fn counts_are_clamped() {
        let r = row(&[("stock", "-5")]);
        assert_eq!(count(&r, &["stock"]), 0);
        let mut r2 = Row::new();
        r2.insert("stock", 4.9);
        assert_eq!(count(&r2, &["stock"]), 4);
    }

    #[test]
    fn list_split_drops_empty_parts() {
        assert_eq!(split_list("a.jpg, b.jpg,, ,c.jpg"), vec!["a.jpg", "b.jpg", "c.jpg"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn slugs() {
        assert_eq!(simple_slug("Red Shoe"), "red-shoe");
        assert_eq!(simple_slug("Big   Blue\tLamp"), "big-blue-lamp");
        assert_eq!(strict_slug("LED Lamp (Warm) -- 10W!"), "led-lamp-warm-10w");
        assert_eq!(strict_slug(&"x".repeat(150)).len(), MAX_SLUG_LEN);
        assert_eq!(strict_slug("!!!"), "");
    }
}
