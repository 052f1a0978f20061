//! Rewrites stored image references so they resolve from the storefront.

use once_cell::sync::Lazy;

use regex::{NoExpand, Regex};

use super::cdn::{CdnConfig, ImageTransformOptions, transform_url};
use crate::product::Product;

pub const PRODUCTION_URL: &str = "https://allinbangla.com";
pub const PRODUCTION_DOMAIN: &str = "allinbangla.com";
pub const CDN_HOSTS: &[&str] = &["cdn.allinbangla.com", "images.allinbangla.com", "static.allinbangla.com"];

static LOOPBACK_ORIGIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://(localhost|127\.0\.0\.1)(:\d+)?").expect("valid regex"));

#[derive(Debug, Clone)]
pub struct ImageUrlNormalizer {
    cdn: CdnConfig,
    api_base_url: Option<String>,
    origin: String,
    production_url: String,
    production_domain: String,
    cdn_hosts: Vec<String>,
}

impl Default for ImageUrlNormalizer {
    fn default() -> Self {
        Self::new(CdnConfig::default())
    }
}

impl ImageUrlNormalizer {
    pub fn new(cdn: CdnConfig) -> Self {
        Self {
            cdn: cdn.effective(),
            api_base_url: None,
            origin: PRODUCTION_URL.to_string(),
            production_url: PRODUCTION_URL.to_string(),
            production_domain: PRODUCTION_DOMAIN.to_string(),
            cdn_hosts: CDN_HOSTS.iter().map(|h| (*h).to_string()).collect(),
        }
    }

    /// Backend URL that upload paths hang off; ignored unless it is http(s).
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.api_base_url = (!url.trim().is_empty()).then_some(url);
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn cdn(&self) -> &CdnConfig {
        &self.cdn
    }

    fn base_url(&self) -> &str {
        match &self.api_base_url {
            Some(api) if is_http_with_host(api) => api,
            _ => &self.origin,
        }
    }

    fn on_cdn_host(&self, url: &str) -> bool {
        self.cdn_hosts.iter().any(|h| url.contains(h.as_str()))
    }

    pub fn normalize(&self, url: &str) -> String {
        let cleaned = strip_wrapping_quotes(url);
        if cleaned.is_empty() {
            return String::new();
        }
        let lower = cleaned.to_ascii_lowercase();
        if lower.starts_with("data:") {
            return normalize_data_url(cleaned);
        }
        if lower.starts_with("blob:") {
            return cleaned.to_string();
        }

        if self.cdn.enabled {
            if self.on_cdn_host(cleaned) {
                return cleaned.to_string();
            }
            if is_absolute(cleaned) {
                if cleaned.contains(self.production_domain.as_str()) && cleaned.contains("/uploads") {
                    return self.cdn_image_url(cleaned, None);
                }
                return cleaned.to_string();
            }
            if cleaned.starts_with("/uploads") || cleaned.starts_with("uploads/") {
                return self.cdn_image_url(cleaned, None);
            }
        }

        if let Some(host) = self.cdn_hosts.first()
            && cleaned.contains(host.as_str())
        {
            return replace_origin(cleaned, host, &self.production_url);
        }
        if cleaned.contains(self.production_domain.as_str()) {
            return cleaned.to_string();
        }
        if cleaned.starts_with("/uploads") {
            return format!("{}{cleaned}", self.base_url());
        }
        if cleaned.starts_with("uploads/") {
            return format!("{}/{cleaned}", self.base_url());
        }
        if cleaned.contains("localhost") || cleaned.contains("127.0.0.1") {
            return LOOPBACK_ORIGIN.replace(cleaned, NoExpand(self.base_url())).into_owned();
        }
        cleaned.to_string()
    }

    /// Normalizes each URL and drops the ones that come out empty.
    pub fn normalize_all<I, S>(&self, urls: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        urls.into_iter().map(|u| self.normalize(u.as_ref())).filter(|u| !u.is_empty()).collect()
    }

    pub fn normalize_product(&self, product: &mut Product) {
        product.image = self.normalize(&product.image);
        product.gallery_images = self.normalize_all(&product.gallery_images);
    }

    /// CDN URL for an image path. External absolute URLs are returned untouched.
    pub fn cdn_image_url(&self, path: &str, opts: Option<&ImageTransformOptions>) -> String {
        if path.is_empty() {
            return String::new();
        }
        if !self.cdn.enabled {
            return path.to_string();
        }
        let mut path = path;
        if is_absolute(path) {
            match self.api_base_url.as_deref().and_then(|api| path.strip_prefix(api)) {
                Some(rest) => path = rest,
                None => return path.to_string(),
            }
        }
        let path = leading_slash(path);
        let base = self.cdn.image_base();
        match opts {
            Some(o) if self.cdn.transform.enabled => transform_url(self.cdn.provider, base, &path, o),
            _ => format!("{base}{path}"),
        }
    }

    pub fn cdn_static_url(&self, path: &str) -> String {
        if path.is_empty() {
            return String::new();
        }
        if !self.cdn.enabled || is_absolute(path) {
            return path.to_string();
        }
        format!("{}{}", self.cdn.static_base(), leading_slash(path))
    }

    /// Single-entry `srcset`; empty for inline and blob images.
    pub fn responsive_src_set(&self, url: &str) -> String {
        let url = self.normalize(url);
        if url.is_empty() || url.starts_with("data:") || url.starts_with("blob:") {
            return String::new();
        }
        format!("{url} 1600w")
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn is_http_with_host(url: &str) -> bool {
    ["http://", "https://"].iter().any(|p| url.strip_prefix(p).is_some_and(|rest| !rest.is_empty()))
}

fn leading_slash(path: &str) -> String {
    if path.starts_with('/') { path.to_string() } else { format!("/{path}") }
}

fn strip_wrapping_quotes(value: &str) -> &str {
    let v = value.trim();
    let quoted = v.len() >= 2
        && ((v.starts_with('"') && v.ends_with('"')) || (v.starts_with('\'') && v.ends_with('\'')));
    if quoted { v[1..v.len() - 1].trim() } else { v }
}

/// Removes whitespace from base64 payloads; other data URLs pass unchanged.
fn normalize_data_url(v: &str) -> String {
    let Some((meta, data)) = v[5..].split_once(',') else {
        return v.to_string();
    };
    if !meta.to_ascii_lowercase().contains(";base64") {
        return v.to_string();
    }
    let data: String = data.chars().filter(|c| !c.is_whitespace()).collect();
    format!("data:{meta},{data}")
}

/// Swaps a leading `http(s)://host` for `replacement`.
fn replace_origin(url: &str, host: &str, replacement: &str) -> String {
    for scheme in ["https://", "http://"] {
        if let Some(rest) = url.strip_prefix(scheme)
            && let Some((head, tail)) = rest.split_at_checked(host.len())
            && head.eq_ignore_ascii_case(host)
        {
            return format!("{replacement}{tail}");
        }
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{CdnProvider, ImageFormat};

    fn with_cdn() -> ImageUrlNormalizer {
        ImageUrlNormalizer::new(CdnConfig {
            enabled: true,
            provider: CdnProvider::Cloudflare,
            base_url: "https://cdn.allinbangla.com/".into(),
            ..Default::default()
        })
    }

    #[test]
    fn quotes_and_blank() {
        let n = ImageUrlNormalizer::default();
        assert_eq!(n.normalize("  "), "");
        assert_eq!(n.normalize("\"https://x.com/a.jpg\""), "https://x.com/a.jpg");
        assert_eq!(n.normalize("'  '"), "");
    }

    #[test]
    fn data_urls_lose_payload_whitespace() {
        let n = ImageUrlNormalizer::default();
        assert_eq!(n.normalize("data:image/png;base64,iVBO\n Rw0 KGgo"), "data:image/png;base64,iVBORw0KGgo");
        assert_eq!(n.normalize("data:text/plain,a b"), "data:text/plain,a b");
        assert_eq!(n.normalize("blob:https://x/1"), "blob:https://x/1");
    }

    #[test]
    fn uploads_without_cdn_get_origin() {
        let n = ImageUrlNormalizer::default();
        assert_eq!(n.normalize("/uploads/a.jpg"), "https://allinbangla.com/uploads/a.jpg");
        assert_eq!(n.normalize("uploads/a.jpg"), "https://allinbangla.com/uploads/a.jpg");
        let n = n.with_api_base_url("https://api.shop.test");
        assert_eq!(n.normalize("/uploads/a.jpg"), "https://api.shop.test/uploads/a.jpg");
    }

    #[test]
    fn loopback_origins_are_replaced() {
        let n = ImageUrlNormalizer::default().with_origin("https://shop.test");
        assert_eq!(n.normalize("http://localhost:5001/uploads/a.jpg"), "https://shop.test/uploads/a.jpg");
        assert_eq!(n.normalize("http://127.0.0.1/x.png"), "https://shop.test/x.png");
    }

    #[test]
    fn cdn_host_falls_back_to_production_when_disabled() {
        let n = ImageUrlNormalizer::default();
        assert_eq!(
            n.normalize("https://cdn.allinbangla.com/uploads/a.jpg"),
            "https://allinbangla.com/uploads/a.jpg"
        );
        assert_eq!(n.normalize("https://allinbangla.com/a.jpg"), "https://allinbangla.com/a.jpg");
        assert_eq!(n.normalize("https://other.test/a.jpg"), "https://other.test/a.jpg");
    }

    #[test]
    fn uploads_move_to_cdn_when_enabled() {
        let n = with_cdn();
        assert_eq!(n.normalize("/uploads/a.jpg"), "https://cdn.allinbangla.com/uploads/a.jpg");
        assert_eq!(n.normalize("uploads/a.jpg"), "https://cdn.allinbangla.com/uploads/a.jpg");
        assert_eq!(
            n.normalize("https://images.allinbangla.com/a.jpg"),
            "https://images.allinbangla.com/a.jpg"
        );
        // Absolute production URLs stay put unless the API base lets us re-root them.
        assert_eq!(
            n.normalize("https://allinbangla.com/uploads/a.jpg"),
            "https://allinbangla.com/uploads/a.jpg"
        );
        let n = n.with_api_base_url("https://allinbangla.com");
        assert_eq!(
            n.normalize("https://allinbangla.com/uploads/a.jpg"),
            "https://cdn.allinbangla.com/uploads/a.jpg"
        );
    }

    #[test]
    fn normalize_all_drops_empties() {
        let n = ImageUrlNormalizer::default();
        let out = n.normalize_all(["", "/uploads/a.jpg", "  "]);
        assert_eq!(out, vec!["https://allinbangla.com/uploads/a.jpg"]);
    }

    #[test]
    fn transformed_cdn_url() {
        let mut cfg = with_cdn().cdn().clone();
        cfg.transform.enabled = true;
        let n = ImageUrlNormalizer::new(cfg);
        let opts = ImageTransformOptions { width: Some(300), format: Some(ImageFormat::Webp), ..Default::default() };
        assert_eq!(
            n.cdn_image_url("uploads/a.jpg", Some(&opts)),
            "https://cdn.allinbangla.com/cdn-cgi/image/width=300,format=webp/uploads/a.jpg"
        );
        assert_eq!(n.cdn_image_url("https://elsewhere.test/a.jpg", Some(&opts)), "https://elsewhere.test/a.jpg");
    }

    #[test]
    fn static_and_srcset() {
        let n = with_cdn();
        assert_eq!(n.cdn_static_url("js/app.js"), "https://cdn.allinbangla.com/js/app.js");
        assert_eq!(ImageUrlNormalizer::default().cdn_static_url("js/app.js"), "js/app.js");
        assert_eq!(n.responsive_src_set("/uploads/a.jpg"), "https://cdn.allinbangla.com/uploads/a.jpg 1600w");
        assert_eq!(n.responsive_src_set("data:image/png;base64,AA"), "");
    }
}
