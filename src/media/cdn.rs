//! CDN settings and provider-specific image transformation URLs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CdnProvider {
    Cloudflare,
    CloudFront,
    BunnyCdn,
    Custom,
    #[default]
    None,
}

impl FromStr for CdnProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cloudflare" => Ok(Self::Cloudflare),
            "cloudfront" => Ok(Self::CloudFront),
            "bunnycdn" | "bunny" => Ok(Self::BunnyCdn),
            "custom" => Ok(Self::Custom),
            "" | "none" => Ok(Self::None),
            other => Err(format!("unknown CDN provider: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Auto,
    Webp,
    Avif,
    Jpeg,
    Png,
    Original,
}

impl ImageFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Webp => "webp",
            Self::Avif => "avif",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Original => "original",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageFit {
    #[default]
    Cover,
    Contain,
    ScaleDown,
    Crop,
}

impl fmt::Display for ImageFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cover => "cover",
            Self::Contain => "contain",
            Self::ScaleDown => "scale-down",
            Self::Crop => "crop",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageTransformSettings {
    pub enabled: bool,
    pub quality: u8,
    pub format: ImageFormat,
    pub fit: ImageFit,
}

impl Default for ImageTransformSettings {
    fn default() -> Self {
        Self { enabled: false, quality: 80, format: ImageFormat::Auto, fit: ImageFit::Cover }
    }
}

/// Per-request transformation. Zero or missing values add no parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageTransformOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<u8>,
    pub format: Option<ImageFormat>,
    pub fit: Option<ImageFit>,
}

impl ImageTransformOptions {
    /// Options carrying the configured format and fit, sized by the caller.
    pub fn from_settings(settings: &ImageTransformSettings) -> Self {
        Self { format: Some(settings.format), fit: Some(settings.fit), ..Self::default() }
    }

    fn width(&self) -> Option<u32> {
        self.width.filter(|w| *w > 0)
    }

    fn height(&self) -> Option<u32> {
        self.height.filter(|h| *h > 0)
    }

    fn quality(&self) -> Option<u8> {
        self.quality.filter(|q| *q > 0)
    }

    fn format(&self) -> Option<&'static str> {
        self.format.filter(|f| *f != ImageFormat::Auto).map(ImageFormat::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CdnConfig {
    pub enabled: bool,
    pub provider: CdnProvider,
    pub base_url: String,
    /// Falls back to `base_url` when empty.
    pub image_base_url: String,
    /// Falls back to `base_url` when empty.
    pub static_base_url: String,
    pub transform: ImageTransformSettings,
}

impl CdnConfig {
    /// Settings as the normalizer sees them: disabled unless both the flag and a
    /// base URL are present, trailing slash removed, derived URLs filled in.
    pub fn effective(&self) -> Self {
        let base = self.base_url.trim();
        if !self.enabled || base.is_empty() {
            return Self::default();
        }
        let base = base.strip_suffix('/').unwrap_or(base).to_string();
        let or_base = |s: &str| if s.trim().is_empty() { base.clone() } else { s.trim().to_string() };
        Self {
            enabled: true,
            provider: self.provider,
            image_base_url: or_base(&self.image_base_url),
            static_base_url: or_base(&self.static_base_url),
            base_url: base,
            transform: self.transform.clone(),
        }
    }

    pub fn image_base(&self) -> &str {
        if self.image_base_url.is_empty() { &self.base_url } else { &self.image_base_url }
    }

    pub fn static_base(&self) -> &str {
        if self.static_base_url.is_empty() { &self.base_url } else { &self.static_base_url }
    }
}

/// Builds the provider's transformation URL for `path` (which starts with `/`).
pub fn transform_url(provider: CdnProvider, base: &str, path: &str, opts: &ImageTransformOptions) -> String {
    match provider {
        CdnProvider::Cloudflare => {
            let mut params = Vec::new();
            if let Some(w) = opts.width() {
                params.push(format!("width={w}"));
            }
            if let Some(h) = opts.height() {
                params.push(format!("height={h}"));
            }
            if let Some(q) = opts.quality() {
                params.push(format!("quality={q}"));
            }
            if let Some(f) = opts.format() {
                params.push(format!("format={f}"));
            }
            if let Some(fit) = opts.fit {
                params.push(format!("fit={fit}"));
            }
            if params.is_empty() {
                format!("{base}{path}")
            } else {
                format!("{base}/cdn-cgi/image/{}{path}", params.join(","))
            }
        }
        CdnProvider::BunnyCdn => {
            let mut q = Query::default();
            q.push("width", opts.width());
            q.push("height", opts.height());
            q.push("quality", opts.quality());
            q.push("format", opts.format());
            q.finish(base, path)
        }
        CdnProvider::CloudFront => {
            let mut q = Query::default();
            q.push("w", opts.width());
            q.push("h", opts.height());
            q.push("q", opts.quality());
            q.push("fm", opts.format());
            q.push("fit", opts.fit);
            q.finish(base, path)
        }
        CdnProvider::Custom | CdnProvider::None => {
            let mut q = Query::default();
            q.push("w", opts.width());
            q.push("h", opts.height());
            q.push("q", opts.quality());
            q.push("f", opts.format());
            q.push("fit", opts.fit);
            q.finish(base, path)
        }
    }
}

#[derive(Default)]
struct Query(Vec<String>);

impl Query {
    fn push<V: fmt::Display>(&mut self, key: &str, value: Option<V>) {
        if let Some(v) = value {
            self.0.push(format!("{key}={v}"));
        }
    }

    fn finish(self, base: &str, path: &str) -> String {
        if self.0.is_empty() { format!("{base}{path}") } else { format!("{base}{path}?{}", self.0.join("&")) }
    }
}
