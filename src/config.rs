//! Layered configuration: CLI > environment > config files > defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{ImportError, Result};
use crate::media::{CdnConfig, CdnProvider};

pub const CONFIG_FILE_NAME: &str = "storefront-import.toml";
pub const DEFAULT_CATALOG: &str = "catalog.ndjson";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImportSection {
    /// Single-character delimiter override for delimited files.
    pub delimiter: Option<String>,
    pub normalize_images: bool,
    pub api_base_url: Option<String>,
    pub origin: Option<String>,
}

impl ImportSection {
    /// # Errors
    /// [`ImportError::Config`] when the delimiter is not a single ASCII byte.
    pub fn delimiter_byte(&self) -> Result<Option<u8>> {
        match self.delimiter.as_deref() {
            None | Some("") => Ok(None),
            Some("\\t" | "tab") => Ok(Some(b'\t')),
            Some(s) if s.len() == 1 && s.is_ascii() => Ok(Some(s.as_bytes()[0])),
            Some(other) => Err(ImportError::Config(format!("delimiter must be one ASCII character, got {other:?}"))),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogSection {
    pub dir: Option<PathBuf>,
    pub level: Option<String>,
    pub retention: Option<usize>,
    /// log4rs YAML/TOML file; takes over from `dir`/`level` when set.
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog_path: Option<PathBuf>,
    pub import: ImportSection,
    pub cdn: CdnConfig,
    pub log: LogSection,
}

impl AppConfig {
    pub fn catalog_path(&self) -> PathBuf {
        self.catalog_path.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG))
    }

    /// # Errors
    /// [`ImportError::Config`] on malformed TOML.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ImportError::Config(e.to_string()))
    }

    /// Fills every unset field from `other`; fields already set win.
    fn fill_from(&mut self, other: AppConfig) {
        if self.catalog_path.is_none() { self.catalog_path = other.catalog_path; }
        if self.import.delimiter.is_none() { self.import.delimiter = other.import.delimiter; }
        self.import.normalize_images |= other.import.normalize_images;
        if self.import.api_base_url.is_none() { self.import.api_base_url = other.import.api_base_url; }
        if self.import.origin.is_none() { self.import.origin = other.import.origin; }
        if !self.cdn.enabled && self.cdn.base_url.is_empty() { self.cdn = other.cdn; }
        if self.log.dir.is_none() { self.log.dir = other.log.dir; }
        if self.log.level.is_none() { self.log.level = other.log.level; }
        if self.log.retention.is_none() { self.log.retention = other.log.retention; }
        if self.log.config_file.is_none() { self.log.config_file = other.log.config_file; }
    }

    /// Applies `STOREFRONT_IMPORT_*` overrides through `lookup`; returns a warning per ignored value.
    pub fn apply_env_with<F: Fn(&str) -> Option<String>>(&mut self, lookup: F) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(s) = lookup("STOREFRONT_IMPORT_CATALOG") {
            self.catalog_path = Some(PathBuf::from(s));
        }
        if let Some(s) = lookup("STOREFRONT_IMPORT_CDN_ENABLED") {
            self.cdn.enabled = matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(s) = lookup("STOREFRONT_IMPORT_CDN_BASE_URL") {
            self.cdn.base_url = s;
        }
        if let Some(s) = lookup("STOREFRONT_IMPORT_CDN_PROVIDER") {
            match s.parse::<CdnProvider>() {
                Ok(p) => self.cdn.provider = p,
                Err(e) => warnings.push(format!("ignoring STOREFRONT_IMPORT_CDN_PROVIDER: {e}")),
            }
        }
        warnings
    }
}

/// Candidate files in precedence order.
pub fn config_paths(cli_cfg: Option<&Path>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = vec![];
    if let Some(p) = cli_cfg { paths.push(p.to_path_buf()); }
    if let Ok(p) = std::env::var("STOREFRONT_IMPORT_CONFIG") { paths.push(PathBuf::from(p)); }
    if let Some(dir) = dirs_next::config_dir() { paths.push(dir.join(CONFIG_FILE_NAME)); }
    if let Ok(cur) = std::env::current_dir() { paths.push(cur.join(CONFIG_FILE_NAME)); }
    paths
}

/// Merges config files field by field; earlier paths win.
///
/// Unreadable or invalid files are skipped, and one warning per skipped file is
/// returned so the caller can report it once logging is up.
pub fn merge_files(paths: &[PathBuf]) -> (AppConfig, Vec<String>) {
    let mut cfg = AppConfig::default();
    let mut warnings = Vec::new();
    for p in paths {
        if !p.exists() {
            continue;
        }
        match std::fs::read_to_string(p).map_err(ImportError::from).and_then(|s| AppConfig::from_toml_str(&s)) {
            Ok(file_cfg) => cfg.fill_from(file_cfg),
            Err(e) => warnings.push(format!("config: skipping {}: {e}", p.display())),
        }
    }
    (cfg, warnings)
}

/// [`merge_files`] followed by environment overrides.
pub fn load_from_paths(paths: &[PathBuf]) -> (AppConfig, Vec<String>) {
    let (mut cfg, mut warnings) = merge_files(paths);
    warnings.extend(cfg.apply_env_with(|k| std::env::var(k).ok()));
    (cfg, warnings)
}

pub fn load_config(cli_cfg: Option<&Path>) -> (AppConfig, Vec<String>) {
    load_from_paths(&config_paths(cli_cfg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sections() {
        let cfg = AppConfig::from_toml_str(
            r#"
            catalog_path = "data/products.ndjson"
            [import]
            delimiter = ";"
            normalize_images = true
            [cdn]
            enabled = true
            provider = "cloudflare"
            base_url = "https://cdn.example.com/"
            [cdn.transform]
            enabled = true
            quality = 70
            [log]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.catalog_path(), PathBuf::from("data/products.ndjson"));
        assert_eq!(cfg.import.delimiter_byte().unwrap(), Some(b';'));
        assert!(cfg.import.normalize_images);
        assert_eq!(cfg.cdn.provider, CdnProvider::Cloudflare);
        assert_eq!(cfg.cdn.transform.quality, 70);
        assert_eq!(cfg.log.level.as_deref(), Some("debug"));
    }

    #[test]
    fn bad_delimiter_is_a_config_error() {
        let s = ImportSection { delimiter: Some("::".into()), ..Default::default() };
        assert!(matches!(s.delimiter_byte(), Err(ImportError::Config(_))));
        let tab = ImportSection { delimiter: Some("\\t".into()), ..Default::default() };
        assert_eq!(tab.delimiter_byte().unwrap(), Some(b'\t'));
    }

    #[test]
    fn earlier_files_win_and_invalid_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.toml");
        let broken = dir.path().join("broken.toml");
        let last = dir.path().join("last.toml");
        std::fs::write(&first, "catalog_path = \"a.ndjson\"\n").unwrap();
        std::fs::write(&broken, "catalog_path = [unterminated").unwrap();
        std::fs::write(&last, "catalog_path = \"b.ndjson\"\n[log]\nlevel = \"warn\"\n").unwrap();
        let missing = dir.path().join("missing.toml");
        let (cfg, warnings) = merge_files(&[first, broken.clone(), missing, last]);
        assert_eq!(cfg.catalog_path(), PathBuf::from("a.ndjson"));
        assert_eq!(cfg.log.level.as_deref(), Some("warn"));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains(&broken.display().to_string()));
    }

    #[test]
    fn env_overrides() {
        let mut cfg = AppConfig::default();
        let warnings = cfg.apply_env_with(|k| match k {
            "STOREFRONT_IMPORT_CATALOG" => Some("env.ndjson".into()),
            "STOREFRONT_IMPORT_CDN_ENABLED" => Some("TRUE".into()),
            "STOREFRONT_IMPORT_CDN_BASE_URL" => Some("https://cdn.env".into()),
            "STOREFRONT_IMPORT_CDN_PROVIDER" => Some("bunnycdn".into()),
            _ => None,
        });
        assert!(warnings.is_empty());
        assert_eq!(cfg.catalog_path(), PathBuf::from("env.ndjson"));
        assert!(cfg.cdn.enabled);
        assert_eq!(cfg.cdn.base_url, "https://cdn.env");
        assert_eq!(cfg.cdn.provider, CdnProvider::BunnyCdn);

        let warnings = cfg.apply_env_with(|k| (k == "STOREFRONT_IMPORT_CDN_PROVIDER").then(|| "akamai".to_string()));
        assert_eq!(warnings.len(), 1);
        assert_eq!(cfg.cdn.provider, CdnProvider::BunnyCdn);
    }

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.catalog_path(), PathBuf::from(DEFAULT_CATALOG));
        assert!(!cfg.cdn.enabled);
    }
}
