use std::fs;
use storefront_import::cli::{Command, Outcome, OutputMode, execute};
use storefront_import::config::AppConfig;
use storefront_import::import::{SheetLayout, TableFormat};
use storefront_import::{ImportError, ProductCatalog};
use tempfile::tempdir;

fn config_in(dir: &std::path::Path) -> AppConfig {
    AppConfig { catalog_path: Some(dir.join("catalog.ndjson")), ..Default::default() }
}

#[test]
fn test_cli_import_then_export_csv() {
    let dir = tempdir().unwrap();
    let cfg = config_in(dir.path());
    let input = dir.path().join("in.csv");
    fs::write(&input, "name,price,tags\nRed Shoe,1200,\"shoes, red\"\nBlue Hat,300,\n").unwrap();

    let out = execute(&cfg, Command::Import { file: input.clone(), format: None, normalize_images: false }).unwrap();
    let Outcome::Imported(report) = &out else { panic!("unexpected outcome {out:?}") };
    assert_eq!(report.imported, 2);
    assert_eq!(out.render(OutputMode::Human), "Imported 2 products successfully! (Standard format)");

    // Catalog persisted; a second run sees the first run's ids.
    let saved = ProductCatalog::load_ndjson(&cfg.catalog_path()).unwrap();
    assert_eq!(saved.len(), 2);
    execute(&cfg, Command::Import { file: input, format: Some("csv".into()), normalize_images: false }).unwrap();
    assert_eq!(ProductCatalog::load_ndjson(&cfg.catalog_path()).unwrap().len(), 4);

    let export_path = dir.path().join("export.csv");
    let out = execute(&cfg, Command::Export { file: export_path.clone(), format: None, limit: None }).unwrap();
    assert!(matches!(out, Outcome::Exported { written: 4, .. }));
    let text = fs::read_to_string(&export_path).unwrap();
    assert!(text.starts_with("id,name,price,originalPrice,sku,stock"));
    assert!(text.contains("Red Shoe,1200,,SKU-"));
    assert!(text.contains("\"shoes, red\""));
}

#[test]
fn test_cli_import_of_junk_leaves_catalog_untouched() {
    let dir = tempdir().unwrap();
    let cfg = config_in(dir.path());
    let input = dir.path().join("junk.csv");
    fs::write(&input, "name,price,image\n,0,\n,,\n").unwrap();
    let err = execute(&cfg, Command::Import { file: input, format: None, normalize_images: false }).unwrap_err();
    assert!(matches!(err, ImportError::NoValidRecords { .. }));
    assert!(!cfg.catalog_path().exists());
}

#[test]
fn test_cli_detect_reports_layout() {
    let dir = tempdir().unwrap();
    let cfg = config_in(dir.path());
    let input = dir.path().join("daraz.tsv");
    fs::write(&input, "*Product Name(English)\tProduct Images1\nLamp\tl.jpg\n").unwrap();
    let out = execute(&cfg, Command::Detect { file: input }).unwrap();
    match &out {
        Outcome::Detected { format, layout, rows, headers } => {
            assert_eq!(*format, TableFormat::Tsv);
            assert_eq!(*layout, SheetLayout::Marketplace);
            assert_eq!(*rows, 1);
            assert_eq!(headers.len(), 2);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(out.render(OutputMode::Human), "format=TSV layout=Daraz format rows=1");
}

#[test]
fn test_cli_export_of_empty_catalog_fails() {
    let dir = tempdir().unwrap();
    let cfg = config_in(dir.path());
    let err = execute(&cfg, Command::Export { file: dir.path().join("x.csv"), format: None, limit: None }).unwrap_err();
    assert!(matches!(err, ImportError::NothingToExport));
}

#[test]
fn test_cli_rejects_unknown_formats() {
    let dir = tempdir().unwrap();
    let cfg = config_in(dir.path());
    let input = dir.path().join("in.csv");
    fs::write(&input, "name,price\nA,1\n").unwrap();
    let err = execute(&cfg, Command::Import { file: input, format: Some("bson".into()), normalize_images: false })
        .unwrap_err();
    assert!(matches!(err, ImportError::Config(_)));
}

#[test]
fn test_cli_image_url() {
    let mut cfg = AppConfig::default();
    let out = execute(
        &cfg,
        Command::ImageUrl { url: "/uploads/a.jpg".into(), width: None, height: None, quality: None },
    )
    .unwrap();
    assert_eq!(out.render(OutputMode::Human), "https://allinbangla.com/uploads/a.jpg");

    cfg.cdn.enabled = true;
    cfg.cdn.base_url = "https://cdn.allinbangla.com".into();
    cfg.cdn.provider = storefront_import::media::CdnProvider::BunnyCdn;
    cfg.cdn.transform.enabled = true;
    let out = execute(
        &cfg,
        Command::ImageUrl { url: "uploads/a.jpg".into(), width: Some(320), height: None, quality: Some(75) },
    )
    .unwrap();
    assert_eq!(out.render(OutputMode::Json), r#"{"url":"https://cdn.allinbangla.com/uploads/a.jpg?width=320&quality=75"}"#);
}
