use clap::{Parser, Subcommand};
use std::path::PathBuf;
use storefront_import::cli::{self as prog_cli, OutputMode};
use storefront_import::config::{AppConfig, load_config};
use storefront_import::logger;

#[derive(Parser, Debug)]
#[command(name = "storefront-import", version, about = "Bulk product import/export for the storefront admin", long_about = None)]
struct Cli {
    /// Path to a config file (TOML)
    #[arg(long, help = "Path to a config file (TOML). If omitted, defaults are used.")]
    config: Option<PathBuf>,
    /// Override catalog path (takes precedence over config)
    #[arg(long, help = "Override catalog NDJSON path. Takes precedence over config/env.")]
    catalog: Option<PathBuf>,
    #[arg(long, help = "Print results as JSON")]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Import products from a CSV/TSV/XLSX file into the catalog")]
    Import {
        #[arg(help = "Path to input file")]
        file: PathBuf,
        #[arg(long, help = "Format override: auto|csv|tsv|xlsx; defaults to auto-detect")]
        format: Option<String>,
        #[arg(long, help = "Rewrite image URLs for the storefront/CDN before saving")]
        normalize_images: bool,
    },
    #[command(about = "Report the file type and sheet layout without importing")]
    Detect {
        #[arg(help = "Path to input file")]
        file: PathBuf,
    },
    #[command(about = "Export the catalog to a file (CSV/NDJSON)")]
    Export {
        #[arg(help = "Path to output file; defaults to products_export_<date>.csv")]
        file: Option<PathBuf>,
        #[arg(long, help = "Format: csv|ndjson; defaults to csv")]
        format: Option<String>,
        #[arg(long, help = "Export at most N products")]
        limit: Option<usize>,
    },
    #[command(name = "image-url", about = "Normalize an image URL, optionally as a resized CDN URL")]
    ImageUrl {
        url: String,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
        #[arg(long)]
        quality: Option<u8>,
    },
}

fn init_logging(cfg: &AppConfig) {
    let res = if let Some(file) = &cfg.log.config_file {
        logger::init_path(file)
    } else if let Some(dir) = &cfg.log.dir {
        logger::configure_logging(Some(dir), cfg.log.level.as_deref(), cfg.log.retention)
    } else if std::env::var_os("STOREFRONT_IMPORT_LOG_DIR").is_some() {
        logger::configure_from_env()
    } else {
        logger::init_console(cfg.log.level.as_deref().or(Some("warn")))
    };
    if let Err(e) = res {
        eprintln!("warning: logging not initialized: {e}");
    }
}

fn main() {
    let cli = Cli::parse();
    let (mut cfg, warnings) = load_config(cli.config.as_deref());
    if let Some(c) = cli.catalog {
        cfg.catalog_path = Some(c);
    }
    init_logging(&cfg);
    // Config is read before the logger exists, so its warnings are replayed here.
    for w in &warnings {
        log::warn!("{w}");
    }
    let mode = if cli.json { OutputMode::Json } else { OutputMode::Human };

    let cmd = match cli.command {
        Commands::Import { file, format, normalize_images } => {
            prog_cli::Command::Import { file, format, normalize_images }
        }
        Commands::Detect { file } => prog_cli::Command::Detect { file },
        Commands::Export { file, format, limit } => {
            let file = file.unwrap_or_else(|| {
                PathBuf::from(storefront_import::export::default_file_name(chrono::Local::now().date_naive()))
            });
            prog_cli::Command::Export { file, format, limit }
        }
        Commands::ImageUrl { url, width, height, quality } => {
            prog_cli::Command::ImageUrl { url, width, height, quality }
        }
    };

    if let Err(e) = prog_cli::run_with_format(&cfg, cmd, mode) {
        log::error!("{e}");
        eprintln!("error: {}", e.user_message());
        std::process::exit(1);
    }
}
