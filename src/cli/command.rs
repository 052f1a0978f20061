use std::path::PathBuf;

pub enum Command {
    Import {
        file: PathBuf,
        format: Option<String>,
        normalize_images: bool,
    },
    Detect {
        file: PathBuf,
    },
    Export {
        file: PathBuf,
        format: Option<String>,
        limit: Option<usize>,
    },
    ImageUrl {
        url: String,
        width: Option<u32>,
        height: Option<u32>,
        quality: Option<u8>,
    },
}
