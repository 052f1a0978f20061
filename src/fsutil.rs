use std::io;
use std::path::Path;

use tempfile::NamedTempFile;

/// Temp file next to `dest`, so the final rename stays on one filesystem.
///
/// # Errors
/// Returns an error if the parent directory cannot be created or the temp file cannot be opened.
pub fn temp_beside(dest: &Path) -> io::Result<NamedTempFile> {
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        std::fs::create_dir_all(parent)?;
    }
    NamedTempFile::new_in(parent)
}

/// Renames a finished temp file over `dest`, retrying briefly for Windows-style sharing errors.
///
/// The rename replaces `dest` in one step, so `dest` keeps its old content until it succeeds.
///
/// # Errors
/// Returns the last error seen when every attempt fails.
pub fn persist_atomic(mut tmp: NamedTempFile, dest: &Path) -> io::Result<()> {
    let mut last_err: Option<io::Error> = None;
    for attempt in 0..5 {
        match tmp.persist(dest) {
            Ok(_) => return Ok(()),
            Err(pe) => {
                last_err = Some(pe.error);
                tmp = pe.file;
                std::thread::sleep(std::time::Duration::from_millis(10 + attempt * 5));
            }
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::other("failed to persist file")))
}
