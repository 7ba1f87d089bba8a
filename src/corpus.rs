use crate::error::KeResult;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Concatenates every `*.txt` file in `dir`, newline-joined in file name order.
///
/// Files that are not valid UTF-8 are skipped with a warning.
pub fn load_corpus_dir<P: AsRef<Path>>(dir: P) -> KeResult<String> {
    let dir = dir.as_ref();
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();

    let mut parts = Vec::with_capacity(files.len());
    for path in &files {
        match fs::read(path) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => {
                    debug!("   Loaded {} ({} bytes)", path.display(), text.len());
                    parts.push(text);
                }
                Err(_) => warn!("Skipping non UTF-8 file {}", path.display()),
            },
            Err(e) => warn!("Skipping unreadable file {}: {}", path.display(), e),
        }
    }

    info!(
        "📚 Corpus: {} files from '{}'",
        parts.len(),
        dir.display()
    );
    Ok(parts.join("\n"))
}
