// Stray NUL bytes show up in exported stat files; every loader strips them
// before parsing.

use std::path::Path;

use tracing::{debug, info};

use super::LoadError;

/// Return `bytes` with every NUL byte removed.
pub fn strip_nul(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().copied().filter(|&b| b != 0).collect()
}

/// Read a file and strip NUL bytes from its contents.
pub fn read_clean(path: &Path) -> Result<Vec<u8>, LoadError> {
    let raw = std::fs::read(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let cleaned = strip_nul(&raw);
    if cleaned.len() != raw.len() {
        debug!(
            "stripped {} NUL bytes from {}",
            raw.len() - cleaned.len(),
            path.display()
        );
    }
    Ok(cleaned)
}

/// Rewrite a file in place without its NUL bytes.
///
/// Returns the number of bytes removed. The file is left untouched when it
/// contains none.
pub fn clean_file_in_place(path: &Path) -> Result<usize, LoadError> {
    let raw = std::fs::read(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let cleaned = strip_nul(&raw);
    let removed = raw.len() - cleaned.len();
    if removed == 0 {
        return Ok(0);
    }

    std::fs::write(path, &cleaned).map_err(|e| LoadError::Write {
        path: path.display().to_string(),
        source: e,
    })?;
    info!("removed {} NUL bytes from {}", removed, path.display());
    Ok(removed)
}
