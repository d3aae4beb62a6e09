//! Directory scanning for `.eml` archives

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use mailgist_domain::EmailMessage;
use tracing::{debug, warn};

use crate::eml::parse_eml_file;
use crate::error::LoaderError;

/// Load every `.eml` file in `dir`, in lexicographic filename order
///
/// Symlinks are never followed. Files that fail validation or parsing are
/// logged and skipped; one broken file cannot sink a batch.
///
/// # Errors
///
/// Returns [`LoaderError::Io`] when the directory itself cannot be read;
/// per-file failures never surface here.
pub fn scan_directory(dir: &Path) -> Result<Vec<EmailMessage>, LoaderError> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(OsStr::to_str) == Some("eml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut messages = Vec::with_capacity(paths.len());
    for path in paths {
        match fs::symlink_metadata(&path) {
            Ok(metadata) if metadata.file_type().is_symlink() => {
                warn!("skipping symlink {}", path.display());
                continue;
            }
            Err(error) => {
                warn!("skipping unreadable entry {}: {}", path.display(), error);
                continue;
            }
            Ok(_) => {}
        }
        match parse_eml_file(&path) {
            Ok(message) => {
                debug!("loaded {}", path.display());
                messages.push(message);
            }
            Err(error) => warn!("skipping {}: {}", path.display(), error),
        }
    }
    Ok(messages)
}
