//! Output path management: collision-free file names and `file://` links.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters that must be escaped inside a `file://` path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%');

/// Picks a file name that collides neither with a name already handed out
/// in this batch nor with a file already on disk.
///
/// The first free variant of `name.ext`, `name_1.ext`, `name_2.ext`, ... is
/// claimed in `used_names` and returned.
pub fn deduplicate_path(path: &Path, used_names: &mut HashSet<String>) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("file")
        .to_string();
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();

    let mut candidate = path.to_path_buf();
    let mut counter = 1usize;
    loop {
        let name = candidate
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or_default()
            .to_string();
        if !used_names.contains(&name) && !candidate.exists() {
            used_names.insert(name);
            return candidate;
        }
        candidate = path.with_file_name(format!("{stem}_{counter}{extension}"));
        counter += 1;
    }
}

/// Builds a browser-openable `file://` URL for a local path.
///
/// Under WSL the Linux path is rewritten to the `wsl.localhost` UNC form so
/// the link still resolves when the digest is opened in a Windows browser.
pub fn file_url(path: &Path) -> String {
    let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let encoded = encode_segments(&absolute);
    match wsl_distro() {
        Some(distro) => format!("file://wsl.localhost/{distro}{encoded}"),
        None => format!("file://{encoded}"),
    }
}

fn encode_segments(path: &Path) -> String {
    path.to_string_lossy()
        .split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Reports the WSL distribution name when running inside WSL.
fn wsl_distro() -> Option<String> {
    let release = fs::read_to_string("/proc/sys/kernel/osrelease").ok()?;
    if !release.to_lowercase().contains("microsoft") {
        return None;
    }
    std::env::var("WSL_DISTRO_NAME").ok()
}
