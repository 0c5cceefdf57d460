//! Loading sources from disk.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::errors::{SculptError, SculptResult};
use crate::source::history::Source;

const IGNORED_DIRS: &[&str] = &["target", "build", "out", "node_modules"];

fn is_ignored_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || IGNORED_DIRS.contains(&name.as_ref())
}

pub fn is_java_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case("java"))
        .unwrap_or(false)
}

/// Load one file as the origin version of a source named after the file.
pub fn load_source(path: &Path) -> SculptResult<Source> {
    let content = std::fs::read_to_string(path)?;
    let name = path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .ok_or_else(|| SculptError::InvalidLocation(format!("not a file: {}", path.display())))?;
    Ok(Source::new(name, content))
}

/// All `.java` files under `root`, sorted, skipping hidden and build dirs.
pub fn discover_java_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_ignored_dir(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_java_file(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Load every discovered file. Sources are named by their path relative to
/// `root` so that same-named files in different packages stay distinct.
pub fn load_sources(root: &Path) -> SculptResult<Vec<Source>> {
    discover_java_files(root)
        .into_iter()
        .map(|path| {
            let content = std::fs::read_to_string(&path)?;
            let rel = path
                .strip_prefix(root)
                .unwrap_or(&path)
                .to_string_lossy()
                .replace('\\', "/");
            Ok(Source::new(rel, content))
        })
        .collect()
}
