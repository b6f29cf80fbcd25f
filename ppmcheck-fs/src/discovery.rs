//! File discovery by extension.
//!
//! Extension handling follows [`Path::extension`]: the extension is the
//! part after the final dot, a leading dot alone does not start one, and
//! the match is case-sensitive.

use std::path::Path;

use crate::filesystem::{Filesystem, FsError};

/// Extension of a filename, without the dot.
pub fn extension_of(name: &str) -> Option<&str> {
    Path::new(name).extension().and_then(|e| e.to_str())
}

/// Whether `name` ends in exactly `.ext`.
pub fn has_extension(name: &str, ext: &str) -> bool {
    extension_of(name) == Some(ext)
}

/// Filename with its final extension removed.
pub fn file_stem(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
}

/// Filename with its final extension replaced by `ext`.
pub fn replace_extension(name: &str, ext: &str) -> String {
    format!("{}.{}", file_stem(name), ext)
}

/// List the regular files in `dir` whose extension is `ext`.
///
/// The result is sorted ascending by filename so every run reports in the
/// same order. An empty result is not an error.
pub fn discover<F>(fs: &F, dir: &Path, ext: &str) -> Result<Vec<String>, FsError>
where
    F: Filesystem + ?Sized,
{
    let mut names: Vec<String> = fs
        .list_files(dir)?
        .into_iter()
        .filter(|name| has_extension(name, ext))
        .collect();

    names.sort();
    Ok(names)
}
