//! Comparison of generated files against the reference directory.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ppmcheck_fs::{discover, Filesystem, FsError};

use crate::normalize::normalize_line_endings;
use crate::types::{ByteDiff, Comparison};

/// Errors that can occur during verification.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("failed to list {}: {source}", .dir.display())]
    List {
        dir: PathBuf,
        #[source]
        source: FsError,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: FsError,
    },
}

/// Compare generated bytes with reference bytes.
///
/// Only the generated side is normalised; the reference is trusted as is.
pub fn compare_bytes(file: &str, generated: &[u8], reference: &[u8]) -> Comparison {
    let generated = normalize_line_endings(generated);
    match ByteDiff::new(reference, &generated) {
        None => Comparison::matched(file),
        Some(diff) => Comparison::mismatched(file, diff),
    }
}

/// Compares files of a generated directory with a reference directory.
pub struct Verifier<'a, F: Filesystem> {
    fs: &'a F,
    generated_dir: &'a Path,
    reference_dir: &'a Path,
}

impl<'a, F: Filesystem> Verifier<'a, F> {
    pub fn new(fs: &'a F, generated_dir: &'a Path, reference_dir: &'a Path) -> Self {
        Self {
            fs,
            generated_dir,
            reference_dir,
        }
    }

    /// Generated files with extension `ext`, sorted.
    pub fn generated_files(&self, ext: &str) -> Result<Vec<String>, VerifyError> {
        discover(self.fs, self.generated_dir, ext).map_err(|source| VerifyError::List {
            dir: self.generated_dir.to_path_buf(),
            source,
        })
    }

    /// Names of every regular file in the reference directory.
    pub fn reference_names(&self) -> Result<BTreeSet<String>, VerifyError> {
        let names = self
            .fs
            .list_files(self.reference_dir)
            .map_err(|source| VerifyError::List {
                dir: self.reference_dir.to_path_buf(),
                source,
            })?;
        Ok(names.into_iter().collect())
    }

    /// Compare one generated file against its same-named reference.
    pub fn compare(
        &self,
        file: &str,
        references: &BTreeSet<String>,
    ) -> Result<Comparison, VerifyError> {
        if !references.contains(file) {
            return Ok(Comparison::missing_reference(file));
        }

        let generated = self.read(&self.generated_dir.join(file))?;
        let reference = self.read(&self.reference_dir.join(file))?;

        Ok(compare_bytes(file, &generated, &reference))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, VerifyError> {
        self.fs.read_bytes(path).map_err(|source| VerifyError::Read {
            path: path.to_path_buf(),
            source,
        })
    }
}
